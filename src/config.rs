use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Learning journal - local entries kept in sync with a reflections service
#[derive(Parser, Debug)]
#[command(name = "journal", version, propagate_version = true)]
pub struct Args {
    /// Directory holding the local store
    #[arg(long, global = true, env = "JOURNAL_DATA_DIR", default_value = ".journal")]
    pub data_dir: PathBuf,

    /// Base URL of the reflections service
    #[arg(
        long,
        global = true,
        env = "JOURNAL_API_URL",
        default_value = "http://localhost:5000"
    )]
    pub api_url: String,

    /// Work against the local store only
    #[arg(long, global = true, env = "JOURNAL_OFFLINE")]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List entries: service entries first, then ones only stored locally
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a new entry
    Add {
        #[arg(long, short = 't', default_value = "")]
        title: String,

        /// Entry text; read from stdin when omitted
        #[arg(long, short = 'c')]
        content: Option<String>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        state: Option<String>,

        #[arg(long)]
        country: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Output the stored entry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the title or content of an entry
    Edit {
        id: String,

        #[arg(long, short = 't')]
        title: Option<String>,

        #[arg(long, short = 'c')]
        content: Option<String>,
    },

    /// Delete an entry
    Delete { id: String },

    /// Delete every entry, locally and remotely
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Search by keyword and/or date range (YYYY-MM-DD, inclusive)
    Search {
        #[arg(long, short = 'q')]
        keyword: Option<String>,

        #[arg(long = "from")]
        date_from: Option<String>,

        #[arg(long = "to")]
        date_to: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Export entries to a file
    Export {
        path: PathBuf,

        /// json or text
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Check that the reflections service is reachable
    Health,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JournalConfig {
    pub data_dir: PathBuf,
    pub api_url: String,
    pub remote_enabled: bool,
}

impl From<&Args> for JournalConfig {
    fn from(args: &Args) -> Self {
        JournalConfig {
            data_dir: args.data_dir.clone(),
            api_url: args.api_url.clone(),
            remote_enabled: !args.offline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_flag_disables_remote() {
        let args = Args::try_parse_from(["journal", "--offline", "list"]).unwrap();
        let config = JournalConfig::from(&args);
        assert!(!config.remote_enabled);
    }

    #[test]
    fn global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "journal",
            "search",
            "-q",
            "rust",
            "--api-url",
            "http://example.test",
            "--data-dir",
            "/tmp/j",
        ])
        .unwrap();
        let config = JournalConfig::from(&args);

        assert_eq!(config.api_url, "http://example.test");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/j"));
        assert!(matches!(
            args.command,
            Command::Search { keyword: Some(ref k), .. } if k == "rust"
        ));
    }
}
