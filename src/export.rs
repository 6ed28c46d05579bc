use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::ExportError;
use crate::journal_entry::JournalEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Text,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

pub fn render(entries: &[JournalEntry], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
        ExportFormat::Text => Ok(render_text(entries)?),
    }
}

fn render_text(entries: &[JournalEntry]) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let title = if entry.title.is_empty() {
            "(untitled)"
        } else {
            entry.title.as_str()
        };
        writeln!(out, "{title}")?;
        writeln!(out, "Date: {}", entry.date)?;
        if let Some(location) = &entry.location {
            let place: Vec<&str> = [&location.city, &location.state, &location.country]
                .into_iter()
                .map(String::as_str)
                .filter(|p| !p.is_empty())
                .collect();
            writeln!(out, "Location: {}", place.join(", "))?;
        }
        writeln!(out)?;
        writeln!(out, "{}", entry.content.trim_end())?;
        writeln!(out, "{}", "-".repeat(40))?;
    }
    Ok(out)
}

/// Writes `entries` to `path`, returning how many were exported.
pub fn export_to_file(
    entries: &[JournalEntry],
    path: &Path,
    format: ExportFormat,
) -> Result<usize, ExportError> {
    fs::write(path, render(entries, format)?)?;
    Ok(entries.len())
}
