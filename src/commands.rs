use std::io::{self, Read};

use color_eyre::eyre::{bail, eyre, Result};

use crate::config::Command;
use crate::export::{export_to_file, ExportFormat};
use crate::journal_entry::{EntryUpdate, JournalEntry, Location};
use crate::remote::RemoteEntries;
use crate::search::SearchFilter;
use crate::sync::{EntrySynchronizer, WriteOutcome};

pub async fn run<R: RemoteEntries>(sync: &EntrySynchronizer<R>, command: Command) -> Result<()> {
    match command {
        Command::List { json } => {
            let entries = sync.load_entries().await;
            print_entries(&entries, json)
        }
        Command::Add {
            title,
            content,
            city,
            state,
            country,
            lat,
            lon,
            json,
        } => {
            let content = match content {
                Some(content) => content,
                None => read_stdin()?,
            };
            let location = location_from_parts(city, state, country, lat, lon);
            let entry = JournalEntry::new(title, content, location)?;

            let outcome = sync.create(entry.clone()).await;
            report("Saved", &entry.id, outcome, sync.remote_enabled())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            }
            Ok(())
        }
        Command::Edit { id, title, content } => {
            let update = EntryUpdate { title, content };
            if update.is_empty() {
                bail!("Nothing to change: pass --title and/or --content");
            }
            let outcome = sync.update(&id, &update).await;
            report("Updated", &id, outcome, sync.remote_enabled())
        }
        Command::Delete { id } => {
            let outcome = sync.delete(&id).await;
            report("Deleted", &id, outcome, sync.remote_enabled())
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("Refusing to clear all entries without --yes");
            }
            let outcome = sync.clear_all().await;
            report("Cleared", "all entries", outcome, sync.remote_enabled())
        }
        Command::Search {
            keyword,
            date_from,
            date_to,
            json,
        } => {
            let filter = SearchFilter {
                keyword,
                date_from,
                date_to,
            };
            let found = sync.search(&filter).await;
            print_entries(&found, json)
        }
        Command::Export { path, format } => {
            let format: ExportFormat = format.parse()?;
            let entries = sync.load_entries().await;
            let count = export_to_file(&entries, &path, format)?;
            println!("Exported {count} entries to {}", path.display());
            Ok(())
        }
        Command::Health => {
            if !sync.remote_enabled() {
                bail!("Remote mode is disabled");
            }
            if sync.check_health().await {
                println!("Reflections service is healthy");
                Ok(())
            } else {
                Err(eyre!("Reflections service is unreachable"))
            }
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

fn location_from_parts(
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Option<Location> {
    if city.is_none() && state.is_none() && country.is_none() && lat.is_none() && lon.is_none() {
        return None;
    }
    let defaults = Location::default();
    Some(Location {
        city: city.unwrap_or(defaults.city),
        state: state.unwrap_or(defaults.state),
        country: country.unwrap_or(defaults.country),
        lat,
        lon,
    })
}

fn report(action: &str, target: &str, outcome: WriteOutcome, remote_enabled: bool) -> Result<()> {
    if !outcome.succeeded() {
        bail!("{action} failed for {target}: neither the local store nor the service accepted it");
    }
    let where_to = match (outcome.local, outcome.remote) {
        (true, true) => "locally and remotely",
        (true, false) if outcome.rejected => "locally only (the service refused it)",
        (true, false) if remote_enabled => "locally only (service unavailable)",
        (true, false) => "locally",
        _ => "remotely only (local store failed)",
    };
    println!("{action} {target} {where_to}");
    Ok(())
}

fn print_entries(entries: &[JournalEntry], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No entries.");
        return Ok(());
    }
    for entry in entries {
        let title = if entry.title.is_empty() {
            "(untitled)"
        } else {
            entry.title.as_str()
        };
        println!("[{}] {} {}", entry.id, entry.date, title);
        println!("    {}", entry.content.lines().next().unwrap_or(""));
    }
    Ok(())
}
