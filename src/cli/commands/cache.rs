//! Cache management commands

use colored::Colorize;

use crate::cache::CacheStore;
use crate::cli::args::{CacheArgs, CacheCommands, OutputFormat};
use crate::config::{Config, ListingKind};
use crate::error::Result;

/// Handle cache commands
pub fn handle(
    cache: &CacheStore,
    config: &Config,
    args: &CacheArgs,
    format: OutputFormat,
) -> Result<String> {
    match &args.command {
        CacheCommands::Status => status(cache, config, format),
        CacheCommands::Clear => clear(cache, format),
    }
}

fn status(cache: &CacheStore, config: &Config, format: OutputFormat) -> Result<String> {
    let status = cache.status();

    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("{}\n", "Cache Status".bold()));
            output.push_str(&format!("Location: {}\n\n", cache.dir().display()));

            if status.entries == 0 {
                output.push_str(&format!("  {}\n", "Empty".dimmed()));
            } else {
                output.push_str(&format!("  Entries: {}\n", status.entries));
                output.push_str(&format!("  Size: {} bytes\n", status.bytes));
                if let Some(age) = status.newest_secs {
                    output.push_str(&format!("  Newest: {}\n", format_age(age)));
                }
                if let Some(age) = status.oldest_secs {
                    output.push_str(&format!("  Oldest: {}\n", format_age(age)));
                }
            }

            output.push_str(&"\nThresholds:\n".dimmed().to_string());
            for kind in ListingKind::ALL {
                output.push_str(&format!(
                    "  {:<10} {}m\n",
                    kind.to_string(),
                    config.cache.minutes(kind)
                ));
            }

            Ok(output.trim_end().to_string())
        }
        OutputFormat::Json => {
            let thresholds: serde_json::Map<String, serde_json::Value> = ListingKind::ALL
                .into_iter()
                .map(|kind| (kind.to_string(), config.cache.minutes(kind).into()))
                .collect();
            let json = serde_json::json!({
                "cache_dir": cache.dir().to_string_lossy(),
                "entries": status.entries,
                "bytes": status.bytes,
                "oldest_secs": status.oldest_secs,
                "newest_secs": status.newest_secs,
                "threshold_mins": thresholds,
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}

fn clear(cache: &CacheStore, format: OutputFormat) -> Result<String> {
    cache.clear()?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} Cache cleared", "✓".green())),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "status": "cleared"
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}

/// Format age in human-readable form
fn format_age(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheKey;
    use tempfile::TempDir;

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(42), "42s");
        assert_eq!(format_age(125), "2m 5s");
        assert_eq!(format_age(7260), "2h 1m");
    }

    #[test]
    fn test_status_json_reports_entries() {
        let tmp = TempDir::new().unwrap();
        let cache = CacheStore::new(tmp.path());
        cache.store(&CacheKey::recent(), &vec!["a"]).unwrap();
        let args = CacheArgs {
            command: CacheCommands::Status,
        };

        let out = handle(&cache, &Config::default(), &args, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["entries"], 1);
        assert_eq!(value["threshold_mins"]["file-path"], 180);
    }

    #[test]
    fn test_clear_empties_cache() {
        let tmp = TempDir::new().unwrap();
        let cache = CacheStore::new(tmp.path());
        cache.store(&CacheKey::groups(), &vec!["g"]).unwrap();
        let args = CacheArgs {
            command: CacheCommands::Clear,
        };

        handle(&cache, &Config::default(), &args, OutputFormat::Json).unwrap();

        assert_eq!(cache.status().entries, 0);
    }
}
