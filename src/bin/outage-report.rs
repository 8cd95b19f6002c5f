//! Offline reporting over the monitor's log files.
//!
//! Reads the append-only outage and window logs and prints summary
//! statistics for frequency/pattern analysis.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "outage-report")]
#[command(about = "Summarize network-monitor outage logs", long_about = None)]
struct Cli {
    /// Outage log produced by the monitor.
    #[arg(short, long, default_value = "outages.log")]
    outage_log: PathBuf,

    /// Minor-interval window log.
    #[arg(short, long, default_value = "windows.log")]
    window_log: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Outage counts and durations
    Outages,
    /// Brief-interruption window statistics
    Windows,
    /// Both reports
    Summary,
}

struct OutageRow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration_seconds: f64,
    unresolved: bool,
}

struct WindowRow {
    start: DateTime<Utc>,
    failed_seconds: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Outages => report_outages(&cli.outage_log)?,
        Commands::Windows => report_windows(&cli.window_log)?,
        Commands::Summary => {
            report_outages(&cli.outage_log)?;
            println!();
            report_windows(&cli.window_log)?;
        }
    }
    Ok(())
}

fn report_outages(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let rows = parse_outages(&std::fs::read_to_string(path)?);

    println!("Outages: {}", rows.len());
    if rows.is_empty() {
        return Ok(());
    }

    let total: f64 = rows.iter().map(|r| r.duration_seconds).sum();
    let longest = rows
        .iter()
        .max_by(|a, b| a.duration_seconds.total_cmp(&b.duration_seconds))
        .map(|r| (r.duration_seconds, r.start, r.end));
    let unresolved = rows.iter().filter(|r| r.unresolved).count();

    println!("  total downtime:  {}", human_duration(total));
    println!("  mean duration:   {}", human_duration(total / rows.len() as f64));
    if let Some((secs, start, end)) = longest {
        println!("  longest:         {} ({} → {})", human_duration(secs), start, end);
    }
    if unresolved > 0 {
        println!("  unresolved at shutdown: {}", unresolved);
    }
    Ok(())
}

fn report_windows(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let rows = parse_windows(&std::fs::read_to_string(path)?);

    println!("Windows with interruptions: {}", rows.len());
    if rows.is_empty() {
        return Ok(());
    }

    let total: f64 = rows.iter().map(|r| r.failed_seconds).sum();
    let worst = rows
        .iter()
        .max_by(|a, b| a.failed_seconds.total_cmp(&b.failed_seconds));

    println!("  total failed time: {}", human_duration(total));
    if let Some(row) = worst {
        println!(
            "  worst window:      {} failed starting {}",
            human_duration(row.failed_seconds),
            row.start
        );
    }
    Ok(())
}

fn parse_outages(content: &str) -> Vec<OutageRow> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 3 {
                eprintln!("skipping malformed outage line: {}", line);
                return None;
            }
            let row = OutageRow {
                start: parse_timestamp(fields[0])?,
                end: parse_timestamp(fields[1])?,
                duration_seconds: fields[2].parse().ok()?,
                unresolved: fields.get(3) == Some(&"unresolved"),
            };
            Some(row)
        })
        .collect()
}

fn parse_windows(content: &str) -> Vec<WindowRow> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 3 {
                eprintln!("skipping malformed window line: {}", line);
                return None;
            }
            Some(WindowRow {
                start: parse_timestamp(fields[0])?,
                failed_seconds: fields[2].parse().ok()?,
            })
        })
        .collect()
}

fn parse_timestamp(field: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(field)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn human_duration(seconds: f64) -> String {
    if seconds >= 3600.0 {
        format!("{:.1}h", seconds / 3600.0)
    } else if seconds >= 60.0 {
        format!("{:.1}m", seconds / 60.0)
    } else {
        format!("{:.0}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_outage_lines() {
        let content = "2025-04-02T08:30:00Z 2025-04-02T08:30:45Z 45\n\
                       2025-04-02T09:00:00Z 2025-04-02T09:10:00Z 600 unresolved\n\
                       garbage line\n";
        let rows = parse_outages(content);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].duration_seconds, 45.0);
        assert!(!rows[0].unresolved);
        assert!(rows[1].unresolved);
    }

    #[test]
    fn test_parse_window_lines() {
        let content = "2025-04-02T08:30:00Z 2025-04-02T08:32:00Z 2.5\n";
        let rows = parse_windows(content);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].failed_seconds, 2.5);
    }

    #[test]
    fn test_human_duration_units() {
        assert_eq!(human_duration(42.0), "42s");
        assert_eq!(human_duration(90.0), "1.5m");
        assert_eq!(human_duration(5400.0), "1.5h");
    }
}
