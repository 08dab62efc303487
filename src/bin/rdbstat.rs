//! rdbstat - RocksDB statistics dump inspector.
//!
//! Reads a statistics dump (raw text or the JSON status document) from a
//! file or stdin and prints the derived measurements as a metrics listing,
//! as JSON, or as a human-readable level table.

use std::path::PathBuf;
use std::process;

use chrono::{SecondsFormat, Utc};
use clap::Parser;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

use rdbstat::collector::{StatsDocument, load_document, measurements};
use rdbstat::config::CollectorConfig;
use rdbstat::fmt::{
    FmtStyle, format_bytes, format_bytes_rate, format_count, format_opt_f64, format_reading,
    format_seconds, format_timestamp,
};
use rdbstat::metrics::Registry;
use rdbstat::model::StatsReport;

/// RocksDB statistics dump inspector.
#[derive(Parser)]
#[command(name = "rdbstat", about = "RocksDB statistics dump inspector", version)]
struct Args {
    /// Stats dump or JSON status document. Use "-" for stdin.
    #[arg(default_value = "-")]
    path: PathBuf,

    /// Print measurements as a JSON array.
    #[arg(long, conflicts_with = "levels")]
    json: bool,

    /// Print the per-level compaction table and a short summary.
    #[arg(long)]
    levels: bool,

    /// Metric name prefix.
    #[arg(long, default_value = "mongodb")]
    namespace: String,

    /// Column family whose compaction section is read.
    #[arg(long, default_value = "default")]
    column_family: String,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Logs go to stderr so stdout stays clean for the listing.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("rdbstat={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(registry: &Registry) {
    match serde_json::to_string_pretty(&registry.series()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize measurements: {}", e);
            process::exit(1);
        }
    }
}

fn print_levels(doc: &StatsDocument, report: &StatsReport) {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    println!("{}  {}", doc.compaction_section(), now);
    println!();
    println!(
        "{:<6} {:>7} {:>9} {:>6} {:>9} {:>9} {:>9} {:>6} {:>9} {:>9} {:>9} {:>6} {:>8} {:>8}",
        "Level",
        "Files",
        "Size",
        "Score",
        "Read",
        "Write",
        "Wnew",
        "W-Amp",
        "Rd",
        "Wr",
        "Comp",
        "Cnt",
        "KeyIn",
        "KeyDrop"
    );

    let bytes = |v| format_bytes(v, FmtStyle::Compact);
    let rate = |v| format_bytes_rate(v, FmtStyle::Compact);
    for level in &report.levels {
        let files = match level.files {
            Some(f) => format!("{}/{}", f.num, f.comp_threads),
            None => "--".to_string(),
        };
        println!(
            "{:<6} {:>7} {} {} {} {} {} {} {} {} {} {} {} {}",
            level.level,
            files,
            format_reading(level.size_bytes, 9, bytes),
            format_opt_f64(level.score.value(), 6, 1),
            format_reading(level.read_bytes, 9, bytes),
            format_reading(level.write_bytes, 9, bytes),
            format_reading(level.write_new_bytes, 9, bytes),
            format_opt_f64(level.write_amp.value(), 6, 1),
            format_reading(level.read_bytes_per_sec, 9, rate),
            format_reading(level.write_bytes_per_sec, 9, rate),
            format_reading(level.comp_seconds, 9, format_seconds),
            format_reading(level.comp_count, 6, format_count),
            format_reading(level.keys_in, 8, format_count),
            format_reading(level.keys_dropped, 8, format_count),
        );
    }

    let c = &report.counters;
    let detail = |v| format_bytes(v, FmtStyle::Detail);
    println!();
    println!("levels:    {}", report.num_levels);
    println!(
        "writes:    {} ops, {} ingested",
        format_reading(c.write_ops, 0, format_count),
        format_reading(c.write_bytes, 0, detail)
    );
    println!(
        "wal:       {} writes, {} syncs, {} written",
        format_reading(c.wal_writes, 0, format_count),
        format_reading(c.wal_syncs, 0, format_count),
        format_reading(c.wal_bytes, 0, detail)
    );
    println!("flushed:   {}", format_reading(c.flushed_bytes, 0, detail));
    println!(
        "stalled:   {} ({}%)",
        format_reading(c.stall_seconds, 0, format_seconds),
        format_opt_f64(c.stall_percent.value(), 0, 1)
    );
    if let Some(oldest) = report.gauges.oldest_snapshot_timestamp.value() {
        println!("snapshot:  oldest {}", format_timestamp(oldest as i64));
    }
    if !report.stalls.is_empty() {
        let stalls: Vec<String> = report
            .stalls
            .iter()
            .map(|(cause, count)| format!("{}={}", cause, count))
            .collect();
        println!("stalls:    {}", stalls.join(", "));
    }
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    let config = CollectorConfig::new(args.namespace, args.column_family);
    debug!(
        "Config: namespace={}, column_family={}",
        config.namespace, config.column_family
    );

    let doc = match load_document(&args.path, &config) {
        Ok(doc) => doc,
        Err(e) => {
            error!("Failed to load {}: {}", args.path.display(), e);
            process::exit(1);
        }
    };

    let report = doc.report();
    if args.levels {
        print_levels(&doc, &report);
        return;
    }

    let mut registry = match Registry::new(&config.namespace) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Invalid namespace {:?}: {}", config.namespace, e);
            process::exit(1);
        }
    };
    if let Err(e) = registry.publish(&measurements(&report)) {
        error!("Failed to publish measurements: {}", e);
        process::exit(1);
    }
    info!(
        series = registry.len(),
        levels = report.levels.len(),
        "collected measurements"
    );

    if args.json {
        print_json(&registry);
    } else {
        match registry.render() {
            Ok(text) => print!("{}", text),
            Err(e) => {
                error!("Failed to render metrics: {}", e);
                process::exit(1);
            }
        }
    }
}
