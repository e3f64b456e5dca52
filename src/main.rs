mod batch;
mod db;
mod entry;
mod error;
mod parser;
mod settings;
mod source;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "ddo_extract", about = "Extract lexical entries from saved DDO article pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every saved page into one entries JSON file
    Parse {
        /// Directory of saved .html pages
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Where to write the entries JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Max pages to parse, in file name order
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Also store entries and the skip report in the database
        #[arg(long)]
        save: bool,
    },
    /// Parse a single page and print its entry
    Show {
        file: PathBuf,
    },
    /// Show stored run statistics
    Stats,
    /// Print stored entries for a headword
    Lookup {
        headword: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = settings::load()?;
    info!(settings = ?settings, "Loaded settings");

    let result = match cli.command {
        Commands::Parse {
            dir,
            output,
            limit,
            save,
        } => {
            let dir = dir.unwrap_or(settings.html_dir);
            let output = output.unwrap_or(settings.output);
            let documents = source::load_documents(&dir, limit)?;
            if documents.is_empty() {
                println!("No .html pages in {:?}.", dir);
                return Ok(());
            }
            println!("Parsing {} pages from {:?}...", documents.len(), dir);

            let store = if save {
                let conn = db::connect(&settings.db_path)?;
                db::init_schema(&conn)?;
                let run = new_run(&dir);
                db::insert_run(&conn, &run)?;
                Some((conn, run.run_id))
            } else {
                None
            };

            let report = process_documents(&documents, store.as_ref())?;
            write_entries(&output, &report.entries)?;
            if let Some((conn, run_id)) = &store {
                db::finish_run(conn, run_id, report.entries.len(), report.skipped.len())?;
                println!("Stored run {} in {:?}", run_id, settings.db_path);
            }

            report.print();
            println!("Wrote {:?}", output);
            Ok(())
        }
        Commands::Show { file } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match parser::parse_document(&name, &html) {
                Ok(entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
                Err(reason) => println!("Skipped {}: {}", name, reason),
            }
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Entries:   {}", s.entries);
            println!("Headwords: {}", s.headwords);
            println!("Runs:      {}", s.runs);
            if let Some(run) = &s.latest {
                println!(
                    "\nLatest:    {} ({}) from {}",
                    run.run_id, run.started_at, run.source_dir
                );
                println!("Parsed:    {}", run.parsed);
                println!("Skipped:   {}", run.skipped);
                for (file, reason) in &s.latest_skipped {
                    println!("  - {} ({})", file, reason);
                }
            }
            Ok(())
        }
        Commands::Lookup { headword } => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let entries = db::find_by_headword(&conn, &headword)?;
            if entries.is_empty() {
                println!("No stored entry for {:?}. Run 'parse --save' first.", headword);
                return Ok(());
            }
            println!("{}", serde_json::to_string_pretty(&entries)?);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn new_run(dir: &Path) -> db::RunRow {
    let now = chrono::Utc::now();
    db::RunRow {
        run_id: format!("run-{}", now.format("%Y%m%d-%H%M%S")),
        started_at: now.to_rfc3339(),
        source_dir: dir.display().to_string(),
        parsed: 0,
        skipped: 0,
    }
}

fn process_documents(
    documents: &[source::Document],
    store: Option<&(rusqlite::Connection, String)>,
) -> Result<batch::BatchReport> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut report = batch::BatchReport::default();

    for chunk in documents.chunks(500) {
        let results = batch::parse_documents(chunk);
        let entries_before = report.entries.len();
        let skipped_before = report.skipped.len();
        report.absorb(results);

        if let Some((conn, run_id)) = store {
            db::save_entries(conn, run_id, &report.entries[entries_before..])?;
            db::save_skipped(conn, run_id, &report.skipped[skipped_before..])?;
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    info!(
        "Parsed {} pages ({} entries, {} skipped)",
        documents.len(),
        report.entries.len(),
        report.skipped.len()
    );
    Ok(report)
}

fn write_entries(path: &Path, entries: &[entry::Entry]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), entries)
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
