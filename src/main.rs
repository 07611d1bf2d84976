mod config;
mod db;
mod output;
mod parser;
mod pdf;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use config::{DirectoryConfig, Job};
use parser::extract::{ParseDefaults, ProviderRecord};
use parser::JobOutput;
use parser::layout::Page;

#[derive(Parser)]
#[command(
    name = "provider_dir",
    about = "Extract provider records from multi-column PDF provider directories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every (file, pages, category) job in the config
    Run {
        /// Directory config (TOML)
        #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Override the configured output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also store units and records in this SQLite database
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Print large-font header lines per page (for tuning the threshold)
    Headers {
        /// PDF file to inspect
        file: PathBuf,
        /// Pages to scan, 1-based (default: all)
        #[arg(short, long, value_delimiter = ',')]
        pages: Vec<usize>,
        /// Minimum glyph size for header text
        #[arg(short, long, default_value_t = config::DEFAULT_THRESHOLD)]
        threshold: f32,
    },
    /// Stored providers table
    Overview {
        /// Filter by provider category (PCP, Specialist, ...)
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by specialty substring
        #[arg(short, long)]
        specialty: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
        #[arg(long, default_value = db::DB_PATH)]
        db: PathBuf,
    },
    /// Stored unit and provider counts
    Stats {
        #[arg(long, default_value = db::DB_PATH)]
        db: PathBuf,
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

    let result = match cli.command {
        Commands::Run { config, output, db } => {
            let mut cfg = DirectoryConfig::load(&config)?;
            if let Some(dir) = output {
                cfg.output_dir = dir;
            }
            if cfg.files.is_empty() {
                println!("No files configured in {}.", config.display());
                return Ok(());
            }
            let counts = run_jobs(&cfg, db.as_deref())?;
            counts.print();
            Ok(())
        }
        Commands::Headers {
            file,
            pages,
            threshold,
        } => {
            config::validate_threshold(threshold)?;
            let source = pdf::PdfSource::bind()?;
            let doc = source.open(&file)?;
            let pages = if pages.is_empty() {
                (1..=doc.page_count()).collect()
            } else {
                pages
            };
            for n in pages {
                let page = match doc.page(n) {
                    Ok(p) => p,
                    Err(e) => {
                        warn!(error = %e, "Skipping page");
                        continue;
                    }
                };
                let headers = parser::headers::detect_headers(&page, threshold);
                println!("Page {} ({} headers)", n, headers.len());
                for h in &headers {
                    println!("  {:<40} -> {}", truncate(&h.text, 40), h.specialty());
                }
            }
            Ok(())
        }
        Commands::Overview {
            category,
            specialty,
            limit,
            db: db_path,
        } => {
            let conn = db::connect(&db_path)?;
            db::init_schema(&conn)?;
            let rows = db::fetch_overview(&conn, category.as_deref(), specialty.as_deref(), limit)?;
            if rows.is_empty() {
                println!("No providers found.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<26} | {:<6} | {:<12} | {:<22} | {:<14} | {:<14} | {:>3}",
                "#", "Provider", "Degree", "Category", "Specialty", "City", "Phone", "New"
            );
            println!("{}", "-".repeat(120));

            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<26} | {:<6} | {:<12} | {:<22} | {:<14} | {:<14} | {:>3}",
                    i + 1,
                    truncate(&r.name, 26),
                    truncate(&r.degree, 6),
                    truncate(&r.category, 12),
                    truncate(&r.specialty, 22),
                    truncate(&r.city, 14),
                    r.phone,
                    if r.accepting { "yes" } else { "no" }
                );
            }

            println!("\n{} providers", rows.len());
            Ok(())
        }
        Commands::Stats { db: db_path } => {
            let conn = db::connect(&db_path)?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Units:     {}", s.units);
            println!("Providers: {}", s.providers);
            println!("Accepting: {}", s.accepting);
            for (category, n) in &s.by_category {
                println!("  {:<20} {}", category, n);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

#[derive(Default)]
struct RunCounts {
    jobs: usize,
    skipped: usize,
    units: usize,
    records: usize,
    csv_files: usize,
}

impl RunCounts {
    fn print(&self) {
        println!(
            "Processed {} jobs ({} skipped): {} units, {} records, {} CSV files.",
            self.jobs, self.skipped, self.units, self.records, self.csv_files,
        );
    }
}

/// Drive every configured job. A file that cannot be opened skips its jobs; a page
/// outside the document is skipped on its own.
fn run_jobs(cfg: &DirectoryConfig, db_path: Option<&Path>) -> Result<RunCounts> {
    let source = pdf::PdfSource::bind()?;
    let conn = match db_path {
        Some(path) => {
            let conn = db::connect(path)?;
            db::init_schema(&conn)?;
            Some(conn)
        }
        None => None,
    };

    let total = cfg.jobs().count();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut counts = RunCounts::default();
    let mut combined: Vec<ProviderRecord> = Vec::new();

    for file in &cfg.files {
        let doc = match source.open(&file.path) {
            Ok(doc) => doc,
            Err(e) => {
                pb.suspend(|| warn!(error = %e, "Skipping file"));
                counts.skipped += file.categories.len();
                pb.inc(file.categories.len() as u64);
                continue;
            }
        };

        let mut file_units: Vec<String> = Vec::new();
        for cat in &file.categories {
            let job = Job {
                file: &file.path,
                pages: &cat.pages,
                category: &cat.provider_category,
            };
            pb.set_message(job.category.to_string());
            let Some(out) = run_job(&doc, job, cfg, &pb) else {
                counts.skipped += 1;
                pb.inc(1);
                continue;
            };

            if !out.records.is_empty() {
                let path = output::job_csv_path(&cfg.output_dir, job.file, job.category);
                output::write_csv(&path, &out.records)?;
                counts.csv_files += 1;
                pb.suspend(|| {
                    info!(
                        path = %path.display(),
                        headers = out.headers.len(),
                        records = out.records.len(),
                        "Saved job"
                    )
                });
            }
            if let Some(conn) = &conn {
                db::save_job(
                    conn,
                    &job.file.to_string_lossy(),
                    job.category,
                    &out.units,
                    &out.records,
                )?;
            }

            counts.jobs += 1;
            counts.units += out.units.len();
            counts.records += out.records.len();
            file_units.extend(out.units);
            combined.extend(out.records);
            pb.inc(1);
        }

        output::save_text(
            &output::dump_path(&cfg.output_dir, &file.path),
            &file_units.join("\n\n"),
        )?;
    }

    pb.finish_and_clear();

    if !combined.is_empty() {
        let path = cfg.output_dir.join("combined_all.csv");
        output::write_csv(&path, &combined)?;
        counts.csv_files += 1;
        info!(path = %path.display(), records = combined.len(), "Saved combined CSV");
    }

    Ok(counts)
}

/// Extract one job from an open document. Pages outside the document are skipped;
/// `None` when none of the job's pages could be read.
fn run_job(
    doc: &pdf::Document<'_>,
    job: Job<'_>,
    cfg: &DirectoryConfig,
    pb: &ProgressBar,
) -> Option<JobOutput> {
    let pages: Vec<Page> = job
        .pages
        .iter()
        .filter_map(|&n| match doc.page(n) {
            Ok(page) => Some(page),
            Err(e) => {
                pb.suspend(|| warn!(error = %e, "Skipping page"));
                None
            }
        })
        .collect();

    if pages.is_empty() {
        pb.suspend(|| {
            warn!(
                file = %doc.path().display(),
                category = %job.category,
                "No readable pages, skipping job"
            )
        });
        return None;
    }

    let defaults = ParseDefaults::new(job.category, &cfg.default_state);
    Some(parser::process_pages(
        &pages,
        &cfg.columns,
        cfg.specialty_threshold,
        &defaults,
    ))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_long_text() {
        assert_eq!(truncate("Cardiology", 20), "Cardiology");
        assert_eq!(truncate("Obstetrics and Gynecology", 10), "Obstetrics...");
    }

    #[test]
    fn durations() {
        use std::time::Duration;
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }
}
