use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

mod aggregate;
mod error;
mod gpa;
mod layout;
mod loader;
mod models;
mod parser;
mod rank;
mod report;
mod tables;
mod weights;

use gpa::GpaMode;
use layout::Layout;
use weights::WeightPolicy;

#[derive(Parser)]
#[command(name = "transcript-engine")]
#[command(about = "Normalizes academic records and computes verified GPA metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute weighted and unweighted GPA from a merged-grades CSV
    Gpa {
        #[arg(long)]
        grades: PathBuf,
        /// Weighting policy JSON; defaults to +0.5 Honors / +1.0 AP-IB
        #[arg(long)]
        policy: Option<PathBuf>,
        /// Restrict output to one student id
        #[arg(long)]
        student: Option<String>,
        /// Skip invalid courses instead of failing the student
        #[arg(long, default_value_t = false)]
        best_effort: bool,
        /// Emit results as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Rank a cohort by cumulative weighted GPA with percentile and decile
    Rank {
        #[arg(long)]
        grades: PathBuf,
        #[arg(long)]
        policy: Option<PathBuf>,
        /// Show only the top N students
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Generate a markdown summary report with awards and AP exam results
    Report {
        #[arg(long)]
        grades: PathBuf,
        /// AP Student Datafile CSV with award slots and exam blocks
        #[arg(long)]
        ap_datafile: Option<PathBuf>,
        /// Layout version for the AP datafile
        #[arg(long, default_value = "ap-2025")]
        layout: String,
        /// Century used to expand two-digit datafile years
        #[arg(long, default_value_t = 2000)]
        century: u16,
        #[arg(long)]
        policy: Option<PathBuf>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn load_policy(path: Option<&Path>) -> anyhow::Result<WeightPolicy> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read policy {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid weighting policy in {}", path.display()))
        }
        None => Ok(WeightPolicy::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Gpa {
            grades,
            policy,
            student,
            best_effort,
            json,
        } => {
            let policy = load_policy(policy.as_deref())?;
            let mode = if best_effort {
                GpaMode::BestEffort
            } else {
                GpaMode::Strict
            };

            let mut records = Vec::new();
            loader::merge_grades(&grades, &mut records)?;
            if let Some(student_id) = student {
                records.retain(|r| r.student_id == student_id);
                if records.is_empty() {
                    println!("No grades found for student {student_id}.");
                    return Ok(());
                }
            }

            let mut results = Vec::new();
            for record in &records {
                let result = gpa::compute(record, &policy, mode)
                    .with_context(|| format!("student {}", record.student_id))?;
                results.push(result);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
                return Ok(());
            }

            println!("Cumulative GPA by student:");
            for (record, result) in records.iter().zip(results.iter()) {
                match &result.cumulative {
                    Some(pair) => println!(
                        "- {}, {} ({}) unweighted {} / weighted {} across {} credit hours",
                        record.name.last,
                        record.name.first,
                        record.student_id,
                        pair.unweighted,
                        pair.weighted,
                        result.gpa_credit_hours
                    ),
                    None => println!(
                        "- {}, {} ({}) GPA undefined: no GPA-eligible courses",
                        record.name.last, record.name.first, record.student_id
                    ),
                }
                for issue in &result.issues {
                    println!("  skipped: {issue}");
                }
            }
        }
        Commands::Rank {
            grades,
            policy,
            limit,
        } => {
            let policy = load_policy(policy.as_deref())?;

            let mut records = Vec::new();
            loader::merge_grades(&grades, &mut records)?;

            let mut results = Vec::new();
            for record in &records {
                let result = gpa::compute(record, &policy, GpaMode::Strict)
                    .with_context(|| format!("student {}", record.student_id))?;
                results.push(result);
            }

            let ranks = rank::class_ranks(&results);
            let unranked = results.len() - ranks.len();

            println!("Class rank by cumulative weighted GPA:");
            let shown = limit.unwrap_or(ranks.len());
            for entry in ranks.iter().take(shown) {
                println!(
                    "- #{} of {} ({}) weighted {} | top {}% | {}",
                    entry.rank,
                    entry.total_students,
                    entry.student_id,
                    entry.weighted_gpa,
                    entry.percentile,
                    entry.decile
                );
            }
            if unranked > 0 {
                println!("{unranked} student(s) unranked: GPA undefined.");
            }
        }
        Commands::Report {
            grades,
            ap_datafile,
            layout,
            century,
            policy,
            out,
        } => {
            let policy = load_policy(policy.as_deref())?;
            let layout = Layout::for_version(&layout)
                .with_context(|| format!("unknown layout version {layout}"))?;

            let mut records = match ap_datafile {
                Some(path) => {
                    let records = loader::load_ap_datafile(&path, &layout, century)?;
                    println!(
                        "Decoded {} students from {}.",
                        records.len(),
                        path.display()
                    );
                    records
                }
                None => Vec::new(),
            };
            let attached = loader::merge_grades(&grades, &mut records)?;
            println!("Attached {attached} grade rows from {}.", grades.display());

            let mut entries = Vec::new();
            for record in records {
                let result = gpa::compute(&record, &policy, GpaMode::Strict)
                    .with_context(|| format!("student {}", record.student_id))?;
                let summary = aggregate::summarize(&record)
                    .with_context(|| format!("student {}", record.student_id))?;
                entries.push((record, result, summary));
            }

            let generated_on = chrono::Utc::now().date_naive();
            let report = report::build_report(generated_on, &entries);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
