//! Batch command - parse every resume matching a glob pattern.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use resume_core::{FieldName, ParsedResume, ResumeParser, ResumeRecord};

use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching resume PDFs
    #[arg(required = true)]
    input: String,

    /// Directory for `<stem>.json` records (default: print to stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write summary.csv with per-field confidence flags
    #[arg(long)]
    summary: bool,

    /// Keep going when a file cannot be read
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome for one input file.
struct Outcome {
    path: PathBuf,
    result: Result<ParsedResume, String>,
}

/// One line of summary.csv.
#[derive(Serialize)]
struct SummaryRow {
    file: String,
    source: Option<String>,
    name: Option<u8>,
    email: Option<u8>,
    phone: Option<u8>,
    linkedin: Option<u8>,
    github: Option<u8>,
    skills: Option<u8>,
    education: Option<u8>,
    experience: Option<u8>,
    certifications: Option<u8>,
    projects: Option<u8>,
    processing_time_ms: Option<u64>,
    error: Option<String>,
}

impl SummaryRow {
    fn new(outcome: &Outcome) -> Self {
        let file = outcome
            .path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parsed = outcome.result.as_ref().ok();
        let record: Option<&ResumeRecord> = parsed.map(|p| &p.record);
        let flag = |name: FieldName| record.map(|r| r.confidence(name));

        Self {
            file,
            source: parsed.map(|p| p.source.to_string()),
            name: flag(FieldName::Name),
            email: flag(FieldName::Email),
            phone: flag(FieldName::Phone),
            linkedin: flag(FieldName::Linkedin),
            github: flag(FieldName::Github),
            skills: flag(FieldName::Skills),
            education: flag(FieldName::Education),
            experience: flag(FieldName::Experience),
            certifications: flag(FieldName::Certifications),
            projects: flag(FieldName::Projects),
            processing_time_ms: parsed.map(|p| p.processing_time_ms),
            error: outcome.result.as_ref().err().cloned(),
        }
    }
}

pub fn run(args: BatchArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = collect_inputs(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} resumes to parse",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let parser = ResumeParser::from_config(&config)?;
    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        pb.set_message(path.display().to_string());

        match parser.parse_detailed(&path) {
            Ok(parsed) => {
                write_record(&path, &parsed.record, args.output_dir.as_deref())?;
                outcomes.push(Outcome {
                    path,
                    result: Ok(parsed),
                });
            }
            Err(e) if args.continue_on_error => {
                warn!("Skipping {}: {}", path.display(), e);
                outcomes.push(Outcome {
                    path,
                    result: Err(e.to_string()),
                });
            }
            Err(e) => {
                error!("Failed to parse {}: {}", path.display(), e);
                pb.abandon();
                anyhow::bail!("Batch stopped at {}: {}", path.display(), e);
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("done");

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &outcomes)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&Outcome> = outcomes.iter().filter(|o| o.result.is_err()).collect();
    eprintln!(
        "{} Parsed {} of {} resumes in {:?}",
        style("✓").green(),
        style(outcomes.len() - failed.len()).green(),
        outcomes.len(),
        start.elapsed()
    );
    for outcome in &failed {
        if let Err(e) = &outcome.result {
            eprintln!("  {} {}: {}", style("✗").red(), outcome.path.display(), e);
        }
    }

    Ok(())
}

/// Expand the pattern to PDF files, case-insensitive on the extension.
fn collect_inputs(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let files = glob::glob(pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Cannot access {}: {}", e.path().display(), e.error());
                None
            }
        })
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    Ok(files)
}

/// Write a record as `<stem>.json` in the output directory, or print it.
fn write_record(
    path: &Path,
    record: &ResumeRecord,
    output_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let json = record.to_json_pretty()?;

    match output_dir {
        Some(dir) => {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("resume");
            let output_path = dir.join(format!("{}.json", stem));
            fs::write(&output_path, json)?;
            debug!("Wrote {}", output_path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn write_summary(path: &Path, outcomes: &[Outcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for outcome in outcomes {
        wtr.serialize(SummaryRow::new(outcome))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resume_core::TextSource;

    #[test]
    fn test_collect_inputs_filters_pdfs() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "pdf"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let files = collect_inputs(&format!("{}/*", dir.path().display())).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_summary_rows() {
        let ok = Outcome {
            path: PathBuf::from("/tmp/jane.pdf"),
            result: Ok(ParsedResume {
                record: ResumeRecord::new(),
                source: TextSource::Embedded,
                text_chars: 0,
                processing_time_ms: 7,
            }),
        };
        let failed = Outcome {
            path: PathBuf::from("/tmp/gone.pdf"),
            result: Err("document not found".to_string()),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary(&path, &[ok, failed]).unwrap();

        let csv = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "file,source,name,email,phone,linkedin,github,skills,education,experience,\
             certifications,projects,processing_time_ms,error"
        );
        assert_eq!(lines[1], "jane.pdf,embedded,0,0,0,0,0,0,0,0,0,0,7,");
        assert_eq!(lines[2], "gone.pdf,,,,,,,,,,,,,document not found");
    }
}
