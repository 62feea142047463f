use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use valhalla::{Action, ActorProviding};

use super::EngineArgs;

/// One output record, written as a JSON line.
#[derive(Debug, Serialize)]
struct BatchRecord<'a> {
    /// 1-based line number in the input file.
    line: usize,
    action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Totals for a batch run.
#[derive(Debug, Default, Serialize, PartialEq)]
struct BatchSummary {
    total: u64,
    succeeded: u64,
    failed: u64,
    elapsed_ms: u64,
}

pub fn run(
    engine: EngineArgs,
    input: PathBuf,
    action: Action,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let actor = engine.build()?;

    let output_path = output.unwrap_or_else(|| default_output_path(&input));
    let output_file = File::create(&output_path).context("Failed to create output file")?;
    let mut writer = BufWriter::new(output_file);

    let summary = process_file(&actor, &input, action, &mut writer)?;
    writer.flush()?;

    if json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!(
            "{} requests: {} succeeded, {} failed in {}ms",
            summary.total, summary.succeeded, summary.failed, summary.elapsed_ms
        );
        println!("Output written to: {}", output_path.display());
    }

    if summary.failed > 0 {
        bail!("{} of {} requests failed", summary.failed, summary.total);
    }

    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "batch".to_string());
    input.with_file_name(format!("{}_responses.jsonl", stem))
}

/// Run `action` for every non-empty line of `input`, writing one JSON line per
/// request to `writer`.
fn process_file<A, W>(
    actor: &A,
    input: &Path,
    action: Action,
    writer: &mut W,
) -> Result<BatchSummary>
where
    A: ActorProviding,
    A::Error: std::fmt::Display,
    W: Write,
{
    let contents = fs::read_to_string(input).context("Failed to open input file")?;

    // Collect requests for progress bar
    let requests: Vec<(usize, &str)> = contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line))
        .collect();
    let total = requests.len() as u64;

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut summary = BatchSummary {
        total,
        ..Default::default()
    };

    for (line, request) in requests {
        let record = match action.invoke(actor, request) {
            Ok(response) => {
                summary.succeeded += 1;
                BatchRecord {
                    line,
                    action: action.as_str(),
                    response: Some(response),
                    error: None,
                }
            }
            Err(e) => {
                summary.failed += 1;
                pb.println(format!("line {}: {}", line, e));
                BatchRecord {
                    line,
                    action: action.as_str(),
                    response: None,
                    error: Some(e.to_string()),
                }
            }
        };

        serde_json::to_writer(&mut *writer, &record)?;
        writer.write_all(b"\n")?;

        pb.inc(1);
    }

    pb.finish_and_clear();
    summary.elapsed_ms = start.elapsed().as_millis() as u64;

    Ok(summary)
}
