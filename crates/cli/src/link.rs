//! `namelink match|diff|distinct|normalize|validate`: config-driven name linkage.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use namelink_linkage::model::{DifferenceResult, DistinctReport, MatchResult};
use namelink_linkage::{compute_differences, compute_distinct, compute_matches, RunConfig};
use serde::Serialize;
use tracing::info;

use crate::exit_codes::EXIT_DIFFERENCES;
use crate::export::{write_clusters_csv, write_differences_csv, write_normalized_csv};
use crate::loader::{load_lists, read_list};
use crate::CliError;

fn read_config(config_path: &Path) -> Result<RunConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| CliError::usage(format!("cannot read config: {e}")))?;
    Ok(RunConfig::from_toml(&config_str)?)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::output(format!("JSON serialization error: {e}")))
}

fn create(path: &Path) -> Result<File, CliError> {
    File::create(path).map_err(|e| CliError::output(format!("cannot write {}: {e}", path.display())))
}

// ---------------------------------------------------------------------------
// match
// ---------------------------------------------------------------------------

pub fn cmd_match(
    config_path: PathBuf,
    threshold: Option<u8>,
    min_coverage: Option<usize>,
    json_output: bool,
    output_file: Option<PathBuf>,
    csv_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let run = read_config(&config_path)?;
    let mut config = run.linkage();
    if let Some(t) = threshold {
        config.threshold = t;
    }
    if let Some(m) = min_coverage {
        config.min_coverage = m;
    }
    // Reject a bad override before reading any list file.
    config.validate()?;

    let input = load_lists(&run, &config_path)?;
    let result = compute_matches(&config, &input)?;

    if let Some(ref path) = output_file {
        std::fs::write(path, to_json(&result)?)
            .map_err(|e| CliError::output(format!("cannot write output: {e}")))?;
        info!(path = %path.display(), "wrote JSON");
    }

    if let Some(ref path) = csv_file {
        write_clusters_csv(create(path)?, &result.clusters)
            .map_err(|e| CliError::output(format!("cannot write {}: {e}", path.display())))?;
        info!(path = %path.display(), "wrote CSV");
    }

    if json_output {
        println!("{}", to_json(&result)?);
    } else {
        print_clusters(&result).map_err(|e| CliError::output(e.to_string()))?;
    }

    let s = &result.summary;
    eprintln!(
        "{}: {} clusters across {} lists ({} records linked, {} below coverage {})",
        run.name,
        s.clusters,
        result.meta.lists.len(),
        s.records_linked,
        s.discarded_clusters,
        result.meta.min_coverage,
    );
    for w in &result.warnings {
        eprintln!("warning: {w}");
    }

    Ok(())
}

fn print_clusters(result: &MatchResult) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for cluster in &result.clusters {
        writeln!(out, "{} [{}]", cluster.canonical_name, cluster.lists().join(", "))?;
        for m in &cluster.members {
            writeln!(
                out,
                "  {:<12} {:>6.2}  {:<9} {} (line {})",
                m.list_id, m.score, m.method, m.original, m.line_index
            )?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// diff
// ---------------------------------------------------------------------------

pub fn cmd_diff(
    config_path: PathBuf,
    left: String,
    right: String,
    both: bool,
    json_output: bool,
    csv_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let run = read_config(&config_path)?;
    let config = run.linkage();
    let input = load_lists(&run, &config_path)?;

    let mut results: Vec<DifferenceResult> = vec![compute_differences(&config, &input, &left, &right)?];
    if both {
        results.push(compute_differences(&config, &input, &right, &left)?);
    }

    if let Some(ref path) = csv_file {
        let records: Vec<_> = results.iter().flat_map(|r| r.records.iter().cloned()).collect();
        write_differences_csv(create(path)?, &records)
            .map_err(|e| CliError::output(format!("cannot write {}: {e}", path.display())))?;
        info!(path = %path.display(), "wrote CSV");
    }

    if json_output {
        println!("{}", to_json(&results)?);
    } else {
        print_differences(&results).map_err(|e| CliError::output(e.to_string()))?;
    }

    let reported: usize = results.iter().map(|r| r.summary.reported).sum();
    for r in &results {
        eprintln!(
            "{} -> {}: {} compared, {} reconciled, {} unreconciled",
            r.list_a, r.list_b, r.summary.compared, r.summary.reconciled, r.summary.reported
        );
        for w in &r.warnings {
            eprintln!("warning: {w}");
        }
    }

    if reported > 0 {
        return Err(CliError::new(EXIT_DIFFERENCES, String::new()));
    }
    Ok(())
}

fn print_differences(results: &[DifferenceResult]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for r in results {
        for d in &r.records {
            writeln!(
                out,
                "{}: {}  ->  {}: {} ({:.2})",
                d.list_a,
                d.original,
                d.list_b,
                d.best_match_or_sentinel(),
                d.score
            )?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// distinct
// ---------------------------------------------------------------------------

pub fn cmd_distinct(
    config_path: PathBuf,
    left: String,
    right: String,
    json_output: bool,
) -> Result<(), CliError> {
    let run = read_config(&config_path)?;
    let input = load_lists(&run, &config_path)?;
    let report = compute_distinct(&input, &left, &right)?;

    if json_output {
        println!("{}", to_json(&report)?);
        return Ok(());
    }
    print_distinct(&report).map_err(|e| CliError::output(e.to_string()))
}

fn print_distinct(report: &DistinctReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "only in {} ({}):", report.left, report.left_only.len())?;
    for name in &report.left_only {
        writeln!(out, "  {name}")?;
    }
    writeln!(out, "only in {} ({}):", report.right, report.right_only.len())?;
    for name in &report.right_only {
        writeln!(out, "  {name}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

pub fn cmd_normalize(file: PathBuf, csv_file: Option<PathBuf>) -> Result<(), CliError> {
    let list_id = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "list".into());
    let records = read_list(&list_id, &file)?;

    let written = match csv_file {
        Some(ref path) => write_normalized_csv(create(path)?, &records),
        None => write_normalized_csv(io::stdout().lock(), &records),
    };
    written.map_err(|e| CliError::output(e.to_string()))?;

    info!(records = records.len(), "normalized");
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let run = read_config(&config_path)?;
    let config = run.linkage();
    let input = load_lists(&run, &config_path)?;
    config.validate_against(&input)?;

    let pairs = config.list_pairs();
    eprintln!(
        "ok: '{}': {} lists selected, {} pairs, threshold {}, min coverage {}",
        run.name,
        config.selected.len(),
        pairs.len(),
        config.threshold,
        config.min_coverage
    );
    for (id, records) in &input.lists {
        if records.is_empty() {
            eprintln!("warning: list '{id}' is empty");
        }
    }
    Ok(())
}
