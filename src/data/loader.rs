use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::model::{AxisKind, Channel, SignalTable};

/// A first-column value at or above this is taken as a nanosecond
/// timestamp rather than a raw sample index.
const NANOSECOND_THRESHOLD: f64 = 1e9;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load an EMG recording, swallowing every failure into an empty table.
///
/// This is the contract the interactive shell relies on: a missing or
/// malformed file never raises – callers check `is_empty()` instead.
/// The cause is logged at `warn`.
pub fn load_csv(path: &Path) -> SignalTable {
    match read_csv(path) {
        Ok(table) => {
            log::info!(
                "Loaded {} ({} samples, {} channels)",
                path.display(),
                table.len(),
                table.channels.len()
            );
            table
        }
        Err(e) => {
            log::warn!("Failed to load {}: {e:#}", path.display());
            SignalTable::empty()
        }
    }
}

/// Recursively collect `.csv` files under `dir`, sorted by path.
///
/// Feeds the file-picker dropdown; an unreadable directory simply
/// yields an empty list.
pub fn discover_csv_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_csv(dir, &mut files);
    files.sort();
    files
}

fn collect_csv(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_csv(&path, out);
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        {
            out.push(path);
        }
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; first column a nanosecond
/// Unix timestamp (or raw sample index), remaining columns numeric
/// channel values.
fn read_csv(path: &Path) -> Result<SignalTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.len() < 2 {
        bail!("expected a timestamp column plus at least one channel");
    }

    let mut index: Vec<f64> = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len() - 1];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: expected {} fields, got {}",
                headers.len(),
                record.len()
            );
        }

        index.push(parse_field(record.get(0).unwrap_or(""), row_no, &headers[0])?);
        for (col, values) in columns.iter_mut().enumerate() {
            let field = record.get(col + 1).unwrap_or("");
            values.push(parse_field(field, row_no, &headers[col + 1])?);
        }
    }

    // Nanosecond timestamps become seconds; raw sample indices stay.
    if index.iter().any(|&v| v.abs() >= NANOSECOND_THRESHOLD) {
        for v in &mut index {
            *v *= 1e-9;
        }
    }

    let channels = headers
        .into_iter()
        .skip(1)
        .zip(columns)
        .map(|(name, values)| Channel::new(name, values))
        .collect();

    Ok(SignalTable::new(index, channels, AxisKind::TimeSeconds))
}

fn parse_field(s: &str, row: usize, col: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .with_context(|| format!("Row {row}, column '{col}': '{s}' is not a number"))
}
