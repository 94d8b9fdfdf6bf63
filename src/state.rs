use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::data::loader;
use crate::data::model::SignalTable;
use crate::dsp::{self, ChainParams, ProcessOp, SpectrumOutput};

/// Directory scanned for `.csv` recordings at startup.
pub const DEFAULT_DATA_DIR: &str = "data";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// `.csv` files discovered under the data directory.
    pub available_files: Vec<PathBuf>,

    /// Currently selected file (None until the user picks one).
    pub selected_file: Option<PathBuf>,

    /// Raw loaded recording, index as stored in the file.
    pub raw: SignalTable,

    /// Selected chain operations (applied in priority order).
    pub selected_ops: BTreeSet<ProcessOp>,

    /// Scalar parameters for the chain.
    pub params: ChainParams,

    /// Optional frequency-domain resampling applied before the chain.
    pub resample_enabled: bool,
    pub target_rate: f64,

    /// Display slice in seconds.
    pub time_start: f64,
    pub time_end: f64,

    /// Cached chain output for the current widget values.
    pub processed: SignalTable,

    /// Cached one-sided amplitude spectrum of the displayed slice.
    pub freq_domain: SignalTable,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Set by any widget change; consumed by the next recompute.
    pub dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            available_files: loader::discover_csv_files(DEFAULT_DATA_DIR.as_ref()),
            selected_file: None,
            raw: SignalTable::empty(),
            selected_ops: BTreeSet::from([ProcessOp::Lowpass]),
            params: ChainParams::default(),
            resample_enabled: false,
            target_rate: 100.0,
            time_start: 0.0,
            time_end: 5.0,
            processed: SignalTable::empty(),
            freq_domain: SignalTable::empty(),
            status_message: None,
            dirty: false,
        }
    }
}

impl AppState {
    /// Load a recording and reset the view to its first seconds.
    pub fn load_file(&mut self, path: PathBuf) {
        let table = loader::load_csv(&path);
        if table.is_empty() {
            self.status_message = Some(format!("Could not load {} (empty table)", path.display()));
            self.raw = SignalTable::empty();
        } else {
            let indexed = table.reindex_uniform(self.params.sample_rate);
            let duration = indexed.duration();
            self.status_message = Some(format!(
                "{}: {} samples, {} channels, {:.2} s @ {} Hz",
                path.file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
                indexed.len(),
                indexed.channels.len(),
                duration,
                self.params.sample_rate,
            ));
            self.time_start = 0.0;
            self.time_end = duration.min(5.0);
            self.raw = table;
        }
        self.selected_file = Some(path);
        self.dirty = true;
    }

    /// Recompute the whole chain from the raw table if any widget
    /// changed since the last frame.
    pub fn recompute_if_dirty(&mut self) {
        if !std::mem::take(&mut self.dirty) {
            return;
        }
        if self.raw.is_empty() {
            self.processed = SignalTable::empty();
            self.freq_domain = SignalTable::empty();
            return;
        }

        match self.run_chain() {
            Ok((processed, freq_domain)) => {
                self.processed = processed;
                self.freq_domain = freq_domain;
            }
            Err(e) => {
                // Keep the previous plots; just surface the problem.
                log::warn!("Processing failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    fn run_chain(&self) -> Result<(SignalTable, SignalTable), dsp::DspError> {
        let mut table = self.raw.reindex_uniform(self.params.sample_rate);
        let mut params = self.params.clone();

        if self.resample_enabled {
            table = dsp::resample(&table, params.sample_rate, self.target_rate)?;
            // Downstream filters and the spectrum see the new rate.
            params.sample_rate = self.target_rate;
        }

        let processed = dsp::apply_chain(&table, &self.selected_ops, &params)?;
        let sliced = processed.slice_range(self.time_start, self.time_end);
        let freq_domain = dsp::spectrum(&sliced, params.sample_rate, SpectrumOutput::Magnitude)?;
        Ok((sliced, freq_domain))
    }

    /// Effective duration of the loaded recording at the current rate.
    pub fn total_duration(&self) -> f64 {
        if self.raw.is_empty() || self.params.sample_rate <= 0.0 {
            0.0
        } else {
            (self.raw.len().saturating_sub(1)) as f64 / self.params.sample_rate
        }
    }

    /// One-line processing summary for the status area.
    pub fn processing_summary(&self) -> String {
        let ops: Vec<&str> = ProcessOp::ALL
            .into_iter()
            .filter(|op| self.selected_ops.contains(op))
            .map(|op| op.label())
            .collect();
        let ops = if ops.is_empty() {
            "none".to_string()
        } else {
            ops.join(", ")
        };
        format!(
            "Applied: {ops} | range {:.2}s – {:.2}s | {} points shown",
            self.time_start,
            self.time_end,
            self.processed.len()
        )
    }
}
