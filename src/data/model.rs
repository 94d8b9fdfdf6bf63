use std::fmt;

// ---------------------------------------------------------------------------
// AxisKind – what the shared index of a table represents
// ---------------------------------------------------------------------------

/// Unit of the table's index axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// Time in seconds (raw recordings and all time-domain processors).
    TimeSeconds,
    /// Frequency in hertz (output of the spectrum transform).
    FrequencyHz,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisKind::TimeSeconds => write!(f, "Time [s]"),
            AxisKind::FrequencyHz => write!(f, "Frequency [Hz]"),
        }
    }
}

// ---------------------------------------------------------------------------
// Channel – one named numeric column
// ---------------------------------------------------------------------------

/// A single named channel (one column of the recording).
#[derive(Debug, Clone)]
pub struct Channel {
    pub name: String,
    /// Sample values – same length as the owning table's index.
    pub values: Vec<f64>,
}

impl Channel {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Channel {
            name: name.into(),
            values,
        }
    }
}

// ---------------------------------------------------------------------------
// SignalTable – channels over a shared index
// ---------------------------------------------------------------------------

/// An ordered set of equal-length numeric channels sharing one index.
///
/// The index is monotonically non-decreasing: seconds for time-domain
/// tables, hertz after a spectrum transform. Processors never mutate a
/// table in place; each step produces a new one.
#[derive(Debug, Clone)]
pub struct SignalTable {
    pub index: Vec<f64>,
    pub channels: Vec<Channel>,
    pub axis: AxisKind,
}

impl Default for SignalTable {
    fn default() -> Self {
        SignalTable::empty()
    }
}

impl SignalTable {
    /// An empty time-domain table (the loader's failure value).
    pub fn empty() -> Self {
        SignalTable {
            index: Vec::new(),
            channels: Vec::new(),
            axis: AxisKind::TimeSeconds,
        }
    }

    /// Build a table from an index and named columns.
    ///
    /// Debug-asserts the equal-length invariant; the loader and the
    /// processors only ever construct conforming tables.
    pub fn new(index: Vec<f64>, channels: Vec<Channel>, axis: AxisKind) -> Self {
        debug_assert!(
            channels.iter().all(|c| c.values.len() == index.len()),
            "channel length must match index length"
        );
        SignalTable {
            index,
            channels,
            axis,
        }
    }

    /// Number of samples (rows).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the table holds no samples or no channels.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty() || self.channels.is_empty()
    }

    /// Channel names in column order.
    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name.as_str()).collect()
    }

    /// Last index value, i.e. total duration for a time-domain table.
    pub fn duration(&self) -> f64 {
        self.index.last().copied().unwrap_or(0.0)
    }

    /// Replace the index with a uniform time axis at `fs` Hz starting
    /// at zero (the post-load step of the interactive shell).
    pub fn reindex_uniform(&self, fs: f64) -> SignalTable {
        let dt = 1.0 / fs;
        SignalTable {
            index: (0..self.len()).map(|i| i as f64 * dt).collect(),
            channels: self.channels.clone(),
            axis: AxisKind::TimeSeconds,
        }
    }

    /// Rows whose index lies within `[start, end]` (the display slice).
    pub fn slice_range(&self, start: f64, end: f64) -> SignalTable {
        let lo = self.index.partition_point(|&t| t < start);
        let hi = self.index.partition_point(|&t| t <= end);
        SignalTable {
            index: self.index[lo..hi].to_vec(),
            channels: self
                .channels
                .iter()
                .map(|c| Channel::new(c.name.clone(), c.values[lo..hi].to_vec()))
                .collect(),
            axis: self.axis,
        }
    }

    /// Apply `f` to every channel, keeping the index and axis.
    ///
    /// The workhorse of the per-column processors: `f` receives the
    /// channel samples and returns the transformed column (same length).
    pub fn map_channels<F>(&self, mut f: F) -> SignalTable
    where
        F: FnMut(&[f64]) -> Vec<f64>,
    {
        SignalTable {
            index: self.index.clone(),
            channels: self
                .channels
                .iter()
                .map(|c| Channel::new(c.name.clone(), f(&c.values)))
                .collect(),
            axis: self.axis,
        }
    }
}
