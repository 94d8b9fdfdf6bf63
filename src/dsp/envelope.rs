use crate::data::model::SignalTable;

use super::DspError;

// ---------------------------------------------------------------------------
// Centered rolling windows
// ---------------------------------------------------------------------------

/// Walk a centered window of `window` samples over `values`, shrinking
/// at the edges to whatever is available (never fewer than one sample),
/// and reduce each window with `f`.
fn rolling<F>(values: &[f64], window: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = values.len();
    let before = (window - 1) / 2;
    let after = window / 2;
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(before);
            let hi = (i + after + 1).min(n);
            f(&values[lo..hi])
        })
        .collect()
}

fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

fn root_mean_square(window: &[f64]) -> f64 {
    (window.iter().map(|v| v * v).sum::<f64>() / window.len() as f64).sqrt()
}

/// Centered moving average over every channel.
pub fn moving_average(table: &SignalTable, window: usize) -> Result<SignalTable, DspError> {
    if table.is_empty() {
        return Ok(table.clone());
    }
    if window == 0 {
        return Err(DspError::InvalidWindow);
    }
    Ok(table.map_channels(|values| rolling(values, window, mean)))
}

/// Moving root-mean-square (square, rolling mean, square root), the
/// standard EMG energy envelope.
pub fn rms_envelope(table: &SignalTable, window: usize) -> Result<SignalTable, DspError> {
    if table.is_empty() {
        return Ok(table.clone());
    }
    if window == 0 {
        return Err(DspError::InvalidWindow);
    }
    Ok(table.map_channels(|values| rolling(values, window, root_mean_square)))
}

// ---------------------------------------------------------------------------
// Rectification
// ---------------------------------------------------------------------------

/// Elementwise rectification mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rectification {
    /// Absolute value.
    Full,
    /// Negative samples clipped to zero.
    Half,
}

/// Elementwise rectification; no windowing, no parameters to validate.
pub fn rectify(table: &SignalTable, mode: Rectification) -> SignalTable {
    table.map_channels(|values| {
        values
            .iter()
            .map(|&v| match mode {
                Rectification::Full => v.abs(),
                Rectification::Half => v.max(0.0),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AxisKind, Channel, SignalTable};

    fn table(values: Vec<f64>) -> SignalTable {
        let index = (0..values.len()).map(|i| i as f64 * 0.005).collect();
        SignalTable::new(
            index,
            vec![Channel::new("emg0", values)],
            AxisKind::TimeSeconds,
        )
    }

    #[test]
    fn moving_average_window_one_is_identity() {
        let input = table(vec![1.0, -2.0, 3.5, 0.0, 7.0]);
        let out = moving_average(&input, 1).unwrap();
        assert_eq!(out.channels[0].values, input.channels[0].values);
    }

    #[test]
    fn moving_average_shrinks_at_edges() {
        let out = moving_average(&table(vec![1.0, 2.0, 3.0, 4.0, 5.0]), 3).unwrap();
        // First window is [1, 2] (two samples), interior windows full.
        assert_eq!(out.channels[0].values, vec![1.5, 2.0, 3.0, 4.0, 4.5]);
    }

    #[test]
    fn even_window_leans_forward() {
        // Window 2 covers [i, i+1], matching a centered pandas window.
        let out = moving_average(&table(vec![0.0, 2.0, 4.0, 6.0]), 2).unwrap();
        assert_eq!(out.channels[0].values, vec![1.0, 3.0, 5.0, 6.0]);
    }

    #[test]
    fn rms_of_constant_signal_is_its_magnitude() {
        let out = rms_envelope(&table(vec![-3.0; 50]), 9).unwrap();
        for v in &out.channels[0].values {
            assert!((v - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn rms_window_one_is_elementwise_abs() {
        let out = rms_envelope(&table(vec![1.0, -2.0, 0.5]), 1).unwrap();
        assert_eq!(out.channels[0].values, vec![1.0, 2.0, 0.5]);
    }

    #[test]
    fn full_rectification_matches_abs() {
        let input = table(vec![-1.5, 0.0, 2.5, -0.25]);
        let out = rectify(&input, Rectification::Full);
        for (y, x) in out.channels[0].values.iter().zip(&input.channels[0].values) {
            assert!(*y >= 0.0);
            assert_eq!(*y, x.abs());
        }
    }

    #[test]
    fn half_rectification_clips_negatives() {
        let input = table(vec![-1.5, 0.0, 2.5, -0.25]);
        let out = rectify(&input, Rectification::Half);
        assert_eq!(out.channels[0].values, vec![0.0, 0.0, 2.5, 0.0]);
    }

    #[test]
    fn zero_window_is_rejected_and_empty_passes_through() {
        assert!(matches!(
            moving_average(&table(vec![1.0]), 0),
            Err(DspError::InvalidWindow)
        ));
        assert!(matches!(
            rms_envelope(&table(vec![1.0]), 0),
            Err(DspError::InvalidWindow)
        ));
        assert!(moving_average(&SignalTable::empty(), 0).unwrap().is_empty());
    }
}
