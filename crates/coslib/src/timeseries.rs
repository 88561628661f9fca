//! Time-series windowing
//!
//! Simulation output is written as `(position, value)` samples, one sweep
//! over the mesh per time step, all concatenated. A sweep ends wherever the
//! position decreases; each sweep is one window, and window `k` holds time
//! `k * delta_t`.

use std::path::Path;

use coslib_core::{extract_numbers, Matrix};

use crate::error::{Error, Result};
use crate::source::{read_delimited, DelimitedOptions};

/// Relative slack allowed when matching a time to a window, covering the
/// representation error of decimal time steps such as 0.1
const TIME_TOLERANCE: f64 = 1e-9;

/// Inclusive 0-based sample range of one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: usize,
    pub stop: usize,
}

impl TimeWindow {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.stop + 1 - self.start
    }

    /// Always false: a window spans `start..=stop`, so it holds at least
    /// one sample
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Options for [`TimeSeries::extract_window`]
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOptions {
    /// Time between consecutive windows (default: 0.1)
    pub delta_t: f64,
    /// Keep only samples at exactly this position
    pub location: Option<f64>,
    /// Positions of the result to drop, e.g. known-bad mesh nodes
    pub delete: Vec<usize>,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            delta_t: 0.1,
            location: None,
            delete: Vec::new(),
        }
    }
}

impl WindowOptions {
    pub fn delta_t(mut self, delta_t: f64) -> Self {
        self.delta_t = delta_t;
        self
    }

    pub fn location(mut self, location: f64) -> Self {
        self.location = Some(location);
        self
    }

    pub fn delete(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.delete = indices.into_iter().collect();
        self
    }
}

/// Concatenated `(x, y)` sweeps
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl TimeSeries {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::shape("series x vs y", x.len(), y.len()));
        }
        Ok(Self { x, y })
    }

    /// Use the first two columns of a matrix as `x` and `y`
    pub fn from_matrix(matrix: &Matrix) -> Result<Self> {
        if matrix.cols() < 2 {
            return Err(Error::Format(format!(
                "series needs two columns, got {}",
                matrix.cols()
            )));
        }
        Self::new(matrix.column(0), matrix.column(1))
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Split the series wherever `x` decreases
    pub fn windows(&self) -> Vec<TimeWindow> {
        if self.x.is_empty() {
            return Vec::new();
        }

        let mut windows = Vec::new();
        let mut start = 0;
        for (i, pair) in self.x.windows(2).enumerate() {
            if pair[1] - pair[0] < 0.0 {
                windows.push(TimeWindow { start, stop: i });
                start = i + 1;
            }
        }
        windows.push(TimeWindow {
            start,
            stop: self.x.len() - 1,
        });
        windows
    }

    /// Index of the window holding `time`
    ///
    /// Only exact multiples of `delta_t` match, up to floating-point
    /// representation noise; there is no interpolation between windows.
    pub fn window_index(&self, time: f64, delta_t: f64) -> Result<usize> {
        if !(delta_t.is_finite() && delta_t > 0.0) {
            return Err(Error::Config(format!(
                "time step must be positive, got {}",
                delta_t
            )));
        }

        let count = self.windows().len();
        let k = (time / delta_t).round();
        let slack = TIME_TOLERANCE * time.abs().max(1.0);

        if k >= 0.0 && (k as usize) < count && (k * delta_t - time).abs() <= slack {
            Ok(k as usize)
        } else {
            Err(Error::NotFound(format!(
                "no window at time {} (step {}, {} windows)",
                time, delta_t, count
            )))
        }
    }

    /// The window holding `time`
    pub fn window(&self, time: f64, delta_t: f64) -> Result<TimeWindow> {
        let index = self.window_index(time, delta_t)?;
        Ok(self.windows()[index])
    }

    /// Values of the window at `time`, optionally filtered by position and
    /// with selected result positions removed
    ///
    /// # Example
    /// ```rust
    /// use coslib::{TimeSeries, WindowOptions};
    ///
    /// let series = TimeSeries::new(vec![1.0, 2.0, 1.0, 2.0], vec![10.0, 20.0, 30.0, 40.0])?;
    /// let values = series.extract_window(1.0, &WindowOptions::default().delta_t(1.0))?;
    /// assert_eq!(values, vec![30.0, 40.0]);
    /// # Ok::<(), coslib::Error>(())
    /// ```
    pub fn extract_window(&self, time: f64, options: &WindowOptions) -> Result<Vec<f64>> {
        let window = self.window(time, options.delta_t)?;
        let range = window.start..=window.stop;

        let mut values: Vec<f64> = match options.location {
            Some(location) => self.x[range.clone()]
                .iter()
                .zip(&self.y[range])
                .filter(|(x, _)| **x == location)
                .map(|(_, y)| *y)
                .collect(),
            None => self.y[range].to_vec(),
        };

        if !options.delete.is_empty() {
            let mut delete = options.delete.clone();
            delete.sort_unstable();
            delete.dedup();

            if let Some(&bad) = delete.iter().find(|&&i| i >= values.len()) {
                return Err(Error::Index(format!(
                    "delete index {} out of bounds for {} values",
                    bad,
                    values.len()
                )));
            }
            // Remove from the back so earlier positions stay valid
            for &i in delete.iter().rev() {
                values.remove(i);
            }
        }

        log::debug!(
            "window {}..={} at time {}: {} values",
            window.start,
            window.stop,
            time,
            values.len()
        );
        Ok(values)
    }
}

/// Options for [`read_series_window`]
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesFileOptions {
    /// First data row of the file (1-based; default 9, after the header block)
    pub start_row: usize,
    pub window: WindowOptions,
}

impl Default for SeriesFileOptions {
    fn default() -> Self {
        Self {
            start_row: 9,
            window: WindowOptions::default(),
        }
    }
}

/// Read simulation output from delimited text and extract one window
pub fn read_series_window<P: AsRef<Path>>(
    path: P,
    time: f64,
    options: &SeriesFileOptions,
) -> Result<Vec<f64>> {
    let grid = read_delimited(path, &DelimitedOptions::numeric().start_row(options.start_row))?;
    let samples = extract_numbers(&grid, None, None)?;
    TimeSeries::from_matrix(&samples)?.extract_window(time, &options.window)
}
