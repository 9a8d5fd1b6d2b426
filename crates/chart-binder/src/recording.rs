use std::sync::Mutex;

use crate::{ChartError, ChartSpec, ChartTarget};

/// A [`ChartTarget`] that keeps every spec it is asked to draw. With
/// `unavailable()` it behaves like a page without the charting library.
#[derive(Debug, Default)]
pub struct RecordingChart {
    available: bool,
    drawn: Mutex<Vec<ChartSpec>>,
}

impl RecordingChart {
    pub fn new() -> Self {
        Self {
            available: true,
            drawn: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn drawn(&self) -> Vec<ChartSpec> {
        self.drawn.lock().map(|d| d.clone()).unwrap_or_default()
    }

    pub fn draw_count(&self) -> usize {
        self.drawn.lock().map(|d| d.len()).unwrap_or_default()
    }
}

impl ChartTarget for RecordingChart {
    fn draw(&self, spec: &ChartSpec) -> Result<(), ChartError> {
        if !self.available {
            return Err(ChartError::Unavailable);
        }
        self.drawn
            .lock()
            .map_err(|e| ChartError::Render(e.to_string()))?
            .push(spec.clone());
        Ok(())
    }
}
