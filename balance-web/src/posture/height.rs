//! Head height tracking
//!
//! Moving average of nose height plus a standing baseline taken once per
//! trial from the first few samples. Updated exactly once per frame by the
//! session; classifiers only read the snapshot.

use crate::config::ClassifierConfig;
use crate::pose::{Frame, NOSE};
use super::buffer::RingBuffer;

/// Read-only view of the height history for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeightSnapshot {
    /// Moving average of nose y over the window
    pub average: Option<f32>,
    /// Highest head position (smallest y) among the first samples
    pub baseline: Option<f32>,
}

impl HeightSnapshot {
    /// How far the head sits below the baseline (positive = lower)
    pub fn drop(&self) -> Option<f32> {
        Some(self.average? - self.baseline?)
    }
}

pub struct HeightTracker {
    history: RingBuffer<f32>,
    baseline: Option<f32>,
    baseline_samples: usize,
    min_visibility: f32,
}

impl HeightTracker {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            history: RingBuffer::new(config.height_window),
            baseline: None,
            baseline_samples: config.baseline_samples.max(1),
            min_visibility: config.min_visibility,
        }
    }

    /// Record this frame's nose height (skipped when the nose is not visible)
    pub fn observe(&mut self, frame: &Frame) {
        let Some(nose) = frame.visible(NOSE, self.min_visibility) else {
            return;
        };
        self.history.push(nose.y);

        if self.baseline.is_none() && self.history.len() >= self.baseline_samples {
            let baseline = self
                .history
                .earliest(self.baseline_samples)
                .copied()
                .fold(f32::INFINITY, f32::min);
            log::debug!("standing baseline set at y={:.3}", baseline);
            self.baseline = Some(baseline);
        }
    }

    pub fn snapshot(&self) -> HeightSnapshot {
        let average = if self.history.is_empty() {
            None
        } else {
            Some(self.history.iter().sum::<f32>() / self.history.len() as f32)
        };
        HeightSnapshot {
            average,
            baseline: self.baseline,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.history.len()
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.baseline = None;
    }
}
