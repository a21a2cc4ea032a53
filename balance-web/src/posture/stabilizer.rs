//! Posture stabilizer - hysteresis over noisy per-frame classifications
//!
//! A confirmed posture is sticky: switching requires a strong majority in
//! the window that holds for several consecutive calls. A single occluded
//! or blurred frame never toggles the verdict.

use serde::Serialize;

use crate::config::StabilizerConfig;
use super::buffer::RingBuffer;
use super::result::PostureState;

/// One raw classification fed to the stabilizer
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Observation {
    pub state: PostureState,
    pub confidence: f32,
    pub timestamp: f64,
}

pub struct StateStabilizer {
    window: RingBuffer<Observation>,
    confirmed: Option<PostureState>,
    /// Consecutive calls in which a challenger held the switch majority
    consecutive: u32,
    initial_majority: f32,
    switch_majority: f32,
    switch_frames: u32,
}

impl StateStabilizer {
    pub fn new(config: &StabilizerConfig) -> Self {
        Self {
            window: RingBuffer::new(config.window),
            confirmed: None,
            consecutive: 0,
            initial_majority: config.initial_majority,
            switch_majority: config.switch_majority,
            switch_frames: config.switch_frames.max(1),
        }
    }

    /// Feed one raw classification, returning the state to report
    ///
    /// Before anything is confirmed the raw state is passed through as a
    /// provisional value.
    pub fn observe(&mut self, state: PostureState, confidence: f32, timestamp: f64) -> PostureState {
        self.window.push(Observation { state, confidence, timestamp });

        let Some((majority, share)) = self.majority() else {
            return self.confirmed.unwrap_or(state);
        };

        let confirmed = match self.confirmed {
            None => {
                if share >= self.initial_majority {
                    log::info!("posture confirmed: {} ({:.0}%)", majority.name(), share * 100.0);
                    self.confirmed = Some(majority);
                    self.consecutive = 0;
                    return majority;
                }
                return state;
            }
            Some(confirmed) => confirmed,
        };

        if majority == confirmed {
            self.consecutive = 0;
        } else if share >= self.switch_majority {
            self.consecutive += 1;
            log::debug!(
                "{} challenging {} ({}/{})",
                majority.name(), confirmed.name(), self.consecutive, self.switch_frames
            );
            if self.consecutive >= self.switch_frames {
                log::info!("posture switched: {} -> {}", confirmed.name(), majority.name());
                self.confirmed = Some(majority);
                self.consecutive = 0;
                return majority;
            }
        } else {
            self.consecutive = self.consecutive.saturating_sub(1);
        }

        confirmed
    }

    /// Most frequent known state and its share of the whole window
    ///
    /// Unknown observations dilute the share but never win.
    fn majority(&self) -> Option<(PostureState, f32)> {
        let total = self.window.len();
        if total == 0 {
            return None;
        }
        let count = |target: PostureState| self.window.iter().filter(|o| o.state == target).count();
        let sitting = count(PostureState::Sitting);
        let standing = count(PostureState::Standing);

        let (state, n) = if standing > sitting {
            (PostureState::Standing, standing)
        } else {
            (PostureState::Sitting, sitting)
        };
        (n > 0).then(|| (state, n as f32 / total as f32))
    }

    pub fn confirmed(&self) -> Option<PostureState> {
        self.confirmed
    }

    pub fn consecutive(&self) -> u32 {
        self.consecutive
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.confirmed = None;
        self.consecutive = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PostureState::{Sitting, Standing, Unknown};

    fn stabilizer() -> StateStabilizer {
        StateStabilizer::new(&StabilizerConfig::default())
    }

    fn feed(s: &mut StateStabilizer, state: PostureState, n: usize) -> PostureState {
        let mut out = Unknown;
        for _ in 0..n {
            out = s.observe(state, 80.0, 0.0);
        }
        out
    }

    #[test]
    fn first_majority_confirms_immediately() {
        let mut s = stabilizer();
        assert_eq!(s.observe(Sitting, 70.0, 0.0), Sitting);
        assert_eq!(s.confirmed(), Some(Sitting));
    }

    #[test]
    fn unknown_is_passed_through_unconfirmed() {
        let mut s = stabilizer();
        assert_eq!(s.observe(Unknown, 10.0, 0.0), Unknown);
        assert_eq!(s.confirmed(), None);
        // 1 of 3 is below half
        s.observe(Unknown, 10.0, 0.0);
        assert_eq!(s.observe(Standing, 60.0, 0.0), Standing);
        assert_eq!(s.confirmed(), None);
    }

    #[test]
    fn repeated_confirmed_state_keeps_counter_at_zero() {
        let mut s = stabilizer();
        feed(&mut s, Sitting, 1);
        for _ in 0..40 {
            assert_eq!(s.observe(Sitting, 80.0, 0.0), Sitting);
            assert_eq!(s.consecutive(), 0);
        }
    }

    #[test]
    fn single_outlier_does_not_flip() {
        let mut s = stabilizer();
        feed(&mut s, Standing, 30);
        assert_eq!(s.observe(Sitting, 90.0, 0.0), Standing);
        assert_eq!(feed(&mut s, Standing, 29), Standing);
        assert_eq!(s.confirmed(), Some(Standing));
    }

    #[test]
    fn flip_takes_exactly_ten_qualifying_calls() {
        let mut s = stabilizer();
        feed(&mut s, Sitting, 30);

        // 24 of 30 standing reaches the 80% share on the 24th call
        for _ in 0..23 {
            assert_eq!(s.observe(Standing, 80.0, 0.0), Sitting);
        }
        assert_eq!(s.consecutive(), 0);

        for call in 1..10 {
            assert_eq!(s.observe(Standing, 80.0, 0.0), Sitting);
            assert_eq!(s.consecutive(), call);
        }
        assert_eq!(s.observe(Standing, 80.0, 0.0), Standing);
        assert_eq!(s.consecutive(), 0);
        assert_eq!(s.confirmed(), Some(Standing));
    }

    #[test]
    fn counter_decays_when_share_drops() {
        let mut config = StabilizerConfig::default();
        config.window = 10;
        let mut s = StateStabilizer::new(&config);
        feed(&mut s, Sitting, 10);
        feed(&mut s, Standing, 10);
        assert_eq!(s.consecutive(), 3);

        // 8 standing of 10 still qualifies, 7 does not
        s.observe(Unknown, 0.0, 0.0);
        assert_eq!(s.consecutive(), 4);
        s.observe(Unknown, 0.0, 0.0);
        assert_eq!(s.consecutive(), 5);
        s.observe(Unknown, 0.0, 0.0);
        assert_eq!(s.consecutive(), 4);
        assert_eq!(s.confirmed(), Some(Sitting));
    }

    #[test]
    fn reset_forgets_everything() {
        let mut s = stabilizer();
        feed(&mut s, Standing, 20);
        s.reset();
        assert_eq!(s.confirmed(), None);
        assert_eq!(s.window_len(), 0);
        assert_eq!(s.observe(Sitting, 50.0, 0.0), Sitting);
    }
}
