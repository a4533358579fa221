//=========================================================================
// Frame Budget
//=========================================================================
//
// Target logical-update rate and the fixed step derived from it.
//
//   frame_time = 1 / rate   (seconds, f64, accumulator arithmetic)
//   step       = frame_time as Duration (handed to Scene::advance)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::LoopError;

//=== FrameBudget =========================================================

/// Immutable fixed-step budget. `frame_time > 0` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameBudget {
    rate: f64,
    frame_time: f64,
    step: Duration,
}

impl FrameBudget {
    /// Derives the budget from a target rate in updates per second.
    ///
    /// # Errors
    ///
    /// [`LoopError::InvalidFrameRate`] if `rate` is not a positive,
    /// finite number, or so large that the step rounds to zero.
    pub fn from_rate(rate: f64) -> Result<Self, LoopError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(LoopError::InvalidFrameRate(rate));
        }

        let frame_time = 1.0 / rate;
        let step = Duration::from_secs_f64(frame_time);
        if frame_time <= 0.0 || step.is_zero() {
            return Err(LoopError::InvalidFrameRate(rate));
        }

        Ok(Self { rate, frame_time, step })
    }

    /// Target logical updates per second.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Fixed step in seconds.
    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }

    /// Fixed step as a `Duration`.
    pub fn step(&self) -> Duration {
        self.step
    }
}

//=== StepBoundary ========================================================

/// Whether an accumulator holding exactly one `frame_time` is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepBoundary {
    /// `accumulator >= frame_time`: an exactly-full step runs now.
    ///
    /// Default, because `Exclusive` can leave a whole step in the
    /// accumulator: five 0.0002 s deltas sum to exactly 0.001 in `f64`.
    #[default]
    Inclusive,

    /// `accumulator > frame_time`: an exactly-full step waits for the
    /// next iteration.
    Exclusive,
}

impl StepBoundary {
    pub(crate) fn is_due(self, accumulator: f64, frame_time: f64) -> bool {
        match self {
            Self::Inclusive => accumulator >= frame_time,
            Self::Exclusive => accumulator > frame_time,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_from_default_cap() {
        let budget = FrameBudget::from_rate(5000.0).unwrap();
        assert_eq!(budget.rate(), 5000.0);
        assert!((budget.frame_time() - 0.0002).abs() < 1e-15);
        assert_eq!(budget.step(), Duration::from_micros(200));
    }

    #[test]
    fn budget_rejects_zero_negative_and_non_finite() {
        for rate in [0.0, -60.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(FrameBudget::from_rate(rate), Err(LoopError::InvalidFrameRate(_))),
                "rate {} should be rejected",
                rate
            );
        }
    }

    #[test]
    fn budget_rejects_sub_nanosecond_steps() {
        assert!(FrameBudget::from_rate(1e12).is_err());
    }

    #[test]
    fn inclusive_boundary_runs_exact_step() {
        assert!(StepBoundary::Inclusive.is_due(0.001, 0.001));
        assert!(!StepBoundary::Inclusive.is_due(0.0009, 0.001));
    }

    #[test]
    fn exclusive_boundary_defers_exact_step() {
        assert!(!StepBoundary::Exclusive.is_due(0.001, 0.001));
        assert!(StepBoundary::Exclusive.is_due(0.0011, 0.001));
    }

    #[test]
    fn default_boundary_is_inclusive() {
        assert_eq!(StepBoundary::default(), StepBoundary::Inclusive);
    }

    #[test]
    fn summed_small_deltas_hit_the_boundary_exactly() {
        let frame_time = FrameBudget::from_rate(1000.0).unwrap().frame_time();
        let acc = (0..5).fold(0.0_f64, |acc, _| acc + Duration::from_micros(200).as_secs_f64());

        assert_eq!(acc, frame_time);
        assert!(StepBoundary::default().is_due(acc, frame_time));
        assert!(!StepBoundary::Exclusive.is_due(acc, frame_time));
    }
}
