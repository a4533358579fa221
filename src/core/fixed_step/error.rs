//=========================================================================
// Loop Errors
//=========================================================================
//
// The loop itself has almost nothing that can fail. Errors are either
// startup preconditions (frame budget, clock) or collaborator failures
// that propagate unchanged to the caller.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use thiserror::Error;

//=== Stage ===============================================================

/// Collaborator call that was in flight when a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    HandleInput,
    Advance,
    Render,
    Present,
    Dispose,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HandleInput => "scene input",
            Self::Advance => "scene advance",
            Self::Render => "scene render",
            Self::Present => "surface present",
            Self::Dispose => "surface dispose",
        };
        f.write_str(name)
    }
}

//=== LoopError ===========================================================

/// Fatal loop errors.
#[derive(Debug, Error)]
pub enum LoopError {
    /// Target update rate is zero, negative, or not finite.
    #[error("frame rate must be a positive finite number, got {0}")]
    InvalidFrameRate(f64),

    /// Clock cannot guarantee monotonic readings.
    #[error("clock does not provide monotonic time")]
    NonMonotonicClock,

    /// A scene or surface call failed. The loop has no retry policy.
    #[error("{stage} failed")]
    Collaborator {
        stage: Stage,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl LoopError {
    pub(crate) fn collaborator(stage: Stage, source: anyhow::Error) -> Self {
        Self::Collaborator {
            stage,
            source: source.into(),
        }
    }

    /// Stage of a collaborator failure, if this is one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Collaborator { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn invalid_rate_message_includes_value() {
        let err = LoopError::InvalidFrameRate(-1.0);
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn collaborator_error_keeps_source() {
        let err = LoopError::collaborator(Stage::Render, anyhow::anyhow!("device lost"));

        assert_eq!(err.to_string(), "scene render failed");
        assert_eq!(err.stage(), Some(Stage::Render));

        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("device lost"));
    }

    #[test]
    fn precondition_errors_have_no_stage() {
        assert_eq!(LoopError::NonMonotonicClock.stage(), None);
    }
}
