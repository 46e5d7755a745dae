use thiserror::Error;

use crate::combinators::Stage;

/// Errors raised by combinator construction, worker faults and inlets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Split requires at least one destination")]
    NoDestinations,

    #[error("{stage} worker faulted: {message}")]
    StageFault { stage: Stage, message: String },

    #[error("Outlet was dropped before the value could be delivered")]
    Disconnected,
}

impl PatternError {
    /// Build a stage fault from a caught panic payload
    pub(crate) fn from_panic(stage: Stage, payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };

        PatternError::StageFault { stage, message }
    }

    /// Check if this error came from a faulted worker
    pub fn is_fault(&self) -> bool {
        matches!(self, PatternError::StageFault { .. })
    }
}
