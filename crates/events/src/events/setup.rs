use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Orchestrator step lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SetupEvent {
    StepStarted { step: String },
    StepCompleted { step: String },
    StepSkipped { step: String, reason: String },
    StepFailed { step: String, failure: FailureContext },
}
