//! Per-step results collected into the migration report.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    /// The step changed files.
    Applied,
    /// The step ran but its target already had the change.
    Unchanged,
    /// The step changed files but some optional regions were not found.
    Incomplete,
    /// The step did not run (missing input or unrecognised shape).
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl StepReport {
    pub fn new(step: impl Into<String>, status: StepStatus) -> Self {
        Self {
            step: step.into(),
            status,
            detail: None,
        }
    }

    pub fn applied(step: impl Into<String>) -> Self {
        Self::new(step, StepStatus::Applied)
    }

    pub fn unchanged(step: impl Into<String>) -> Self {
        Self::new(step, StepStatus::Unchanged)
    }

    pub fn skipped(step: impl Into<String>, why: impl Into<String>) -> Self {
        Self::new(step, StepStatus::Skipped).with_detail(why)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
