use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::flow::Flow;
use crate::gateway::Ack;
use crate::validate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Editing,
    Submitting,
    Submitted,
    SubmitFailed,
}

/// Where the workflow sits in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Step(u8),
    Submitting,
    Submitted,
    /// Still on the final step, with the gateway error surfaced.
    SubmitFailed,
}

/// Single source of truth for one workflow. Views only ever read it.
pub struct WorkflowState<F: Flow> {
    pub(crate) current_step: u8,
    pub(crate) sections: F::Sections,
    pub(crate) status: SubmissionStatus,
    pub(crate) last_error: Option<String>,
    pub(crate) ack: Option<Ack>,
    pub(crate) application_id: Uuid,
}

impl<F: Flow> WorkflowState<F> {
    pub(crate) fn new(sections: F::Sections) -> Self {
        Self {
            current_step: 1,
            sections,
            status: SubmissionStatus::Editing,
            last_error: None,
            ack: None,
            application_id: Uuid::new_v4(),
        }
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn step_count(&self) -> u8 {
        F::step_count()
    }

    pub fn step_title(&self) -> &'static str {
        F::step_title(self.current_step).unwrap_or_default()
    }

    pub fn sections(&self) -> &F::Sections {
        &self.sections
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn ack(&self) -> Option<&Ack> {
        self.ack.as_ref()
    }

    pub fn application_id(&self) -> Uuid {
        self.application_id
    }

    pub fn phase(&self) -> Phase {
        match self.status {
            SubmissionStatus::Editing => Phase::Step(self.current_step),
            SubmissionStatus::Submitting => Phase::Submitting,
            SubmissionStatus::Submitted => Phase::Submitted,
            SubmissionStatus::SubmitFailed => Phase::SubmitFailed,
        }
    }

    /// Navigation and editing are closed while a submission is in flight and
    /// after it succeeded.
    pub fn is_editable(&self) -> bool {
        matches!(
            self.status,
            SubmissionStatus::Editing | SubmissionStatus::SubmitFailed
        )
    }

    pub fn validate_step(&self, step: u8) -> bool {
        F::validate_step(&self.sections, step)
    }

    /// Field errors for the current step, for inline display.
    pub fn step_errors(&self) -> Vec<ValidationError> {
        F::step_errors(&self.sections, self.current_step)
    }

    /// "Next" (or "Submit" on the last step) is enabled.
    pub fn can_proceed(&self) -> bool {
        self.is_editable() && self.validate_step(self.current_step)
    }

    pub fn can_go_back(&self) -> bool {
        self.is_editable() && self.current_step > 1
    }

    pub fn progress_percentage(&self) -> u8 {
        if self.status == SubmissionStatus::Submitted {
            return 100;
        }
        (u16::from(self.current_step) * 100 / u16::from(F::step_count())) as u8
    }
}

impl<F: Flow> fmt::Debug for WorkflowState<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowState")
            .field("flow", &F::NAME)
            .field("current_step", &self.current_step)
            .field("status", &self.status)
            .field("last_error", &self.last_error)
            .field("application_id", &self.application_id)
            .field("sections", &self.sections)
            .finish()
    }
}
