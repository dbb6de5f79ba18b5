use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::{SubmissionStatus, WorkflowAction, WorkflowState};
use crate::flow::Flow;
use crate::gateway::{Ack, Application, SubmissionGateway};
use crate::navigation::{Navigator, Page};
use crate::session::Session;
use crate::util::errors::{SessionError, WorkflowError};

pub struct WorkflowController<F: Flow> {
    // Current state - single source of truth
    state: WorkflowState<F>,

    applicant_id: String,
    gateway: Arc<dyn SubmissionGateway<F::Sections>>,
    navigator: Box<dyn Navigator>,

    // Action queue for sequential processing
    pending_actions: VecDeque<WorkflowAction<F::Patch>>,
}

impl<F: Flow> WorkflowController<F> {
    /// Enter the workflow on behalf of the signed-in user. Without one, the
    /// navigator is sent to the login page.
    pub fn start(
        session: &Session,
        gateway: Arc<dyn SubmissionGateway<F::Sections>>,
        mut navigator: Box<dyn Navigator>,
    ) -> Result<Self, SessionError> {
        let user = match session.user() {
            Ok(user) => user,
            Err(err) => {
                warn!(flow = F::NAME, "workflow entered without a session");
                navigator.navigate(Page::Login);
                return Err(err);
            }
        };

        let state = WorkflowState::new(F::initial_sections(user));
        info!(
            flow = F::NAME,
            page = %F::PAGE,
            user_id = %user.id,
            application_id = %state.application_id,
            "workflow started"
        );

        Ok(Self {
            state,
            applicant_id: user.id.clone(),
            gateway,
            navigator,
            pending_actions: VecDeque::new(),
        })
    }

    /// UI reads this - immutable reference
    pub fn state(&self) -> &WorkflowState<F> {
        &self.state
    }

    pub fn validate_step(&self, step: u8) -> bool {
        self.state.validate_step(step)
    }

    /// Move to `target`. Forward moves go one step at a time and only when
    /// the current step validates; any earlier step is always reachable.
    /// Returns whether the step changed.
    pub fn go_to_step(&mut self, target: u8) -> bool {
        if !self.state.is_editable() {
            warn!(flow = F::NAME, target, status = ?self.state.status, "navigation locked");
            return false;
        }

        let current = self.state.current_step;
        let allowed = if target == 0 || target > F::step_count() || target == current {
            false
        } else if target < current {
            true
        } else {
            target == current + 1 && F::validate_step(&self.state.sections, current)
        };

        if !allowed {
            debug!(flow = F::NAME, current, target, "step change refused");
            return false;
        }

        self.state.current_step = target;
        self.reopen();
        info!(flow = F::NAME, from = current, to = target, "step changed");
        true
    }

    pub fn advance(&mut self) -> bool {
        self.go_to_step(self.state.current_step.saturating_add(1))
    }

    pub fn go_back(&mut self) -> bool {
        self.go_to_step(self.state.current_step.saturating_sub(1))
    }

    /// Merge a section patch. A rejected patch leaves every section as it was.
    pub fn update_section(&mut self, patch: F::Patch) -> Result<(), WorkflowError> {
        self.ensure_editable()?;
        debug!(
            flow = F::NAME,
            section = F::patch_section(&patch),
            ?patch,
            "updating section"
        );
        F::apply_patch(&mut self.state.sections, patch)?;
        self.reopen();
        Ok(())
    }

    /// Hand the accumulated sections to the gateway. Only acts on the final
    /// step once it validates; otherwise nothing is sent and the state is
    /// untouched. A failed submission can be retried by calling this again.
    pub async fn submit(&mut self) -> Result<Ack, WorkflowError> {
        self.ensure_editable()?;

        let last = F::step_count();
        if self.state.current_step != last {
            return Err(WorkflowError::NotOnFinalStep {
                step: self.state.current_step,
            });
        }
        if !F::validate_step(&self.state.sections, last) {
            return Err(WorkflowError::StepIncomplete { step: last });
        }

        let application = Application {
            application_id: self.state.application_id,
            flow: F::NAME,
            applicant_id: self.applicant_id.clone(),
            submitted_at: Utc::now(),
            sections: Arc::new(self.state.sections.clone()),
        };

        info!(flow = F::NAME, application_id = %application.application_id, "submitting application");

        let in_flight = InFlight::begin(&mut self.state);
        let outcome = self.gateway.submit_application(&application).await;
        in_flight.settle();

        match outcome {
            Ok(ack) => {
                info!(flow = F::NAME, reference = %ack.reference, "application accepted");
                self.state.status = SubmissionStatus::Submitted;
                self.state.ack = Some(ack.clone());
                self.navigator.navigate(Page::Dashboard);
                Ok(ack)
            }
            Err(err) => {
                error!(flow = F::NAME, error = %err, "submission failed");
                self.state.status = SubmissionStatus::SubmitFailed;
                self.state.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Abandon the workflow. Nothing has been stored yet, so the state is
    /// simply dropped.
    pub fn cancel(mut self) {
        info!(flow = F::NAME, step = self.state.current_step, "workflow abandoned");
        self.navigator.navigate(Page::RoleSelection);
    }

    /// UI calls this - synchronous, just queues the action
    pub fn dispatch(&mut self, action: WorkflowAction<F::Patch>) {
        debug!("Dispatching action: {}", action.description());
        self.pending_actions.push_back(action);
    }

    /// Processes one action from the queue
    pub async fn update(&mut self) {
        if let Some(action) = self.pending_actions.pop_front() {
            debug!("Processing action: {}", action.description());
            self.handle_action(action).await;
        }
    }

    pub fn has_pending_actions(&self) -> bool {
        !self.pending_actions.is_empty()
    }

    pub fn clear_pending_actions(&mut self) {
        self.pending_actions.clear();
    }

    async fn handle_action(&mut self, action: WorkflowAction<F::Patch>) {
        match action {
            WorkflowAction::Advance => {
                self.advance();
            }
            WorkflowAction::GoBack => {
                self.go_back();
            }
            WorkflowAction::GoToStep(step) => {
                self.go_to_step(step);
            }
            WorkflowAction::UpdateSection(patch) => {
                if let Err(err) = self.update_section(patch) {
                    warn!(flow = F::NAME, error = %err, "section update rejected");
                    self.state.last_error = Some(err.to_string());
                }
            }
            WorkflowAction::Submit => match self.submit().await {
                // Gateway failures are already on the state.
                Ok(_) | Err(WorkflowError::Submission(_)) => {}
                Err(err) => warn!(flow = F::NAME, error = %err, "submit refused"),
            },
            WorkflowAction::ClearError => {
                if self.state.is_editable() {
                    self.reopen();
                }
            }
        }
    }

    fn ensure_editable(&self) -> Result<(), WorkflowError> {
        match self.state.status {
            SubmissionStatus::Submitting => Err(WorkflowError::Busy),
            SubmissionStatus::Submitted => Err(WorkflowError::Closed),
            SubmissionStatus::Editing | SubmissionStatus::SubmitFailed => Ok(()),
        }
    }

    /// Back to plain editing, dropping any surfaced error.
    fn reopen(&mut self) {
        self.state.status = SubmissionStatus::Editing;
        self.state.last_error = None;
    }
}

/// Marks the state `Submitting` for the lifetime of one gateway call. If the
/// submit future is dropped before the gateway answers, the state falls back
/// to `SubmitFailed` so the workflow can be edited and resubmitted.
struct InFlight<'a, F: Flow> {
    state: &'a mut WorkflowState<F>,
    settled: bool,
}

impl<'a, F: Flow> InFlight<'a, F> {
    fn begin(state: &'a mut WorkflowState<F>) -> Self {
        state.status = SubmissionStatus::Submitting;
        state.last_error = None;
        Self {
            state,
            settled: false,
        }
    }

    /// The gateway answered; the caller records the outcome.
    fn settle(mut self) {
        self.settled = true;
    }
}

impl<F: Flow> Drop for InFlight<'_, F> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!(
            flow = F::NAME,
            application_id = %self.state.application_id,
            "submission interrupted before the gateway answered"
        );
        self.state.status = SubmissionStatus::SubmitFailed;
        self.state.last_error = Some(WorkflowError::Interrupted.to_string());
    }
}
