/// Messages a view sends to the controller. `P` is the flow's patch type.
#[derive(Debug, Clone)]
pub enum WorkflowAction<P> {
    // Navigation
    Advance,
    GoBack,
    GoToStep(u8),

    // Section editing
    UpdateSection(P),

    // Submission
    Submit,

    // Error banner
    ClearError,
}

impl<P> WorkflowAction<P> {
    pub fn description(&self) -> &'static str {
        match self {
            WorkflowAction::Advance => "Advancing to next step",
            WorkflowAction::GoBack => "Going back to previous step",
            WorkflowAction::GoToStep(_) => "Jumping to step",
            WorkflowAction::UpdateSection(_) => "Updating section",
            WorkflowAction::Submit => "Submitting application",
            WorkflowAction::ClearError => "Clearing error",
        }
    }
}
