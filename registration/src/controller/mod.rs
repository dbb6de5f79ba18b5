pub mod actions;
pub mod manager;
pub mod state;


pub use actions::WorkflowAction;
pub use manager::WorkflowController;
pub use state::{Phase, SubmissionStatus, WorkflowState};

use crate::flows::{FreelancerVerification, ProviderRegistration};

pub type ProviderRegistrationController = WorkflowController<ProviderRegistration>;
pub type FreelancerVerificationController = WorkflowController<FreelancerVerification>;
