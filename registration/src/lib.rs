pub mod admission;
pub mod config;
pub mod controller;
pub mod editors;
pub mod flow;
pub mod flows;
pub mod gateway;
pub mod navigation;
pub mod sections;
pub mod session;
pub mod util;
pub mod validate;

pub use admission::{AdmissionAnswers, AdmissionTestData, ChoiceId, QuestionBank, QuestionId};
pub use config::RegistrationConfig;
pub use controller::{
    FreelancerVerificationController, Phase, ProviderRegistrationController, SubmissionStatus,
    WorkflowAction, WorkflowController, WorkflowState,
};
pub use flow::Flow;
pub use flows::{FreelancerVerification, ProviderPatch, ProviderRegistration, VerificationPatch};
pub use gateway::{Ack, Application, HttpGateway, InMemoryGateway, SubmissionGateway};
pub use navigation::{Navigator, NoNavigation, Page};
pub use session::{Role, Session, User};
pub use util::errors::{ConfigError, SessionError, SubmissionError, WorkflowError};
