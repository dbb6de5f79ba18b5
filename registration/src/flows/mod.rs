pub mod provider;
pub mod verification;

pub use provider::{ProviderPatch, ProviderRegistration, ProviderSections, SectionKey};
pub use verification::{FreelancerVerification, VerificationPatch, VerificationSections};
