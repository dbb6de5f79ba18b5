//! Boundary to the persistence collaborator that stores finished
//! applications.

pub mod http;
pub mod memory;

pub use http::HttpGateway;
pub use memory::InMemoryGateway;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::util::errors::SubmissionError;

/// Everything handed to the gateway for one submission attempt.
///
/// `application_id` stays the same across resubmissions of one workflow and
/// doubles as the idempotency key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application<S> {
    pub application_id: Uuid,
    pub flow: &'static str,
    pub applicant_id: String,
    pub submitted_at: DateTime<Utc>,
    pub sections: Arc<S>,
}

impl<S> Clone for Application<S> {
    fn clone(&self) -> Self {
        Self {
            application_id: self.application_id,
            flow: self.flow,
            applicant_id: self.applicant_id.clone(),
            submitted_at: self.submitted_at,
            sections: Arc::clone(&self.sections),
        }
    }
}

/// Receipt for an accepted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ack {
    pub reference: String,
    pub received_at: DateTime<Utc>,
}

/// Either stores the whole application or fails without a partial write.
/// Implementations never retry on their own.
#[async_trait]
pub trait SubmissionGateway<S>: Send + Sync
where
    S: Send + Sync + 'static,
{
    async fn submit_application(&self, application: &Application<S>) -> Result<Ack, SubmissionError>;
}
