use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::errors::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Freelancer,
    Client,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Identity of the person driving a workflow.
///
/// Constructed explicitly and handed to each workflow on entry; there is no
/// process-wide session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
    signed_in_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        let mut session = Self::anonymous();
        session.sign_in(user);
        session
    }

    pub fn sign_in(&mut self, user: User) {
        tracing::info!(user_id = %user.id, role = ?user.role, "session started");
        self.user = Some(user);
        self.signed_in_at = Some(Utc::now());
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "session ended");
        }
        self.signed_in_at = None;
    }

    pub fn user(&self) -> Result<&User, SessionError> {
        self.user.as_ref().ok_or(SessionError::NotSignedIn)
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.signed_in_at
    }
}
