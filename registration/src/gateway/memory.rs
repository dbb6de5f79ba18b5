use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Ack, Application, SubmissionGateway};
use crate::util::errors::SubmissionError;

/// Keeps accepted applications in memory. Used offline and in tests.
pub struct InMemoryGateway<S> {
    accepted: Mutex<Vec<Application<S>>>,
    failure: Mutex<Option<SubmissionError>>,
    calls: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S> InMemoryGateway<S> {
    pub fn new() -> Self {
        Self {
            accepted: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Reject every call with `error` until [`recover`](Self::recover).
    pub fn fail_with(&self, error: SubmissionError) {
        *lock(&self.failure) = Some(error);
    }

    pub fn recover(&self) {
        *lock(&self.failure) = None;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn accepted(&self) -> Vec<Application<S>> {
        lock(&self.accepted).clone()
    }
}

impl<S> Default for InMemoryGateway<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S> SubmissionGateway<S> for InMemoryGateway<S>
where
    S: Send + Sync + 'static,
{
    async fn submit_application(&self, application: &Application<S>) -> Result<Ack, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = lock(&self.failure).clone() {
            return Err(error);
        }

        let mut accepted = lock(&self.accepted);
        accepted.push(application.clone());
        Ok(Ack {
            reference: format!("{}-{:04}", application.flow, accepted.len()),
            received_at: Utc::now(),
        })
    }
}
