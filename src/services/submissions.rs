use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{domain::default_capacity, PendingCenter, ResolvedPosition, SubmitCenterRequest};

/// Pending submissions held when no limit is configured
pub const DEFAULT_MAX_PENDING: usize = 1_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Submission queue is full ({0} pending); try again later")]
    QueueFull(usize),
}

/// In-memory queue of visitor-submitted centers awaiting review
///
/// Submissions are never merged into the catalog; reviewers publish them by
/// adding them to the catalog file. The queue holds at most `max_pending`
/// entries and refuses new ones once full.
#[derive(Debug)]
pub struct SubmissionQueue {
    pending: RwLock<Vec<PendingCenter>>,
    max_pending: usize,
}

impl SubmissionQueue {
    pub fn new(max_pending: usize) -> Self {
        Self {
            pending: RwLock::new(Vec::new()),
            max_pending: max_pending.max(1),
        }
    }

    pub fn max_pending(&self) -> usize {
        self.max_pending
    }

    /// Queue a validated request positioned at `position`
    pub async fn submit(
        &self,
        request: SubmitCenterRequest,
        position: ResolvedPosition,
    ) -> Result<PendingCenter, SubmissionError> {
        let mut queue = self.pending.write().await;
        if queue.len() >= self.max_pending {
            tracing::warn!(
                "Rejecting meal center submission: {} already pending",
                queue.len()
            );
            return Err(SubmissionError::QueueFull(queue.len()));
        }

        let pending = PendingCenter {
            submission_id: uuid::Uuid::new_v4(),
            name: request.name.trim().to_string(),
            category: request.category,
            address: request.address.trim().to_string(),
            coordinate: position.coordinate,
            position_source: position.source,
            timings: request.timings.trim().to_string(),
            contact: request.contact.filter(|c| !c.trim().is_empty()),
            description: request.description.filter(|d| !d.trim().is_empty()),
            capacity: request.capacity.unwrap_or_else(default_capacity),
            submitted_at: chrono::Utc::now(),
        };

        queue.push(pending.clone());

        tracing::info!(
            "Queued meal center submission {} ({})",
            pending.submission_id,
            pending.name
        );

        Ok(pending)
    }

    /// Snapshot of pending submissions, oldest first
    pub async fn pending(&self) -> Vec<PendingCenter> {
        self.pending.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.pending.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pending.read().await.is_empty()
    }
}

impl Default for SubmissionQueue {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PENDING)
    }
}
