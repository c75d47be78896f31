use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::types::booking::PendingRequest;
use crate::types::identifiers::RequestId;

/// FCFS line of validated, uncommitted requests.
///
/// The lock is held only for the push/pop itself.
#[derive(Debug, Default)]
pub struct BookingQueue {
    pending: Mutex<VecDeque<PendingRequest>>,
    next_id: AtomicU64,
}

impl BookingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next_id(&self) -> RequestId {
        RequestId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<PendingRequest>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, request: PendingRequest) {
        self.lock().push_back(request);
    }

    pub fn pop(&self) -> Option<PendingRequest> {
        self.lock().pop_front()
    }

    /// Remove a request that has not been picked up yet.
    pub fn cancel(&self, id: RequestId) -> Option<PendingRequest> {
        let mut pending = self.lock();
        let position = pending.iter().position(|r| r.id == id)?;
        pending.remove(position)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
