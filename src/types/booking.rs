use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::combo::ComboSelection;
use crate::types::identifiers::{IdentifierError, RequestId, ScreeningId, SeatCode, TheaterId};

/// What a caller hands to `submit`. Nothing is checked until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub requester: String,
    pub theater: String,
    pub screening: String,
    pub seats: Vec<String>,
}

impl BookingRequest {
    pub fn new<S: Into<String>>(
        requester: impl Into<String>,
        theater: impl Into<String>,
        screening: impl Into<String>,
        seats: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            requester: requester.into(),
            theater: theater.into(),
            screening: screening.into(),
            seats: seats.into_iter().map(Into::into).collect(),
        }
    }
}

/// A request that passed structural validation and sits in the queue.
///
/// Consumed exactly once, by `process_next` or `cancel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequest {
    pub id: RequestId,
    pub requester: String,
    pub theater: TheaterId,
    pub screening: ScreeningId,
    pub seats: Vec<SeatCode>,
    pub submitted_at: DateTime<Utc>, // informational only
}

/// A committed booking: every requested seat is now booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedBooking {
    pub request_id: RequestId,
    pub requester: String,
    pub theater: TheaterId,
    pub screening: ScreeningId,
    pub seats: Vec<SeatCode>,
    pub price: u64,
    pub processed_at: DateTime<Utc>,
}

/// A request dropped at processing time. Seats were left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedBooking {
    pub request: PendingRequest,
    pub conflict: ConflictError,
    pub processed_at: DateTime<Utc>,
}

/// Result of draining one request from the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProcessOutcome {
    Committed(ConfirmedBooking),
    Rejected(RejectedBooking),
    Empty,
}

impl ProcessOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, ProcessOutcome::Committed(_))
    }

    /// Collapse into the error taxonomy: a rejection becomes `Conflict`,
    /// an empty queue becomes `Ok(None)`.
    pub fn into_result(self) -> Result<Option<ConfirmedBooking>, EngineError> {
        match self {
            ProcessOutcome::Committed(booking) => Ok(Some(booking)),
            ProcessOutcome::Rejected(rejected) => Err(rejected.conflict.into()),
            ProcessOutcome::Empty => Ok(None),
        }
    }
}

/// `ProcessOutcome` plus the optional combo recommendation made on commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReport {
    pub outcome: ProcessOutcome,
    pub combo: Option<ComboSelection>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Requester name must not be empty")]
    EmptyRequester,

    #[error("At least one seat must be requested")]
    NoSeats,

    #[error("Seat {0} requested more than once")]
    DuplicateSeat(SeatCode),

    #[error("Unknown theater: {0}")]
    UnknownTheater(String),

    #[error("Unknown screening {screening:?} at {theater}")]
    UnknownScreening {
        theater: TheaterId,
        screening: String,
    },

    #[error("Seat {seat} does not exist in {screening} at {theater}")]
    UnknownSeat {
        theater: TheaterId,
        screening: ScreeningId,
        seat: SeatCode,
    },

    #[error("Budget must not be negative: {0}")]
    NegativeBudget(i64),

    #[error(transparent)]
    Identifier(#[from] IdentifierError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    #[error("Theater not recognized: {0}")]
    Theater(String),

    #[error("Screening {screening:?} not found at {theater}")]
    Screening {
        theater: TheaterId,
        screening: String,
    },

    #[error("Request {0} is not pending")]
    Request(RequestId),
}

/// Seats that were no longer available when a request was processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("Seats unavailable: {}", join_seats(.unavailable))]
pub struct ConflictError {
    pub unavailable: Vec<SeatCode>,
}

fn join_seats(seats: &[SeatCode]) -> String {
    seats.iter().map(SeatCode::as_str).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),
}
