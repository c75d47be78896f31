pub mod booking;
pub mod identifiers;

pub use booking::{
    BookingRequest, ConfirmedBooking, ConflictError, EngineError, NotFoundError, PendingRequest,
    ProcessOutcome, ProcessReport, RejectedBooking, ValidationError,
};
pub use identifiers::{normalize, IdentifierError, RequestId, ScreeningId, SeatCode, TheaterId};
