pub mod queue;

use std::collections::HashSet;

use chrono::Utc;

use crate::catalog::Catalog;
pub use queue::BookingQueue;
use crate::types::booking::{
	BookingRequest, ConfirmedBooking, ConflictError, EngineError, PendingRequest, ProcessOutcome,
	RejectedBooking, ValidationError,
};
use crate::types::identifiers::{RequestId, SeatCode, TheaterId};

/// Structural checks done at submit time. Seat availability is NOT checked
/// here; that happens against live state in `commit`.
///
/// `next_id` is only called once the request is known to be well formed.
pub fn validate(
	catalog: &Catalog,
	request: &BookingRequest,
	next_id: impl FnOnce() -> RequestId,
) -> Result<PendingRequest, EngineError> {
	let requester = request.requester.trim();
	if requester.is_empty() {
		return Err(ValidationError::EmptyRequester.into());
	}
	if request.seats.is_empty() {
		return Err(ValidationError::NoSeats.into());
	}

	let theater = TheaterId::parse(&request.theater).map_err(ValidationError::from)?;
	// Catalog misses are bad input here, not failed lookups
	let screening = catalog
		.theater(&theater)
		.map_err(|_| ValidationError::UnknownTheater(request.theater.clone()))?
		.screening(&request.screening)
		.ok_or_else(|| ValidationError::UnknownScreening {
			theater: theater.clone(),
			screening: request.screening.clone(),
		})?;

	// 1. Parse and reject duplicates, keeping request order
	let mut seen = HashSet::with_capacity(request.seats.len());
	let mut seats = Vec::with_capacity(request.seats.len());
	for raw in &request.seats {
		let code = SeatCode::parse(raw).map_err(ValidationError::from)?;
		if !seen.insert(code.clone()) {
			return Err(ValidationError::DuplicateSeat(code).into());
		}
		seats.push(code);
	}

	// 2. Every code must exist in this screening's geometry
	{
		let map = screening.read_seats();
		if let Some(unknown) = seats.iter().find(|code| !map.contains(code)) {
			return Err(ValidationError::UnknownSeat {
				theater: theater.clone(),
				screening: screening.id.clone(),
				seat: unknown.clone(),
			}
			.into());
		}
	}

	Ok(PendingRequest {
		id: next_id(),
		requester: requester.to_string(),
		theater,
		screening: screening.id.clone(),
		seats,
		submitted_at: Utc::now(),
	})
}

/// Re-check every seat against current state and book all of them, or none.
pub fn commit(catalog: &Catalog, request: PendingRequest) -> ProcessOutcome {
	// The catalog never loses screenings, so a validated request still resolves.
	let found = catalog.theater(&request.theater).ok().and_then(|theater| {
		theater
			.screening(request.screening.as_str())
			.map(|screening| (screening, theater.rate))
	});
	let Some((screening, rate)) = found else {
		let unavailable = request.seats.clone();
		return reject(request, unavailable);
	};

	// Write lock spans check and mark: nothing can book in between.
	let result = screening.write_seats().book_all(&request.seats);

	match result {
		Ok(()) => {
			let price = rate.saturating_mul(request.seats.len() as u64);
			tracing::info!(
				request_id = request.id.value(),
				requester = %request.requester,
				theater = %request.theater,
				screening = %request.screening,
				seats = request.seats.len(),
				price,
				"booking committed"
			);
			ProcessOutcome::Committed(ConfirmedBooking {
				request_id: request.id,
				requester: request.requester,
				theater: request.theater,
				screening: request.screening,
				seats: request.seats,
				price,
				processed_at: Utc::now(),
			})
		}
		Err(conflict) => reject(request, conflict.unavailable),
	}
}

fn reject(request: PendingRequest, unavailable: Vec<SeatCode>) -> ProcessOutcome {
	let seats: Vec<&str> = unavailable.iter().map(SeatCode::as_str).collect();
	tracing::info!(
		request_id = request.id.value(),
		requester = %request.requester,
		theater = %request.theater,
		screening = %request.screening,
		unavailable = ?seats,
		"booking rejected"
	);
	ProcessOutcome::Rejected(RejectedBooking {
		request,
		conflict: ConflictError { unavailable },
		processed_at: Utc::now(),
	})
}
