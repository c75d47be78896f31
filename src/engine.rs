use serde::{Deserialize, Serialize};

use crate::booking::{self, BookingQueue};
use crate::catalog::{Catalog, Seat, SeatMap};
use crate::combo::{ComboItem, ComboOptimizer, ComboSelection};
use crate::config::{ConfigError, EngineConfig};
use crate::types::booking::{
    BookingRequest, EngineError, NotFoundError, PendingRequest, ProcessOutcome, ProcessReport,
    ValidationError,
};
use crate::types::identifiers::{RequestId, ScreeningId, SeatCode, TheaterId};
use crate::venue::VenueGraph;

/// Display row for one theater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheaterSummary {
    pub id: TheaterId,
    pub name: String,
    pub rate: u64,
    pub showtimes: Vec<String>,
    pub screenings: Vec<ScreeningSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningSummary {
    pub id: ScreeningId,
    pub showtime: String,
    pub seats_total: usize,
    pub seats_left: usize,
}

/// One booking session: catalog, venue graph, combo catalog and queue, all
/// owned by the instance. Independent engines share nothing.
///
/// Every operation takes `&self`. Seat maps are locked per screening and the
/// queue has its own lock, so an `Arc<Engine>` can be shared across threads.
#[derive(Debug)]
pub struct Engine {
    catalog: Catalog,
    graph: VenueGraph,
    combos: ComboOptimizer,
    queue: BookingQueue,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        let built = config.build().map_err(|e| {
            tracing::warn!(error = %e, "engine configuration rejected");
            e
        })?;

        tracing::info!(
            theaters = built.catalog.theaters().len(),
            combos = built.combos.len(),
            "engine ready"
        );

        Ok(Self {
            catalog: built.catalog,
            graph: built.graph,
            combos: ComboOptimizer::new(built.combos),
            queue: BookingQueue::new(),
        })
    }

    /// Engine over `EngineConfig::reference()`.
    pub fn reference() -> Result<Self, ConfigError> {
        Self::new(&EngineConfig::reference())
    }

    /// Normalize user text and confirm the theater exists.
    pub fn resolve_theater(&self, raw: &str) -> Result<TheaterId, EngineError> {
        let id = TheaterId::parse(raw).map_err(ValidationError::from)?;
        if !self.catalog.contains(&id) {
            return Err(NotFoundError::Theater(raw.to_string()).into());
        }
        Ok(id)
    }

    // --- Query façade ---

    pub fn list_theaters(&self) -> Vec<TheaterId> {
        self.catalog.list_theaters()
    }

    pub fn list_screenings(&self, theater: &str) -> Result<Vec<ScreeningId>, EngineError> {
        let id = self.resolve_theater(theater)?;
        Ok(self.catalog.list_screenings(&id)?)
    }

    pub fn available_seats(
        &self,
        theater: &str,
        screening: &str,
    ) -> Result<Vec<SeatCode>, EngineError> {
        let id = self.resolve_theater(theater)?;
        Ok(self.catalog.available_seats(&id, screening)?)
    }

    /// Every seat with its state, in seat-map order.
    pub fn seat_states(&self, theater: &str, screening: &str) -> Result<Vec<Seat>, EngineError> {
        Ok(self.seat_map(theater, screening)?.seats().to_vec())
    }

    /// Consistent snapshot of one screening's seat map.
    pub fn seat_map(&self, theater: &str, screening: &str) -> Result<SeatMap, EngineError> {
        let id = self.resolve_theater(theater)?;
        Ok(self.catalog.screening(&id, screening)?.snapshot())
    }

    pub fn screening_rate(&self, theater: &str) -> Result<u64, EngineError> {
        let id = self.resolve_theater(theater)?;
        Ok(self.catalog.screening_rate(&id)?)
    }

    pub fn theater_overview(&self) -> Vec<TheaterSummary> {
        self.catalog
            .theaters()
            .iter()
            .map(|theater| TheaterSummary {
                id: theater.id.clone(),
                name: theater.name.clone(),
                rate: theater.rate,
                showtimes: theater.showtimes.clone(),
                screenings: theater
                    .screenings()
                    .iter()
                    .map(|screening| {
                        let seats = screening.read_seats();
                        ScreeningSummary {
                            id: screening.id.clone(),
                            showtime: screening.showtime.clone(),
                            seats_total: seats.len(),
                            seats_left: seats.available_count(),
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    // --- Venue graph ---

    pub fn neighbors(&self, theater: &str) -> Result<Vec<TheaterId>, EngineError> {
        let id = self.resolve_theater(theater)?;
        Ok(self.graph.neighbors(&id).map(<[_]>::to_vec).unwrap_or_default())
    }

    /// Fewest-hop route between two theaters given as user text.
    ///
    /// Unknown or unreachable theaters give `None`, not an error.
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<Vec<TheaterId>> {
        let from = TheaterId::parse(from).ok()?;
        let to = TheaterId::parse(to).ok()?;
        let path = self.graph.shortest_path(&from, &to);
        tracing::debug!(
            %from,
            %to,
            found = path.is_some(),
            "path search"
        );
        path
    }

    // --- Combos ---

    pub fn combo_items(&self) -> &[ComboItem] {
        self.combos.items()
    }

    pub fn best_combo(&self, budget: i64) -> Result<ComboSelection, EngineError> {
        let budget = check_budget(budget)?;
        Ok(self.combos.best_combo(budget))
    }

    // --- Booking queue ---

    /// Validate and enqueue. Seat availability is checked later, at processing.
    pub fn submit(&self, request: BookingRequest) -> Result<RequestId, EngineError> {
        let pending = booking::validate(&self.catalog, &request, || self.queue.next_id())?;
        let id = pending.id;

        tracing::info!(
            request_id = id.value(),
            requester = %pending.requester,
            theater = %pending.theater,
            screening = %pending.screening,
            seats = pending.seats.len(),
            "booking request queued"
        );

        self.queue.push(pending);
        Ok(id)
    }

    /// Take the head request and commit it against current seat state.
    pub fn process_next(&self) -> ProcessOutcome {
        match self.queue.pop() {
            Some(request) => booking::commit(&self.catalog, request),
            None => ProcessOutcome::Empty,
        }
    }

    /// `process_next`, then a combo recommendation if the booking committed.
    ///
    /// A negative budget is rejected before the queue is touched.
    pub fn process_next_with_combo(&self, budget: i64) -> Result<ProcessReport, EngineError> {
        let budget = check_budget(budget)?;
        let outcome = self.process_next();
        let combo = outcome
            .is_committed()
            .then(|| self.combos.best_combo(budget));
        Ok(ProcessReport { outcome, combo })
    }

    /// Withdraw a request that is still waiting in the queue.
    pub fn cancel(&self, id: RequestId) -> Result<PendingRequest, EngineError> {
        let removed = self.queue.cancel(id).ok_or(NotFoundError::Request(id))?;
        tracing::info!(request_id = id.value(), "booking request cancelled");
        Ok(removed)
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }
}

fn check_budget(budget: i64) -> Result<u32, ValidationError> {
    if budget < 0 {
        return Err(ValidationError::NegativeBudget(budget));
    }
    Ok(u32::try_from(budget).unwrap_or(u32::MAX))
}
