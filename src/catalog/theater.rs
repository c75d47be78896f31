use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::catalog::seat_map::SeatMap;
use crate::types::identifiers::{ScreeningId, TheaterId};

/// One movie showing. The seat map is the only mutable part of the catalog.
#[derive(Debug)]
pub struct Screening {
    pub id: ScreeningId,
    pub showtime: String,
    seats: RwLock<SeatMap>,
}

impl Screening {
    pub fn new(id: ScreeningId, showtime: impl Into<String>, seats: SeatMap) -> Self {
        Self {
            id,
            showtime: showtime.into(),
            seats: RwLock::new(seats),
        }
    }

    // A panicking holder cannot leave a half-booked map: `book_all` checks
    // before it writes, so a poisoned lock still guards consistent data.
    pub(crate) fn read_seats(&self) -> RwLockReadGuard<'_, SeatMap> {
        self.seats.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write_seats(&self) -> RwLockWriteGuard<'_, SeatMap> {
        self.seats.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Consistent copy of the seat map.
    pub fn snapshot(&self) -> SeatMap {
        self.read_seats().clone()
    }
}

#[derive(Debug)]
pub struct Theater {
    pub id: TheaterId,
    pub name: String,
    pub rate: u64,
    pub showtimes: Vec<String>,
    screenings: Vec<Screening>,
}

impl Theater {
    pub fn new(id: TheaterId, name: impl Into<String>, rate: u64, showtimes: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            rate,
            showtimes,
            screenings: Vec::new(),
        }
    }

    /// Returns `false` (and drops the screening) if the title is taken.
    pub fn add_screening(&mut self, screening: Screening) -> bool {
        if self.screening(screening.id.as_str()).is_some() {
            return false;
        }
        self.screenings.push(screening);
        true
    }

    pub fn screening(&self, title: &str) -> Option<&Screening> {
        self.screenings.iter().find(|s| s.id.as_str() == title)
    }

    pub fn screenings(&self) -> &[Screening] {
        &self.screenings
    }
}
