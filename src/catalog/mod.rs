pub mod seat_map;
pub mod theater;

use std::collections::HashMap;

pub use seat_map::{Seat, SeatMap, SeatState};
pub use theater::{Screening, Theater};

use crate::types::booking::NotFoundError;
use crate::types::identifiers::{ScreeningId, SeatCode, TheaterId};

/// Theater -> screening -> seat map. Structure is fixed once built; only
/// seat states change afterwards.
#[derive(Debug, Default)]
pub struct Catalog {
    theaters: Vec<Theater>,
    index: HashMap<TheaterId, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` (and drops the theater) if the id is taken.
    pub fn insert(&mut self, theater: Theater) -> bool {
        if self.index.contains_key(&theater.id) {
            return false;
        }
        self.index.insert(theater.id.clone(), self.theaters.len());
        self.theaters.push(theater);
        true
    }

    pub fn contains(&self, id: &TheaterId) -> bool {
        self.index.contains_key(id)
    }

    /// Theaters in construction order.
    pub fn theaters(&self) -> &[Theater] {
        &self.theaters
    }

    pub fn list_theaters(&self) -> Vec<TheaterId> {
        self.theaters.iter().map(|t| t.id.clone()).collect()
    }

    pub fn theater(&self, id: &TheaterId) -> Result<&Theater, NotFoundError> {
        self.index
            .get(id)
            .map(|&i| &self.theaters[i])
            .ok_or_else(|| NotFoundError::Theater(id.as_str().to_string()))
    }

    pub fn screening(&self, theater: &TheaterId, title: &str) -> Result<&Screening, NotFoundError> {
        self.theater(theater)?
            .screening(title)
            .ok_or_else(|| NotFoundError::Screening {
                theater: theater.clone(),
                screening: title.to_string(),
            })
    }

    pub fn list_screenings(&self, theater: &TheaterId) -> Result<Vec<ScreeningId>, NotFoundError> {
        Ok(self
            .theater(theater)?
            .screenings()
            .iter()
            .map(|s| s.id.clone())
            .collect())
    }

    pub fn available_seats(
        &self,
        theater: &TheaterId,
        title: &str,
    ) -> Result<Vec<SeatCode>, NotFoundError> {
        Ok(self.screening(theater, title)?.read_seats().available())
    }

    pub fn screening_rate(&self, theater: &TheaterId) -> Result<u64, NotFoundError> {
        Ok(self.theater(theater)?.rate)
    }
}
