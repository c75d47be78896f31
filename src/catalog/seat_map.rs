use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::booking::ConflictError;
use crate::types::identifiers::SeatCode;

/// Two-state seat lifecycle. `Booked` never reverts inside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatState {
    Available,
    Booked,
}

impl SeatState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatState::Available => "available",
            SeatState::Booked => "booked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub code: SeatCode,
    pub state: SeatState,
}

/// Seat code -> state for one screening, in generation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Seat>", into = "Vec<Seat>")]
pub struct SeatMap {
    seats: Vec<Seat>,
    index: HashMap<SeatCode, usize>,
}

impl SeatMap {
    /// Row-major cartesian product of `rows` x `1..=columns`, all available.
    pub fn generate<R: AsRef<str>>(rows: &[R], columns: u32) -> Self {
        let seats: Vec<Seat> = rows
            .iter()
            .flat_map(|row| {
                (1..=columns).map(move |column| Seat {
                    code: SeatCode::from_parts(row.as_ref(), column),
                    state: SeatState::Available,
                })
            })
            .collect();
        Self::from(seats)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn contains(&self, code: &SeatCode) -> bool {
        self.index.contains_key(code)
    }

    pub fn state(&self, code: &SeatCode) -> Option<SeatState> {
        self.index.get(code).map(|&i| self.seats[i].state)
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn available(&self) -> Vec<SeatCode> {
        self.seats
            .iter()
            .filter(|seat| seat.state == SeatState::Available)
            .map(|seat| seat.code.clone())
            .collect()
    }

    pub fn available_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|seat| seat.state == SeatState::Available)
            .count()
    }

    /// Requested seats that are not currently available, in request order.
    /// Seats missing from the map count as unavailable.
    pub fn unavailable_among(&self, requested: &[SeatCode]) -> Vec<SeatCode> {
        requested
            .iter()
            .filter(|code| self.state(code) != Some(SeatState::Available))
            .cloned()
            .collect()
    }

    /// Book every requested seat, or none of them.
    pub fn book_all(&mut self, requested: &[SeatCode]) -> Result<(), ConflictError> {
        let unavailable = self.unavailable_among(requested);
        if !unavailable.is_empty() {
            return Err(ConflictError { unavailable });
        }

        for code in requested {
            if let Some(&i) = self.index.get(code) {
                self.seats[i].state = SeatState::Booked;
            }
        }
        Ok(())
    }

    /// Content hash over `code:state` lines in seat order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for seat in &self.seats {
            let line = format!("{}:{}\n", seat.code.as_str(), seat.state.as_str());
            hasher.update(line.as_bytes());
        }
        format!("sha256:{}", hex::encode(hasher.finalize()))
    }
}

impl From<Vec<Seat>> for SeatMap {
    fn from(seats: Vec<Seat>) -> Self {
        // Later duplicates are dropped so codes stay unique.
        let mut unique = Vec::with_capacity(seats.len());
        let mut index = HashMap::with_capacity(seats.len());
        for seat in seats {
            if !index.contains_key(&seat.code) {
                index.insert(seat.code.clone(), unique.len());
                unique.push(seat);
            }
        }
        Self {
            seats: unique,
            index,
        }
    }
}

impl From<SeatMap> for Vec<Seat> {
    fn from(map: SeatMap) -> Self {
        map.seats
    }
}
