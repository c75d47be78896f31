use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, Screening, SeatMap, Theater};
use crate::combo::ComboItem;
use crate::types::identifiers::{IdentifierError, ScreeningId, TheaterId};
use crate::venue::VenueGraph;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid identifier: {0}")]
    Identifier(#[from] IdentifierError),
    #[error("Duplicate theater: {0}")]
    DuplicateTheater(TheaterId),
    #[error("Duplicate screening {screening} at {theater}")]
    DuplicateScreening {
        theater: TheaterId,
        screening: ScreeningId,
    },
    #[error("Screening {screening} at {theater} has no seats")]
    EmptyGeometry {
        theater: TheaterId,
        screening: ScreeningId,
    },
    #[error("Invalid seat row label {0:?}")]
    InvalidRow(String),
    #[error("Link references unknown theater: {0}")]
    UnknownLinkTarget(String),
    #[error("Theater linked to itself: {0}")]
    SelfLink(TheaterId),
    #[error("Duplicate combo item: {0}")]
    DuplicateCombo(String),
    #[error("Combo prices sum to {total}, above the supported {limit}")]
    ComboCatalogTooLarge { total: u64, limit: u64 },
}

/// Upper bound on the summed price of every combo item. The optimizer's
/// table grows with this total, so it bounds combo memory for any budget.
pub const MAX_COMBO_TOTAL_PRICE: u64 = 1_000_000;

/// Everything needed to construct an engine. Plain data: serializable and
/// comparable, so two configs that compare equal build identical engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub theaters: Vec<TheaterConfig>,
    /// Undirected links between theater names (normalized on build).
    #[serde(default)]
    pub links: Vec<(String, String)>,
    #[serde(default)]
    pub combos: Vec<ComboItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheaterConfig {
    /// Display name; the lookup key is its normalized form.
    pub name: String,
    pub rate: u64,
    #[serde(default)]
    pub showtimes: Vec<String>,
    #[serde(default)]
    pub screenings: Vec<ScreeningConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningConfig {
    pub title: String,
    pub showtime: String,
    #[serde(default = "default_rows")]
    pub rows: Vec<String>,
    #[serde(default = "default_columns")]
    pub columns: u32,
}

fn default_rows() -> Vec<String> {
    vec!["A".into(), "B".into()]
}

fn default_columns() -> u32 {
    5
}

impl ScreeningConfig {
    fn new(title: &str, showtime: &str, rows: &[&str]) -> Self {
        Self {
            title: title.into(),
            showtime: showtime.into(),
            rows: rows.iter().map(|r| r.to_string()).collect(),
            columns: default_columns(),
        }
    }
}

/// Validated pieces handed to the engine.
#[derive(Debug)]
pub(crate) struct BuiltConfig {
    pub catalog: Catalog,
    pub graph: VenueGraph,
    pub combos: Vec<ComboItem>,
}

impl EngineConfig {
    /// The four-theater data set the engine ships with.
    pub fn reference() -> Self {
        const AB: &[&str] = &["A", "B"];
        const ABC: &[&str] = &["A", "B", "C"];

        let theater = |name: &str,
                       rate: u64,
                       showtimes: [&str; 3],
                       screenings: Vec<ScreeningConfig>| TheaterConfig {
            name: name.into(),
            rate,
            showtimes: showtimes.iter().map(|s| s.to_string()).collect(),
            screenings,
        };

        Self {
            theaters: vec![
                theater(
                    "PVR",
                    250,
                    ["10:00 AM", "1:00 PM", "6:00 PM"],
                    vec![
                        ScreeningConfig::new("KGF", "6:00 PM", AB),
                        ScreeningConfig::new("Pathaan", "1:00 PM", AB),
                    ],
                ),
                theater(
                    "INOX",
                    220,
                    ["11:00 AM", "3:00 PM", "8:00 PM"],
                    vec![
                        ScreeningConfig::new("Avatar", "11:00 AM", AB),
                        ScreeningConfig::new("KGF", "3:00 PM", ABC),
                    ],
                ),
                theater(
                    "Cinepolis",
                    200,
                    ["9:30 AM", "12:30 PM", "5:30 PM"],
                    vec![
                        ScreeningConfig::new("RRR", "5:30 PM", AB),
                        ScreeningConfig::new("Pathaan", "12:30 PM", AB),
                    ],
                ),
                theater(
                    "Carnival",
                    230,
                    ["10:15 AM", "2:15 PM", "7:15 PM"],
                    vec![
                        ScreeningConfig::new("KGF", "2:15 PM", AB),
                        ScreeningConfig::new("RRR", "7:15 PM", ABC),
                    ],
                ),
            ],
            links: vec![
                ("pvr".into(), "inox".into()),
                ("pvr".into(), "cinepolis".into()),
                ("inox".into(), "carnival".into()),
            ],
            combos: vec![
                ComboItem::new("Popcorn", 100, 40),
                ComboItem::new("Drink", 60, 20),
                ComboItem::new("Nachos", 120, 50),
                ComboItem::new("Combo Meal", 250, 110),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let f = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(f))?)
    }

    pub(crate) fn build(&self) -> Result<BuiltConfig, ConfigError> {
        let mut catalog = Catalog::new();
        let mut graph = VenueGraph::new();

        for tc in &self.theaters {
            let id = TheaterId::parse(&tc.name)?;
            let mut theater =
                Theater::new(id.clone(), tc.name.trim(), tc.rate, tc.showtimes.clone());

            for sc in &tc.screenings {
                let screening_id = ScreeningId::new(sc.title.clone())?;
                // Seat codes are uppercased, so "a" and "A" would name the same seats.
                let mut labels = HashSet::with_capacity(sc.rows.len());
                if let Some(bad) = sc.rows.iter().find(|row| {
                    row.is_empty()
                        || !row.chars().all(|c| c.is_ascii_alphabetic())
                        || !labels.insert(row.to_ascii_uppercase())
                }) {
                    return Err(ConfigError::InvalidRow(bad.clone()));
                }

                let seats = SeatMap::generate(sc.rows.as_slice(), sc.columns);
                if seats.is_empty() {
                    return Err(ConfigError::EmptyGeometry {
                        theater: id.clone(),
                        screening: screening_id,
                    });
                }

                let screening = Screening::new(screening_id.clone(), sc.showtime.clone(), seats);
                if !theater.add_screening(screening) {
                    return Err(ConfigError::DuplicateScreening {
                        theater: id.clone(),
                        screening: screening_id,
                    });
                }
            }

            if !catalog.insert(theater) {
                return Err(ConfigError::DuplicateTheater(id));
            }
            graph.add_theater(id);
        }

        for (a, b) in &self.links {
            let a = resolve_link(&catalog, a)?;
            let b = resolve_link(&catalog, b)?;
            if a == b {
                return Err(ConfigError::SelfLink(a));
            }
            graph.connect(&a, &b);
        }

        let mut seen = BTreeSet::new();
        for item in &self.combos {
            if !seen.insert(item.name.as_str()) {
                return Err(ConfigError::DuplicateCombo(item.name.clone()));
            }
        }
        let total: u64 = self.combos.iter().map(|item| u64::from(item.price)).sum();
        if total > MAX_COMBO_TOTAL_PRICE {
            return Err(ConfigError::ComboCatalogTooLarge {
                total,
                limit: MAX_COMBO_TOTAL_PRICE,
            });
        }

        Ok(BuiltConfig {
            catalog,
            graph,
            combos: self.combos.clone(),
        })
    }
}

fn resolve_link(catalog: &Catalog, raw: &str) -> Result<TheaterId, ConfigError> {
    let id = TheaterId::parse(raw)?;
    if !catalog.contains(&id) {
        return Err(ConfigError::UnknownLinkTarget(raw.to_string()));
    }
    Ok(id)
}
