use std::fs;

use showtime_core::combo::ComboItem;
use showtime_core::config::{ScreeningConfig, TheaterConfig, MAX_COMBO_TOTAL_PRICE};
use showtime_core::{ConfigError, Engine, EngineConfig};
use tempfile::tempdir;

fn theater(name: &str) -> TheaterConfig {
    TheaterConfig {
        name: name.to_string(),
        rate: 100,
        showtimes: vec![],
        screenings: vec![ScreeningConfig {
            title: "Dune".to_string(),
            showtime: "9:00 PM".to_string(),
            rows: vec!["A".to_string()],
            columns: 3,
        }],
    }
}

fn config(theaters: Vec<TheaterConfig>) -> EngineConfig {
    EngineConfig {
        theaters,
        links: vec![],
        combos: vec![],
    }
}

#[test]
fn reference_config_survives_a_json_round_trip() {
    let reference = EngineConfig::reference();

    let json = serde_json::to_string_pretty(&reference).unwrap();
    let parsed = EngineConfig::from_json_str(&json).unwrap();

    assert_eq!(parsed, reference);
}

#[test]
fn load_from_file_with_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("engine.json");
    fs::write(
        &path,
        r#"{
            "theaters": [
                {
                    "name": "Regal Theater",
                    "rate": 300,
                    "screenings": [{ "title": "Dune", "showtime": "9:00 PM" }]
                },
                { "name": "Star Cine-Plex", "rate": 150 }
            ],
            "links": [["regal", "Star Cine-Plex"]],
            "combos": [{ "name": "Popcorn", "price": 100, "value": 40 }]
        }"#,
    )
    .unwrap();

    let config = EngineConfig::from_path(&path).unwrap();
    let engine = Engine::new(&config).unwrap();

    let theaters: Vec<String> = engine.list_theaters().iter().map(|t| t.to_string()).collect();
    assert_eq!(theaters, vec!["regal", "star_cineplex"]);
    assert_eq!(engine.resolve_theater("REGAL").unwrap().as_str(), "regal");
    assert_eq!(engine.resolve_theater("star cineplex").unwrap().as_str(), "star_cineplex");

    // Default geometry is rows A-B by five columns.
    assert_eq!(engine.available_seats("regal", "Dune").unwrap().len(), 10);

    let path = engine.shortest_path("regal", "Star Cine-Plex").unwrap();
    assert_eq!(path.len(), 2);

    assert_eq!(engine.combo_items(), &[ComboItem::new("Popcorn", 100, 40)]);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();

    let result = EngineConfig::from_path(&dir.path().join("absent.json"));

    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn malformed_json_is_serialization_error() {
    let result = EngineConfig::from_json_str(r#"{ "theaters": [ { "name": 1 } ] }"#);

    assert!(matches!(result, Err(ConfigError::Serialization(_))));
}

#[test]
fn duplicate_theater_after_normalization_is_rejected() {
    let result = Engine::new(&config(vec![theater("PVR"), theater("pvr theater")]));

    assert!(matches!(result, Err(ConfigError::DuplicateTheater(id)) if id.as_str() == "pvr"));
}

#[test]
fn duplicate_screening_is_rejected() {
    let mut pvr = theater("pvr");
    pvr.screenings.push(pvr.screenings[0].clone());

    let result = Engine::new(&config(vec![pvr]));

    assert!(matches!(result, Err(ConfigError::DuplicateScreening { .. })));
}

#[test]
fn empty_or_bad_geometry_is_rejected() {
    let mut no_columns = theater("pvr");
    no_columns.screenings[0].columns = 0;
    assert!(matches!(
        Engine::new(&config(vec![no_columns])),
        Err(ConfigError::EmptyGeometry { .. })
    ));

    let mut bad_row = theater("pvr");
    bad_row.screenings[0].rows = vec!["1".to_string()];
    assert!(matches!(
        Engine::new(&config(vec![bad_row])),
        Err(ConfigError::InvalidRow(row)) if row == "1"
    ));
}

#[test]
fn rows_differing_only_in_case_are_rejected() {
    let mut mixed = theater("pvr");
    mixed.screenings[0].rows = vec!["A".to_string(), "B".to_string(), "a".to_string()];
    assert!(matches!(
        Engine::new(&config(vec![mixed])),
        Err(ConfigError::InvalidRow(row)) if row == "a"
    ));

    let mut distinct = theater("pvr");
    distinct.screenings[0].rows = vec!["A".to_string(), "AA".to_string()];
    let engine = Engine::new(&config(vec![distinct])).unwrap();
    assert_eq!(engine.available_seats("pvr", "Dune").unwrap().len(), 6);
}

#[test]
fn links_must_join_two_known_theaters() {
    let mut unknown = config(vec![theater("pvr")]);
    unknown.links = vec![("pvr".to_string(), "imax".to_string())];
    assert!(matches!(
        Engine::new(&unknown),
        Err(ConfigError::UnknownLinkTarget(name)) if name == "imax"
    ));

    let mut self_link = config(vec![theater("pvr")]);
    self_link.links = vec![("PVR".to_string(), "pvr theater".to_string())];
    assert!(matches!(Engine::new(&self_link), Err(ConfigError::SelfLink(_))));
}

#[test]
fn duplicate_combo_names_are_rejected() {
    let mut cfg = config(vec![theater("pvr")]);
    cfg.combos = vec![ComboItem::new("Drink", 60, 20), ComboItem::new("Drink", 50, 10)];

    assert!(matches!(Engine::new(&cfg), Err(ConfigError::DuplicateCombo(name)) if name == "Drink"));
}

#[test]
fn oversized_combo_catalog_is_rejected() {
    let mut cfg = config(vec![theater("pvr")]);
    cfg.combos = vec![
        ComboItem::new("Caviar", u32::MAX, 1),
        ComboItem::new("Truffle", u32::MAX, 1),
    ];

    match Engine::new(&cfg) {
        Err(ConfigError::ComboCatalogTooLarge { total, limit }) => {
            assert_eq!(total, 2 * u64::from(u32::MAX));
            assert_eq!(limit, MAX_COMBO_TOTAL_PRICE);
        }
        other => panic!("expected ComboCatalogTooLarge, got {other:?}"),
    }

    // At the limit the catalog loads and any budget stays cheap to answer.
    let half = u32::try_from(MAX_COMBO_TOTAL_PRICE / 2).unwrap();
    cfg.combos = vec![ComboItem::new("Caviar", half, 3), ComboItem::new("Truffle", half, 2)];
    let engine = Engine::new(&cfg).unwrap();
    let pick = engine.best_combo(i64::MAX).unwrap();
    assert_eq!(pick.total_value, 5);
    assert_eq!(pick.total_cost, MAX_COMBO_TOTAL_PRICE);
}
