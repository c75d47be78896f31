use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use showtime_core::catalog::SeatState;
use showtime_core::types::{BookingRequest, ProcessOutcome, SeatCode};
use showtime_core::Engine;

const ALL_SEATS: [&str; 10] = ["A1", "A2", "A3", "A4", "A5", "B1", "B2", "B3", "B4", "B5"];

/// Request i wants seats i and i+1 (wrapping), so neighbors always overlap.
fn overlapping_requests(count: usize) -> Vec<BookingRequest> {
    (0..count)
        .map(|i| {
            let a = ALL_SEATS[i % ALL_SEATS.len()];
            let b = ALL_SEATS[(i + 1) % ALL_SEATS.len()];
            BookingRequest::new(format!("user-{i}"), "pvr", "KGF", [a, b])
        })
        .collect()
}

fn check_exclusivity(engine: &Engine, outcomes: &[ProcessOutcome]) {
    let mut owner: HashMap<SeatCode, String> = HashMap::new();
    for outcome in outcomes {
        if let ProcessOutcome::Committed(booking) = outcome {
            for seat in &booking.seats {
                let previous = owner.insert(seat.clone(), booking.requester.clone());
                assert!(previous.is_none(), "seat {seat} committed twice");
            }
        }
    }

    let booked: Vec<SeatCode> = engine
        .seat_states("pvr", "KGF")
        .unwrap()
        .into_iter()
        .filter(|seat| seat.state == SeatState::Booked)
        .map(|seat| seat.code)
        .collect();
    assert_eq!(booked.len(), owner.len());
    for seat in &booked {
        assert!(owner.contains_key(seat), "seat {seat} booked without a commit");
    }

    // Every rejection names seats that really are booked.
    for outcome in outcomes {
        if let ProcessOutcome::Rejected(rejected) = outcome {
            assert!(!rejected.conflict.unavailable.is_empty());
            for seat in &rejected.conflict.unavailable {
                assert!(owner.contains_key(seat));
            }
        }
    }
}

#[test]
fn sequential_processing_never_double_books() {
    let engine = Engine::reference().unwrap();
    for request in overlapping_requests(12) {
        engine.submit(request).unwrap();
    }

    let mut outcomes = Vec::new();
    loop {
        match engine.process_next() {
            ProcessOutcome::Empty => break,
            outcome => outcomes.push(outcome),
        }
    }

    assert_eq!(outcomes.len(), 12);
    check_exclusivity(&engine, &outcomes);

    // user-0 takes A1,A2; user-1 clashes on A2; user-2 takes A3,A4 ...
    let committed: Vec<&str> = outcomes
        .iter()
        .filter_map(|o| match o {
            ProcessOutcome::Committed(b) => Some(b.requester.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(committed, vec!["user-0", "user-2", "user-4", "user-6", "user-8"]);
}

#[test]
fn concurrent_producers_and_consumers_never_double_book() {
    let engine = Arc::new(Engine::reference().unwrap());

    thread::scope(|scope| {
        for chunk in overlapping_requests(40).chunks(10) {
            let engine = Arc::clone(&engine);
            let chunk = chunk.to_vec();
            scope.spawn(move || {
                for request in chunk {
                    engine.submit(request).unwrap();
                }
            });
        }
    });
    assert_eq!(engine.pending_count(), 40);

    let outcomes: Vec<ProcessOutcome> = thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                scope.spawn(move || {
                    let mut seen = Vec::new();
                    loop {
                        match engine.process_next() {
                            ProcessOutcome::Empty => break seen,
                            outcome => seen.push(outcome),
                        }
                    }
                })
            })
            .collect();

        workers
            .into_iter()
            .flat_map(|worker| worker.join().unwrap())
            .collect()
    });

    assert_eq!(outcomes.len(), 40);
    assert_eq!(engine.pending_count(), 0);
    check_exclusivity(&engine, &outcomes);
}

#[test]
fn concurrent_readers_see_whole_commits() {
    let engine = Arc::new(Engine::reference().unwrap());
    for i in 0..5 {
        let row = ["A", "B"];
        let seats: Vec<String> = row.iter().map(|r| format!("{r}{}", i + 1)).collect();
        engine
            .submit(BookingRequest::new(format!("pair-{i}"), "pvr", "KGF", seats))
            .unwrap();
    }

    thread::scope(|scope| {
        let reader = {
            let engine = Arc::clone(&engine);
            scope.spawn(move || {
                for _ in 0..200 {
                    // Every commit books an A/B pair, so the count stays even.
                    let left = engine.available_seats("pvr", "KGF").unwrap().len();
                    assert_eq!(left % 2, 0, "observed a half-applied commit");
                }
            })
        };

        while engine.process_next() != ProcessOutcome::Empty {}
        reader.join().unwrap();
    });

    assert!(engine.available_seats("pvr", "KGF").unwrap().is_empty());
}
