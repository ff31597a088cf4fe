use std::num::NonZeroUsize;

use war_simulator::{Battlefield, Bounds, EngineError, Position, Vessel, VesselId, VesselKind};

fn battlefield(capacity: usize) -> Battlefield {
    let bounds = Bounds::new(0, 5, 0, 5, 0, 0).unwrap();
    Battlefield::new(bounds, NonZeroUsize::new(capacity).unwrap()).unwrap()
}

#[test]
fn test_place_outside_bounds_fails() {
    let mut bf = battlefield(5);
    for p in [
        Position::new(6, 0, 0),
        Position::new(0, -1, 0),
        Position::new(1, 1, 1),
    ] {
        assert_eq!(
            bf.place_vessel(Vessel::new(VesselKind::Frigate, p)),
            Err(EngineError::OutOfBounds(p))
        );
    }
    assert!(bf.vessels().is_empty());
}

#[test]
fn test_place_on_occupied_cell_fails() {
    let mut bf = battlefield(5);
    let p = Position::new(2, 3, 0);
    bf.place_vessel(Vessel::new(VesselKind::Cruiser, p)).unwrap();
    assert_eq!(
        bf.place_vessel(Vessel::new(VesselKind::Aircraft, p)),
        Err(EngineError::PositionOccupied(p))
    );
    assert_eq!(bf.vessels().len(), 1);
    assert_eq!(bf.vessel_at(&p).unwrap().kind(), VesselKind::Cruiser);
}

#[test]
fn test_capacity_is_enforced() {
    let mut bf = battlefield(2);
    bf.place_vessel(Vessel::new(VesselKind::Frigate, Position::new(0, 0, 0)))
        .unwrap();
    bf.place_vessel(Vessel::new(VesselKind::Frigate, Position::new(1, 0, 0)))
        .unwrap();
    assert!(bf.is_full());
    assert_eq!(
        bf.place_vessel(Vessel::new(VesselKind::Frigate, Position::new(2, 0, 0))),
        Err(EngineError::CapacityExceeded(2))
    );
}

#[test]
fn test_placement_order_is_stable() {
    let mut bf = battlefield(5);
    let cells = [
        Position::new(4, 4, 0),
        Position::new(0, 0, 0),
        Position::new(2, 1, 0),
    ];
    for p in cells {
        bf.place_vessel(Vessel::new(VesselKind::Destroyer, p)).unwrap();
    }
    let placed: Vec<_> = bf.vessels().iter().map(|v| (v.id(), v.position())).collect();
    assert_eq!(
        placed,
        vec![
            (VesselId(0), cells[0]),
            (VesselId(1), cells[1]),
            (VesselId(2), cells[2]),
        ]
    );
}

#[test]
fn test_empty_battlefield_is_not_destroyed() {
    let bf = battlefield(5);
    assert!(!bf.all_vessels_destroyed());
}

#[test]
fn test_fresh_vessel_is_not_destroyed() {
    let mut bf = battlefield(5);
    bf.place_vessel(Vessel::new(VesselKind::Aircraft, Position::new(3, 3, 0)))
        .unwrap();
    assert!(!bf.all_vessels_destroyed());
    assert!(!bf.all_vessels_destroyed());
}

#[test]
fn test_invalid_bounds_rejected() {
    assert!(matches!(
        Bounds::new(1, 0, 0, 0, 0, 0),
        Err(EngineError::InvalidBounds(_))
    ));
    assert!(matches!(
        Bounds::new(0, 0, 0, 0, 5, -5),
        Err(EngineError::InvalidBounds(_))
    ));
}
