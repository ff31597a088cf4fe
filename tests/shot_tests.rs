use war_simulator::{
    EngineError, Position, ShotResult, Vessel, VesselKind, Weapon, WeaponKind,
};

fn gunboat(ammunition: u32, range: u32) -> Vessel {
    Vessel::with_stats(
        VesselKind::Frigate,
        Position::new(0, 0, 0),
        5,
        Weapon::with_stats(WeaponKind::Cannon, ammunition, range),
    )
}

#[test]
fn test_hit_and_miss_both_spend_one_round() {
    let mut shooter = gunboat(10, 5);
    let mut target = Vessel::new(VesselKind::Cruiser, Position::new(3, 0, 0));

    let res = shooter.fire_at(Some(&mut target), Position::new(3, 0, 0)).unwrap();
    assert_eq!(res, ShotResult::Hit { hit_points_remaining: 5 });
    assert_eq!(shooter.weapon().ammunition(), 9);

    let res = shooter.fire_at(None, Position::new(2, 2, 0)).unwrap();
    assert_eq!(res, ShotResult::Miss);
    assert_eq!(shooter.weapon().ammunition(), 8);
}

#[test]
fn test_empty_weapon_never_fires() {
    let mut shooter = gunboat(0, 5);
    let mut target = Vessel::new(VesselKind::Aircraft, Position::new(1, 0, 0));
    assert!(!shooter.can_fire());
    assert_eq!(
        shooter.fire_at(Some(&mut target), Position::new(1, 0, 0)),
        Err(EngineError::WeaponDepleted(shooter.id()))
    );
    assert_eq!(target.hit_points_remaining(), 1);
}

#[test]
fn test_out_of_range_spends_nothing() {
    let mut shooter = gunboat(3, 2);
    let aim = Position::new(2, 1, 0);
    assert!(!shooter.in_range(&aim));
    assert_eq!(
        shooter.fire_at(None, aim),
        Err(EngineError::OutOfRange { target: aim, range: 2 })
    );
    assert_eq!(shooter.weapon().ammunition(), 3);
}

#[test]
fn test_range_reaches_diagonal_exactly() {
    let shooter = gunboat(1, 3);
    // 2² + 2² + 1² = 9
    assert!(shooter.in_range(&Position::new(2, 2, 1)));
    assert!(!shooter.in_range(&Position::new(2, 2, 2)));
}

#[test]
fn test_wreck_absorbs_shot_as_miss() {
    let mut shooter = gunboat(5, 5);
    let mut wreck = Vessel::with_stats(
        VesselKind::Destroyer,
        Position::new(1, 0, 0),
        0,
        Weapon::new(WeaponKind::Torpedo),
    );
    assert_eq!(
        shooter.fire_at(Some(&mut wreck), Position::new(1, 0, 0)),
        Ok(ShotResult::Miss)
    );
    assert_eq!(shooter.weapon().ammunition(), 4);
    assert_eq!(wreck.hit_points_remaining(), 0);
}

#[test]
fn test_damage_comes_from_weapon_kind() {
    for (kind, damage) in [
        (WeaponKind::Cannon, 1),
        (WeaponKind::Torpedo, 3),
        (WeaponKind::Missile, 2),
    ] {
        let mut shooter = Vessel::with_stats(
            VesselKind::Cruiser,
            Position::new(0, 0, 0),
            6,
            Weapon::with_stats(kind, 1, 10),
        );
        let mut target = Vessel::new(VesselKind::Cruiser, Position::new(0, 1, 0));
        shooter.fire_at(Some(&mut target), Position::new(0, 1, 0)).unwrap();
        assert_eq!(target.hit_points_remaining(), 6 - damage);
    }
}
