//! Fixed rules table: weapon and vessel stats, battlefield defaults.

use crate::core::vessel::VesselKind;
use crate::core::weapon::WeaponKind;

/// Vessels a battlefield accepts when no capacity is given.
pub const DEFAULT_MAX_VESSEL_CAPACITY: usize = 5;

/// Stats every weapon of a given kind starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponDef {
    kind: WeaponKind,
    damage: u32,
    range: u32,
    ammunition: u32,
}

impl WeaponDef {
    pub const fn new(kind: WeaponKind, damage: u32, range: u32, ammunition: u32) -> Self {
        Self {
            kind,
            damage,
            range,
            ammunition,
        }
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    /// Hit points removed per hit.
    pub fn damage(&self) -> u32 {
        self.damage
    }

    /// Reach in cells (Euclidean).
    pub fn range(&self) -> u32 {
        self.range
    }

    /// Rounds loaded at creation.
    pub fn ammunition(&self) -> u32 {
        self.ammunition
    }
}

/// Stats every vessel of a given kind starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VesselDef {
    kind: VesselKind,
    hit_points: u32,
    weapon: WeaponKind,
}

impl VesselDef {
    pub const fn new(kind: VesselKind, hit_points: u32, weapon: WeaponKind) -> Self {
        Self {
            kind,
            hit_points,
            weapon,
        }
    }

    pub fn kind(&self) -> VesselKind {
        self.kind
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    pub fn weapon(&self) -> WeaponKind {
        self.weapon
    }
}

pub const NUM_WEAPON_KINDS: usize = 3;
pub const WEAPONS: [WeaponDef; NUM_WEAPON_KINDS] = [
    WeaponDef::new(WeaponKind::Cannon, 1, 8, 50),
    WeaponDef::new(WeaponKind::Torpedo, 3, 6, 15),
    WeaponDef::new(WeaponKind::Missile, 2, 12, 20),
];

pub const NUM_VESSEL_KINDS: usize = 5;
pub const VESSELS: [VesselDef; NUM_VESSEL_KINDS] = [
    VesselDef::new(VesselKind::Cruiser, 6, WeaponKind::Missile),
    VesselDef::new(VesselKind::Frigate, 5, WeaponKind::Cannon),
    VesselDef::new(VesselKind::Destroyer, 4, WeaponKind::Torpedo),
    VesselDef::new(VesselKind::Submarine, 3, WeaponKind::Torpedo),
    VesselDef::new(VesselKind::Aircraft, 1, WeaponKind::Missile),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_indexed_by_kind() {
        for (i, def) in WEAPONS.iter().enumerate() {
            assert_eq!(def.kind() as usize, i);
        }
        for (i, def) in VESSELS.iter().enumerate() {
            assert_eq!(def.kind() as usize, i);
            assert!(def.hit_points() > 0);
        }
    }
}
