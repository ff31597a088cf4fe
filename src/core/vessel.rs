//! Vessel definitions and shot resolution.

use core::fmt;

use crate::core::common::{EngineError, ShotResult};
use crate::core::config::{VesselDef, VESSELS};
use crate::core::geometry::Position;
use crate::core::weapon::Weapon;

/// Identifies a vessel within its battlefield: its placement index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct VesselId(pub u32);

impl fmt::Display for VesselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closed set of vessel kinds. Discriminants index [`VESSELS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize, clap::ValueEnum))]
pub enum VesselKind {
    Cruiser = 0,
    Frigate = 1,
    Destroyer = 2,
    Submarine = 3,
    Aircraft = 4,
}

impl VesselKind {
    pub const ALL: [VesselKind; 5] = [
        VesselKind::Cruiser,
        VesselKind::Frigate,
        VesselKind::Destroyer,
        VesselKind::Submarine,
        VesselKind::Aircraft,
    ];

    pub fn def(self) -> &'static VesselDef {
        &VESSELS[self as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            VesselKind::Cruiser => "Cruiser",
            VesselKind::Frigate => "Frigate",
            VesselKind::Destroyer => "Destroyer",
            VesselKind::Submarine => "Submarine",
            VesselKind::Aircraft => "Aircraft",
        }
    }
}

impl fmt::Display for VesselKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A unit on one battlefield cell. Its position never changes once placed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Vessel {
    id: VesselId,
    kind: VesselKind,
    position: Position,
    hit_points_remaining: u32,
    weapon: Weapon,
}

impl Vessel {
    /// A new vessel of `kind` with the default weapon and hit points for it.
    ///
    /// The id is assigned when the vessel is placed on a battlefield.
    pub fn new(kind: VesselKind, position: Position) -> Self {
        let def = kind.def();
        Self::with_stats(kind, position, def.hit_points(), Weapon::new(def.weapon()))
    }

    /// Vessel with explicit hit points and weapon.
    pub fn with_stats(kind: VesselKind, position: Position, hit_points: u32, weapon: Weapon) -> Self {
        Self {
            id: VesselId::default(),
            kind,
            position,
            hit_points_remaining: hit_points,
            weapon,
        }
    }

    pub fn id(&self) -> VesselId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: VesselId) {
        self.id = id;
    }

    pub fn kind(&self) -> VesselKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn hit_points_remaining(&self) -> u32 {
        self.hit_points_remaining
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn is_destroyed(&self) -> bool {
        self.hit_points_remaining == 0
    }

    /// Afloat and still has ammunition.
    pub fn can_fire(&self) -> bool {
        !self.is_destroyed() && !self.weapon.is_depleted()
    }

    /// Whether `target` is within this vessel's weapon range.
    pub fn in_range(&self, target: &Position) -> bool {
        self.position.within(target, self.weapon.range())
    }

    /// Apply `amount` damage, clamped at zero hit points.
    fn take_damage(&mut self, amount: u32) -> ShotResult {
        self.hit_points_remaining = self.hit_points_remaining.saturating_sub(amount);
        if self.is_destroyed() {
            ShotResult::Sunk(self.kind)
        } else {
            ShotResult::Hit {
                hit_points_remaining: self.hit_points_remaining,
            }
        }
    }

    /// Fire one round at `aim`.
    ///
    /// `target` is whatever vessel the caller found on the aimed cell, if any.
    /// A round is spent whenever the preconditions hold, hit or miss. Wrecks
    /// absorb the round without effect and resolve as [`ShotResult::Miss`].
    pub fn fire_at(
        &mut self,
        target: Option<&mut Vessel>,
        aim: Position,
    ) -> Result<ShotResult, EngineError> {
        if self.is_destroyed() {
            return Err(EngineError::VesselNotFoundOrDisabled(self.id));
        }
        if self.weapon.is_depleted() {
            return Err(EngineError::WeaponDepleted(self.id));
        }
        if !self.in_range(&aim) {
            return Err(EngineError::OutOfRange {
                target: aim,
                range: self.weapon.range(),
            });
        }
        self.weapon.consume_round();

        match target {
            Some(t) if t.position == aim && !t.is_destroyed() => Ok(t.take_damage(self.weapon.damage())),
            _ => Ok(ShotResult::Miss),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::weapon::WeaponKind;

    #[test]
    fn default_vessel_comes_from_table() {
        let v = Vessel::new(VesselKind::Submarine, Position::new(1, 1, 0));
        assert_eq!(v.hit_points_remaining(), 3);
        assert_eq!(v.weapon().kind(), WeaponKind::Torpedo);
        assert!(v.can_fire());
    }

    #[test]
    fn damage_is_clamped_at_zero() {
        let mut shooter = Vessel::new(VesselKind::Destroyer, Position::new(0, 0, 0));
        let mut target = Vessel::with_stats(
            VesselKind::Aircraft,
            Position::new(1, 0, 0),
            1,
            Weapon::new(WeaponKind::Missile),
        );
        let res = shooter.fire_at(Some(&mut target), Position::new(1, 0, 0));
        assert_eq!(res, Ok(ShotResult::Sunk(VesselKind::Aircraft)));
        assert_eq!(target.hit_points_remaining(), 0);
        assert!(!target.can_fire());
    }

    #[test]
    fn target_elsewhere_is_a_miss() {
        let mut shooter = Vessel::new(VesselKind::Frigate, Position::new(0, 0, 0));
        let mut target = Vessel::new(VesselKind::Cruiser, Position::new(2, 0, 0));
        let res = shooter.fire_at(Some(&mut target), Position::new(1, 0, 0));
        assert_eq!(res, Ok(ShotResult::Miss));
        assert_eq!(target.hit_points_remaining(), 6);
        assert_eq!(shooter.weapon().ammunition(), 49);
    }

    #[test]
    fn destroyed_vessel_cannot_fire() {
        let mut shooter = Vessel::with_stats(
            VesselKind::Frigate,
            Position::new(0, 0, 0),
            0,
            Weapon::new(WeaponKind::Cannon),
        );
        assert!(matches!(
            shooter.fire_at(None, Position::new(0, 0, 0)),
            Err(EngineError::VesselNotFoundOrDisabled(_))
        ));
        assert_eq!(shooter.weapon().ammunition(), 50);
    }
}
