//! Weapons: range and ammunition descriptors carried by vessels.

use core::fmt;

use crate::core::config::{WeaponDef, WEAPONS};

/// Closed set of weapon kinds. Discriminants index [`WEAPONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponKind {
    Cannon = 0,
    Torpedo = 1,
    Missile = 2,
}

impl WeaponKind {
    pub fn def(self) -> &'static WeaponDef {
        &WEAPONS[self as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Cannon => "Cannon",
            WeaponKind::Torpedo => "Torpedo",
            WeaponKind::Missile => "Missile",
        }
    }
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A vessel's weapon. Kind and range are fixed; ammunition only goes down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    kind: WeaponKind,
    ammunition: u32,
    range: u32,
}

impl Weapon {
    /// A freshly loaded weapon of `kind`, stats taken from the rules table.
    pub fn new(kind: WeaponKind) -> Self {
        let def = kind.def();
        Self {
            kind,
            ammunition: def.ammunition(),
            range: def.range(),
        }
    }

    /// Weapon with explicit stats, for restoring saved state or custom rules.
    pub fn with_stats(kind: WeaponKind, ammunition: u32, range: u32) -> Self {
        Self {
            kind,
            ammunition,
            range,
        }
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn ammunition(&self) -> u32 {
        self.ammunition
    }

    pub fn range(&self) -> u32 {
        self.range
    }

    /// Hit points a hit from this weapon removes.
    pub fn damage(&self) -> u32 {
        self.kind.def().damage()
    }

    pub fn is_depleted(&self) -> bool {
        self.ammunition == 0
    }

    /// Spend one round. Returns `false` if the weapon was already empty.
    pub(crate) fn consume_round(&mut self) -> bool {
        match self.ammunition.checked_sub(1) {
            Some(left) => {
                self.ammunition = left;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_weapon_uses_table_stats() {
        let w = Weapon::new(WeaponKind::Torpedo);
        assert_eq!(w.ammunition(), 15);
        assert_eq!(w.range(), 6);
        assert_eq!(w.damage(), 3);
    }

    #[test]
    fn consume_stops_at_zero() {
        let mut w = Weapon::with_stats(WeaponKind::Cannon, 1, 3);
        assert!(w.consume_round());
        assert!(w.is_depleted());
        assert!(!w.consume_round());
        assert_eq!(w.ammunition(), 0);
    }
}
