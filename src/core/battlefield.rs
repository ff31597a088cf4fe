//! A player's battlefield: bounds, capacity and placed vessels.

use alloc::vec::Vec;
use core::num::NonZeroUsize;

use rand::Rng;

use crate::core::common::EngineError;
use crate::core::config::DEFAULT_MAX_VESSEL_CAPACITY;
use crate::core::geometry::{Bounds, Position};
use crate::core::vessel::{Vessel, VesselId};

/// Bounded 3-D volume holding one player's vessels in placement order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Battlefield {
    bounds: Bounds,
    max_vessel_capacity: NonZeroUsize,
    vessels: Vec<Vessel>,
}

impl Battlefield {
    /// Empty battlefield. `bounds` are re-validated here.
    pub fn new(bounds: Bounds, max_vessel_capacity: NonZeroUsize) -> Result<Self, EngineError> {
        bounds.validate()?;
        Ok(Self {
            bounds,
            max_vessel_capacity,
            vessels: Vec::new(),
        })
    }

    /// Empty battlefield with [`DEFAULT_MAX_VESSEL_CAPACITY`].
    pub fn with_default_capacity(bounds: Bounds) -> Result<Self, EngineError> {
        Self::new(bounds, default_capacity())
    }

    /// Empty battlefield with the same bounds and capacity as `self`.
    pub fn mirrored(&self) -> Self {
        Self {
            bounds: self.bounds,
            max_vessel_capacity: self.max_vessel_capacity,
            vessels: Vec::new(),
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn max_vessel_capacity(&self) -> usize {
        self.max_vessel_capacity.get()
    }

    /// Vessels in placement order.
    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    pub fn is_full(&self) -> bool {
        self.vessels.len() >= self.max_vessel_capacity.get()
    }

    pub fn vessel(&self, id: VesselId) -> Option<&Vessel> {
        self.vessels.get(id.0 as usize)
    }

    pub(crate) fn vessel_mut(&mut self, id: VesselId) -> Option<&mut Vessel> {
        self.vessels.get_mut(id.0 as usize)
    }

    pub fn vessel_at(&self, position: &Position) -> Option<&Vessel> {
        self.vessels.iter().find(|v| v.position() == *position)
    }

    pub(crate) fn vessel_at_mut(&mut self, position: &Position) -> Option<&mut Vessel> {
        self.vessels.iter_mut().find(|v| v.position() == *position)
    }

    /// Place `vessel`, assigning it the next id.
    ///
    /// Checks run in order: bounds, capacity, collision.
    pub fn place_vessel(&mut self, mut vessel: Vessel) -> Result<VesselId, EngineError> {
        let position = vessel.position();
        if !self.bounds.contains(&position) {
            return Err(EngineError::OutOfBounds(position));
        }
        if self.is_full() {
            return Err(EngineError::CapacityExceeded(self.max_vessel_capacity.get()));
        }
        if self.vessel_at(&position).is_some() {
            return Err(EngineError::PositionOccupied(position));
        }
        let id = VesselId(self.vessels.len() as u32);
        vessel.set_id(id);
        self.vessels.push(vessel);
        Ok(id)
    }

    /// `true` iff at least one vessel was placed and every one is destroyed.
    pub fn all_vessels_destroyed(&self) -> bool {
        !self.vessels.is_empty() && self.vessels.iter().all(Vessel::is_destroyed)
    }

    /// Total rounds left across vessels that are still afloat.
    pub fn ammunition_remaining(&self) -> u64 {
        self.vessels
            .iter()
            .filter(|v| !v.is_destroyed())
            .map(|v| u64::from(v.weapon().ammunition()))
            .sum()
    }

    /// Returns a random unoccupied cell, or `None` after 100 failed draws.
    pub fn random_free_position<R: Rng>(&self, rng: &mut R) -> Option<Position> {
        let (lo, hi) = (self.bounds.min(), self.bounds.max());
        for _ in 0..100 {
            let p = Position::new(
                rng.random_range(lo.x..=hi.x),
                rng.random_range(lo.y..=hi.y),
                rng.random_range(lo.z..=hi.z),
            );
            if self.vessel_at(&p).is_none() {
                return Some(p);
            }
        }
        None
    }

    /// Re-check every battlefield invariant on state that bypassed
    /// [`Battlefield::place_vessel`], e.g. decoded from storage.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.bounds.validate()?;
        if self.vessels.len() > self.max_vessel_capacity.get() {
            return Err(EngineError::CapacityExceeded(self.max_vessel_capacity.get()));
        }
        for (i, v) in self.vessels.iter().enumerate() {
            if v.id() != VesselId(i as u32) {
                return Err(EngineError::VesselNotFoundOrDisabled(v.id()));
            }
            if !self.bounds.contains(&v.position()) {
                return Err(EngineError::OutOfBounds(v.position()));
            }
            if self.vessels[..i].iter().any(|o| o.position() == v.position()) {
                return Err(EngineError::PositionOccupied(v.position()));
            }
        }
        Ok(())
    }
}

/// [`DEFAULT_MAX_VESSEL_CAPACITY`] as a `NonZeroUsize`.
pub fn default_capacity() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_MAX_VESSEL_CAPACITY).unwrap_or(NonZeroUsize::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vessel::VesselKind;
    use rand::{rngs::SmallRng, SeedableRng};

    fn field(cap: usize) -> Battlefield {
        let bounds = Bounds::new(0, 2, 0, 2, 0, 0).unwrap();
        Battlefield::new(bounds, NonZeroUsize::new(cap).unwrap()).unwrap()
    }

    #[test]
    fn ids_follow_placement_order() {
        let mut bf = field(3);
        let a = bf.place_vessel(Vessel::new(VesselKind::Frigate, Position::new(2, 2, 0))).unwrap();
        let b = bf.place_vessel(Vessel::new(VesselKind::Cruiser, Position::new(0, 0, 0))).unwrap();
        assert_eq!((a, b), (VesselId(0), VesselId(1)));
        assert_eq!(bf.vessel(b).unwrap().kind(), VesselKind::Cruiser);
        assert!(bf.validate().is_ok());
    }

    #[test]
    fn out_of_bounds_checked_before_capacity() {
        let mut bf = field(1);
        bf.place_vessel(Vessel::new(VesselKind::Frigate, Position::new(0, 0, 0))).unwrap();
        assert_eq!(
            bf.place_vessel(Vessel::new(VesselKind::Frigate, Position::new(9, 0, 0))),
            Err(EngineError::OutOfBounds(Position::new(9, 0, 0)))
        );
        assert_eq!(
            bf.place_vessel(Vessel::new(VesselKind::Frigate, Position::new(1, 0, 0))),
            Err(EngineError::CapacityExceeded(1))
        );
    }

    #[test]
    fn random_free_position_skips_occupied_cells() {
        let mut bf = field(9);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..9 {
            let p = bf.random_free_position(&mut rng).unwrap();
            bf.place_vessel(Vessel::new(VesselKind::Aircraft, p)).unwrap();
        }
        assert!(bf.random_free_position(&mut rng).is_none());
    }
}
