//! Placeable structures and their passive effects

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::ledger::{Cost, ResourceKind, ResourceLedger};
use crate::consts::BUILDING_MIN_SPACING;
use crate::error::BuildError;

/// Building types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    Recycler,
    Tree,
    OxygenGenerator,
}

/// Static configuration for a building type
#[derive(Debug, Clone, Copy)]
pub struct BuildingConfig {
    pub cost: &'static Cost,
    /// Effect radius (0 = no area effect)
    pub radius: f32,
    /// Seeds per debris per second (recycler) or oxygen per second
    pub rate: f32,
}

const RECYCLER_COST: &Cost = &[(ResourceKind::Metal, 10.0), (ResourceKind::Plastic, 5.0)];
const TREE_COST: &Cost = &[(ResourceKind::Seeds, 3.0), (ResourceKind::Organic, 2.0)];
const GENERATOR_COST: &Cost = &[(ResourceKind::Metal, 8.0), (ResourceKind::Plastic, 8.0)];

impl BuildingKind {
    pub const ALL: [BuildingKind; 3] = [
        BuildingKind::Recycler,
        BuildingKind::Tree,
        BuildingKind::OxygenGenerator,
    ];

    pub fn config(&self) -> BuildingConfig {
        match self {
            BuildingKind::Recycler => BuildingConfig {
                cost: RECYCLER_COST,
                radius: 10.0,
                rate: 0.2,
            },
            BuildingKind::Tree => BuildingConfig {
                cost: TREE_COST,
                radius: 8.0,
                rate: 0.5,
            },
            BuildingKind::OxygenGenerator => BuildingConfig {
                cost: GENERATOR_COST,
                radius: 0.0,
                rate: 1.5,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingKind::Recycler => "recycler",
            BuildingKind::Tree => "tree",
            BuildingKind::OxygenGenerator => "oxygen_generator",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "recycler" => Some(BuildingKind::Recycler),
            "tree" => Some(BuildingKind::Tree),
            "oxygen_generator" | "oxygen" | "generator" => Some(BuildingKind::OxygenGenerator),
            _ => None,
        }
    }

    /// Parse a name, turning unknown names into a `BuildError`
    pub fn parse(s: &str) -> Result<Self, BuildError> {
        Self::from_name(s).ok_or_else(|| BuildError::UnknownKind(s.to_string()))
    }

    /// Whether this building produces oxygen passively
    pub fn produces_oxygen(&self) -> bool {
        matches!(self, BuildingKind::Tree | BuildingKind::OxygenGenerator)
    }
}

/// A placed building
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: u32,
    pub kind: BuildingKind,
    pub pos: Vec3,
}

impl Building {
    pub fn config(&self) -> BuildingConfig {
        self.kind.config()
    }

    pub fn in_range(&self, p: Vec3) -> bool {
        let radius = self.config().radius;
        radius > 0.0 && self.pos.distance(p) <= radius
    }
}

/// Check spacing against existing buildings
pub fn validate_placement(buildings: &[Building], pos: Vec3) -> Result<(), BuildError> {
    for b in buildings {
        let distance = b.pos.distance(pos);
        if distance < BUILDING_MIN_SPACING {
            return Err(BuildError::TooClose {
                neighbor: b.id,
                distance,
                min: BUILDING_MIN_SPACING,
            });
        }
    }
    Ok(())
}

/// All placed buildings
#[derive(Debug, Clone, Default)]
pub struct BuildingSet {
    buildings: Vec<Building>,
    next_id: u32,
}

impl BuildingSet {
    pub fn all(&self) -> &[Building] {
        &self.buildings
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn of_kind(&self, kind: BuildingKind) -> impl Iterator<Item = &Building> {
        self.buildings.iter().filter(move |b| b.kind == kind)
    }

    /// Validate spacing, then pay, then create. Nothing is deducted on failure.
    pub fn place(
        &mut self,
        kind: BuildingKind,
        pos: Vec3,
        ledger: &mut ResourceLedger,
    ) -> Result<&Building, BuildError> {
        validate_placement(&self.buildings, pos)?;
        let cost = kind.config().cost;
        if let Some(short) = ledger.shortfall(cost) {
            return Err(BuildError::InsufficientResources(short));
        }
        let paid = ledger.deduct_costs(cost);
        debug_assert!(paid);
        self.next_id += 1;
        self.buildings.push(Building {
            id: self.next_id,
            kind,
            pos,
        });
        Ok(&self.buildings[self.buildings.len() - 1])
    }

    /// Trees within `radius` of `p`
    pub fn trees_near(&self, p: Vec3, radius: f32) -> usize {
        self.of_kind(BuildingKind::Tree)
            .filter(|b| b.pos.distance(p) <= radius)
            .count()
    }

    /// Passive oxygen per second from trees and generators
    pub fn oxygen_rate(&self) -> f32 {
        self.buildings
            .iter()
            .filter(|b| b.kind.produces_oxygen())
            .map(|b| b.config().rate)
            .sum()
    }

    /// Seeds per second from recyclers, given debris positions
    pub fn seed_rate(&self, debris: impl Iterator<Item = Vec3> + Clone) -> f32 {
        self.of_kind(BuildingKind::Recycler)
            .map(|r| {
                let nearby = debris.clone().filter(|&p| r.in_range(p)).count();
                nearby as f32 * r.config().rate
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich_ledger() -> ResourceLedger {
        let mut ledger = ResourceLedger::default();
        for kind in ResourceKind::ALL {
            ledger.add(kind, 100.0);
        }
        ledger
    }

    #[test]
    fn test_place_deducts_cost() {
        let mut set = BuildingSet::default();
        let mut ledger = rich_ledger();
        let b = set.place(BuildingKind::Recycler, Vec3::ZERO, &mut ledger).unwrap();
        assert_eq!(b.id, 1);
        assert_eq!(ledger.get(ResourceKind::Metal), 90.0);
        assert_eq!(ledger.get(ResourceKind::Plastic), 95.0);
    }

    #[test]
    fn test_too_close_fails_without_charge() {
        let mut set = BuildingSet::default();
        let mut ledger = rich_ledger();
        set.place(BuildingKind::Tree, Vec3::ZERO, &mut ledger).unwrap();
        let seeds = ledger.get(ResourceKind::Seeds);

        let err = set
            .place(BuildingKind::Tree, Vec3::new(4.0, 0.0, 0.0), &mut ledger)
            .unwrap_err();
        assert!(matches!(err, BuildError::TooClose { neighbor: 1, .. }));
        assert_eq!(ledger.get(ResourceKind::Seeds), seeds);
        assert_eq!(set.len(), 1);

        // Exactly at the spacing is fine
        assert!(set.place(BuildingKind::Tree, Vec3::new(5.0, 0.0, 0.0), &mut ledger).is_ok());
    }

    #[test]
    fn test_insufficient_resources() {
        let mut set = BuildingSet::default();
        let mut ledger = ResourceLedger::starting();
        // 3 seeds, but no organic
        let err = set.place(BuildingKind::Tree, Vec3::ZERO, &mut ledger).unwrap_err();
        assert_eq!(err, BuildError::InsufficientResources(ResourceKind::Organic));
        assert_eq!(ledger.get(ResourceKind::Seeds), 3.0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_passive_rates() {
        let mut set = BuildingSet::default();
        let mut ledger = rich_ledger();
        set.place(BuildingKind::Tree, Vec3::ZERO, &mut ledger).unwrap();
        set.place(BuildingKind::OxygenGenerator, Vec3::new(10.0, 0.0, 0.0), &mut ledger)
            .unwrap();
        set.place(BuildingKind::Recycler, Vec3::new(-20.0, 0.0, 0.0), &mut ledger)
            .unwrap();
        assert!((set.oxygen_rate() - 2.0).abs() < 1e-6);

        let debris = [
            Vec3::new(-21.0, 0.0, 0.0),
            Vec3::new(-15.0, 0.0, 2.0),
            Vec3::new(50.0, 0.0, 0.0),
        ];
        assert!((set.seed_rate(debris.iter().copied()) - 0.4).abs() < 1e-6);
        assert_eq!(set.trees_near(Vec3::new(3.0, 0.0, 0.0), 5.0), 1);
    }

    #[test]
    fn test_building_names() {
        assert_eq!(BuildingKind::parse("Tree"), Ok(BuildingKind::Tree));
        assert_eq!(
            BuildingKind::parse("castle"),
            Err(BuildError::UnknownKind("castle".into()))
        );
        for kind in BuildingKind::ALL {
            assert_eq!(BuildingKind::from_name(kind.as_str()), Some(kind));
        }
    }
}
