//! Resource ledger
//!
//! Named counters with a non-negative invariant. Oxygen is additionally
//! capped at [`OXYGEN_MAX`]. Every applied change is queued so the frame loop
//! can forward it to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::consts::OXYGEN_MAX;

/// Resource types tracked by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Plastic,
    Metal,
    Organic,
    Seeds,
    Oxygen,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Plastic,
        ResourceKind::Metal,
        ResourceKind::Organic,
        ResourceKind::Seeds,
        ResourceKind::Oxygen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Plastic => "plastic",
            ResourceKind::Metal => "metal",
            ResourceKind::Organic => "organic",
            ResourceKind::Seeds => "seeds",
            ResourceKind::Oxygen => "oxygen",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plastic" => Some(ResourceKind::Plastic),
            "metal" => Some(ResourceKind::Metal),
            "organic" => Some(ResourceKind::Organic),
            "seeds" | "seed" => Some(ResourceKind::Seeds),
            "oxygen" | "o2" => Some(ResourceKind::Oxygen),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    fn cap(self) -> f32 {
        match self {
            ResourceKind::Oxygen => OXYGEN_MAX,
            _ => f32::INFINITY,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A price: resource/amount pairs
pub type Cost = [(ResourceKind, f32)];

/// An applied change, queued for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceChange {
    pub kind: ResourceKind,
    /// Signed applied delta (after clamping)
    pub delta: f32,
    /// Balance after the change
    pub balance: f32,
}

/// Resource balances
#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    balances: [f32; 5],
    changes: Vec<ResourceChange>,
}

impl ResourceLedger {
    /// Starting ledger: a few seeds and a full oxygen tank
    pub fn starting() -> Self {
        let mut ledger = Self::default();
        ledger.balances[ResourceKind::Seeds.index()] = 3.0;
        ledger.balances[ResourceKind::Oxygen.index()] = OXYGEN_MAX;
        ledger
    }

    pub fn get(&self, kind: ResourceKind) -> f32 {
        self.balances[kind.index()]
    }

    /// Apply a signed delta with clamping; records the change if anything moved
    fn apply(&mut self, kind: ResourceKind, delta: f32) -> f32 {
        let i = kind.index();
        let before = self.balances[i];
        let after = (before + delta).clamp(0.0, kind.cap());
        self.balances[i] = after;
        let applied = after - before;
        if applied != 0.0 {
            self.changes.push(ResourceChange {
                kind,
                delta: applied,
                balance: after,
            });
        }
        applied
    }

    /// Add a positive amount. Returns the amount actually credited (oxygen may cap).
    pub fn add(&mut self, kind: ResourceKind, amount: f32) -> f32 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }
        self.apply(kind, amount)
    }

    /// Remove `amount` if the balance covers it. Leaves the ledger untouched otherwise.
    pub fn remove(&mut self, kind: ResourceKind, amount: f32) -> bool {
        if !amount.is_finite() || amount < 0.0 {
            return false;
        }
        if self.get(kind) < amount {
            return false;
        }
        self.apply(kind, -amount);
        true
    }

    /// [`add`](Self::add) by resource name; unknown names are logged and credit nothing
    pub fn add_named(&mut self, name: &str, amount: f32) -> f32 {
        match ResourceKind::from_name(name) {
            Some(kind) => self.add(kind, amount),
            None => {
                log::warn!("Ignoring credit of unknown resource '{}'", name);
                0.0
            }
        }
    }

    /// [`remove`](Self::remove) by resource name; unknown names are logged and remove nothing
    pub fn remove_named(&mut self, name: &str, amount: f32) -> bool {
        match ResourceKind::from_name(name) {
            Some(kind) => self.remove(kind, amount),
            None => {
                log::warn!("Ignoring debit of unknown resource '{}'", name);
                false
            }
        }
    }

    /// True if every entry of `cost` is covered
    pub fn can_afford(&self, cost: &Cost) -> bool {
        self.shortfall(cost).is_none()
    }

    /// First resource the ledger can't cover, if any
    pub fn shortfall(&self, cost: &Cost) -> Option<ResourceKind> {
        cost.iter()
            .find(|(kind, amount)| self.get(*kind) < *amount)
            .map(|(kind, _)| *kind)
    }

    /// Subtract every entry of `cost`, or nothing at all
    pub fn deduct_costs(&mut self, cost: &Cost) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        for &(kind, amount) in cost {
            if amount > 0.0 {
                self.apply(kind, -amount);
            }
        }
        true
    }

    /// Unconditional per-frame oxygen drain, floored at zero
    pub fn drain_oxygen(&mut self, dt: f32, rate: f32) {
        if dt > 0.0 && rate > 0.0 {
            self.apply(ResourceKind::Oxygen, -rate * dt);
        }
    }

    pub fn oxygen(&self) -> f32 {
        self.get(ResourceKind::Oxygen)
    }

    /// Drain queued change notifications
    pub fn take_changes(&mut self) -> Vec<ResourceChange> {
        std::mem::take(&mut self.changes)
    }

    /// Balances as (kind, amount) pairs, in display order
    pub fn balances(&self) -> impl Iterator<Item = (ResourceKind, f32)> + '_ {
        ResourceKind::ALL.iter().map(|&k| (k, self.get(k)))
    }
}
