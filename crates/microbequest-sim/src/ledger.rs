//! Resource ledger: energy and per-type ammunition.
//!
//! Stored in `SimulationEngine`, NOT as an ECS entity. Balances are unsigned
//! and every mutation is checked, so they can never go negative.

use std::collections::BTreeMap;

use microbequest_core::config::{AmmoType, ToolConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLedger {
    energy: u32,
    ammo: BTreeMap<AmmoType, u32>,
}

impl ResourceLedger {
    pub fn new(energy: u32) -> Self {
        Self {
            energy,
            ammo: BTreeMap::new(),
        }
    }

    /// Fresh ledger for a match: starting energy plus each ammo type's initial
    /// stock. When several tools share an ammo type the first one defines it.
    pub fn for_tools(tools: &[ToolConfig], starting_energy: u32) -> Self {
        let mut ledger = Self::new(starting_energy);
        for tool in tools {
            ledger
                .ammo
                .entry(tool.ammo_type.clone())
                .or_insert(tool.initial_ammo);
        }
        ledger
    }

    /// Discard all balances and restock as `for_tools` would.
    pub fn reset(&mut self, tools: &[ToolConfig], starting_energy: u32) {
        *self = Self::for_tools(tools, starting_energy);
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn ammo(&self, ammo_type: &AmmoType) -> u32 {
        self.ammo.get(ammo_type).copied().unwrap_or(0)
    }

    /// Ammo pools in ammo-type order.
    pub fn ammo_pools(&self) -> impl Iterator<Item = (&AmmoType, u32)> {
        self.ammo.iter().map(|(t, &n)| (t, n))
    }

    /// Whether one trigger pull of `tool` is affordable.
    pub fn can_afford(&self, tool: &ToolConfig) -> bool {
        self.energy >= tool.cost && self.ammo(&tool.ammo_type) > 0
    }

    /// Atomic check-and-decrement. On failure nothing changes.
    pub fn try_spend(&mut self, tool: &ToolConfig) -> bool {
        if !self.can_afford(tool) {
            return false;
        }
        let Some(count) = self.ammo.get_mut(&tool.ammo_type) else {
            return false;
        };
        *count -= 1;
        self.energy -= tool.cost;
        true
    }

    /// Add up to `amount` ammo without exceeding `cap`. Returns the amount added.
    pub fn refill(&mut self, ammo_type: &AmmoType, amount: u32, cap: u32) -> u32 {
        let count = self.ammo.entry(ammo_type.clone()).or_insert(0);
        if *count >= cap {
            return 0;
        }
        let new_count = count.saturating_add(amount).min(cap);
        let added = new_count - *count;
        *count = new_count;
        added
    }

    /// Credit energy (kill rewards).
    pub fn earn(&mut self, amount: u32) {
        self.energy = self.energy.saturating_add(amount);
    }
}
