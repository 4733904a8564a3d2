//! Fire control: tool selection, per-tool cooldowns and projectile launch.
//!
//! A trigger pull is accepted only when a tool is selected, its cooldown has
//! elapsed on the virtual clock and the ledger can pay for it. Rejections are
//! returned as `FireRejected` and never touch the ledger or the world.

use std::collections::HashMap;

use hecs::World;
use thiserror::Error;

use microbequest_core::config::{GameConfig, ToolConfig, ToolId};
use microbequest_core::enums::ProjectileBehavior;
use microbequest_core::events::GameEvent;
use microbequest_core::types::{Position, Velocity};

use crate::guidance;
use crate::ledger::ResourceLedger;
use crate::world_setup;

/// Why a selection or trigger pull did nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FireRejected {
    #[error("no tool selected")]
    NoToolSelected,
    #[error("unknown tool '{0}'")]
    UnknownTool(ToolId),
    #[error("tool '{tool}' cooling down for another {remaining_ms} ms")]
    CoolingDown { tool: ToolId, remaining_ms: u64 },
    #[error("cannot afford tool '{0}'")]
    CannotAfford(ToolId),
}

/// Selected tool, trigger state and last-shot timestamps.
#[derive(Debug, Clone, Default)]
pub struct FireControl {
    selected: Option<ToolId>,
    last_shot_ms: HashMap<ToolId, u64>,
    trigger_held: bool,
}

impl FireControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn selected(&self) -> Option<&ToolId> {
        self.selected.as_ref()
    }

    pub fn trigger_held(&self) -> bool {
        self.trigger_held
    }

    pub fn set_trigger(&mut self, held: bool) {
        self.trigger_held = held;
    }

    /// Select a tool. An unknown or unaffordable tool leaves the current
    /// selection in place.
    pub fn select(
        &mut self,
        tool: &ToolId,
        config: &GameConfig,
        ledger: &ResourceLedger,
    ) -> Result<(), FireRejected> {
        let tool_config = config
            .tool(tool)
            .ok_or_else(|| FireRejected::UnknownTool(tool.clone()))?;
        if !ledger.can_afford(tool_config) {
            return Err(FireRejected::CannotAfford(tool.clone()));
        }
        self.selected = Some(tool.clone());
        Ok(())
    }

    /// Milliseconds until `tool` may fire again at `now_ms`.
    pub fn cooldown_remaining(&self, tool: &ToolConfig, now_ms: u64) -> u64 {
        self.last_shot_ms
            .get(&tool.id)
            .map(|&last| last.saturating_add(tool.cooldown_ms).saturating_sub(now_ms))
            .unwrap_or(0)
    }

    /// Pull the trigger with the selected tool from `origin`.
    /// Returns the number of projectiles launched.
    #[allow(clippy::too_many_arguments)]
    pub fn fire(
        &mut self,
        world: &mut World,
        config: &GameConfig,
        ledger: &mut ResourceLedger,
        origin: Position,
        now_ms: u64,
        next_projectile_id: &mut u32,
        events: &mut Vec<GameEvent>,
    ) -> Result<u32, FireRejected> {
        let selected = self.selected.as_ref().ok_or(FireRejected::NoToolSelected)?;
        let tool = config
            .tool(selected)
            .ok_or_else(|| FireRejected::UnknownTool(selected.clone()))?;

        let remaining_ms = self.cooldown_remaining(tool, now_ms);
        if remaining_ms > 0 {
            return Err(FireRejected::CoolingDown {
                tool: tool.id.clone(),
                remaining_ms,
            });
        }
        if !ledger.try_spend(tool) {
            return Err(FireRejected::CannotAfford(tool.id.clone()));
        }

        let mut launched = 0;
        for velocity in launch_velocities(tool) {
            world_setup::spawn_projectile(world, *next_projectile_id, tool, origin, velocity);
            *next_projectile_id += 1;
            launched += 1;
        }

        self.last_shot_ms.insert(tool.id.clone(), now_ms);
        events.push(GameEvent::ShotFired {
            tool: tool.id.clone(),
            projectiles: launched,
        });
        Ok(launched)
    }
}

/// Initial velocities for one trigger pull: a single projectile straight up,
/// or a three-way fan for spread tools. Homing starts straight and steers later.
pub fn launch_velocities(tool: &ToolConfig) -> Vec<Velocity> {
    match tool.behavior {
        ProjectileBehavior::Straight | ProjectileBehavior::Homing => {
            vec![Velocity::from_heading(tool.projectile_speed, 0.0)]
        }
        ProjectileBehavior::Spread => guidance::spread_headings(tool.spread_angle)
            .into_iter()
            .map(|heading| Velocity::from_heading(tool.projectile_speed, heading))
            .collect(),
    }
}
