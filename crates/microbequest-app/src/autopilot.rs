//! Scripted player for unattended runs.
//!
//! Reads a snapshot and answers with the commands a simple player would
//! send: stand under the bad bacterium closest to the body, keep the trigger
//! held, swap to an affordable tool when the current one runs dry, and
//! advance as soon as a wave is clear.

use microbequest_core::commands::PlayerCommand;
use microbequest_core::config::ToolId;
use microbequest_core::enums::{BacteriaKind, MatchPhase};
use microbequest_core::state::{BacteriumView, MatchSnapshot, ResourceView};

pub fn decide(snapshot: &MatchSnapshot) -> Vec<PlayerCommand> {
    match snapshot.phase {
        MatchPhase::WaveClear => vec![PlayerCommand::AdvanceWave],
        MatchPhase::Playing => {
            let mut commands = Vec::new();
            if let Some(target) = pick_target(snapshot) {
                if (target.position.x - snapshot.player.position.x).abs() > f64::EPSILON {
                    commands.push(PlayerCommand::MoveTo {
                        x: target.position.x,
                    });
                }
            }
            if let Some(tool) = pick_tool(&snapshot.resources) {
                if snapshot.resources.selected_tool.as_ref() != Some(&tool) {
                    commands.push(PlayerCommand::SelectTool { tool });
                }
            }
            if !snapshot.player.trigger_held {
                commands.push(PlayerCommand::SetTrigger { held: true });
            }
            commands
        }
        _ => Vec::new(),
    }
}

/// The bad bacterium furthest along its crawl; lowest id on ties.
fn pick_target(snapshot: &MatchSnapshot) -> Option<&BacteriumView> {
    snapshot
        .bacteria
        .iter()
        .filter(|b| b.kind == BacteriaKind::Bad)
        .fold(None, |best: Option<&BacteriumView>, b| match best {
            Some(current) if current.position.x >= b.position.x => Some(current),
            _ => Some(b),
        })
}

/// Keep the selected tool while it is affordable, else the first one that is.
fn pick_tool(resources: &ResourceView) -> Option<ToolId> {
    let affordable = |id: &ToolId| {
        resources
            .tools
            .iter()
            .any(|t| &t.tool == id && t.affordable)
    };
    if let Some(selected) = resources.selected_tool.as_ref().filter(|id| affordable(*id)) {
        return Some(selected.clone());
    }
    resources
        .tools
        .iter()
        .find(|t| t.affordable)
        .map(|t| t.tool.clone())
}
