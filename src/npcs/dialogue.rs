//! Dialogue mode: reading lines and answering the bridge prompt.

use bevy::prelude::*;

use crate::shared::*;

pub const BRIDGE_WOOD: u32 = 50;
pub const BRIDGE_STONE: u32 = 25;

/// Spends the repair materials and opens the way north. Returns the flags
/// that were newly set.
pub fn repair_bridge(
    inventory: &mut Inventory,
    progression: &mut Progression,
) -> Result<Vec<Flag>, ActionRejected> {
    if !inventory.has(ItemId::Wood, BRIDGE_WOOD) || !inventory.has(ItemId::Stone, BRIDGE_STONE) {
        return Err(ActionRejected::MissingItems(format!(
            "{BRIDGE_WOOD} wood + {BRIDGE_STONE} stone"
        )));
    }
    inventory.try_remove(ItemId::Wood, BRIDGE_WOOD);
    inventory.try_remove(ItemId::Stone, BRIDGE_STONE);
    Ok([Flag::BridgeBuilt, Flag::MountainAccess]
        .into_iter()
        .filter(|&flag| progression.set_flag(flag))
        .collect())
}

pub fn dialogue_input(
    input: Res<PlayerInput>,
    mut dialogue: ResMut<ActiveDialogue>,
    mut inventory: ResMut<Inventory>,
    mut progression: ResMut<Progression>,
    mut next_state: ResMut<NextState<GameState>>,
    mut flags: EventWriter<FlagUnlockedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if input.ui_cancel || input.interact {
        *dialogue = ActiveDialogue::default();
        next_state.set(GameState::Playing);
        return;
    }
    if !input.ui_confirm {
        return;
    }

    if dialogue.prompt == Some(DialoguePrompt::BridgeRepair) {
        match repair_bridge(&mut inventory, &mut progression) {
            Ok(unlocked) => {
                info!("[Npcs] Bridge repaired");
                toasts.send(ToastEvent::new("Bridge repaired!"));
                for flag in unlocked {
                    flags.send(FlagUnlockedEvent { flag });
                }
            }
            Err(err) => {
                toasts.send(ToastEvent::new(err.to_string()));
            }
        }
    }
    *dialogue = ActiveDialogue::default();
    next_state.set(GameState::Playing);
}
