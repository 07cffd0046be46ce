use bevy::prelude::*;

use crate::data::{item_def, Recipe, RECIPES};
use crate::shared::*;

// ──────────────────────────────────────────────────────────────────────────────
// CRAFTING PANEL
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CraftingLine {
    pub output: ItemId,
    pub name: &'static str,
    pub requires: &'static [(ItemId, u32)],
    pub craftable: bool,
}

/// Every recipe, in table order, with whether it can be made right now.
#[derive(Resource, Debug, Clone, Default)]
pub struct CraftingPanel {
    pub lines: Vec<CraftingLine>,
    pub cursor: usize,
}

impl CraftingPanel {
    pub fn refresh(&mut self, inventory: &Inventory) {
        self.lines = RECIPES
            .iter()
            .map(|r| CraftingLine {
                output: r.output,
                name: item_def(r.output).name,
                requires: r.requires,
                craftable: has_all_ingredients(inventory, r),
            })
            .collect();
        self.cursor = self.cursor.min(self.lines.len().saturating_sub(1));
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// HELPER FUNCTIONS
// ──────────────────────────────────────────────────────────────────────────────

pub fn has_all_ingredients(inventory: &Inventory, recipe: &Recipe) -> bool {
    recipe
        .requires
        .iter()
        .all(|&(item, qty)| inventory.has(item, qty))
}

/// e.g. "20 Stone, 5 Copper Ore" for whatever is short.
fn missing_ingredients_description(inventory: &Inventory, recipe: &Recipe) -> String {
    recipe
        .requires
        .iter()
        .filter(|&&(item, qty)| !inventory.has(item, qty))
        .map(|&(item, qty)| format!("{} {}", qty, item_def(item).name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Consumes the recipe's ingredients and adds one output. Nothing changes
/// when anything is missing.
pub fn craft(inventory: &mut Inventory, recipe: &Recipe) -> Result<ItemId, ActionRejected> {
    if !has_all_ingredients(inventory, recipe) {
        return Err(ActionRejected::MissingItems(missing_ingredients_description(
            inventory, recipe,
        )));
    }
    for &(item, qty) in recipe.requires {
        if !inventory.try_remove(item, qty) {
            error!("[Crafting] lost track of {:?} while crafting {:?}", item, recipe.output);
        }
    }
    inventory.add(recipe.output, 1);
    Ok(recipe.output)
}

// ──────────────────────────────────────────────────────────────────────────────
// SYSTEMS
// ──────────────────────────────────────────────────────────────────────────────

pub fn handle_open_crafting(
    input: Res<PlayerInput>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if input.open_crafting {
        next_state.set(GameState::Crafting);
    }
}

pub fn open_crafting_panel(inventory: Res<Inventory>, mut panel: ResMut<CraftingPanel>) {
    panel.cursor = 0;
    panel.refresh(&inventory);
}

pub fn crafting_panel_input(
    input: Res<PlayerInput>,
    mut panel: ResMut<CraftingPanel>,
    mut inventory: ResMut<Inventory>,
    mut progression: ResMut<Progression>,
    mut next_state: ResMut<NextState<GameState>>,
    mut flags: EventWriter<FlagUnlockedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if input.ui_cancel || input.interact {
        next_state.set(GameState::Playing);
        return;
    }
    if input.ui_left {
        panel.cursor = wrap_index(panel.cursor, panel.lines.len(), -1);
    }
    if input.ui_right {
        panel.cursor = wrap_index(panel.cursor, panel.lines.len(), 1);
    }
    if !input.ui_confirm {
        return;
    }
    let Some(recipe) = RECIPES.get(panel.cursor) else {
        return;
    };

    match craft(&mut inventory, recipe) {
        Ok(output) => {
            let name = item_def(output).name;
            info!("[Crafting] Crafted {}", name);
            toasts.send(ToastEvent::new(format!("Crafted {name}")));
            if output == ItemId::Furnace && progression.set_flag(Flag::FurnaceCrafted) {
                flags.send(FlagUnlockedEvent {
                    flag: Flag::FurnaceCrafted,
                });
            }
        }
        Err(err) => {
            toasts.send(ToastEvent::new(err.to_string()));
        }
    }
    panel.refresh(&inventory);
}
