//! Ten hotbar slots: the five tools, then up to five held items sorted by
//! display name.

use bevy::prelude::*;

use crate::data::item_def;
use crate::shared::*;

#[derive(Debug, Clone, PartialEq)]
pub struct HotbarEntry {
    pub slot: u8,
    pub label: &'static str,
    /// `None` for tools.
    pub qty: Option<u32>,
}

/// Items shown in slots 5-9, in slot order.
pub fn item_slots(inventory: &Inventory) -> Vec<ItemId> {
    let mut items: Vec<ItemId> = inventory.items.keys().copied().collect();
    items.sort_by_key(|&item| item_def(item).name);
    items.truncate((HOTBAR_SLOTS - TOOL_SLOTS) as usize);
    items
}

pub fn selection(inventory: &Inventory) -> HotbarSelection {
    let slot = inventory.selected_slot;
    if slot < TOOL_SLOTS {
        return HotbarSelection::Tool(ToolKind::ALL[slot as usize]);
    }
    item_slots(inventory)
        .get((slot - TOOL_SLOTS) as usize)
        .map_or(HotbarSelection::Empty, |&item| HotbarSelection::Item(item))
}

pub fn entries(inventory: &Inventory) -> Vec<HotbarEntry> {
    let tools = ToolKind::ALL.iter().enumerate().map(|(i, tool)| HotbarEntry {
        slot: i as u8,
        label: tool.label(),
        qty: None,
    });
    let items = item_slots(inventory)
        .into_iter()
        .enumerate()
        .map(|(i, item)| HotbarEntry {
            slot: TOOL_SLOTS + i as u8,
            label: item_def(item).name,
            qty: Some(inventory.count(item)),
        });
    tools.chain(items).collect()
}

pub fn select_hotbar_slot(input: Res<PlayerInput>, mut inventory: ResMut<Inventory>) {
    if let Some(slot) = input.select_slot {
        if slot < HOTBAR_SLOTS {
            inventory.selected_slot = slot;
        }
    }
    if input.cycle_slot != 0 {
        inventory.selected_slot = wrap_index(
            inventory.selected_slot as usize,
            HOTBAR_SLOTS as usize,
            input.cycle_slot as i32,
        ) as u8;
    }
}
