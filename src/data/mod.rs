//! Static game-design tables.
//!
//! Items, crops, recipes, shop stock and villager lines are closed enums
//! matched exhaustively here, so an unknown id is a compile error rather
//! than a runtime lookup miss.

mod crops;
mod items;
mod npcs;
mod recipes;
mod shops;

pub use crops::{crop_def, produce_for, seed_for};
pub use items::{item_def, ALL_ITEMS};
pub use npcs::{villager, VillagerDef, VILLAGERS};
pub use recipes::{recipe, Recipe, RECIPES};
pub use shops::{shop_stock, BASE_STOCK};
