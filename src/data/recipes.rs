use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recipe {
    pub output: ItemId,
    pub requires: &'static [(ItemId, u32)],
}

pub const RECIPES: [Recipe; 8] = [
    Recipe {
        output: ItemId::PathTile,
        requires: &[(ItemId::Stone, 2)],
    },
    Recipe {
        output: ItemId::Chest,
        requires: &[(ItemId::Wood, 20)],
    },
    Recipe {
        output: ItemId::Furnace,
        requires: &[(ItemId::Stone, 20), (ItemId::CopperOre, 5)],
    },
    Recipe {
        output: ItemId::SprinklerCopper,
        requires: &[(ItemId::CopperOre, 5), (ItemId::Stone, 5)],
    },
    Recipe {
        output: ItemId::SprinklerIron,
        requires: &[(ItemId::IronOre, 6), (ItemId::Stone, 10)],
    },
    Recipe {
        output: ItemId::SprinklerGold,
        requires: &[(ItemId::GoldOre, 6), (ItemId::Stone, 12)],
    },
    Recipe {
        output: ItemId::Fertilizer,
        requires: &[(ItemId::Fiber, 5), (ItemId::Stone, 1)],
    },
    Recipe {
        output: ItemId::QualityFertilizer,
        requires: &[(ItemId::Fiber, 10), (ItemId::CopperOre, 1)],
    },
];

pub fn recipe(output: ItemId) -> Option<&'static Recipe> {
    RECIPES.iter().find(|r| r.output == output)
}
