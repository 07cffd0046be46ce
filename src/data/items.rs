use crate::shared::*;

pub const ALL_ITEMS: [ItemId; 29] = [
    ItemId::ParsnipSeeds,
    ItemId::TurnipSeeds,
    ItemId::PotatoSeeds,
    ItemId::Parsnip,
    ItemId::ParsnipSilver,
    ItemId::ParsnipGold,
    ItemId::Turnip,
    ItemId::TurnipSilver,
    ItemId::TurnipGold,
    ItemId::Potato,
    ItemId::PotatoSilver,
    ItemId::PotatoGold,
    ItemId::Fiber,
    ItemId::Wood,
    ItemId::Stone,
    ItemId::CopperOre,
    ItemId::IronOre,
    ItemId::GoldOre,
    ItemId::PathTile,
    ItemId::Chest,
    ItemId::Furnace,
    ItemId::SprinklerCopper,
    ItemId::SprinklerIron,
    ItemId::SprinklerGold,
    ItemId::Fertilizer,
    ItemId::QualityFertilizer,
    ItemId::Egg,
    ItemId::EggSilver,
    ItemId::EggGold,
];

const fn seed(name: &'static str, crop: CropKind, price: u32) -> ItemDef {
    ItemDef {
        name,
        kind: ItemKind::Seed(crop),
        category: PriceCategory::Res,
        buy_price: price,
        sell_price: 0,
    }
}

const fn produce(name: &'static str, sell: u32) -> ItemDef {
    ItemDef {
        name,
        kind: ItemKind::Produce,
        category: PriceCategory::Crops,
        buy_price: 0,
        sell_price: sell,
    }
}

const fn resource(name: &'static str, sell: u32) -> ItemDef {
    ItemDef {
        name,
        kind: ItemKind::Resource,
        category: PriceCategory::Res,
        buy_price: 0,
        sell_price: sell,
    }
}

const fn placeable(name: &'static str, structure: StructureKind, price: u32) -> ItemDef {
    ItemDef {
        name,
        kind: ItemKind::Placeable(structure),
        category: PriceCategory::Res,
        buy_price: price,
        sell_price: 0,
    }
}

const fn animal(name: &'static str, sell: u32) -> ItemDef {
    ItemDef {
        name,
        kind: ItemKind::AnimalProduct,
        category: PriceCategory::Animal,
        buy_price: 0,
        sell_price: sell,
    }
}

pub fn item_def(id: ItemId) -> ItemDef {
    match id {
        ItemId::ParsnipSeeds => seed("Parsnip Seeds", CropKind::Parsnip, 20),
        ItemId::TurnipSeeds => seed("Turnip Seeds", CropKind::Turnip, 30),
        ItemId::PotatoSeeds => seed("Potato Seeds", CropKind::Potato, 50),

        ItemId::Parsnip => produce("Parsnip", 35),
        ItemId::ParsnipSilver => produce("Parsnip (Silver)", 44),
        ItemId::ParsnipGold => produce("Parsnip (Gold)", 52),
        ItemId::Turnip => produce("Turnip", 50),
        ItemId::TurnipSilver => produce("Turnip (Silver)", 62),
        ItemId::TurnipGold => produce("Turnip (Gold)", 75),
        ItemId::Potato => produce("Potato", 80),
        ItemId::PotatoSilver => produce("Potato (Silver)", 96),
        ItemId::PotatoGold => produce("Potato (Gold)", 120),

        ItemId::Fiber => resource("Fiber", 2),
        ItemId::Wood => resource("Wood", 3),
        ItemId::Stone => resource("Stone", 2),
        ItemId::CopperOre => resource("Copper Ore", 8),
        ItemId::IronOre => resource("Iron Ore", 12),
        ItemId::GoldOre => resource("Gold Ore", 25),

        ItemId::PathTile => placeable("Path Tile", StructureKind::PathTile, 0),
        ItemId::Chest => placeable("Chest", StructureKind::Chest, 0),
        ItemId::Furnace => placeable("Furnace", StructureKind::Furnace, 0),
        ItemId::SprinklerCopper => placeable("Sprinkler (Cu)", StructureKind::SprinklerCopper, 120),
        ItemId::SprinklerIron => placeable("Sprinkler (Fe)", StructureKind::SprinklerIron, 250),
        ItemId::SprinklerGold => placeable("Sprinkler (Au)", StructureKind::SprinklerGold, 500),

        ItemId::Fertilizer => ItemDef {
            name: "Basic Fertilizer",
            kind: ItemKind::Fertilizer { amount: 14 },
            category: PriceCategory::Res,
            buy_price: 80,
            sell_price: 0,
        },
        ItemId::QualityFertilizer => ItemDef {
            name: "Quality Fertilizer",
            kind: ItemKind::Fertilizer { amount: 24 },
            category: PriceCategory::Res,
            buy_price: 160,
            sell_price: 0,
        },

        ItemId::Egg => animal("Egg", 30),
        ItemId::EggSilver => animal("Egg (Silver)", 38),
        ItemId::EggGold => animal("Egg (Gold)", 48),
    }
}
