use crate::shared::*;

/// Crop growth tables. `stage_days[i]` is how many growth days stage `i`
/// needs; a crop whose stage equals the table length is mature.
pub fn crop_def(kind: CropKind) -> CropDef {
    match kind {
        CropKind::Parsnip => CropDef {
            kind,
            name: "Parsnip",
            stage_days: &[1, 2, 2],
            seasons: &[Season::Spring],
        },
        CropKind::Turnip => CropDef {
            kind,
            name: "Turnip",
            stage_days: &[2, 2, 2],
            seasons: &[Season::Spring, Season::Fall],
        },
        CropKind::Potato => CropDef {
            kind,
            name: "Potato",
            stage_days: &[2, 3, 3],
            seasons: &[Season::Spring],
        },
    }
}

pub fn seed_for(kind: CropKind) -> ItemId {
    match kind {
        CropKind::Parsnip => ItemId::ParsnipSeeds,
        CropKind::Turnip => ItemId::TurnipSeeds,
        CropKind::Potato => ItemId::PotatoSeeds,
    }
}

/// The harvested item for a crop at a given quality tier.
pub fn produce_for(kind: CropKind, quality: Quality) -> ItemId {
    match (kind, quality) {
        (CropKind::Parsnip, Quality::Base) => ItemId::Parsnip,
        (CropKind::Parsnip, Quality::Silver) => ItemId::ParsnipSilver,
        (CropKind::Parsnip, Quality::Gold) => ItemId::ParsnipGold,
        (CropKind::Turnip, Quality::Base) => ItemId::Turnip,
        (CropKind::Turnip, Quality::Silver) => ItemId::TurnipSilver,
        (CropKind::Turnip, Quality::Gold) => ItemId::TurnipGold,
        (CropKind::Potato, Quality::Base) => ItemId::Potato,
        (CropKind::Potato, Quality::Silver) => ItemId::PotatoSilver,
        (CropKind::Potato, Quality::Gold) => ItemId::PotatoGold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::item_def;

    #[test]
    fn test_seed_items_point_back_at_their_crop() {
        for kind in [CropKind::Parsnip, CropKind::Turnip, CropKind::Potato] {
            assert_eq!(item_def(seed_for(kind)).kind, ItemKind::Seed(kind));
        }
    }

    #[test]
    fn test_turnip_grows_in_spring_and_fall() {
        let def = crop_def(CropKind::Turnip);
        assert!(def.grows_in(Season::Spring));
        assert!(def.grows_in(Season::Fall));
        assert!(!def.grows_in(Season::Summer));
        assert_eq!(def.stage_count(), 3);
    }

    #[test]
    fn test_quality_tiers_sell_higher() {
        for kind in [CropKind::Parsnip, CropKind::Turnip, CropKind::Potato] {
            let base = item_def(produce_for(kind, Quality::Base)).sell_price;
            let silver = item_def(produce_for(kind, Quality::Silver)).sell_price;
            let gold = item_def(produce_for(kind, Quality::Gold)).sell_price;
            assert!(base < silver && silver < gold, "{kind:?}");
        }
    }
}
