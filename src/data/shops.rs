use crate::shared::*;

/// Always on the shelf at the general store.
pub const BASE_STOCK: [ItemId; 5] = [
    ItemId::ParsnipSeeds,
    ItemId::TurnipSeeds,
    ItemId::PotatoSeeds,
    ItemId::Fertilizer,
    ItemId::QualityFertilizer,
];

const SHOP_PLUS_STOCK: [ItemId; 3] = [
    ItemId::SprinklerCopper,
    ItemId::SprinklerIron,
    ItemId::QualityFertilizer,
];

/// Today's stock: the base shelf, the weekday sprinkler rotation, and the
/// extended range once unlocked. No item is listed twice.
pub fn shop_stock(weekday: DayOfWeek, shop_plus: bool) -> Vec<ItemId> {
    let mut stock: Vec<ItemId> = BASE_STOCK.to_vec();
    let rotation: &[ItemId] = match weekday.index() {
        1 | 4 => &[ItemId::SprinklerCopper],
        2 | 5 => &[ItemId::SprinklerIron],
        6 => &[ItemId::SprinklerGold],
        _ => &[],
    };
    stock.extend_from_slice(rotation);
    if shop_plus {
        stock.extend_from_slice(&SHOP_PLUS_STOCK);
    }
    let mut seen = Vec::with_capacity(stock.len());
    stock.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(*item);
            true
        }
    });
    stock
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_rotation() {
        assert_eq!(shop_stock(DayOfWeek::Monday, false).len(), 5);
        assert!(shop_stock(DayOfWeek::Tuesday, false).contains(&ItemId::SprinklerCopper));
        assert!(shop_stock(DayOfWeek::Saturday, false).contains(&ItemId::SprinklerIron));
        assert!(shop_stock(DayOfWeek::Sunday, false).contains(&ItemId::SprinklerGold));
    }

    #[test]
    fn test_shop_plus_does_not_duplicate() {
        let stock = shop_stock(DayOfWeek::Tuesday, true);
        let coppers = stock.iter().filter(|i| **i == ItemId::SprinklerCopper).count();
        let quality = stock.iter().filter(|i| **i == ItemId::QualityFertilizer).count();
        assert_eq!(coppers, 1);
        assert_eq!(quality, 1);
        assert!(stock.contains(&ItemId::SprinklerIron));
    }
}
