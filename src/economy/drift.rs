//! Per-category price drift: a bounded random walk stepped once a day.

use rand::Rng;

use crate::data::item_def;
use crate::shared::*;

impl PriceDrift {
    pub fn get(&self, category: PriceCategory) -> f32 {
        self.multipliers.get(&category).copied().unwrap_or(1.0)
    }

    /// Steps every category by a uniform amount in ±0.05 and clamps it to
    /// the drift band. Categories are visited in a fixed order so a seeded
    /// stream always yields the same table.
    pub fn roll(&mut self, rng: &mut impl Rng) {
        for category in PriceCategory::ALL {
            let current = self.get(category);
            let step = rng.gen_range(-DRIFT_STEP..=DRIFT_STEP);
            self.multipliers
                .insert(category, (current + step).clamp(DRIFT_MIN, DRIFT_MAX));
        }
    }

    /// `round(base * drift[category])`.
    pub fn price(&self, base: u32, category: PriceCategory) -> u32 {
        (base as f32 * self.get(category)).round() as u32
    }

    /// What one unit of `item` fetches in the shipping bin today.
    pub fn sell_value(&self, item: ItemId) -> u32 {
        let def = item_def(item);
        self.price(def.sell_price, def.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_drift_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut drift = PriceDrift::default();
        for _ in 0..5_000 {
            drift.roll(&mut rng);
            for category in PriceCategory::ALL {
                let m = drift.get(category);
                assert!((DRIFT_MIN..=DRIFT_MAX).contains(&m), "{category:?} drifted to {m}");
            }
        }
    }

    #[test]
    fn test_single_roll_moves_at_most_one_step() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut drift = PriceDrift::default();
        drift.roll(&mut rng);
        for category in PriceCategory::ALL {
            assert!((drift.get(category) - 1.0).abs() <= DRIFT_STEP + 1e-6);
        }
    }

    #[test]
    fn test_price_rounds() {
        let mut drift = PriceDrift::default();
        assert_eq!(drift.sell_value(ItemId::Parsnip), 35);
        drift.multipliers.insert(PriceCategory::Crops, 1.1);
        // 35 * 1.1 = 38.5 rounds away from zero.
        assert_eq!(drift.sell_value(ItemId::Parsnip), 39);
        assert_eq!(drift.sell_value(ItemId::Wood), 3);
    }
}
