//! Daily crop growth: disease onset, watered growth, stage advancement.

use bevy::prelude::*;
use rand::Rng;

use crate::data::crop_def;
use crate::shared::*;

/// Baseline daily chance of a crop falling ill at fertility 50.
pub const BASE_DISEASE_CHANCE: f32 = 0.025;
/// Chance a diseased crop loses its growth for the day.
pub const DISEASE_STALL_CHANCE: f32 = 0.66;
/// Chance a diseased crop recovers when it moves up a stage.
pub const DISEASE_CURE_CHANCE: f32 = 0.35;
pub const MAX_FERTILITY_BONUS: f32 = 0.35;

impl Crop {
    pub fn new(kind: CropKind, watered: bool) -> Self {
        Self {
            kind,
            stage: 0,
            progress: 0.0,
            watered,
            diseased: false,
        }
    }

    pub fn is_mature(&self) -> bool {
        self.stage >= crop_def(self.kind).stage_count()
    }

    /// Progress through the current stage as 0..1, for display.
    pub fn stage_fraction(&self) -> f32 {
        let def = crop_def(self.kind);
        match def.stage_days.get(self.stage as usize) {
            Some(&need) if need > 0 => (self.progress / need as f32).min(1.0),
            _ => 1.0,
        }
    }

    /// Runs one day of growth. Returns `(advanced_stage, fell_ill)`.
    pub fn grow_one_day(
        &mut self,
        wet_weather: bool,
        fertility_bonus: f32,
        disease_chance: f32,
        rng: &mut impl Rng,
    ) -> (bool, bool) {
        let def = crop_def(self.kind);
        let mature = self.is_mature();

        let mut fell_ill = false;
        if !mature && !self.diseased && rng.gen::<f32>() < disease_chance {
            self.diseased = true;
            fell_ill = true;
        }

        if mature {
            self.watered = false;
            return (false, fell_ill);
        }

        let mut advanced = false;
        if self.watered || wet_weather {
            let stalled = self.diseased && rng.gen::<f32>() < DISEASE_STALL_CHANCE;
            if !stalled {
                self.progress += 1.0 + fertility_bonus.min(MAX_FERTILITY_BONUS);
                let need = def.stage_days[self.stage as usize] as f32;
                if self.progress + 1e-6 >= need {
                    self.stage += 1;
                    self.progress = 0.0;
                    advanced = true;
                    if self.diseased && rng.gen::<f32>() < DISEASE_CURE_CHANCE {
                        self.diseased = false;
                    }
                }
            }
        }
        self.watered = false;
        (advanced, fell_ill)
    }
}

pub fn fertility_bonus(fertility: u8) -> f32 {
    ((fertility as f32 - 50.0) / 180.0).max(0.0)
}

/// Rich soil and wet weather both lower the odds of disease.
pub fn disease_chance(fertility: u8, weather: Weather) -> f32 {
    let mut risk = (BASE_DISEASE_CHANCE - (fertility as f32 - 50.0) / 500.0).max(0.0);
    if weather.is_wet() {
        risk *= 0.75;
    }
    risk
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowthSummary {
    pub lost: Vec<TileCoord>,
    pub advanced: Vec<TileCoord>,
    pub fell_ill: Vec<TileCoord>,
}

/// Removes crops the season no longer supports, then grows every
/// remaining crop one day in tile order.
pub fn advance_crops(
    farm: &mut FarmGrid,
    season: Season,
    weather: Weather,
    rng: &mut impl Rng,
) -> GrowthSummary {
    let mut summary = GrowthSummary::default();

    farm.crops.retain(|tile, crop| {
        let keep = crop_def(crop.kind).grows_in(season);
        if !keep {
            summary.lost.push(*tile);
        }
        keep
    });
    if !summary.lost.is_empty() {
        info!(
            "[Farming] {} crop(s) withered with the change to {}",
            summary.lost.len(),
            season.label()
        );
    }

    let FarmGrid {
        crops,
        fertility,
        cols,
        ..
    } = farm;
    for (tile, crop) in crops.iter_mut() {
        let fert = fertility[(tile.row * *cols + tile.col) as usize];
        let (advanced, fell_ill) = crop.grow_one_day(
            weather.is_wet(),
            fertility_bonus(fert),
            disease_chance(fert, weather),
            rng,
        );
        if advanced {
            summary.advanced.push(*tile);
        }
        if fell_ill {
            summary.fell_ill.push(*tile);
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn watered_parsnip() -> Crop {
        Crop::new(CropKind::Parsnip, true)
    }

    #[test]
    fn test_watered_crop_advances_and_clears_flag() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut crop = watered_parsnip();
        let (advanced, _) = crop.grow_one_day(false, 0.0, 0.0, &mut rng);
        assert!(advanced);
        assert_eq!(crop.stage, 1);
        assert_eq!(crop.progress, 0.0);
        assert!(!crop.watered);
    }

    #[test]
    fn test_dry_crop_does_not_grow() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut crop = Crop::new(CropKind::Parsnip, false);
        crop.grow_one_day(false, 0.0, 0.0, &mut rng);
        assert_eq!(crop.stage, 0);
        assert_eq!(crop.progress, 0.0);
    }

    #[test]
    fn test_rain_counts_as_watering() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut crop = Crop::new(CropKind::Parsnip, false);
        crop.grow_one_day(true, 0.0, 0.0, &mut rng);
        assert_eq!(crop.stage, 1);
    }

    #[test]
    fn test_parsnip_matures_after_five_growth_days() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut crop = watered_parsnip();
        for day in 0..5 {
            assert!(!crop.is_mature(), "mature too early on day {day}");
            crop.watered = true;
            crop.grow_one_day(false, 0.0, 0.0, &mut rng);
        }
        assert!(crop.is_mature());
        assert_eq!(crop.stage, 3);
    }

    #[test]
    fn test_fertility_bonus_speeds_growth() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut crop = Crop::new(CropKind::Potato, true);
        crop.grow_one_day(false, 0.30, 0.0, &mut rng);
        // Stage 0 needs 2 days; 1.30 is not enough.
        assert_eq!(crop.stage, 0);
        assert!((crop.progress - 1.30).abs() < 1e-5);
        crop.watered = true;
        crop.grow_one_day(false, 0.30, 0.0, &mut rng);
        assert_eq!(crop.stage, 1);
    }

    #[test]
    fn test_bonus_is_capped() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut crop = Crop::new(CropKind::Potato, true);
        crop.grow_one_day(false, 5.0, 0.0, &mut rng);
        assert!((crop.progress - 1.35).abs() < 1e-5);
    }

    #[test]
    fn test_mature_crop_is_terminal() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut crop = watered_parsnip();
        crop.stage = 3;
        let before = crop.clone();
        crop.grow_one_day(true, 0.3, 1.0, &mut rng);
        assert_eq!(crop.stage, before.stage);
        assert!(!crop.diseased, "mature crops never fall ill");
        assert!(!crop.watered);
    }

    #[test]
    fn test_certain_disease_onset() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut crop = Crop::new(CropKind::Turnip, false);
        let (_, fell_ill) = crop.grow_one_day(false, 0.0, 1.0, &mut rng);
        assert!(fell_ill);
        assert!(crop.diseased);
    }

    #[test]
    fn test_disease_chance_curve() {
        assert!((disease_chance(50, Weather::Clear) - 0.025).abs() < 1e-6);
        assert!((disease_chance(50, Weather::Rain) - 0.01875).abs() < 1e-6);
        assert_eq!(disease_chance(70, Weather::Clear), 0.0);
        assert!(disease_chance(10, Weather::Clear) > 0.1);
        assert_eq!(fertility_bonus(40), 0.0);
        assert!((fertility_bonus(68) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_season_crops_removed_before_growth() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut farm = FarmGrid::new(40, 22);
        let parsnip = TileCoord::new(1, 1);
        let turnip = TileCoord::new(2, 1);
        farm.crops.insert(parsnip, watered_parsnip());
        farm.crops.insert(turnip, Crop::new(CropKind::Turnip, true));

        let summary = advance_crops(&mut farm, Season::Fall, Weather::Clear, &mut rng);
        assert_eq!(summary.lost, vec![parsnip]);
        assert!(!farm.crops.contains_key(&parsnip));
        assert!(farm.crops.contains_key(&turnip));
    }
}
