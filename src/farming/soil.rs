//! Soil, fertility and structure placement rules.

use crate::shared::*;

impl FarmGrid {
    /// Whether `till` would succeed, without changing anything.
    pub fn check_till(&self, tile: TileCoord) -> Result<usize, ActionRejected> {
        let idx = self.index(tile).ok_or(ActionRejected::Nothing)?;
        if self.structures.contains_key(&tile) {
            return Err(ActionRejected::Occupied);
        }
        if self.soil[idx] != SoilState::Untilled {
            return Err(ActionRejected::AlreadyDone);
        }
        Ok(idx)
    }

    /// Untilled → tilled. Anything else is a no-op.
    pub fn till(&mut self, tile: TileCoord) -> Result<(), ActionRejected> {
        let idx = self.check_till(tile)?;
        self.soil[idx] = SoilState::Tilled;
        Ok(())
    }

    /// Whether `water` would succeed, without changing anything.
    pub fn check_water(&self, tile: TileCoord) -> Result<usize, ActionRejected> {
        let idx = self.index(tile).ok_or(ActionRejected::Nothing)?;
        if !self.soil[idx].is_worked() {
            return Err(ActionRejected::NeedsWorkedSoil);
        }
        Ok(idx)
    }

    /// Tilled or watered → watered, and any crop on the tile is marked watered.
    pub fn water(&mut self, tile: TileCoord) -> Result<(), ActionRejected> {
        let idx = self.check_water(tile)?;
        self.soil[idx] = SoilState::Watered;
        if let Some(crop) = self.crops.get_mut(&tile) {
            crop.watered = true;
        }
        Ok(())
    }

    /// Starts a crop at stage 0. The caller consumes the seed only on success.
    pub fn plant(
        &mut self,
        tile: TileCoord,
        kind: CropKind,
        season: Season,
    ) -> Result<(), ActionRejected> {
        let idx = self.index(tile).ok_or(ActionRejected::Nothing)?;
        if !crate::data::crop_def(kind).grows_in(season) {
            return Err(ActionRejected::OutOfSeason);
        }
        if !self.soil[idx].is_worked() {
            return Err(ActionRejected::NeedsWorkedSoil);
        }
        if self.crops.contains_key(&tile) || self.structures.contains_key(&tile) {
            return Err(ActionRejected::Occupied);
        }
        let watered = self.soil[idx] == SoilState::Watered;
        self.crops.insert(tile, Crop::new(kind, watered));
        Ok(())
    }

    /// Raises fertility by `amount`, capped at 100. Returns the new value.
    pub fn fertilize(&mut self, tile: TileCoord, amount: u8) -> Result<u8, ActionRejected> {
        let idx = self.index(tile).ok_or(ActionRejected::Nothing)?;
        if !self.soil[idx].is_worked() {
            return Err(ActionRejected::NeedsWorkedSoil);
        }
        let raised = self.fertility[idx].saturating_add(amount).min(FERTILITY_MAX);
        self.fertility[idx] = raised;
        Ok(raised)
    }

    /// One structure per tile, and never on top of a crop.
    pub fn place_structure(
        &mut self,
        tile: TileCoord,
        kind: StructureKind,
    ) -> Result<(), ActionRejected> {
        if !self.in_bounds(tile) {
            return Err(ActionRejected::Nothing);
        }
        if self.structures.contains_key(&tile) || self.crops.contains_key(&tile) {
            return Err(ActionRejected::Occupied);
        }
        self.structures.insert(tile, kind);
        Ok(())
    }

    /// Watered tiles dry back to tilled unless today is rainy or snowy.
    /// Returns how many tiles dried.
    pub fn dry_out(&mut self, today: Weather) -> usize {
        if today.is_wet() {
            return 0;
        }
        let mut dried = 0;
        for soil in self.soil.iter_mut() {
            if *soil == SoilState::Watered {
                *soil = SoilState::Tilled;
                dried += 1;
            }
        }
        dried
    }

    /// Lowers fertility after a harvest, never below the floor.
    pub(crate) fn deplete(&mut self, tile: TileCoord, amount: u8) {
        if let Some(idx) = self.index(tile) {
            self.fertility[idx] = self.fertility[idx].saturating_sub(amount).max(FERTILITY_MIN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> FarmGrid {
        FarmGrid::new(40, 22)
    }

    #[test]
    fn test_till_twice_is_idempotent() {
        let mut farm = grid();
        let t = TileCoord::new(5, 5);
        assert!(farm.till(t).is_ok());
        let after_first = farm.clone();
        assert_eq!(farm.till(t), Err(ActionRejected::AlreadyDone));
        assert_eq!(farm, after_first);
        assert_eq!(farm.soil_at(t), Some(SoilState::Tilled));
    }

    #[test]
    fn test_till_out_of_bounds_is_silent() {
        let mut farm = grid();
        let err = farm.till(TileCoord::new(-1, 3)).unwrap_err();
        assert!(err.is_silent());
    }

    #[test]
    fn test_water_requires_tilled_soil_and_marks_crop() {
        let mut farm = grid();
        let t = TileCoord::new(3, 3);
        assert_eq!(farm.water(t), Err(ActionRejected::NeedsWorkedSoil));
        farm.till(t).unwrap();
        farm.plant(t, CropKind::Parsnip, Season::Spring).unwrap();
        assert!(!farm.crops[&t].watered);
        farm.water(t).unwrap();
        assert_eq!(farm.soil_at(t), Some(SoilState::Watered));
        assert!(farm.crops[&t].watered);
    }

    #[test]
    fn test_plant_out_of_season_creates_nothing() {
        let mut farm = grid();
        let t = TileCoord::new(3, 3);
        farm.till(t).unwrap();
        assert_eq!(
            farm.plant(t, CropKind::Parsnip, Season::Summer),
            Err(ActionRejected::OutOfSeason)
        );
        assert!(farm.crops.is_empty());
    }

    #[test]
    fn test_plant_on_occupied_tile_rejected() {
        let mut farm = grid();
        let t = TileCoord::new(4, 4);
        farm.till(t).unwrap();
        farm.plant(t, CropKind::Turnip, Season::Fall).unwrap();
        assert_eq!(
            farm.plant(t, CropKind::Turnip, Season::Fall),
            Err(ActionRejected::Occupied)
        );
        let u = TileCoord::new(6, 4);
        farm.till(u).unwrap();
        farm.place_structure(u, StructureKind::Chest).unwrap();
        assert_eq!(
            farm.plant(u, CropKind::Turnip, Season::Fall),
            Err(ActionRejected::Occupied)
        );
    }

    #[test]
    fn test_structure_never_on_crop() {
        let mut farm = grid();
        let t = TileCoord::new(4, 4);
        farm.till(t).unwrap();
        farm.plant(t, CropKind::Potato, Season::Spring).unwrap();
        assert_eq!(
            farm.place_structure(t, StructureKind::SprinklerCopper),
            Err(ActionRejected::Occupied)
        );
        assert!(farm.structures.is_empty());
    }

    #[test]
    fn test_fertilize_caps_at_100() {
        let mut farm = grid();
        let t = TileCoord::new(1, 1);
        assert_eq!(farm.fertilize(t, 14), Err(ActionRejected::NeedsWorkedSoil));
        farm.till(t).unwrap();
        assert_eq!(farm.fertilize(t, 24), Ok(84));
        assert_eq!(farm.fertilize(t, 24), Ok(100));
        assert_eq!(farm.fertility_at(t), Some(100));
    }

    #[test]
    fn test_dry_out_only_when_clear() {
        let mut farm = grid();
        let t = TileCoord::new(2, 2);
        farm.till(t).unwrap();
        farm.water(t).unwrap();
        assert_eq!(farm.dry_out(Weather::Rain), 0);
        assert_eq!(farm.soil_at(t), Some(SoilState::Watered));
        assert_eq!(farm.dry_out(Weather::Clear), 1);
        assert_eq!(farm.soil_at(t), Some(SoilState::Tilled));
    }
}
