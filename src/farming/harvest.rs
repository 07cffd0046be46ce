//! Harvesting mature crops.

use rand::Rng;

use crate::data::produce_for;
use crate::shared::*;

pub const HARVEST_XP: u32 = 5;
const BASE_DEPLETION: u8 = 8;
const QUALITY_DEPLETION: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Harvest {
    pub item: ItemId,
    pub quality: Quality,
    pub fertility_after: u8,
}

pub fn quality_from_roll(roll: f32) -> Quality {
    if roll > 1.15 {
        Quality::Gold
    } else if roll > 0.95 {
        Quality::Silver
    } else {
        Quality::Base
    }
}

/// Picks the mature crop on `tile`: rolls its quality, wears the soil,
/// removes the crop and credits farming XP. The produce is returned for
/// the caller to put in the inventory.
pub fn harvest_crop(
    farm: &mut FarmGrid,
    tile: TileCoord,
    skills: &mut Skills,
    rng: &mut impl Rng,
) -> Result<Harvest, ActionRejected> {
    let crop = farm.crops.get(&tile).ok_or(ActionRejected::Nothing)?;
    if !crop.is_mature() {
        return Err(ActionRejected::Nothing);
    }
    let kind = crop.kind;
    let fertility = farm.fertility_at(tile).ok_or(ActionRejected::Nothing)?;

    let roll = rng.gen::<f32>()
        + (fertility as f32 - 50.0) / 150.0
        + skills.farming.level as f32 * 0.02;
    let quality = quality_from_roll(roll);

    let depletion = if quality == Quality::Base {
        BASE_DEPLETION
    } else {
        QUALITY_DEPLETION
    };
    farm.deplete(tile, depletion);
    farm.crops.remove(&tile);
    skills.add_xp(SkillKind::Farming, HARVEST_XP);

    Ok(Harvest {
        item: produce_for(kind, quality),
        quality,
        fertility_after: farm.fertility_at(tile).unwrap_or(FERTILITY_MIN),
    })
}
