//! Sprinkler footprints and the overnight irrigation sweep.

use crate::shared::*;

/// Tiles watered by a sprinkler of `kind` at `center`, the centre included.
///
/// * `Copper`: plus shape, radius 1 (5 tiles)
/// * `Iron`: 3×3 block (9 tiles)
/// * `Gold`: 5×5 block (25 tiles)
pub fn sprinkler_footprint(kind: SprinklerKind, center: TileCoord) -> Vec<TileCoord> {
    match kind {
        SprinklerKind::Copper => vec![
            center,
            center.offset(-1, 0),
            center.offset(1, 0),
            center.offset(0, -1),
            center.offset(0, 1),
        ],
        SprinklerKind::Iron => square(center, 1),
        SprinklerKind::Gold => square(center, 2),
    }
}

fn square(center: TileCoord, radius: i32) -> Vec<TileCoord> {
    let mut tiles = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
    for dr in -radius..=radius {
        for dc in -radius..=radius {
            tiles.push(center.offset(dc, dr));
        }
    }
    tiles
}

impl FarmGrid {
    /// Waters every worked, in-bounds tile under a sprinkler and marks the
    /// crops there as watered. Returns the number of tiles touched.
    pub fn run_sprinklers(&mut self) -> usize {
        let footprints: Vec<TileCoord> = self
            .structures
            .iter()
            .filter_map(|(tile, kind)| kind.sprinkler().map(|s| (s, *tile)))
            .flat_map(|(kind, tile)| sprinkler_footprint(kind, tile))
            .collect();

        let mut touched = 0;
        for tile in footprints {
            let Some(idx) = self.index(tile) else {
                continue;
            };
            if !self.soil[idx].is_worked() {
                continue;
            }
            self.soil[idx] = SoilState::Watered;
            if let Some(crop) = self.crops.get_mut(&tile) {
                crop.watered = true;
            }
            touched += 1;
        }
        touched
    }
}
