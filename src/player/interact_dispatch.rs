//! Context interaction (the "interact" action).
//!
//! `find_interaction` decides what the player is interacting with, in a
//! fixed priority order; `dispatch_interaction` carries it out.

use bevy::prelude::*;
use rand::seq::SliceRandom;

use crate::data::villager;
use crate::shared::*;
use crate::world::{self, DoorLink};

/// How far the player may stand from the bridge column and still work on it.
const BRIDGE_SPAN: i32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum InteractTarget {
    BridgeWorksite,
    Door(DoorLink),
    Bed,
    ShippingBin,
    Tv,
    Shop,
    Villager(&'static str),
}

/// A villager as seen by the dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct Nearby {
    pub name: &'static str,
    pub scene: Scene,
    pub tile: TileCoord,
}

pub fn find_interaction(
    player: &PlayerState,
    target: TileCoord,
    config: &GameConfig,
    landmarks: &Landmarks,
    progression: &Progression,
    villagers: &[Nearby],
) -> Option<InteractTarget> {
    let here = player.tile(config.tile_px);
    let scene = player.scene;

    if scene == Scene::Farm
        && here.row <= 1
        && (here.col - landmarks.bridge_col).abs() <= BRIDGE_SPAN
        && progression.has(Flag::BridgeWorksite)
        && !progression.has(Flag::BridgeBuilt)
    {
        return Some(InteractTarget::BridgeWorksite);
    }

    if let Some(link) = world::door_at(scene, target, landmarks, config.tile_px) {
        return Some(InteractTarget::Door(link));
    }

    let bed = match scene {
        Scene::Farm => Some(landmarks.bed),
        Scene::House => Some(world::HOUSE_BED),
        _ => None,
    };
    if bed.is_some_and(|bed| here.chebyshev(bed) <= 1) {
        return Some(InteractTarget::Bed);
    }

    if scene == Scene::Farm {
        if here.chebyshev(landmarks.shipping_bin) <= 1 {
            return Some(InteractTarget::ShippingBin);
        }
        if here.chebyshev(landmarks.tv) <= 1 {
            return Some(InteractTarget::Tv);
        }
    }

    if scene == Scene::Town {
        return Some(InteractTarget::Shop);
    }

    villagers
        .iter()
        .find(|v| v.scene == scene && v.tile.chebyshev(here) <= 1)
        .map(|v| InteractTarget::Villager(v.name))
}

pub fn forecast_lines(calendar: &Calendar) -> Vec<String> {
    vec![
        format!("Today: {}", calendar.weather.label()),
        format!("Tomorrow: {}", calendar.forecast.label()),
    ]
}

/// A greeting for `name`, or `None` for an unknown villager.
pub fn greeting(name: &str, weather: Weather, rng: &mut impl rand::Rng) -> Option<String> {
    let def = villager(name)?;
    let pool = if weather.is_wet() && !def.wet_weather.is_empty() {
        def.wet_weather
    } else {
        def.greetings
    };
    pool.choose(rng).map(|line| line.to_string())
}

#[allow(clippy::too_many_arguments)]
pub fn dispatch_interaction(
    input: Res<PlayerInput>,
    config: Res<GameConfig>,
    calendar: Res<Calendar>,
    aim: Res<AimMode>,
    farm: Res<FarmGrid>,
    progression: Res<Progression>,
    villagers: Query<&Villager>,
    mut player: ResMut<PlayerState>,
    mut rng: ResMut<WorldRng>,
    mut dialogue: ResMut<ActiveDialogue>,
    mut next_state: ResMut<NextState<GameState>>,
    mut sleep_events: EventWriter<SleepEvent>,
    mut scene_events: EventWriter<SceneChangeEvent>,
) {
    if !input.interact {
        return;
    }

    let nearby: Vec<Nearby> = villagers
        .iter()
        .map(|v| Nearby {
            name: v.name,
            scene: v.scene,
            tile: TileCoord::from_pixels(v.position, config.tile_px),
        })
        .collect();
    let target = super::interaction::target_tile(&player, *aim, input.pointer, config.tile_px);

    let Some(found) = find_interaction(
        &player,
        target,
        &config,
        &farm.landmarks,
        &progression,
        &nearby,
    ) else {
        return;
    };

    match found {
        InteractTarget::BridgeWorksite => {
            *dialogue = ActiveDialogue {
                speaker: "Broken Bridge".into(),
                lines: vec!["Need 50 wood + 25 stone. Confirm to repair.".into()],
                prompt: Some(DialoguePrompt::BridgeRepair),
            };
            next_state.set(GameState::Dialogue);
        }
        InteractTarget::Door(link) => {
            scene_events.send(world::enter_scene(&mut player, link.to, link.arrive));
        }
        InteractTarget::Bed => {
            sleep_events.send(SleepEvent);
        }
        InteractTarget::ShippingBin => next_state.set(GameState::Shipping),
        InteractTarget::Tv => {
            *dialogue = ActiveDialogue::say("TV Weather", forecast_lines(&calendar));
            next_state.set(GameState::Dialogue);
        }
        InteractTarget::Shop => next_state.set(GameState::Shop),
        InteractTarget::Villager(name) => {
            let Some(line) = greeting(name, calendar.weather, &mut rng.0) else {
                warn!("[Player] No dialogue for villager {name}");
                return;
            };
            *dialogue = ActiveDialogue::say(name, vec![line]);
            next_state.set(GameState::Dialogue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(scene: Scene, tile: TileCoord) -> PlayerState {
        PlayerState {
            scene,
            position: tile.center_px(32.0),
            ..PlayerState::default()
        }
    }

    fn find(player: &PlayerState, progression: &Progression, villagers: &[Nearby]) -> Option<InteractTarget> {
        let config = GameConfig::default();
        let marks = Landmarks::for_grid(config.cols, config.rows);
        let (dc, dr) = player.facing.delta();
        let target = player.tile(config.tile_px).offset(dc, dr);
        find_interaction(player, target, &config, &marks, progression, villagers)
    }

    #[test]
    fn test_bridge_needs_worksite_flag() {
        let player = at(Scene::Farm, TileCoord::new(21, 1));
        let mut progression = Progression::default();
        assert_eq!(find(&player, &progression, &[]), None);
        progression.flags.insert(Flag::BridgeWorksite);
        assert_eq!(find(&player, &progression, &[]), Some(InteractTarget::BridgeWorksite));
        progression.flags.insert(Flag::BridgeBuilt);
        assert_eq!(find(&player, &progression, &[]), None);
    }

    #[test]
    fn test_bed_on_farm_and_in_house() {
        let progression = Progression::default();
        let farm = at(Scene::Farm, TileCoord::new(12, 9));
        assert_eq!(find(&farm, &progression, &[]), Some(InteractTarget::Bed));
        let house = at(Scene::House, TileCoord::new(1, 2));
        assert_eq!(find(&house, &progression, &[]), Some(InteractTarget::Bed));
    }

    #[test]
    fn test_door_beats_bed() {
        // (10,11) is next to the bed, and facing left targets the door.
        let progression = Progression::default();
        let mut player = at(Scene::Farm, TileCoord::new(10, 11));
        player.facing = Facing::Left;
        assert!(matches!(
            find(&player, &progression, &[]),
            Some(InteractTarget::Door(DoorLink { to: Scene::House, .. }))
        ));
    }

    #[test]
    fn test_bin_then_tv() {
        let progression = Progression::default();
        let bin = at(Scene::Farm, TileCoord::new(18, 11));
        assert_eq!(find(&bin, &progression, &[]), Some(InteractTarget::ShippingBin));
        // (13,11) is next to the tv at (12,10) but two tiles from the bed.
        let tv = at(Scene::Farm, TileCoord::new(13, 11));
        assert_eq!(find(&tv, &progression, &[]), Some(InteractTarget::Tv));
    }

    #[test]
    fn test_town_opens_shop() {
        let player = at(Scene::Town, TileCoord::new(5, 5));
        assert_eq!(find(&player, &Progression::default(), &[]), Some(InteractTarget::Shop));
    }

    #[test]
    fn test_villager_within_one_tile() {
        let ava = Nearby {
            name: "Ava",
            scene: Scene::Farm,
            tile: TileCoord::new(30, 5),
        };
        let progression = Progression::default();
        let near = at(Scene::Farm, TileCoord::new(31, 6));
        assert_eq!(find(&near, &progression, &[ava]), Some(InteractTarget::Villager("Ava")));
        let far = at(Scene::Farm, TileCoord::new(32, 6));
        assert_eq!(find(&far, &progression, &[ava]), None);
        let elsewhere = at(Scene::Forest, TileCoord::new(31, 6));
        assert_eq!(find(&elsewhere, &progression, &[ava]), None);
    }

    #[test]
    fn test_greeting_follows_weather() {
        let mut rng = StdRng::seed_from_u64(1);
        let wet = greeting("Ava", Weather::Rain, &mut rng).unwrap();
        assert_eq!(wet, "Rain's good for the soil.");
        let dry = greeting("Ava", Weather::Clear, &mut rng).unwrap();
        assert!(dry == "Lovely day!" || dry == "Plant anything new?");
        assert_eq!(greeting("Nobody", Weather::Clear, &mut rng), None);
    }

    #[test]
    fn test_forecast_lines() {
        let calendar = Calendar {
            weather: Weather::Rain,
            forecast: Weather::Clear,
            ..Calendar::default()
        };
        assert_eq!(forecast_lines(&calendar), vec!["Today: Rain", "Tomorrow: Clear"]);
    }
}
