use crate::shared::*;

#[derive(Debug, Clone, Copy)]
pub struct VillagerDef {
    pub name: &'static str,
    pub home: Scene,
    pub greetings: &'static [&'static str],
    pub wet_weather: &'static [&'static str],
}

pub const VILLAGERS: [VillagerDef; 1] = [VillagerDef {
    name: "Ava",
    home: Scene::Farm,
    greetings: &["Lovely day!", "Plant anything new?"],
    wet_weather: &["Rain's good for the soil."],
}];

pub fn villager(name: &str) -> Option<&'static VillagerDef> {
    VILLAGERS.iter().find(|v| v.name == name)
}
