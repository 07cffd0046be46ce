//! The linear milestone chain. Each milestone has one condition and one
//! reward flag; finishing it activates the next.

use crate::shared::*;

const BRIDGE_WORKSITE_SHIPPED: u64 = 300;
const MARKET_FARMING_LEVEL: u8 = 2;
pub const BULK_SHIPMENT_COUNT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneStep {
    pub completed: Milestone,
    pub unlocked: Flag,
    /// False when the reward flag was already set some other way.
    pub newly_set: bool,
    pub next: Option<Milestone>,
}

pub fn milestone_title(milestone: Milestone) -> &'static str {
    match milestone {
        Milestone::Start => "Ship 300g",
        Milestone::Bridge => "Repair the North Bridge",
        Milestone::Furnace => "First Smelt",
        Milestone::Sprinkler => "Go Automatic",
        Milestone::Beach => "Bulk Shipment",
        Milestone::Market => "Market Day",
    }
}

fn reward(milestone: Milestone) -> Flag {
    match milestone {
        Milestone::Start => Flag::BridgeWorksite,
        Milestone::Bridge => Flag::MountainAccess,
        Milestone::Furnace => Flag::ShopPlus,
        Milestone::Sprinkler => Flag::HouseUpgrade1,
        Milestone::Beach => Flag::FishingBonus,
        Milestone::Market => Flag::MarketUnlocked,
    }
}

fn successor(milestone: Milestone) -> Option<Milestone> {
    match milestone {
        Milestone::Start => Some(Milestone::Bridge),
        Milestone::Bridge => Some(Milestone::Furnace),
        Milestone::Furnace => Some(Milestone::Sprinkler),
        Milestone::Sprinkler => Some(Milestone::Beach),
        Milestone::Beach => Some(Milestone::Market),
        Milestone::Market => None,
    }
}

fn is_met(milestone: Milestone, progression: &Progression, skills: &Skills) -> bool {
    match milestone {
        Milestone::Start => progression.total_shipped >= BRIDGE_WORKSITE_SHIPPED,
        Milestone::Bridge => progression.has(Flag::BridgeBuilt),
        Milestone::Furnace => progression.has(Flag::FurnaceCrafted),
        Milestone::Sprinkler => progression.has(Flag::AnySprinklerPlaced),
        Milestone::Beach => progression.has(Flag::Bulk10),
        Milestone::Market => skills.farming.level >= MARKET_FARMING_LEVEL,
    }
}

impl Progression {
    /// Returns true when the flag was not set before.
    pub fn set_flag(&mut self, flag: Flag) -> bool {
        self.flags.insert(flag)
    }

    /// Books one night's settlement. Sets `Bulk10` for a big enough day and
    /// returns true if that flag is new.
    pub fn record_shipment(&mut self, earnings: u32, count: u32) -> bool {
        self.total_shipped += earnings as u64;
        self.day_ship_count = count;
        count >= BULK_SHIPMENT_COUNT && self.set_flag(Flag::Bulk10)
    }
}

/// Completes milestones for as long as the active one is satisfied.
pub fn check_milestones(progression: &mut Progression, skills: &Skills) -> Vec<MilestoneStep> {
    let mut steps = Vec::new();
    while let Some(current) = progression.active {
        if !is_met(current, progression, skills) {
            break;
        }
        let unlocked = reward(current);
        let newly_set = progression.set_flag(unlocked);
        let next = successor(current);
        progression.active = next;
        steps.push(MilestoneStep {
            completed: current,
            unlocked,
            newly_set,
            next,
        });
    }
    steps
}
