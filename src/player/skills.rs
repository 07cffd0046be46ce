//! Skill lines: XP accumulates in 100-point levels, capped at level 10.

use crate::shared::*;

impl SkillLine {
    /// Adds XP and converts every full 100 into a level. At the cap the
    /// remainder is still kept below 100.
    pub fn gain(&mut self, amount: u32) -> bool {
        let before = self.level;
        self.xp += amount;
        let levels = self.xp / XP_PER_LEVEL;
        self.level = (self.level as u32 + levels).min(MAX_SKILL_LEVEL as u32) as u8;
        self.xp %= XP_PER_LEVEL;
        self.level > before
    }
}

impl Skills {
    pub fn line(&self, kind: SkillKind) -> &SkillLine {
        match kind {
            SkillKind::Farming => &self.farming,
            SkillKind::Mining => &self.mining,
            SkillKind::Fishing => &self.fishing,
        }
    }

    pub fn line_mut(&mut self, kind: SkillKind) -> &mut SkillLine {
        match kind {
            SkillKind::Farming => &mut self.farming,
            SkillKind::Mining => &mut self.mining,
            SkillKind::Fishing => &mut self.fishing,
        }
    }

    /// Returns true when the line levelled up.
    pub fn add_xp(&mut self, kind: SkillKind, amount: u32) -> bool {
        self.line_mut(kind).gain(amount)
    }
}
