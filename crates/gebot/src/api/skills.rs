//! Canonical skill and activity ordering of the hiscores feed
//!
//! Line N of a hiscores response belongs to `Skill::ALL[N]`. Keep this table
//! in sync with the upstream; it is the only place the ordering lives.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    Overall,
    Attack,
    Defence,
    Strength,
    Constitution,
    Ranged,
    Prayer,
    Magic,
    Cooking,
    Woodcutting,
    Fletching,
    Fishing,
    Firemaking,
    Crafting,
    Smithing,
    Mining,
    Herblore,
    Agility,
    Thieving,
    Slayer,
    Farming,
    Runecrafting,
    Hunter,
    Construction,
    Summoning,
    Dungeoneering,
    Divination,
    Invention,
    Archaeology,
    Necromancy,
    BountyHunter,
    BhRogues,
    DominionTower,
    TheCrucible,
    CastleWarsGames,
    BaAttackers,
    BaDefenders,
    BaCollectors,
    BaHealers,
    DuelTournament,
    MobilisingArmies,
    Conquest,
    FistOfGuthix,
    GgAthletics,
    GgResourceRace,
    We2ArmadylLifetimeContribution,
    We2BandosLifetimeContribution,
    We2ArmadylPvpKills,
    We2BandosPvpKills,
    HeistGuardLevel,
    HeistRobberLevel,
    Cfp5GameAverage,
    Af15CowTipping,
    Af15RatsKilled,
    RuneScore,
    ClueScrollsEasy,
    ClueScrollsMedium,
    ClueScrollsHard,
    ClueScrollsElite,
    ClueScrollsMaster,
}

impl Skill {
    /// Every entry in response line order
    pub const ALL: [Skill; 60] = [
        Skill::Overall,
        Skill::Attack,
        Skill::Defence,
        Skill::Strength,
        Skill::Constitution,
        Skill::Ranged,
        Skill::Prayer,
        Skill::Magic,
        Skill::Cooking,
        Skill::Woodcutting,
        Skill::Fletching,
        Skill::Fishing,
        Skill::Firemaking,
        Skill::Crafting,
        Skill::Smithing,
        Skill::Mining,
        Skill::Herblore,
        Skill::Agility,
        Skill::Thieving,
        Skill::Slayer,
        Skill::Farming,
        Skill::Runecrafting,
        Skill::Hunter,
        Skill::Construction,
        Skill::Summoning,
        Skill::Dungeoneering,
        Skill::Divination,
        Skill::Invention,
        Skill::Archaeology,
        Skill::Necromancy,
        Skill::BountyHunter,
        Skill::BhRogues,
        Skill::DominionTower,
        Skill::TheCrucible,
        Skill::CastleWarsGames,
        Skill::BaAttackers,
        Skill::BaDefenders,
        Skill::BaCollectors,
        Skill::BaHealers,
        Skill::DuelTournament,
        Skill::MobilisingArmies,
        Skill::Conquest,
        Skill::FistOfGuthix,
        Skill::GgAthletics,
        Skill::GgResourceRace,
        Skill::We2ArmadylLifetimeContribution,
        Skill::We2BandosLifetimeContribution,
        Skill::We2ArmadylPvpKills,
        Skill::We2BandosPvpKills,
        Skill::HeistGuardLevel,
        Skill::HeistRobberLevel,
        Skill::Cfp5GameAverage,
        Skill::Af15CowTipping,
        Skill::Af15RatsKilled,
        Skill::RuneScore,
        Skill::ClueScrollsEasy,
        Skill::ClueScrollsMedium,
        Skill::ClueScrollsHard,
        Skill::ClueScrollsElite,
        Skill::ClueScrollsMaster,
    ];

    /// Skill for response line `index`, `None` past the end of the table
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position in the canonical ordering
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Overall => "Overall",
            Self::Attack => "Attack",
            Self::Defence => "Defence",
            Self::Strength => "Strength",
            Self::Constitution => "Constitution",
            Self::Ranged => "Ranged",
            Self::Prayer => "Prayer",
            Self::Magic => "Magic",
            Self::Cooking => "Cooking",
            Self::Woodcutting => "Woodcutting",
            Self::Fletching => "Fletching",
            Self::Fishing => "Fishing",
            Self::Firemaking => "Firemaking",
            Self::Crafting => "Crafting",
            Self::Smithing => "Smithing",
            Self::Mining => "Mining",
            Self::Herblore => "Herblore",
            Self::Agility => "Agility",
            Self::Thieving => "Thieving",
            Self::Slayer => "Slayer",
            Self::Farming => "Farming",
            Self::Runecrafting => "Runecrafting",
            Self::Hunter => "Hunter",
            Self::Construction => "Construction",
            Self::Summoning => "Summoning",
            Self::Dungeoneering => "Dungeoneering",
            Self::Divination => "Divination",
            Self::Invention => "Invention",
            Self::Archaeology => "Archaeology",
            Self::Necromancy => "Necromancy",
            Self::BountyHunter => "Bounty Hunter",
            Self::BhRogues => "B.H. Rogues",
            Self::DominionTower => "Dominion Tower",
            Self::TheCrucible => "The Crucible",
            Self::CastleWarsGames => "Castle Wars games",
            Self::BaAttackers => "B.A. Attackers",
            Self::BaDefenders => "B.A. Defenders",
            Self::BaCollectors => "B.A. Collectors",
            Self::BaHealers => "B.A. Healers",
            Self::DuelTournament => "Duel Tournament",
            Self::MobilisingArmies => "Mobilising Armies",
            Self::Conquest => "Conquest",
            Self::FistOfGuthix => "Fist of Guthix",
            Self::GgAthletics => "GG: Athletics",
            Self::GgResourceRace => "GG: Resource Race",
            Self::We2ArmadylLifetimeContribution => "WE2: Armadyl Lifetime Contribution",
            Self::We2BandosLifetimeContribution => "WE2: Bandos Lifetime Contribution",
            Self::We2ArmadylPvpKills => "WE2: Armadyl PvP kills",
            Self::We2BandosPvpKills => "WE2: Bandos PvP kills",
            Self::HeistGuardLevel => "Heist Guard Level",
            Self::HeistRobberLevel => "Heist Robber Level",
            Self::Cfp5GameAverage => "CFP: 5 game average",
            Self::Af15CowTipping => "AF15: Cow Tipping",
            Self::Af15RatsKilled => "AF15: Rats killed after the miniquest",
            Self::RuneScore => "RuneScore",
            Self::ClueScrollsEasy => "Clue Scrolls Easy",
            Self::ClueScrollsMedium => "Clue Scrolls Medium",
            Self::ClueScrollsHard => "Clue Scrolls Hard",
            Self::ClueScrollsElite => "Clue Scrolls Elite",
            Self::ClueScrollsMaster => "Clue Scrolls Master",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_declaration_order() {
        for (i, skill) in Skill::ALL.iter().enumerate() {
            assert_eq!(skill.index(), i, "{skill} is out of place");
        }
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(Skill::from_index(0), Some(Skill::Overall));
        assert_eq!(Skill::from_index(29), Some(Skill::Necromancy));
        assert_eq!(Skill::from_index(59), Some(Skill::ClueScrollsMaster));
        assert_eq!(Skill::from_index(60), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Skill::BhRogues.to_string(), "B.H. Rogues");
        assert_eq!(Skill::GgAthletics.to_string(), "GG: Athletics");
    }
}
