use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Named score brackets for leaderboard segmentation. Ordering follows the
/// score thresholds, so promotion checks compare thresholds rather than names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl Tier {
    /// Minimum cumulative score for the tier.
    pub const fn threshold(&self) -> i32 {
        match self {
            Tier::Bronze => 0,
            Tier::Silver => 500,
            Tier::Gold => 2000,
            Tier::Platinum => 5000,
            Tier::Diamond => 10000,
        }
    }

    /// All tiers from highest threshold to lowest.
    pub const fn descending() -> [Tier; 5] {
        [
            Tier::Diamond,
            Tier::Platinum,
            Tier::Gold,
            Tier::Silver,
            Tier::Bronze,
        ]
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bronze" => Ok(Tier::Bronze),
            "Silver" => Ok(Tier::Silver),
            "Gold" => Ok(Tier::Gold),
            "Platinum" => Ok(Tier::Platinum),
            "Diamond" => Ok(Tier::Diamond),
            other => Err(format!("unknown tier '{}'", other)),
        }
    }
}

/// The user document. `score` is cumulative and never below zero; `tier` is
/// always the classifier's output for the current score.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub uid: String,
    pub username: String,
    pub score: i32,
    pub games_played: i32,
    pub wins: i32,
    pub win_rate: f64,
    pub tier: Tier,
    pub icon_id: i32,
    pub icon_color: String,
    pub background_id: i32,
    pub last_game_at: Option<String>, // ISO 8601 string
}

/// Denormalized leaderboard projection of a user, maintained alongside the
/// user document for top-N and nearby-rank queries.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GlobalRanking {
    pub user_id: String,
    pub username: String,
    pub score: i32,
    pub rank: u32,
    pub tier: Tier,
    pub icon_id: i32,
    pub icon_color: String,
    pub background_id: i32,
}
