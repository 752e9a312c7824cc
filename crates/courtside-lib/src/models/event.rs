// Game event models
// A game record carries two independent grade-level sub-games (7th and 8th),
// each with an optional start time and an optional final score pair.

use serde::{Deserialize, Serialize};

/// A scheduled game as stored and served
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub date: String,
    pub opponent_name: String,
    pub opponent_logo: Option<String>,
    pub is_home: bool,
    /// Venue address, meaningful only for away games
    pub location: Option<String>,
    pub time_7th: Option<String>,
    pub time_8th: Option<String>,
    pub score_7th_home: Option<i64>,
    pub score_7th_away: Option<i64>,
    pub score_8th_home: Option<i64>,
    pub score_8th_away: Option<i64>,
    pub notes: Option<String>,
    /// Non-conference games are excluded from season standings
    pub is_non_conference: bool,
    pub created_at: String,
}

impl Event {
    /// Final score pair for the 7th grade game, when both sides are recorded
    pub fn score_7th(&self) -> Option<(i64, i64)> {
        self.score_7th_home.zip(self.score_7th_away)
    }

    /// Final score pair for the 8th grade game, when both sides are recorded
    pub fn score_8th(&self) -> Option<(i64, i64)> {
        self.score_8th_home.zip(self.score_8th_away)
    }
}

/// Fields accepted when creating or updating a game through the API
#[derive(Debug, Clone, Default)]
pub struct EventInput {
    pub date: String,
    pub opponent_name: String,
    pub opponent_logo: Option<String>,
    pub is_home: bool,
    pub location: Option<String>,
    pub time_7th: Option<String>,
    pub time_8th: Option<String>,
    pub score_7th_home: Option<i64>,
    pub score_7th_away: Option<i64>,
    pub score_8th_home: Option<i64>,
    pub score_8th_away: Option<i64>,
    pub notes: Option<String>,
    pub is_non_conference: bool,
}
