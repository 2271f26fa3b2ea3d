use serde::{Deserialize, Serialize};

pub type JudgeId = usize;
pub type GameId = usize;

/// A person who can be assigned to games, optionally playing for a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judge {
    pub id: JudgeId,
    pub name: String,
    pub team: Option<String>, // None = not a player, eligible everywhere
}

impl Judge {
    pub fn new(id: JudgeId, name: impl Into<String>, team: Option<&str>) -> Self {
        Judge {
            id,
            name: name.into(),
            team: team.map(str::to_string),
        }
    }

    /// True when the judge plays for the team whose game this is
    pub fn conflicts_with(&self, game: &Game) -> bool {
        self.team.as_deref() == Some(game.team.as_str())
    }
}

/// A game belonging to one team, needing an exact number of judges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub team: String,
    pub judges_needed: usize,
}

impl Game {
    pub fn new(id: GameId, team: impl Into<String>, judges_needed: usize) -> Self {
        Game {
            id,
            team: team.into(),
            judges_needed,
        }
    }
}

/// Judges picked for one game, in selection order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub game_id: GameId,
    pub team: String,
    pub judges_needed: usize,
    pub assigned_judge_ids: Vec<JudgeId>,
}

/// How many games a judge ended up with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadEntry {
    pub judge_id: JudgeId,
    pub name: String,
    pub team: Option<String>,
    pub games_assigned: usize,
}

/// Result of one scheduling run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub assignments: Vec<Assignment>, // same order as the input games
    pub workload: Vec<WorkloadEntry>, // busiest judges first
}

impl Schedule {
    pub fn total_assigned(&self) -> usize {
        self.workload.iter().map(|w| w.games_assigned).sum()
    }
}

/// Sum of judges needed over all games, saturating at `usize::MAX`
pub fn total_slots(games: &[Game]) -> usize {
    games
        .iter()
        .fold(0usize, |total, g| total.saturating_add(g.judges_needed))
}
