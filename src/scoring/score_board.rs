use std::collections::HashMap;
use std::time::Duration;

use tracing::info;

use crate::game::GameMode;

/// Final result of one run, forwarded by the driver when the game ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub score: u32,
    pub mode: GameMode,
    pub duration: Duration,
}

/// Reply from a score service. Informational only; it never feeds back into game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReceipt {
    pub new_high_score: bool,
}

/// Anything that accepts finished runs
pub trait ScoreService {
    fn submit_score(&mut self, result: &GameResult) -> ScoreReceipt;

    /// Best score recorded so far, across modes
    fn high_score(&self) -> u32;
}

/// In-memory score board for a single local player
#[derive(Debug, Default)]
pub struct LocalScoreBoard {
    high_score: u32,
    games_played: u32,
    results: HashMap<GameMode, Vec<GameResult>>,
}

impl LocalScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Best `limit` results for `mode`, highest score first; ties keep submission order
    pub fn top(&self, mode: GameMode, limit: usize) -> Vec<GameResult> {
        let mut results = self.results.get(&mode).cloned().unwrap_or_default();
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(limit);
        results
    }
}

impl ScoreService for LocalScoreBoard {
    fn submit_score(&mut self, result: &GameResult) -> ScoreReceipt {
        let new_high_score = result.score > self.high_score;
        if new_high_score {
            self.high_score = result.score;
        }
        self.games_played += 1;
        self.results
            .entry(result.mode)
            .or_default()
            .push(result.clone());

        info!(
            score = result.score,
            mode = %result.mode,
            duration = ?result.duration,
            new_high_score,
            games_played = self.games_played,
            "Score submitted"
        );

        ScoreReceipt { new_high_score }
    }

    fn high_score(&self) -> u32 {
        self.high_score
    }
}
