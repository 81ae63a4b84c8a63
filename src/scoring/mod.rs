//! Scoring collaborator: receives finished runs and reports new high scores

pub mod score_board;

pub use score_board::{GameResult, LocalScoreBoard, ScoreReceipt, ScoreService};
