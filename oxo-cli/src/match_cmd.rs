//! Match command - auto-play heuristic-vs-heuristic games
//!
//! ## Architecture (3-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), formatting utilities
//!
//! All games run on a single session so the score counters accumulate
//! exactly one increment per completed game.

use anyhow::{Context, Result};
use serde::Serialize;

use oxo_core::{GameEvent, Mode, MoveOutcome, Scores, Session};

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    outcome: MoveOutcome,
    moves: usize,
}

/// Aggregated match results
#[derive(Debug, Serialize)]
struct MatchResults {
    games: Vec<GameRecord>,
    scores: Scores,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(games: usize, seed: Option<u64>, json: bool) -> Result<()> {
    let seed = seed.unwrap_or_else(rand::random);

    tracing::info!("Starting match: {} games, seed={}", games, seed);

    let results = play_match(games, seed)?;

    report_results(&results, json)?;

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match on one session
fn play_match(games: usize, seed: u64) -> Result<MatchResults> {
    let mut session = Session::with_seed(Mode::Pvc, seed);
    let mut records = Vec::with_capacity(games);

    for game_num in 0..games {
        let record = play_single_game(&mut session, game_num + 1)?;

        tracing::info!(
            "Game {}: {:?} ({} moves)",
            record.game_number,
            record.outcome,
            record.moves
        );

        records.push(record);
        session.reset();
    }

    let total_moves: usize = records.iter().map(|record| record.moves).sum();
    let avg_moves = if records.is_empty() {
        0.0
    } else {
        total_moves as f32 / records.len() as f32
    };

    Ok(MatchResults {
        games: records,
        scores: session.scores(),
        avg_moves,
    })
}

/// Report match results as text or JSON
fn report_results(results: &MatchResults, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(results).context("Failed to serialize results")?;
        println!("{rendered}");
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game with the heuristic selecting for both sides
fn play_single_game(session: &mut Session, game_number: usize) -> Result<GameRecord> {
    let mut moves = 0;

    loop {
        let index = session
            .select_computer_move()
            .context("Selector failed mid-game")?;
        let events = session
            .apply_move(index)
            .context("Selected move was rejected")?;
        moves += 1;

        for event in &events {
            if let GameEvent::GameEnded { outcome, .. } = event {
                return Ok(GameRecord {
                    game_number,
                    outcome: *outcome,
                    moves,
                });
            }
        }
    }
}

fn print_text_results(results: &MatchResults) {
    println!("=== Match results ===");
    println!("Games:     {}", results.games.len());
    println!("X wins:    {}", results.scores.x);
    println!("O wins:    {}", results.scores.o);
    println!("Draws:     {}", results.scores.draws);
    println!("Avg moves: {:.1}", results.avg_moves);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_single_game_terminates() {
        let mut session = Session::with_seed(Mode::Pvc, 11);
        let record = play_single_game(&mut session, 1).unwrap();
        assert!(record.moves >= 5, "a game needs at least 5 moves to end");
        assert!(record.moves <= 9);
        assert!(!session.state().is_active());
    }

    #[test]
    fn test_match_scores_sum_to_game_count() {
        let results = play_match(20, 7).unwrap();
        let scores = results.scores;
        assert_eq!(scores.x + scores.o + scores.draws, 20);
        assert_eq!(results.games.len(), 20);
    }
}
