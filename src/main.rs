//! PicoFermi Demo
//!
//! Plays one seeded game to the win with a candidate-elimination solver,
//! then proves the result is server-verifiable by replaying the
//! transcript.

use chrono::Utc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use picofermi::{
    VERSION,
    DigitSequence, GameId, GameSettings, GameState, GuessResult,
    compute_feedback, derive_game_seed,
    game::events::GameEvent,
    game::hints::{HintRequest, HintReveal},
    game::stats::StatsBook,
    sync::ResultReport,
    verify::{GameTranscript, verify_transcript},
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("PicoFermi Core v{}", VERSION);

    demo_game()
}

/// Play a demo game and verify its transcript.
fn demo_game() -> anyhow::Result<()> {
    info!("=== Starting Demo Game ===");

    let settings = GameSettings::default();
    let game_id = GameId::generate();
    let session_salt = [7u8; 32];
    let seed = derive_game_seed(&session_salt, game_id.as_bytes());

    let mut state = GameState::from_seed(game_id, settings, seed)?;
    state.start(Utc::now())?;

    info!("Game ID: {}", game_id.to_uuid_string());
    info!("Seed: {}", seed);
    info!(
        "Grid: {}x{}, digits 0-{}",
        settings.grid_rows,
        settings.grid_cols,
        settings.digit_range - 1
    );

    // Candidate-elimination solver: keep every sequence whose feedback
    // against our committed guesses matches what the engine reported.
    let mut candidates = all_candidates(settings.target_length(), settings.digit_range);
    info!("Solver starts with {} candidates", candidates.len());

    while state.is_active() && state.guess_count() < 10 {
        let guess = DigitSequence::new(
            candidates.first().expect("candidate set must not empty out").clone(),
        );
        for (position, digit) in guess.iter().enumerate() {
            state.set_digit(position, digit)?;
        }
        state.submit_guess(Utc::now())?;
        log_events(&mut state);

        let result = state.latest_guess().expect("just submitted").result;
        if result.is_winner {
            break;
        }
        candidates.retain(|c| {
            feedback_against(c, &guess) == result
        });

        // Spend some score on hints and fold the reveals into the filter.
        let reveal = match state.guess_count() {
            1 => Some(state.purchase_hint(HintRequest::RowSums { row: 0 })?.reveal),
            2 => Some(state.purchase_hint(HintRequest::RandomExpose)?.reveal),
            _ => None,
        };
        if let Some(reveal) = reveal {
            log_events(&mut state);
            apply_reveal(&mut candidates, &reveal, &settings);
        }

        info!(
            "{} candidates remain, score {}",
            candidates.len(),
            state.score
        );
    }

    // Transcripts verify only for terminal games
    if state.is_active() {
        state.abandon(Utc::now())?;
        log_events(&mut state);
    }

    // Print final results
    info!("=== Game Results ===");
    let report = ResultReport::from_state(&state);
    info!(
        "Won: {} in {} guesses, score {} (hints: {})",
        report.won, report.guess_count, report.score, report.hint_spend
    );
    info!("Final State Hash: {}", report.state_hash);
    info!("Result report: {}", report.to_json()?);

    let mut stats = StatsBook::new();
    stats.record_game(&state);
    if let Some(profile_stats) = stats.get(&settings.profile_key()) {
        info!(
            "Profile {}: {} played, win rate {:.0}%",
            settings.profile_key(),
            profile_stats.games_played,
            profile_stats.win_rate() * 100.0
        );
    }

    // Verify the transcript the way a server would
    info!("=== Verifying Transcript ===");
    let transcript = GameTranscript::from_state(&state);
    let verification = verify_transcript(&transcript);

    info!("Replay State Hash: {}", hex::encode(verification.computed_final_hash));

    if verification.valid {
        info!("VERIFICATION PASSED: replay matches the reported result");
    } else {
        info!("VERIFICATION FAILED: {:?}", verification.error);
    }

    Ok(())
}

/// Feedback a candidate target would have produced for a guess.
fn feedback_against(candidate: &[u8], guess: &DigitSequence) -> GuessResult {
    compute_feedback(&DigitSequence::from_slice(candidate), guess)
}

/// Narrow the candidate set with a hint reveal.
fn apply_reveal(candidates: &mut Vec<Vec<u8>>, reveal: &HintReveal, settings: &GameSettings) {
    match *reveal {
        HintReveal::DigitAbsent { digit } => {
            candidates.retain(|c| !c.contains(&digit));
        }
        HintReveal::DigitPresent { digit } => {
            candidates.retain(|c| c.contains(&digit));
        }
        HintReveal::Exposed { position, digit } => {
            candidates.retain(|c| c[position] == digit);
        }
        HintReveal::RowSum { row, sum } => {
            let span = settings.row_span(row);
            candidates.retain(|c| {
                c[span.clone()].iter().map(|&d| d as u32).sum::<u32>() == sum
            });
        }
        // Delta reveals are left to the human player in the real client.
        HintReveal::RowDeltas { .. } => {}
    }
}

/// Log and drain pending game events.
fn log_events(state: &mut GameState) {
    for event in state.take_events() {
        match event {
            GameEvent::GuessCommitted { guess_number, result, .. } => {
                info!(
                    "Guess {}: {} picos, {} fermis, {} bagels",
                    guess_number, result.picos, result.fermis, result.bagels
                );
            }
            GameEvent::HintPurchased { reveal, cost } => {
                info!("Hint (-{} pts): {:?}", cost, reveal);
            }
            GameEvent::GameWon { guess_count, score } => {
                info!("Game won in {} guesses! Final score: {}", guess_count, score);
            }
            GameEvent::GameAbandoned { score } => {
                info!("Game abandoned at score {}", score);
            }
            GameEvent::GameStarted { .. } => {}
        }
    }
}

/// All distinct digit sequences of the given length and range.
fn all_candidates(len: usize, range: u8) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(len);
    let mut used = vec![false; range as usize];
    extend_candidates(&mut out, &mut current, &mut used, len, range);
    out
}

fn extend_candidates(
    out: &mut Vec<Vec<u8>>,
    current: &mut Vec<u8>,
    used: &mut [bool],
    len: usize,
    range: u8,
) {
    if current.len() == len {
        out.push(current.clone());
        return;
    }
    for digit in 0..range {
        if !used[digit as usize] {
            used[digit as usize] = true;
            current.push(digit);
            extend_candidates(out, current, used, len, range);
            current.pop();
            used[digit as usize] = false;
        }
    }
}
