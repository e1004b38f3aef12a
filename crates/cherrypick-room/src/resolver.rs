//! Round resolution: turning a round's submissions into a [`RoundResult`].
//!
//! Pure and deterministic. Bot numbers are passed in by the caller, so the
//! only randomness in a round lives in the [`BotPolicy`](crate::BotPolicy).
//!
//! # Rules
//!
//! 1. Human submissions first, then bots, merged into one ordered sheet.
//! 2. Any zero ("rotten zero") pins the target at 100.
//! 3. Otherwise the target is `round(mean × 0.8)`, halves rounding up.
//! 4. The closest submission wins. On equal distance the earlier entry in
//!    the sheet keeps the win.
//! 5. Every other participant loses one life.

use cherrypick_protocol::{Guess, GuessSheet, MAX_GUESS, PlayerId, Room, RoundResult};

/// Target forced by the rotten-zero rule.
pub const ROTTEN_ZERO_TARGET: Guess = MAX_GUESS;

/// Resolves a round and applies its consequences to `room`.
///
/// Entries for players who are not seated, are out of lives, or submitted
/// a number above [`MAX_GUESS`] are dropped before resolution. Every
/// player's `current_guess` is overwritten from the merged sheet so the
/// reveal shows what each seat played.
pub fn resolve(
    room: &mut Room,
    human_guesses: &[(PlayerId, Guess)],
    bot_guesses: &[(PlayerId, Guess)],
) -> RoundResult {
    let mut sheet = GuessSheet::new();
    for &(id, guess) in human_guesses.iter().chain(bot_guesses) {
        if guess <= MAX_GUESS && room.player(id).is_some_and(|p| p.is_alive()) {
            sheet.entry(id).or_insert(guess);
        }
    }

    let is_rotten_zero = sheet.values().any(|&guess| guess == 0);
    let (target_number, average) = if sheet.is_empty() {
        (0, 0.0)
    } else if is_rotten_zero {
        (ROTTEN_ZERO_TARGET, 0.0)
    } else {
        let sum: u32 = sheet.values().map(|&guess| u32::from(guess)).sum();
        let count = sheet.len() as u32;
        (scaled_target(sum, count), f64::from(sum) / f64::from(count))
    };

    let winner_id = closest_to(&sheet, target_number);

    let eliminated_ids: Vec<PlayerId> = sheet
        .keys()
        .copied()
        .filter(|id| Some(*id) != winner_id)
        .collect();

    for player in &mut room.players {
        if eliminated_ids.contains(&player.id) {
            player.lose_life();
        }
        player.current_guess = sheet.get(&player.id).copied();
    }

    RoundResult {
        target_number,
        average,
        winner_id,
        eliminated_ids,
        is_rotten_zero,
        all_guesses: sheet,
    }
}

/// `round(sum / count × 0.8)` with halves rounding up, in exact integer
/// arithmetic: `floor((8·sum + 5·count) / (10·count))`.
fn scaled_target(sum: u32, count: u32) -> Guess {
    let target = (8 * sum + 5 * count) / (10 * count);
    // mean ≤ 100, so target ≤ 80.
    target.min(u32::from(MAX_GUESS)) as Guess
}

/// First entry with a strictly smaller distance than everything before it.
fn closest_to(sheet: &GuessSheet, target: Guess) -> Option<PlayerId> {
    let mut best: Option<(PlayerId, u8)> = None;
    for (&id, &guess) in sheet {
        let diff = guess.abs_diff(target);
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((id, diff)),
        }
    }
    best.map(|(id, _)| id)
}
