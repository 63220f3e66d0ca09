//! Plain-text rendering of a session for the terminal shell.

use std::fmt::Write;

use ym_core::{GameSession, LeaderboardEntry, Phase, ALL, CAT_NAMES};

const PIPS: [&str; 7] = ["?", "\u{2680}", "\u{2681}", "\u{2682}", "\u{2683}", "\u{2684}", "\u{2685}"];

/// `1:[4]  2:[6]* ...`; held dice are starred.
pub fn dice_line(s: &GameSession) -> String {
    let mut out = String::new();
    for (i, d) in s.dice().iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let pip = PIPS.get(d.value as usize).copied().unwrap_or("?");
        let _ = write!(out, "{}:[{}]{}{}", i + 1, d.value, pip, if d.held { "*" } else { " " });
    }
    out
}

pub fn status_line(s: &GameSession) -> String {
    match s.phase() {
        Phase::GameOver => format!("Game over! Final score: {}", s.total()),
        Phase::Idle => format!(
            "Turn {}/13 - roll to start ({} rolls left)",
            s.turn_index() + 1,
            s.rolls_remaining()
        ),
        Phase::Rolled => format!(
            "Turn {}/13 - rolls: {}/3 ({} left)",
            s.turn_index() + 1,
            s.roll_count(),
            s.rolls_remaining()
        ),
    }
}

/// Scorecard with committed values and, for open rows, what the current dice would score.
pub fn scorecard(s: &GameSession) -> String {
    let potential = s.potential_scores();
    let show_potential = s.phase() == Phase::Rolled;
    let mut out = String::new();
    for (row, (cat, slot)) in s.slots().iter().enumerate() {
        let cell = match slot {
            Some(v) => format!("{:>4}", v),
            None if show_potential => {
                format!("   -  ({})", potential[cat.index()].unwrap_or(0))
            }
            None => "   -".to_string(),
        };
        let _ = writeln!(out, "{:>2}. {:<16}{}", row + 1, CAT_NAMES[cat.index()], cell);
        if row == 5 {
            let _ = writeln!(
                out,
                "    {:<16}{:>4}  (bonus {})",
                "Upper subtotal",
                s.upper_subtotal(),
                s.upper_bonus()
            );
        }
    }
    if s.yahtzee_bonus() > 0 {
        let _ = writeln!(out, "    {:<16}{:>4}", "Yahtzee bonus", s.yahtzee_bonus());
    }
    let _ = writeln!(out, "    {:<16}{:>4}", "Total", s.total());
    out
}

pub fn hint(s: &GameSession) -> String {
    match s.best_category_suggestion() {
        None => "No open categories.".to_string(),
        Some(best) => {
            let holds: Vec<String> = s
                .suggested_holds()
                .iter()
                .enumerate()
                .filter(|(_, &h)| h)
                .map(|(i, _)| (i + 1).to_string())
                .collect();
            let score = ym_core::score(best, s.dice_values());
            if holds.is_empty() {
                format!("Best now: {} ({}). Suggested holds: none", best, score)
            } else {
                format!(
                    "Best now: {} ({}). Suggested holds: {}",
                    best,
                    score,
                    holds.join(" ")
                )
            }
        }
    }
}

pub fn leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "No scores yet.\n".to_string();
    }
    let mut out = String::new();
    for (i, e) in entries.iter().enumerate() {
        let _ = writeln!(out, "{}. {:<16}{:>5}", i + 1, e.name, e.score);
    }
    out
}

pub fn categories_help() -> String {
    let mut out = String::new();
    for (i, c) in ALL.iter().enumerate() {
        let _ = writeln!(out, "  {:>2} = {} ({})", i + 1, c.name(), c.key());
    }
    out
}
