//! Suggestion-driven autoplayer and simulation summaries.
//!
//! The autoplayer rolls, applies `suggested_holds`, rerolls while it can, and commits the
//! best-scoring open category.

use crate::chance::ChanceMode;
use crate::session::GameSession;
use crate::turn::HoldPolicy;

/// Play one turn with the suggestion heuristics. Returns the committed score.
pub fn play_turn(session: &mut GameSession) -> Option<u32> {
    if session.is_game_over() {
        return None;
    }
    session.roll();
    while session.can_roll() {
        let holds = session.suggested_holds();
        if holds.iter().all(|&h| h) {
            break;
        }
        session.set_holds(holds);
        session.roll();
    }
    let best = session.best_category_suggestion()?;
    session.commit_score(best)
}

/// Play turns until the game is over. Returns the final total.
pub fn play_game(session: &mut GameSession) -> u32 {
    while !session.is_game_over() {
        if play_turn(session).is_none() {
            break;
        }
    }
    session.total()
}

pub struct ScoreSummary {
    pub mean: f64,
    pub median: u32,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
}

pub struct SimulationReport {
    pub scores: Vec<u32>,
    pub upper_bonus_count: usize,
    pub yahtzee_bonus_count: usize,
    pub summary: ScoreSummary,
}

impl SimulationReport {
    pub fn upper_bonus_rate(&self) -> f64 {
        rate(self.upper_bonus_count, self.scores.len())
    }

    pub fn yahtzee_bonus_rate(&self) -> f64 {
        rate(self.yahtzee_bonus_count, self.scores.len())
    }
}

fn rate(n: usize, of: usize) -> f64 {
    if of == 0 {
        0.0
    } else {
        n as f64 / of as f64
    }
}

/// Summary statistics; all zero for an empty slice.
pub fn summarize_scores(scores: &[u32]) -> ScoreSummary {
    if scores.is_empty() {
        return ScoreSummary {
            mean: 0.0,
            median: 0,
            std_dev: 0.0,
            min: 0,
            max: 0,
        };
    }

    let mut min = u32::MAX;
    let mut max = 0u32;
    let mut sum = 0f64;
    let mut sum_sq = 0f64;
    for &s in scores {
        min = min.min(s);
        max = max.max(s);
        let sf = s as f64;
        sum += sf;
        sum_sq += sf * sf;
    }

    let n = scores.len() as f64;
    let mean = sum / n;
    let var = (sum_sq / n) - mean * mean;
    let std_dev = var.max(0.0).sqrt();

    // Median via frequency table over [min..=max].
    let mut freq = vec![0usize; (max - min) as usize + 1];
    for &s in scores {
        freq[(s - min) as usize] += 1;
    }
    let target = scores.len() / 2;
    let mut cum = 0usize;
    let mut median = min;
    for (i, &c) in freq.iter().enumerate() {
        cum += c;
        if cum > target {
            median = min + i as u32;
            break;
        }
    }

    ScoreSummary {
        mean,
        median,
        std_dev,
        min,
        max,
    }
}

/// Autoplay `games` deterministic games; game `i` uses episode seed `seed + i`.
pub fn simulate(games: usize, seed: u64, hold_policy: HoldPolicy) -> SimulationReport {
    let mut scores = Vec::with_capacity(games);
    let mut upper_bonus_count = 0usize;
    let mut yahtzee_bonus_count = 0usize;

    for i in 0..games {
        let chance = ChanceMode::deterministic(seed.wrapping_add(i as u64));
        let mut session = GameSession::new(hold_policy, chance);
        scores.push(play_game(&mut session));
        if session.upper_bonus() > 0 {
            upper_bonus_count += 1;
        }
        if session.yahtzee_bonus() > 0 {
            yahtzee_bonus_count += 1;
        }
    }

    let summary = summarize_scores(&scores);
    SimulationReport {
        scores,
        upper_bonus_count,
        yahtzee_bonus_count,
        summary,
    }
}

/// Text histogram with `bucket`-wide bins, one line per non-empty bin.
pub fn format_histogram(scores: &[u32], bucket: u32, width: usize) -> String {
    use std::collections::BTreeMap;
    use std::fmt::Write;

    let bucket = bucket.max(1);
    let mut bins: BTreeMap<u32, usize> = BTreeMap::new();
    for &s in scores {
        *bins.entry(s / bucket * bucket).or_default() += 1;
    }
    let peak = bins.values().copied().max().unwrap_or(0);

    let mut out = String::new();
    for (lo, count) in bins {
        let bar = if peak == 0 { 0 } else { count * width / peak };
        let _ = writeln!(
            out,
            "{:>4}-{:<4} {:>6} {}",
            lo,
            lo + bucket - 1,
            count,
            "#".repeat(bar.max(1))
        );
    }
    out
}
