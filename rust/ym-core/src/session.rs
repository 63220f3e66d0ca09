//! Game session: the single place that mutates a game through the rules.
//!
//! Turn state machine:
//! `Idle` (roll_count = 0) -> roll -> `Rolled` (1..=3) -> commit -> `Idle` | `GameOver`.
//! Only `reset` leaves `GameOver`.

use serde::Serialize;

use crate::category::{Category, NUM_CATS};
use crate::chance::ChanceMode;
use crate::dice::{Die, NUM_DICE};
use crate::scorecard::Scorecard;
use crate::scoring;
use crate::turn::{suggest_holds, HoldPolicy, TurnController};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Rolled,
    GameOver,
}

/// Point-in-time view of a session for shells and event logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub turn: u8,
    pub roll_count: u8,
    pub dice: [u8; NUM_DICE],
    pub held: [bool; NUM_DICE],
    pub slots: [Option<u32>; NUM_CATS],
    pub upper_bonus: u32,
    pub yahtzee_bonus: u32,
    pub total: u32,
}

#[derive(Debug)]
pub struct GameSession {
    card: Scorecard,
    turn: TurnController,
    chance: ChanceMode,
    episode_seed: u64,
}

impl GameSession {
    pub fn new(hold_policy: HoldPolicy, mut chance: ChanceMode) -> Self {
        let episode_seed = match &chance {
            ChanceMode::DeterministicEventKeyed { episode_seed } => *episode_seed,
            _ => 0,
        };
        let turn = TurnController::new(hold_policy, &mut chance, episode_seed);
        GameSession {
            card: Scorecard::new(),
            turn,
            chance,
            episode_seed,
        }
    }

    /// PRNG-backed session with the default hold policy.
    pub fn with_seed(seed: Option<u64>) -> Self {
        Self::new(HoldPolicy::default(), ChanceMode::rng(seed))
    }

    // ---- queries ----

    pub fn dice(&self) -> [Die; NUM_DICE] {
        self.turn.dice().dice()
    }

    pub fn dice_values(&self) -> [u8; NUM_DICE] {
        self.turn.dice().values()
    }

    pub fn roll_count(&self) -> u8 {
        self.turn.roll_count()
    }

    pub fn rolls_remaining(&self) -> u8 {
        if self.is_game_over() {
            0
        } else {
            self.turn.rolls_remaining()
        }
    }

    pub fn can_roll(&self) -> bool {
        self.turn.can_roll(&self.card)
    }

    pub fn can_hold(&self) -> bool {
        self.turn.can_hold(&self.card)
    }

    pub fn can_commit(&self, cat: Category) -> bool {
        !self.card.is_filled(cat) && self.turn.roll_count() >= 1
    }

    pub fn slots(&self) -> [(Category, Option<u32>); NUM_CATS] {
        self.card.slots()
    }

    pub fn scorecard(&self) -> &Scorecard {
        &self.card
    }

    /// Engine score for each unfilled slot given the current dice; `None` for filled slots.
    pub fn potential_scores(&self) -> [Option<u32>; NUM_CATS] {
        let scores = scoring::scores_for_dice(self.dice_values());
        let mut out = [None; NUM_CATS];
        for c in self.card.open_categories() {
            out[c.index()] = Some(scores[c.index()]);
        }
        out
    }

    pub fn upper_subtotal(&self) -> u32 {
        self.card.upper_subtotal()
    }

    pub fn upper_bonus(&self) -> u32 {
        self.card.upper_bonus()
    }

    pub fn yahtzee_bonus(&self) -> u32 {
        self.card.yahtzee_bonus()
    }

    pub fn total(&self) -> u32 {
        self.card.total()
    }

    pub fn is_game_over(&self) -> bool {
        self.card.is_complete()
    }

    /// Zero-based index of the current turn (number of filled slots).
    pub fn turn_index(&self) -> u8 {
        self.card.filled_count() as u8
    }

    pub fn phase(&self) -> Phase {
        if self.is_game_over() {
            Phase::GameOver
        } else if self.turn.roll_count() == 0 {
            Phase::Idle
        } else {
            Phase::Rolled
        }
    }

    pub fn best_category_suggestion(&self) -> Option<Category> {
        self.turn.suggest_best_category(&self.card)
    }

    /// Holds supporting the best suggestion; all false when there is none.
    pub fn suggested_holds(&self) -> [bool; NUM_DICE] {
        match self.best_category_suggestion() {
            Some(best) => suggest_holds(best, self.dice_values()),
            None => [false; NUM_DICE],
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let set = self.turn.dice();
        let mut slots = [None; NUM_CATS];
        for (o, (_, s)) in slots.iter_mut().zip(self.card.slots()) {
            *o = s;
        }
        SessionSnapshot {
            phase: self.phase(),
            turn: self.turn_index(),
            roll_count: self.roll_count(),
            dice: set.values(),
            held: set.holds(),
            slots,
            upper_bonus: self.upper_bonus(),
            yahtzee_bonus: self.yahtzee_bonus(),
            total: self.total(),
        }
    }

    // ---- actions ----

    pub fn roll(&mut self) -> bool {
        self.turn.roll(&self.card, &mut self.chance, self.episode_seed)
    }

    pub fn toggle_hold(&mut self, idx: usize) -> bool {
        self.turn.toggle_hold(idx, &self.card)
    }

    pub fn set_holds(&mut self, holds: [bool; NUM_DICE]) -> bool {
        self.turn.set_holds(holds, &self.card)
    }

    /// Score the current dice into `cat`, then start the next turn with fresh dice.
    ///
    /// Refused (returns `None`) if the slot is filled or no roll happened this turn.
    pub fn commit_score(&mut self, cat: Category) -> Option<u32> {
        if !self.can_commit(cat) {
            return None;
        }
        let value = self.card.fill(cat, self.dice_values())?;
        let next_turn = self.turn_index();
        self.turn.new_turn(&mut self.chance, self.episode_seed, next_turn);
        Some(value)
    }

    /// Clear the scorecard and bonuses and issue fresh dice. Keeps the dice source.
    pub fn reset(&mut self) {
        self.card = Scorecard::new();
        self.turn.new_turn(&mut self.chance, self.episode_seed, 0);
    }
}
