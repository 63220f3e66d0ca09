//! Per-turn state: dice, roll counter, holds, and play suggestions.
//!
//! Guarded operations never fail: when a guard does not hold the call changes nothing and
//! returns `false`.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::chance::{ChanceMode, EventKey};
use crate::dice::{DiceSet, NUM_DICE};
use crate::scorecard::Scorecard;
use crate::scoring::{self, Hand};

pub const MAX_ROLLS: u8 = 3;

/// When hold toggles are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldPolicy {
    /// Only while another roll is still legal this turn.
    #[default]
    WhileRollsRemain,
    /// Any time before the game is over, including after the third roll.
    UntilGameOver,
}

#[derive(Debug, Clone)]
pub struct TurnController {
    dice: DiceSet,
    roll_count: u8,
    hold_policy: HoldPolicy,
}

impl TurnController {
    pub fn new(hold_policy: HoldPolicy, chance: &mut ChanceMode, episode_seed: u64) -> Self {
        let mut t = TurnController {
            dice: DiceSet::from_values([1; NUM_DICE]),
            roll_count: 0,
            hold_policy,
        };
        t.new_turn(chance, episode_seed, 0);
        t
    }

    /// Issue fresh unheld dice and reset the roll counter to 0.
    pub fn new_turn(&mut self, chance: &mut ChanceMode, episode_seed: u64, turn_idx: u8) {
        let key = EventKey {
            episode_seed,
            turn_idx,
            roll_idx: 0,
        };
        self.dice = DiceSet::fresh(chance, key);
        self.roll_count = 0;
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    pub fn roll_count(&self) -> u8 {
        self.roll_count
    }

    pub fn rolls_remaining(&self) -> u8 {
        MAX_ROLLS.saturating_sub(self.roll_count)
    }

    pub fn can_roll(&self, card: &Scorecard) -> bool {
        self.roll_count < MAX_ROLLS && !card.is_complete()
    }

    pub fn can_hold(&self, card: &Scorecard) -> bool {
        match self.hold_policy {
            HoldPolicy::WhileRollsRemain => self.can_roll(card),
            HoldPolicy::UntilGameOver => !card.is_complete(),
        }
    }

    /// Reroll all unheld dice and count the roll.
    pub fn roll(&mut self, card: &Scorecard, chance: &mut ChanceMode, episode_seed: u64) -> bool {
        if !self.can_roll(card) {
            return false;
        }
        self.roll_count += 1;
        let key = EventKey {
            episode_seed,
            turn_idx: card.filled_count() as u8,
            roll_idx: self.roll_count,
        };
        self.dice.roll_unheld(chance, key);
        true
    }

    pub fn toggle_hold(&mut self, idx: usize, card: &Scorecard) -> bool {
        if !self.can_hold(card) {
            return false;
        }
        self.dice.toggle(idx)
    }

    /// Replace all holds at once (e.g. to apply `suggested_holds`). Same guard as `toggle_hold`.
    pub fn set_holds(&mut self, holds: [bool; NUM_DICE], card: &Scorecard) -> bool {
        if !self.can_hold(card) {
            return false;
        }
        self.dice.set_holds(holds);
        true
    }

    pub fn suggest_best_category(&self, card: &Scorecard) -> Option<Category> {
        suggest_best_category(card, self.dice.values())
    }
}

/// Highest-scoring unfilled category for `dice`; ties resolve to the earliest in table order.
pub fn suggest_best_category(card: &Scorecard, dice: [u8; 5]) -> Option<Category> {
    let scores = scoring::scores_for_dice(dice);
    let mut best: Option<(Category, u32)> = None;
    for c in card.open_categories() {
        let s = scores[c.index()];
        match best {
            Some((_, b)) if s <= b => {}
            _ => best = Some((c, s)),
        }
    }
    best.map(|(c, _)| c)
}

/// Advisory holds supporting `best`. Not guaranteed optimal.
pub fn suggest_holds(best: Category, dice: [u8; 5]) -> [bool; NUM_DICE] {
    let hand = Hand::new(dice);
    match best {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = best.face().unwrap_or(0);
            dice.map(|d| d == face)
        }
        Category::ThreeOfAKind
        | Category::FourOfAKind
        | Category::FullHouse
        | Category::Yahtzee => {
            let face = most_frequent_face(&hand);
            dice.map(|d| d == face)
        }
        Category::SmallStraight | Category::LargeStraight => {
            let mut seen = [false; 6];
            dice.map(|d| {
                let slot = &mut seen[(d - 1) as usize];
                let first = !*slot;
                *slot = true;
                first
            })
        }
        Category::Chance => [false; NUM_DICE],
    }
}

/// Face with the highest count; ties go to the higher face.
fn most_frequent_face(hand: &Hand) -> u8 {
    let mut best = 6u8;
    for face in (1..=6u8).rev() {
        if hand.count(face) > hand.count(best) {
            best = face;
        }
    }
    best
}
