//! The 13 score slots plus bonus bookkeeping.

use serde::{Deserialize, Serialize};

use crate::category::{Category, ALL, NUM_CATS, NUM_UPPER};
use crate::scoring::{self, YAHTZEE_SCORE};

pub const UPPER_BONUS_THRESHOLD: u32 = 63;
pub const UPPER_BONUS: u32 = 35;
pub const YAHTZEE_BONUS: u32 = 100;

/// Per-category slots. A filled slot is never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    slots: [Option<u32>; NUM_CATS],
    yahtzee_bonus: u32,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cat: Category) -> Option<u32> {
        self.slots[cat.index()]
    }

    pub fn is_filled(&self, cat: Category) -> bool {
        self.slots[cat.index()].is_some()
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Unfilled categories in table order.
    pub fn open_categories(&self) -> impl Iterator<Item = Category> + '_ {
        ALL.iter().copied().filter(|&c| !self.is_filled(c))
    }

    /// Fill `cat` with the engine score for `dice`, applying the repeat-Yahtzee bonus.
    ///
    /// Returns the slot score, or `None` (card unchanged) if the slot was already filled.
    pub fn fill(&mut self, cat: Category, dice: [u8; 5]) -> Option<u32> {
        if self.is_filled(cat) {
            return None;
        }

        // Bonus when Yahtzee already holds 50 and another all-matching hand is scored elsewhere.
        if cat != Category::Yahtzee
            && self.get(Category::Yahtzee) == Some(YAHTZEE_SCORE)
            && scoring::is_yahtzee(dice)
        {
            self.yahtzee_bonus += YAHTZEE_BONUS;
        }

        let value = scoring::score(cat, dice);
        self.slots[cat.index()] = Some(value);
        Some(value)
    }

    /// Set a slot to an explicit value. Used to restore or construct scorecards.
    ///
    /// Returns false (card unchanged) if the slot was already filled.
    pub fn set(&mut self, cat: Category, value: u32) -> bool {
        if self.is_filled(cat) {
            return false;
        }
        self.slots[cat.index()] = Some(value);
        true
    }

    pub fn slots(&self) -> [(Category, Option<u32>); NUM_CATS] {
        let mut out = [(Category::Ones, None); NUM_CATS];
        for (o, (&c, &s)) in out.iter_mut().zip(ALL.iter().zip(self.slots.iter())) {
            *o = (c, s);
        }
        out
    }

    pub fn upper_subtotal(&self) -> u32 {
        self.slots[..NUM_UPPER].iter().flatten().sum()
    }

    pub fn upper_bonus(&self) -> u32 {
        if self.upper_subtotal() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS
        } else {
            0
        }
    }

    pub fn yahtzee_bonus(&self) -> u32 {
        self.yahtzee_bonus
    }

    /// Sum of filled slots, without bonuses.
    pub fn slot_sum(&self) -> u32 {
        self.slots.iter().flatten().sum()
    }

    pub fn total(&self) -> u32 {
        self.slot_sum() + self.upper_bonus() + self.yahtzee_bonus
    }
}
