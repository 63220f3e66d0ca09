//! Dice -> category scoring.
//!
//! Rules live in a constant table indexed by `Category`. Every rule is a pure, total function
//! of the hand; none of them depend on the scorecard. Bonuses are handled by the scorecard.

use crate::category::{Category, NUM_CATS};

pub const FULL_HOUSE_SCORE: u32 = 25;
pub const SMALL_STRAIGHT_SCORE: u32 = 30;
pub const LARGE_STRAIGHT_SCORE: u32 = 40;
pub const YAHTZEE_SCORE: u32 = 50;

/// A 5-dice hand with face counts precomputed.
///
/// Input dice must be in 1..=6. Order does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand {
    pub dice: [u8; 5],
    /// `counts[f - 1]` = number of dice showing face `f`.
    pub counts: [u8; 6],
    pub sum: u32,
}

impl Hand {
    pub fn new(dice: [u8; 5]) -> Self {
        let mut counts = [0u8; 6];
        for &d in &dice {
            debug_assert!((1..=6).contains(&d), "die out of range: {}", d);
            counts[(d - 1) as usize] += 1;
        }
        let sum = dice.iter().map(|&d| d as u32).sum();
        Hand { dice, counts, sum }
    }

    #[inline]
    pub fn count(&self, face: u8) -> u8 {
        self.counts[(face - 1) as usize]
    }

    #[inline]
    pub fn has(&self, face: u8) -> bool {
        self.count(face) > 0
    }

    pub fn max_count(&self) -> u8 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// One row of the rule table.
pub struct Rule {
    pub category: Category,
    pub score: fn(&Hand) -> u32,
}

fn upper(hand: &Hand, face: u8) -> u32 {
    hand.count(face) as u32 * face as u32
}

fn ones(h: &Hand) -> u32 {
    upper(h, 1)
}
fn twos(h: &Hand) -> u32 {
    upper(h, 2)
}
fn threes(h: &Hand) -> u32 {
    upper(h, 3)
}
fn fours(h: &Hand) -> u32 {
    upper(h, 4)
}
fn fives(h: &Hand) -> u32 {
    upper(h, 5)
}
fn sixes(h: &Hand) -> u32 {
    upper(h, 6)
}

fn three_of_a_kind(h: &Hand) -> u32 {
    if h.max_count() >= 3 {
        h.sum
    } else {
        0
    }
}

fn four_of_a_kind(h: &Hand) -> u32 {
    if h.max_count() >= 4 {
        h.sum
    } else {
        0
    }
}

fn full_house(h: &Hand) -> u32 {
    let has3 = h.counts.iter().any(|&c| c == 3);
    let has2 = h.counts.iter().any(|&c| c == 2);
    if has3 && has2 {
        FULL_HOUSE_SCORE
    } else {
        0
    }
}

fn run_of(h: &Hand, start: u8, len: u8) -> bool {
    (start..start + len).all(|f| h.has(f))
}

fn small_straight(h: &Hand) -> u32 {
    if (1..=3).any(|start| run_of(h, start, 4)) {
        SMALL_STRAIGHT_SCORE
    } else {
        0
    }
}

fn large_straight(h: &Hand) -> u32 {
    // Five distinct faces in a run of five: exactly {1..5} or {2..6}.
    if run_of(h, 1, 5) || run_of(h, 2, 5) {
        LARGE_STRAIGHT_SCORE
    } else {
        0
    }
}

fn yahtzee(h: &Hand) -> u32 {
    if h.max_count() == 5 {
        YAHTZEE_SCORE
    } else {
        0
    }
}

fn chance(h: &Hand) -> u32 {
    h.sum
}

/// The rule table, indexed by `Category::index()`.
pub static RULES: [Rule; NUM_CATS] = [
    Rule { category: Category::Ones, score: ones },
    Rule { category: Category::Twos, score: twos },
    Rule { category: Category::Threes, score: threes },
    Rule { category: Category::Fours, score: fours },
    Rule { category: Category::Fives, score: fives },
    Rule { category: Category::Sixes, score: sixes },
    Rule { category: Category::ThreeOfAKind, score: three_of_a_kind },
    Rule { category: Category::FourOfAKind, score: four_of_a_kind },
    Rule { category: Category::FullHouse, score: full_house },
    Rule { category: Category::SmallStraight, score: small_straight },
    Rule { category: Category::LargeStraight, score: large_straight },
    Rule { category: Category::Yahtzee, score: yahtzee },
    Rule { category: Category::Chance, score: chance },
];

/// Score a single category for a 5-dice hand.
pub fn score(category: Category, dice: [u8; 5]) -> u32 {
    score_hand(category, &Hand::new(dice))
}

/// Score a single category for a precomputed hand.
#[inline]
pub fn score_hand(category: Category, hand: &Hand) -> u32 {
    (RULES[category.index()].score)(hand)
}

/// Compute all 13 raw category scores for a 5-dice hand (no bonuses).
pub fn scores_for_dice(dice: [u8; 5]) -> [u32; NUM_CATS] {
    let hand = Hand::new(dice);
    let mut s = [0u32; NUM_CATS];
    for (out, rule) in s.iter_mut().zip(RULES.iter()) {
        *out = (rule.score)(&hand);
    }
    s
}

/// True if all five dice show the same face.
pub fn is_yahtzee(dice: [u8; 5]) -> bool {
    dice.iter().all(|&d| d == dice[0])
}
