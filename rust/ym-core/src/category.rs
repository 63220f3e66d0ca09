//! Scoring categories and their index mapping.
//!
//! Index order is the scorecard order: upper section (0..=5) then lower section (6..=12).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const NUM_CATS: usize = 13;

/// Number of upper-section categories (Ones..Sixes).
pub const NUM_UPPER: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Category {
    Ones = 0,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

/// All categories in index order.
pub const ALL: [Category; NUM_CATS] = [
    Category::Ones,
    Category::Twos,
    Category::Threes,
    Category::Fours,
    Category::Fives,
    Category::Sixes,
    Category::ThreeOfAKind,
    Category::FourOfAKind,
    Category::FullHouse,
    Category::SmallStraight,
    Category::LargeStraight,
    Category::Yahtzee,
    Category::Chance,
];

/// Display names in index order.
pub const CAT_NAMES: [&str; NUM_CATS] = [
    "Ones",
    "Twos",
    "Threes",
    "Fours",
    "Fives",
    "Sixes",
    "Three of a Kind",
    "Four of a Kind",
    "Full House",
    "Small Straight",
    "Large Straight",
    "Yahtzee",
    "Chance",
];

/// Short machine keys in index order (used for parsing and event logs).
pub const CAT_KEYS: [&str; NUM_CATS] = [
    "ones",
    "twos",
    "threes",
    "fours",
    "fives",
    "sixes",
    "three_of_a_kind",
    "four_of_a_kind",
    "full_house",
    "small_straight",
    "large_straight",
    "yahtzee",
    "chance",
];

impl Category {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Category> {
        ALL.get(idx).copied()
    }

    pub fn name(self) -> &'static str {
        CAT_NAMES[self.index()]
    }

    pub fn key(self) -> &'static str {
        CAT_KEYS[self.index()]
    }

    /// True for Ones..Sixes.
    pub fn is_upper(self) -> bool {
        self.index() < NUM_UPPER
    }

    /// Face value for upper categories (Ones -> 1, ..., Sixes -> 6).
    pub fn face(self) -> Option<u8> {
        if self.is_upper() {
            Some(self as u8 + 1)
        } else {
            None
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0:?}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts a 1-based scorecard row (`"7"`), a key (`"three_of_a_kind"`), a display name
    /// (`"Three of a Kind"`), or a few common short forms (`"3k"`, `"fh"`, `"ss"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if let Ok(row) = t.parse::<usize>() {
            return row
                .checked_sub(1)
                .and_then(Category::from_index)
                .ok_or_else(|| ParseCategoryError(s.to_string()));
        }

        let norm: String = t
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();

        if let Some(i) = CAT_KEYS.iter().position(|&k| k == norm) {
            return Ok(ALL[i]);
        }

        let short = match norm.as_str() {
            "3k" | "3_of_a_kind" | "three_kind" => Some(Category::ThreeOfAKind),
            "4k" | "4_of_a_kind" | "four_kind" => Some(Category::FourOfAKind),
            "fh" | "house" => Some(Category::FullHouse),
            "ss" | "sm" => Some(Category::SmallStraight),
            "ls" | "lg" => Some(Category::LargeStraight),
            "y" | "yatzy" => Some(Category::Yahtzee),
            "c" => Some(Category::Chance),
            _ => None,
        };
        short.ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
