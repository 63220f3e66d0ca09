//! Five dice with per-die hold flags.

use serde::Serialize;

use crate::chance::{ChanceMode, EventKey};

pub const NUM_DICE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Die {
    pub value: u8,
    pub held: bool,
}

/// Exactly five dice. Values are always in 1..=6 once issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiceSet {
    dice: [Die; NUM_DICE],
}

impl DiceSet {
    /// Build a set with the given faces and no holds.
    ///
    /// # Panics
    /// Panics if a face is outside 1..=6.
    pub fn from_values(values: [u8; NUM_DICE]) -> Self {
        assert!(
            values.iter().all(|v| (1..=6).contains(v)),
            "dice values must be in 1..=6: {:?}",
            values
        );
        let mut dice = [Die {
            value: 1,
            held: false,
        }; NUM_DICE];
        for (d, &v) in dice.iter_mut().zip(values.iter()) {
            d.value = v;
        }
        DiceSet { dice }
    }

    /// Issue a fully rerolled set with all holds cleared.
    pub fn fresh(chance: &mut ChanceMode, key: EventKey) -> Self {
        let draws = chance.draw(NUM_DICE, key);
        DiceSet::from_values(draws)
    }

    /// Reroll every unheld die. Held dice keep their value.
    pub fn roll_unheld(&mut self, chance: &mut ChanceMode, key: EventKey) {
        let k = self.dice.iter().filter(|d| !d.held).count();
        if k == 0 {
            return;
        }
        let draws = chance.draw(k, key);
        for (die, &v) in self.dice.iter_mut().filter(|d| !d.held).zip(draws.iter()) {
            die.value = v;
        }
    }

    /// Flip the hold flag of die `idx`. Returns false for an out-of-range index.
    pub fn toggle(&mut self, idx: usize) -> bool {
        match self.dice.get_mut(idx) {
            Some(d) => {
                d.held = !d.held;
                true
            }
            None => false,
        }
    }

    pub fn set_holds(&mut self, holds: [bool; NUM_DICE]) {
        for (d, h) in self.dice.iter_mut().zip(holds) {
            d.held = h;
        }
    }

    pub fn dice(&self) -> [Die; NUM_DICE] {
        self.dice
    }

    pub fn values(&self) -> [u8; NUM_DICE] {
        self.dice.map(|d| d.value)
    }

    pub fn holds(&self) -> [bool; NUM_DICE] {
        self.dice.map(|d| d.held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> EventKey {
        EventKey {
            episode_seed: 0,
            turn_idx: 0,
            roll_idx: 1,
        }
    }

    #[test]
    fn roll_unheld_keeps_held_values() {
        let mut set = DiceSet::from_values([1, 2, 3, 4, 5]);
        set.toggle(0);
        set.toggle(3);
        let mut chance = ChanceMode::scripted([6u8]);
        set.roll_unheld(&mut chance, key());
        assert_eq!(set.values(), [1, 6, 6, 4, 6]);
        assert_eq!(set.holds(), [true, false, false, true, false]);
    }

    #[test]
    fn all_held_roll_draws_nothing() {
        let mut set = DiceSet::from_values([2, 2, 2, 2, 2]);
        set.set_holds([true; NUM_DICE]);
        let mut chance = ChanceMode::scripted([5u8, 6]);
        set.roll_unheld(&mut chance, key());
        assert_eq!(set.values(), [2, 2, 2, 2, 2]);
        // Script position untouched: the next draw still starts at 5.
        assert_eq!(chance.draw(1, key())[0], 5);
    }

    #[test]
    fn toggle_out_of_range_is_rejected() {
        let mut set = DiceSet::from_values([1, 1, 1, 1, 1]);
        assert!(!set.toggle(5));
        assert_eq!(set.holds(), [false; NUM_DICE]);
        assert!(set.toggle(4));
        assert!(set.toggle(4));
        assert_eq!(set.holds(), [false; NUM_DICE]);
    }

    #[test]
    fn serializes_values_and_holds() {
        let mut set = DiceSet::from_values([3, 3, 5, 1, 6]);
        set.toggle(2);
        let v = serde_json::to_value(set).unwrap();
        assert_eq!(v["dice"][2]["value"], 5);
        assert_eq!(v["dice"][2]["held"], true);
        assert_eq!(v["dice"].as_array().unwrap().len(), NUM_DICE);
    }

    #[test]
    fn fresh_has_no_holds() {
        let mut chance = ChanceMode::rng(Some(3));
        let set = DiceSet::fresh(&mut chance, key());
        assert_eq!(set.holds(), [false; NUM_DICE]);
        assert!(set.values().iter().all(|v| (1..=6).contains(v)));
    }
}
