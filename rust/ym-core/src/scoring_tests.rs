#[cfg(test)]
mod tests {
    use crate::category::{Category, ALL};
    use crate::scoring::{is_yahtzee, score, scores_for_dice, RULES};

    fn for_all_hands(mut f: impl FnMut([u8; 5])) {
        for a in 1u8..=6 {
            for b in 1u8..=6 {
                for c in 1u8..=6 {
                    for d in 1u8..=6 {
                        for e in 1u8..=6 {
                            f([a, b, c, d, e]);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn rule_table_is_in_category_order() {
        for (i, rule) in RULES.iter().enumerate() {
            assert_eq!(rule.category, ALL[i]);
        }
    }

    #[test]
    fn chance_is_sum_for_every_hand() {
        for_all_hands(|dice| {
            let sum: u32 = dice.iter().map(|&d| d as u32).sum();
            assert_eq!(score(Category::Chance, dice), sum, "dice {:?}", dice);
        });
    }

    #[test]
    fn yahtzee_iff_all_equal() {
        for_all_hands(|dice| {
            let expected = if is_yahtzee(dice) { 50 } else { 0 };
            assert_eq!(score(Category::Yahtzee, dice), expected, "dice {:?}", dice);
        });
    }

    #[test]
    fn batch_scores_match_single_category_scores() {
        for_all_hands(|dice| {
            let all = scores_for_dice(dice);
            for &c in &ALL {
                assert_eq!(all[c.index()], score(c, dice), "{:?} {:?}", c, dice);
            }
        });
    }

    #[test]
    fn order_does_not_matter() {
        assert_eq!(scores_for_dice([5, 1, 4, 1, 1]), scores_for_dice([1, 1, 1, 4, 5]));
        assert_eq!(scores_for_dice([6, 2, 5, 3, 4]), scores_for_dice([2, 3, 4, 5, 6]));
    }

    #[test]
    fn upper_section_counts_times_face() {
        let dice = [3, 3, 5, 3, 6];
        assert_eq!(score(Category::Ones, dice), 0);
        assert_eq!(score(Category::Threes, dice), 9);
        assert_eq!(score(Category::Fives, dice), 5);
        assert_eq!(score(Category::Sixes, dice), 6);
    }

    #[test]
    fn n_of_a_kind_scores_full_sum() {
        assert_eq!(score(Category::ThreeOfAKind, [1, 1, 1, 4, 5]), 12);
        assert_eq!(score(Category::ThreeOfAKind, [1, 1, 2, 4, 5]), 0);
        assert_eq!(score(Category::FourOfAKind, [6, 6, 6, 6, 2]), 26);
        assert_eq!(score(Category::FourOfAKind, [6, 6, 6, 2, 2]), 0);
        // Five of a kind also qualifies for both.
        assert_eq!(score(Category::ThreeOfAKind, [4, 4, 4, 4, 4]), 20);
        assert_eq!(score(Category::FourOfAKind, [4, 4, 4, 4, 4]), 20);
    }

    #[test]
    fn full_house_needs_exact_three_and_two() {
        assert_eq!(score(Category::FullHouse, [2, 2, 2, 5, 5]), 25);
        assert_eq!(score(Category::FullHouse, [5, 2, 5, 2, 2]), 25);
        assert_eq!(score(Category::FullHouse, [2, 2, 3, 5, 5]), 0);
        assert_eq!(score(Category::FullHouse, [3, 3, 3, 3, 3]), 0);
        assert_eq!(score(Category::FullHouse, [3, 3, 3, 3, 2]), 0);
    }

    #[test]
    fn small_straight_is_any_run_of_four() {
        assert_eq!(score(Category::SmallStraight, [1, 2, 3, 4, 6]), 30);
        assert_eq!(score(Category::SmallStraight, [2, 3, 4, 5, 5]), 30);
        assert_eq!(score(Category::SmallStraight, [6, 3, 5, 4, 1]), 30);
        assert_eq!(score(Category::SmallStraight, [1, 2, 3, 4, 5]), 30);
        assert_eq!(score(Category::SmallStraight, [1, 2, 3, 5, 6]), 0);
    }

    #[test]
    fn large_straight_is_exact_run_of_five() {
        assert_eq!(score(Category::LargeStraight, [2, 3, 4, 5, 6]), 40);
        assert_eq!(score(Category::LargeStraight, [5, 4, 3, 2, 1]), 40);
        assert_eq!(score(Category::LargeStraight, [1, 2, 3, 4, 6]), 0);
        assert_eq!(score(Category::LargeStraight, [2, 3, 4, 5, 5]), 0);
    }

    #[test]
    fn large_straight_implies_small_straight() {
        for_all_hands(|dice| {
            if score(Category::LargeStraight, dice) > 0 {
                assert_eq!(score(Category::SmallStraight, dice), 30, "dice {:?}", dice);
            }
        });
    }
}
