//! Diet adherence metrics derived from a user's meals.

use super::Meal;

/// Aggregate counts and the longest on-diet run for one user.
///
/// ## Invariants
/// - `total_meals == total_on_diet + total_off_diet`.
/// - `best_on_diet_streak <= total_on_diet`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealMetrics {
    /// Number of meals recorded.
    pub total_meals: u64,
    /// Meals flagged as on diet.
    pub total_on_diet: u64,
    /// Meals flagged as off diet.
    pub total_off_diet: u64,
    /// Longest run of consecutive on-diet meals by date.
    pub best_on_diet_streak: u64,
}

impl MealMetrics {
    /// Summarise meals supplied in date order (either direction).
    ///
    /// # Examples
    /// ```
    /// use daily_diet::domain::{Meal, MealDetails, MealId, MealMetrics, MealTimestamp, UserId};
    ///
    /// let owner = UserId::random();
    /// let meals: Vec<Meal> = [true, true, false]
    ///     .into_iter()
    ///     .enumerate()
    ///     .map(|(day, on_diet)| {
    ///         let date = MealTimestamp::from_millis(day as i64 * 86_400_000).expect("in range");
    ///         let details = MealDetails::try_new("meal", "", on_diet, date).expect("valid");
    ///         Meal::new(MealId::random(), owner, details)
    ///     })
    ///     .collect();
    ///
    /// let metrics = MealMetrics::from_meals(&meals);
    /// assert_eq!(metrics.total_meals, 3);
    /// assert_eq!(metrics.best_on_diet_streak, 2);
    /// ```
    pub fn from_meals<'a>(meals: impl IntoIterator<Item = &'a Meal>) -> Self {
        let flags: Vec<bool> = meals
            .into_iter()
            .map(|meal| meal.details().is_on_diet())
            .collect();
        let total_on_diet = flags.iter().filter(|on| **on).count() as u64;
        let total_meals = flags.len() as u64;
        Self {
            total_meals,
            total_on_diet,
            total_off_diet: total_meals - total_on_diet,
            best_on_diet_streak: best_on_diet_streak(flags),
        }
    }
}

/// Length of the longest contiguous run of `true` values.
///
/// The result is the same whether the sequence is scanned forwards or in
/// reverse, so callers may pass meals newest-first.
pub fn best_on_diet_streak(flags: impl IntoIterator<Item = bool>) -> u64 {
    let (_, best) = flags
        .into_iter()
        .fold((0_u64, 0_u64), |(current, best), on_diet| {
            if on_diet {
                let current = current + 1;
                (current, best.max(current))
            } else {
                (0, best)
            }
        });
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MealDetails, MealId, MealTimestamp, UserId};
    use rstest::rstest;

    fn meals_for(flags: &[bool]) -> Vec<Meal> {
        let owner = UserId::random();
        flags
            .iter()
            .zip(0_i64..)
            .map(|(on_diet, day)| {
                let date = MealTimestamp::from_millis(day * 86_400_000).expect("in range");
                let details = MealDetails::try_new("meal", "", *on_diet, date).expect("valid");
                Meal::new(MealId::random(), owner, details)
            })
            .collect()
    }

    #[rstest]
    #[case(&[], 0)]
    #[case(&[false, false], 0)]
    #[case(&[true], 1)]
    #[case(&[false, true, true, false, true], 2)]
    #[case(&[true, true, true, false, true, true], 3)]
    #[case(&[true, false, true, true, true, true], 4)]
    fn streak_counts_longest_on_diet_run(#[case] flags: &[bool], #[case] expected: u64) {
        assert_eq!(best_on_diet_streak(flags.iter().copied()), expected);
    }

    #[rstest]
    #[case(&[false, true, true, false, true])]
    #[case(&[true, true, false, true, true, true, false])]
    #[case(&[true, false, false, true])]
    fn streak_is_unchanged_by_reversal(#[case] flags: &[bool]) {
        let forward = best_on_diet_streak(flags.iter().copied());
        let backward = best_on_diet_streak(flags.iter().rev().copied());
        assert_eq!(forward, backward);
    }

    #[rstest]
    fn three_meal_history_summarises_as_expected() {
        let meals = meals_for(&[true, true, false]);

        let metrics = MealMetrics::from_meals(&meals);

        assert_eq!(
            metrics,
            MealMetrics {
                total_meals: 3,
                total_on_diet: 2,
                total_off_diet: 1,
                best_on_diet_streak: 2,
            }
        );
    }

    #[rstest]
    #[case(&[])]
    #[case(&[true, false, true])]
    #[case(&[false, false, false, true])]
    fn totals_partition_the_meals(#[case] flags: &[bool]) {
        let metrics = MealMetrics::from_meals(&meals_for(flags));
        assert_eq!(
            metrics.total_meals,
            metrics.total_on_diet + metrics.total_off_diet
        );
        assert!(metrics.best_on_diet_streak <= metrics.total_on_diet);
    }
}
