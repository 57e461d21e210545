//! Nutrition totals for a day plan

use crate::models::{DayPlan, Nutrition};

/// Sum calories and macros across every meal category of a day.
///
/// Values are summed as given, including negative or non-finite ones.
pub fn nutrition_totals(plan: &DayPlan) -> Nutrition {
    plan.all_meals().map(|meal| meal.nutrition()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealCategory, MealItem};

    fn meal(calories: f64, protein: f64, carbs: f64, fat: f64) -> MealItem {
        MealItem {
            name: "item".to_string(),
            calories,
            protein,
            carbs,
            fat,
        }
    }

    fn sample_monday() -> DayPlan {
        DayPlan {
            breakfast: vec![meal(320.0, 12.0, 54.0, 6.0), meal(150.0, 15.0, 12.0, 4.0)],
            lunch: vec![meal(450.0, 35.0, 25.0, 18.0), meal(280.0, 10.0, 45.0, 8.0)],
            dinner: vec![meal(380.0, 40.0, 5.0, 22.0), meal(120.0, 4.0, 20.0, 2.0)],
            snacks: vec![meal(200.0, 5.0, 22.0, 12.0), meal(180.0, 25.0, 8.0, 4.0)],
        }
    }

    #[test]
    fn test_empty_plan_is_zero() {
        assert_eq!(nutrition_totals(&DayPlan::default()), Nutrition::zero());
    }

    #[test]
    fn test_sample_day_totals() {
        let totals = nutrition_totals(&sample_monday());
        assert_eq!(
            totals,
            Nutrition {
                calories: 2080.0,
                protein: 146.0,
                carbs: 191.0,
                fat: 76.0,
            }
        );
    }

    #[test]
    fn test_totals_match_fold_over_items() {
        let plan = sample_monday();
        let expected = MealCategory::ALL
            .iter()
            .flat_map(|category| plan.meals(*category))
            .fold(Nutrition::zero(), |acc, item| Nutrition {
                calories: acc.calories + item.calories,
                protein: acc.protein + item.protein,
                carbs: acc.carbs + item.carbs,
                fat: acc.fat + item.fat,
            });

        assert_eq!(nutrition_totals(&plan), expected);
    }

    #[test]
    fn test_single_category() {
        let plan = DayPlan {
            dinner: vec![meal(380.0, 40.0, 5.0, 22.0)],
            ..Default::default()
        };
        assert_eq!(nutrition_totals(&plan).calories, 380.0);
    }

    #[test]
    fn test_negative_values_are_summed_as_given() {
        let plan = DayPlan {
            snacks: vec![meal(100.0, 1.0, 1.0, 1.0), meal(-40.0, -1.0, 0.0, 0.0)],
            ..Default::default()
        };
        let totals = nutrition_totals(&plan);
        assert_eq!(totals.calories, 60.0);
        assert_eq!(totals.protein, 0.0);
    }
}
