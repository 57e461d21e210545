//! Meal plan model
//!
//! A day's diet plan: meal items grouped by meal category.

use serde::{Deserialize, Serialize};

use super::{lenient, Nutrition};

/// Meal category within a day plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealCategory {
    pub const ALL: [MealCategory; 4] = [
        MealCategory::Breakfast,
        MealCategory::Lunch,
        MealCategory::Dinner,
        MealCategory::Snacks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "breakfast",
            MealCategory::Lunch => "lunch",
            MealCategory::Dinner => "dinner",
            MealCategory::Snacks => "snacks",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(MealCategory::Breakfast),
            "lunch" => Some(MealCategory::Lunch),
            "dinner" => Some(MealCategory::Dinner),
            "snacks" | "snack" => Some(MealCategory::Snacks),
            _ => None,
        }
    }
}

/// A single planned meal item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    #[serde(alias = "meal_name", default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub protein: f64, // grams
    #[serde(default, deserialize_with = "lenient::number")]
    pub carbs: f64, // grams
    #[serde(default, deserialize_with = "lenient::number")]
    pub fat: f64, // grams
}

impl MealItem {
    pub fn nutrition(&self) -> Nutrition {
        Nutrition {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

/// One weekday's meals by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub breakfast: Vec<MealItem>,
    #[serde(default)]
    pub lunch: Vec<MealItem>,
    #[serde(default)]
    pub dinner: Vec<MealItem>,
    #[serde(default, alias = "snack")]
    pub snacks: Vec<MealItem>,
}

impl DayPlan {
    pub fn meals(&self, category: MealCategory) -> &[MealItem] {
        match category {
            MealCategory::Breakfast => &self.breakfast,
            MealCategory::Lunch => &self.lunch,
            MealCategory::Dinner => &self.dinner,
            MealCategory::Snacks => &self.snacks,
        }
    }

    pub fn meals_mut(&mut self, category: MealCategory) -> &mut Vec<MealItem> {
        match category {
            MealCategory::Breakfast => &mut self.breakfast,
            MealCategory::Lunch => &mut self.lunch,
            MealCategory::Dinner => &mut self.dinner,
            MealCategory::Snacks => &mut self.snacks,
        }
    }

    /// All meal items, breakfast first
    pub fn all_meals(&self) -> impl Iterator<Item = &MealItem> {
        MealCategory::ALL
            .into_iter()
            .flat_map(move |category| self.meals(category).iter())
    }

    pub fn meal_count(&self) -> usize {
        MealCategory::ALL
            .iter()
            .map(|category| self.meals(*category).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.meal_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_plan_missing_categories_are_empty() {
        let plan: DayPlan = serde_json::from_str(
            r#"{"lunch": [{"name": "Quinoa Bowl", "calories": 280, "protein": 10, "carbs": 45, "fat": 8}]}"#,
        )
        .unwrap();

        assert!(plan.breakfast.is_empty());
        assert_eq!(plan.lunch.len(), 1);
        assert_eq!(plan.meal_count(), 1);
    }

    #[test]
    fn test_meal_item_accepts_stored_row_names() {
        let item: MealItem = serde_json::from_str(
            r#"{"meal_name": "Greek Yogurt", "calories": "150", "protein": 15, "carbs": null}"#,
        )
        .unwrap();

        assert_eq!(item.name, "Greek Yogurt");
        assert_eq!(item.calories, 150.0);
        assert_eq!(item.carbs, 0.0);
        assert_eq!(item.fat, 0.0);
    }

    #[test]
    fn test_snack_alias() {
        let plan: DayPlan =
            serde_json::from_str(r#"{"snack": [{"name": "Apple", "calories": 95}]}"#).unwrap();
        assert_eq!(plan.meals(MealCategory::Snacks).len(), 1);
        assert_eq!(MealCategory::from_str("Snack"), Some(MealCategory::Snacks));
    }
}
