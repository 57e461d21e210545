//! Weekly plan container
//!
//! Maps weekday labels to shared day plans. Backends may return any subset of
//! the seven days, or nothing at all when no plan exists yet.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use super::{DayPlan, Weekday, WorkoutPlan};

/// A week of plans keyed by weekday
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Week<P> {
    days: BTreeMap<Weekday, Arc<P>>,
}

pub type DietWeek = Week<DayPlan>;
pub type WorkoutWeek = Week<WorkoutPlan>;

impl<P> Default for Week<P> {
    fn default() -> Self {
        Self {
            days: BTreeMap::new(),
        }
    }
}

impl<P> Week<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw day labels, dropping labels that are not weekdays
    pub fn from_labelled(raw: impl IntoIterator<Item = (String, P)>) -> Self {
        let mut days = BTreeMap::new();
        for (label, plan) in raw {
            match Weekday::from_str(&label) {
                Some(day) => {
                    days.insert(day, Arc::new(plan));
                }
                None => tracing::warn!(label = %label, "Ignoring plan for unknown weekday"),
            }
        }
        Self { days }
    }

    pub fn get(&self, day: Weekday) -> Option<&Arc<P>> {
        self.days.get(&day)
    }

    /// Copy of this week with one day replaced; other days stay shared
    pub fn with_day(&self, day: Weekday, plan: Arc<P>) -> Self {
        let mut days = self.days.clone();
        days.insert(day, plan);
        Self { days }
    }

    pub fn days(&self) -> impl Iterator<Item = (Weekday, &Arc<P>)> {
        self.days.iter().map(|(day, plan)| (*day, plan))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl<P: Default> Week<P> {
    /// The plan for a day, or an empty plan when the day has none
    pub fn plan_or_empty(&self, day: Weekday) -> Arc<P> {
        self.days.get(&day).cloned().unwrap_or_default()
    }
}

impl<'de, P: Deserialize<'de>> Deserialize<'de> for Week<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<BTreeMap<String, P>>::deserialize(deserializer)?;
        Ok(Self::from_labelled(raw.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_week() {
        let week: DietWeek = serde_json::from_str(
            r#"{"Wednesday": {"breakfast": [{"name": "Oatmeal", "calories": 320}]}}"#,
        )
        .unwrap();

        assert_eq!(week.len(), 1);
        assert!(week.get(Weekday::Wednesday).is_some());
        assert!(week.get(Weekday::Monday).is_none());
        assert!(week.plan_or_empty(Weekday::Monday).is_empty());
    }

    #[test]
    fn test_empty_and_null_weeks() {
        let week: WorkoutWeek = serde_json::from_str("{}").unwrap();
        assert!(week.is_empty());

        let week: WorkoutWeek = serde_json::from_str("null").unwrap();
        assert!(week.is_empty());
    }

    #[test]
    fn test_unknown_labels_dropped() {
        let week: DietWeek =
            serde_json::from_str(r#"{"Monday": {}, "Someday": {}, "fri": {}}"#).unwrap();

        let days: Vec<Weekday> = week.days().map(|(day, _)| day).collect();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Friday]);
    }

    #[test]
    fn test_with_day_shares_untouched_days() {
        let week = DietWeek::from_labelled(vec![
            ("Monday".to_string(), DayPlan::default()),
            ("Tuesday".to_string(), DayPlan::default()),
        ]);

        let updated = week.with_day(Weekday::Monday, Arc::new(DayPlan::default()));
        assert!(Arc::ptr_eq(
            week.get(Weekday::Tuesday).unwrap(),
            updated.get(Weekday::Tuesday).unwrap()
        ));
        assert!(!Arc::ptr_eq(
            week.get(Weekday::Monday).unwrap(),
            updated.get(Weekday::Monday).unwrap()
        ));
    }
}
