use time::OffsetDateTime;
use tracing::info;

use super::model::{FoodEntry, MealSlot, NewFoodEntry, NutritionTotals};
use crate::analysis::AnalyzedFood;
use crate::error::AppResult;

/// Insertion-ordered food entries. Totals are always computed from the entries.
#[derive(Debug, Clone)]
pub struct FoodEntryStore {
    entries: Vec<FoodEntry>,
    next_id: u64,
}

impl Default for FoodEntryStore {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl FoodEntryStore {
    pub fn seeded() -> Self {
        let mut store = Self::default();
        let seed = [
            NewFoodEntry {
                name: "Oatmeal with banana".into(),
                calories: 320.0,
                protein_g: 12.0,
                carbs_g: 54.0,
                fat_g: 8.0,
                portion: "1 serving".into(),
                meal: MealSlot::Breakfast,
            },
            NewFoodEntry {
                name: "Grilled chicken".into(),
                calories: 280.0,
                protein_g: 35.0,
                carbs_g: 0.0,
                fat_g: 14.0,
                portion: "150g".into(),
                meal: MealSlot::Lunch,
            },
        ];
        for entry in seed {
            store.insert(entry);
        }
        store
    }

    pub fn add_entry(&mut self, entry: NewFoodEntry) -> AppResult<&FoodEntry> {
        entry.validate()?;
        let added = self.insert(entry);
        info!(id = added.id, meal = ?added.meal, calories = added.calories, "food entry added");
        Ok(added)
    }

    fn insert(&mut self, entry: NewFoodEntry) -> &FoodEntry {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(FoodEntry {
            id,
            name: entry.name,
            calories: entry.calories,
            protein_g: entry.protein_g,
            carbs_g: entry.carbs_g,
            fat_g: entry.fat_g,
            portion: entry.portion,
            meal: entry.meal,
            logged_at: OffsetDateTime::now_utc(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[FoodEntry] {
        &self.entries
    }

    pub fn entries_for_meal(&self, slot: MealSlot) -> impl Iterator<Item = &FoodEntry> {
        self.entries.iter().filter(move |e| e.meal == slot)
    }

    pub fn total_calories(&self, slot: Option<MealSlot>) -> f64 {
        self.totals(slot).calories
    }

    pub fn totals(&self, slot: Option<MealSlot>) -> NutritionTotals {
        match slot {
            Some(slot) => self.entries_for_meal(slot).collect(),
            None => self.entries.iter().collect(),
        }
    }
}

/// The food log tab: the store plus the meal slot currently picked.
#[derive(Debug, Clone)]
pub struct FoodLog {
    pub store: FoodEntryStore,
    selected_meal: MealSlot,
}

impl Default for FoodLog {
    fn default() -> Self {
        Self {
            store: FoodEntryStore::seeded(),
            selected_meal: MealSlot::default(),
        }
    }
}

impl FoodLog {
    pub fn selected_meal(&self) -> MealSlot {
        self.selected_meal
    }

    pub fn select_meal(&mut self, slot: MealSlot) {
        self.selected_meal = slot;
    }

    /// Logs an analysis result into the selected meal.
    pub fn log_analyzed(&mut self, food: &AnalyzedFood) -> AppResult<&FoodEntry> {
        let meal = self.selected_meal;
        self.store.add_entry(NewFoodEntry {
            name: food.name.clone(),
            calories: food.calories,
            protein_g: food.protein,
            carbs_g: food.carbs,
            fat_g: food.fat,
            portion: food.portion.clone(),
            meal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snack(calories: f64) -> NewFoodEntry {
        NewFoodEntry {
            name: "Apple".into(),
            calories,
            protein_g: 0.3,
            carbs_g: 25.0,
            fat_g: 0.2,
            portion: "1 piece".into(),
            meal: MealSlot::Snacks,
        }
    }

    #[test]
    fn seeded_totals() {
        let store = FoodEntryStore::seeded();
        assert_eq!(store.total_calories(None), 600.0);
        assert_eq!(store.total_calories(Some(MealSlot::Breakfast)), 320.0);
        assert_eq!(store.total_calories(Some(MealSlot::Dinner)), 0.0);
        assert_eq!(store.totals(None).protein_g, 47.0);
    }

    #[test]
    fn total_is_sum_of_entries() {
        let mut store = FoodEntryStore::default();
        for kcal in [95.0, 410.5, 0.0, 230.0] {
            store.add_entry(snack(kcal)).unwrap();
        }
        let sum: f64 = store.entries().iter().map(|e| e.calories).sum();
        assert_eq!(store.total_calories(None), sum);
    }

    #[test]
    fn adding_to_one_slot_leaves_others_unchanged() {
        let mut store = FoodEntryStore::seeded();
        let before: Vec<f64> = MealSlot::ALL
            .iter()
            .map(|s| store.total_calories(Some(*s)))
            .collect();

        store.add_entry(snack(95.0)).unwrap();

        for (slot, prev) in MealSlot::ALL.iter().zip(before) {
            let now = store.total_calories(Some(*slot));
            if *slot == MealSlot::Snacks {
                assert_eq!(now, prev + 95.0);
            } else {
                assert_eq!(now, prev);
            }
        }
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut store = FoodEntryStore::seeded();
        let a = store.add_entry(snack(10.0)).unwrap().id;
        let b = store.add_entry(snack(20.0)).unwrap().id;
        assert_eq!(a, 3);
        assert!(b > a);
    }

    #[test]
    fn entries_for_meal_keeps_insertion_order() {
        let mut store = FoodEntryStore::default();
        for name in ["first", "second", "third"] {
            store
                .add_entry(NewFoodEntry {
                    name: name.into(),
                    ..snack(50.0)
                })
                .unwrap();
        }
        let names: Vec<&str> = store
            .entries_for_meal(MealSlot::Snacks)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn negative_or_blank_entries_are_rejected() {
        let mut store = FoodEntryStore::seeded();
        assert!(store.add_entry(snack(-1.0)).unwrap_err().is_validation());
        assert!(store
            .add_entry(NewFoodEntry {
                fat_g: f64::INFINITY,
                ..snack(10.0)
            })
            .is_err());
        assert!(store
            .add_entry(NewFoodEntry {
                name: "  ".into(),
                ..snack(10.0)
            })
            .is_err());
        assert_eq!(store.entries().len(), 2);
    }

    #[test]
    fn analyzed_food_goes_to_selected_meal() {
        let mut log = FoodLog::default();
        log.select_meal(MealSlot::Dinner);
        let entry = log.log_analyzed(&AnalyzedFood::grilled_salmon()).unwrap();
        assert_eq!(entry.meal, MealSlot::Dinner);
        assert_eq!(entry.calories, 385.0);
        assert_eq!(log.store.total_calories(Some(MealSlot::Dinner)), 385.0);
    }
}
