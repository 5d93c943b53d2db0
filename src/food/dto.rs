use serde::{Deserialize, Serialize};

use super::model::{FoodEntry, MealSlot, NutritionTotals};

/// Manual add; the meal defaults to the selected one.
#[derive(Debug, Deserialize)]
pub struct AddFoodRequest {
    pub name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    #[serde(default)]
    pub portion: String,
    #[serde(default)]
    pub meal: Option<MealSlot>,
}

#[derive(Debug, Deserialize)]
pub struct SelectMealRequest {
    pub meal: MealSlot,
}

#[derive(Debug, Serialize)]
pub struct MealEntriesResponse {
    pub meal: MealSlot,
    pub entries: Vec<FoodEntry>,
    pub totals: NutritionTotals,
}
