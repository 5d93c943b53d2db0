use std::ops::AddAssign;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snacks,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snacks => "Snacks",
        }
    }
}

impl FromStr for MealSlot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snacks" => Ok(MealSlot::Snacks),
            other => Err(AppError::Validation(format!("unknown meal '{other}'"))),
        }
    }
}

/// A logged food item.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FoodEntry {
    pub id: u64,
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub portion: String,
    pub meal: MealSlot,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

/// Input for a new entry; the store assigns the id.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewFoodEntry {
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
    pub meal: MealSlot,
}

impl NewFoodEntry {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("food name must not be empty".into()));
        }
        for (field, value) in [
            ("calories", self.calories),
            ("protein_g", self.protein_g),
            ("carbs_g", self.carbs_g),
            ("fat_g", self.fat_g),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(AppError::Validation(format!(
                    "{field} must be a non-negative number"
                )));
            }
        }
        Ok(())
    }
}

/// Calorie and macro sums over a set of entries.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl AddAssign<&FoodEntry> for NutritionTotals {
    fn add_assign(&mut self, e: &FoodEntry) {
        self.calories += e.calories;
        self.protein_g += e.protein_g;
        self.carbs_g += e.carbs_g;
        self.fat_g += e.fat_g;
    }
}

impl<'a> FromIterator<&'a FoodEntry> for NutritionTotals {
    fn from_iter<I: IntoIterator<Item = &'a FoodEntry>>(iter: I) -> Self {
        let mut totals = NutritionTotals::default();
        for e in iter {
            totals += e;
        }
        totals
    }
}
