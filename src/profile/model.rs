use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(AppError::Validation(format!(
                "sex must be 'male' or 'female', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ActivityLevel {
    /// Multiplier applied to the basal metabolic rate.
    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Low => 1.2,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::High => 1.725,
            ActivityLevel::VeryHigh => 1.9,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ActivityLevel::Low),
            "moderate" => Ok(ActivityLevel::Moderate),
            "high" => Ok(ActivityLevel::High),
            "very-high" | "very_high" => Ok(ActivityLevel::VeryHigh),
            other => Err(AppError::Validation(format!(
                "activity level must be one of low, moderate, high, very-high; got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub sex: Sex,
    pub height_cm: u32,
    pub current_weight_kg: f64,
    pub goal_weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub diet_type: String,
    pub allergies: String,
    pub goals: Vec<String>,
}

impl Profile {
    pub fn seed() -> Self {
        Self {
            name: "Jan Jansen".into(),
            email: "jan.jansen@email.com".into(),
            age: 28,
            sex: Sex::Male,
            height_cm: 175,
            current_weight_kg: 73.2,
            goal_weight_kg: 70.0,
            activity_level: ActivityLevel::Moderate,
            diet_type: "general".into(),
            allergies: "None".into(),
            goals: vec!["Weight loss".into(), "Muscle gain".into()],
        }
    }

    /// Checks every field; used before a full replacement.
    pub fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)?;
        validate_height(self.height_cm)?;
        validate_weight("current_weight_kg", self.current_weight_kg)?;
        validate_weight("goal_weight_kg", self.goal_weight_kg)?;
        Ok(())
    }

    /// Body mass index rounded to one decimal.
    pub fn bmi(&self) -> AppResult<f64> {
        if self.height_cm == 0 {
            return Err(AppError::DivideByZero("bmi"));
        }
        let height_m = f64::from(self.height_cm) / 100.0;
        let bmi = self.current_weight_kg / (height_m * height_m);
        Ok((bmi * 10.0).round() / 10.0)
    }

    /// Harris-Benedict basal metabolic rate in kcal/day.
    pub fn bmr(&self) -> f64 {
        let weight = self.current_weight_kg;
        let height = f64::from(self.height_cm);
        let age = f64::from(self.age);
        match self.sex {
            Sex::Male => 88.362 + 13.397 * weight + 4.799 * height - 5.677 * age,
            Sex::Female => 447.593 + 9.247 * weight + 3.098 * height - 4.330 * age,
        }
    }

    pub fn daily_calorie_target(&self) -> i64 {
        (self.bmr() * self.activity_level.factor()).round() as i64
    }

    /// Share of the way from `baseline_kg` to the goal weight that is still left,
    /// as a percentage.
    pub fn goal_progress_percent(&self, baseline_kg: f64) -> AppResult<f64> {
        let span = baseline_kg - self.goal_weight_kg;
        if span == 0.0 {
            return Err(AppError::DivideByZero("goal progress"));
        }
        Ok((self.current_weight_kg - self.goal_weight_kg) / span * 100.0)
    }

    pub fn apply(&mut self, update: ProfileUpdate) -> AppResult<()> {
        update.validate()?;
        match update {
            ProfileUpdate::Name(v) => self.name = v,
            ProfileUpdate::Email(v) => self.email = v,
            ProfileUpdate::Age(v) => self.age = v,
            ProfileUpdate::Sex(v) => self.sex = v,
            ProfileUpdate::HeightCm(v) => self.height_cm = v,
            ProfileUpdate::CurrentWeightKg(v) => self.current_weight_kg = v,
            ProfileUpdate::GoalWeightKg(v) => self.goal_weight_kg = v,
            ProfileUpdate::ActivityLevel(v) => self.activity_level = v,
            ProfileUpdate::DietType(v) => self.diet_type = v,
            ProfileUpdate::Allergies(v) => self.allergies = v,
            ProfileUpdate::Goals(v) => self.goals = v,
        }
        Ok(())
    }
}

/// A single-field edit of the profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProfileUpdate {
    Name(String),
    Email(String),
    Age(u32),
    Sex(Sex),
    HeightCm(u32),
    CurrentWeightKg(f64),
    GoalWeightKg(f64),
    ActivityLevel(ActivityLevel),
    DietType(String),
    Allergies(String),
    Goals(Vec<String>),
}

impl ProfileUpdate {
    /// Builds a typed update from a raw form value.
    ///
    /// Goals are given as a comma separated list.
    pub fn parse(field: &str, raw: &str) -> AppResult<Self> {
        let update = match field {
            "name" => ProfileUpdate::Name(raw.trim().to_string()),
            "email" => ProfileUpdate::Email(raw.trim().to_lowercase()),
            "age" => ProfileUpdate::Age(parse_integer(field, raw)?),
            "sex" => ProfileUpdate::Sex(raw.parse()?),
            "height_cm" => ProfileUpdate::HeightCm(parse_integer(field, raw)?),
            "current_weight_kg" => ProfileUpdate::CurrentWeightKg(parse_decimal(field, raw)?),
            "goal_weight_kg" => ProfileUpdate::GoalWeightKg(parse_decimal(field, raw)?),
            "activity_level" => ProfileUpdate::ActivityLevel(raw.parse()?),
            "diet_type" => ProfileUpdate::DietType(raw.trim().to_string()),
            "allergies" => ProfileUpdate::Allergies(raw.trim().to_string()),
            "goals" => ProfileUpdate::Goals(
                raw.split(',')
                    .map(str::trim)
                    .filter(|g| !g.is_empty())
                    .map(String::from)
                    .collect(),
            ),
            other => {
                return Err(AppError::Validation(format!("unknown profile field '{other}'")))
            }
        };
        update.validate()?;
        Ok(update)
    }

    pub fn validate(&self) -> AppResult<()> {
        match self {
            ProfileUpdate::Email(v) => validate_email(v),
            ProfileUpdate::HeightCm(v) => validate_height(*v),
            ProfileUpdate::CurrentWeightKg(v) => validate_weight("current_weight_kg", *v),
            ProfileUpdate::GoalWeightKg(v) => validate_weight("goal_weight_kg", *v),
            _ => Ok(()),
        }
    }
}

fn parse_integer(field: &str, raw: &str) -> AppResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| AppError::Validation(format!("{field} must be a whole number, got '{raw}'")))
}

fn parse_decimal(field: &str, raw: &str) -> AppResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| AppError::Validation(format!("{field} must be a number, got '{raw}'")))
}

fn validate_height(height_cm: u32) -> AppResult<()> {
    if height_cm == 0 {
        return Err(AppError::Validation("height_cm must be positive".into()));
    }
    Ok(())
}

fn validate_weight(field: &str, kg: f64) -> AppResult<()> {
    if !(kg.is_finite() && kg > 0.0) {
        return Err(AppError::Validation(format!("{field} must be positive")));
    }
    Ok(())
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn validate_email(email: &str) -> AppResult<()> {
    if !is_valid_email(email) {
        return Err(AppError::Validation("Invalid email".into()));
    }
    Ok(())
}
