use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdviceCategory {
    Nutrition,
    Hydration,
    Timing,
    Personal,
    Other,
}

impl AdviceCategory {
    pub fn label(self) -> &'static str {
        match self {
            AdviceCategory::Nutrition => "Nutrition",
            AdviceCategory::Hydration => "Hydration",
            AdviceCategory::Timing => "Timing",
            AdviceCategory::Personal => "Personal",
            AdviceCategory::Other => "Other",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AdviceCategory::Nutrition => "🥗",
            AdviceCategory::Hydration => "💧",
            AdviceCategory::Timing => "⏰",
            AdviceCategory::Personal => "👤",
            AdviceCategory::Other => "💬",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdviceEntry {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub category: AdviceCategory,
    pub timestamp_label: String,
}

/// Advice produced for a question, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftAdvice {
    pub title: String,
    pub body: String,
    pub category: AdviceCategory,
}

pub const QUICK_QUESTIONS: [&str; 4] = [
    "What are healthy snacks?",
    "How do I calculate my calorie needs?",
    "Which supplements do I need?",
    "How do I plan my meals?",
];
