use serde::Serialize;

use crate::advice::model::QUICK_QUESTIONS;
use crate::advice::{AdviceEntry, AdviceStore};

#[derive(Debug, Clone, Serialize)]
pub struct AdviceCard {
    #[serde(flatten)]
    pub entry: AdviceEntry,
    pub category_label: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdviceView {
    pub entries: Vec<AdviceCard>,
    pub pending_question: String,
    pub loading: bool,
    pub suggestions: Vec<&'static str>,
}

pub fn render(store: &AdviceStore) -> AdviceView {
    AdviceView {
        entries: store
            .entries()
            .iter()
            .map(|e| AdviceCard {
                category_label: e.category.label(),
                icon: e.category.icon(),
                entry: e.clone(),
            })
            .collect(),
        pending_question: store.pending_question().to_string(),
        loading: store.is_loading(),
        suggestions: QUICK_QUESTIONS.to_vec(),
    }
}
