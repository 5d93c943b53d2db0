use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::model::{AdviceCategory, AdviceEntry, DraftAdvice};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Answers a nutrition question.
#[async_trait]
pub trait AdviceGenerator: Send + Sync {
    async fn answer(&self, question: &str) -> AppResult<DraftAdvice>;
}

/// Fills a fixed template after a fixed delay. No language understanding.
#[derive(Debug, Clone)]
pub struct TemplateAdvisor {
    delay: Duration,
}

impl TemplateAdvisor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AdviceGenerator for TemplateAdvisor {
    async fn answer(&self, question: &str) -> AppResult<DraftAdvice> {
        tokio::time::sleep(self.delay).await;
        Ok(DraftAdvice {
            title: "Personal advice".into(),
            body: format!(
                "Based on your question \"{question}\", I recommend adjusting your eating \
                 pattern gradually. Focus on small, sustainable changes that fit your lifestyle."
            ),
            category: AdviceCategory::Personal,
        })
    }
}

/// Advice history, most recent first.
#[derive(Debug, Clone)]
pub struct AdviceStore {
    entries: Vec<AdviceEntry>,
    next_id: u64,
    pending_question: String,
    in_flight: usize,
}

impl Default for AdviceStore {
    fn default() -> Self {
        let entries = vec![
            AdviceEntry {
                id: 1,
                title: "Optimize your protein intake".into(),
                body: "Based on your current eating pattern I recommend adding more lean \
                       protein. Aim for 20-30g of protein per meal for muscle retention and satiety."
                    .into(),
                category: AdviceCategory::Nutrition,
                timestamp_label: "2 hours ago".into(),
            },
            AdviceEntry {
                id: 2,
                title: "Improve your hydration".into(),
                body: "Your calorie balance looks good, but remember to drink enough water. \
                       Aim for 2-3 liters a day, especially since you are active."
                    .into(),
                category: AdviceCategory::Hydration,
                timestamp_label: "5 hours ago".into(),
            },
            AdviceEntry {
                id: 3,
                title: "Carbohydrate timing".into(),
                body: "Consider eating complex carbohydrates mainly around your workouts for \
                       a better energy distribution throughout the day."
                    .into(),
                category: AdviceCategory::Timing,
                timestamp_label: "1 day ago".into(),
            },
        ];
        Self {
            next_id: entries.len() as u64 + 1,
            entries,
            pending_question: String::new(),
            in_flight: 0,
        }
    }
}

impl AdviceStore {
    pub fn entries(&self) -> &[AdviceEntry] {
        &self.entries
    }

    pub fn pending_question(&self) -> &str {
        &self.pending_question
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.pending_question = question.into();
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Picks the question to ask: the explicit one, or the pending one.
    /// Blank questions are rejected.
    pub fn resolve_question(&self, explicit: Option<&str>) -> AppResult<String> {
        let question = explicit.unwrap_or(self.pending_question.as_str());
        if question.trim().is_empty() {
            return Err(AppError::EmptyQuestion);
        }
        Ok(question.to_string())
    }

    fn start(&mut self) {
        self.in_flight += 1;
    }

    fn abort(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Prepends a new entry and clears the pending question.
    pub fn record(&mut self, draft: DraftAdvice) -> &AdviceEntry {
        self.in_flight = self.in_flight.saturating_sub(1);
        let entry = AdviceEntry {
            id: self.next_id,
            title: draft.title,
            body: draft.body,
            category: draft.category,
            timestamp_label: "just now".into(),
        };
        self.next_id += 1;
        self.entries.insert(0, entry);
        self.pending_question.clear();
        &self.entries[0]
    }
}

/// Validates the question, waits for the generator without holding the store
/// lock, then prepends the answer.
///
/// The answer is produced on its own task so the loading flag is always
/// cleared, even when the caller stops waiting.
pub async fn ask(state: &AppState, question: Option<&str>) -> AppResult<AdviceEntry> {
    let question = {
        let mut store = state.advice.write().await;
        let question = store.resolve_question(question)?;
        store.start();
        question
    };
    debug!(len = question.len(), "advice question submitted");

    let job = tokio::spawn(answer(state.clone(), question));
    job.await?
}

async fn answer(state: AppState, question: String) -> AppResult<AdviceEntry> {
    match state.advisor.answer(&question).await {
        Ok(draft) => {
            let mut store = state.advice.write().await;
            let entry = store.record(draft).clone();
            info!(id = entry.id, category = ?entry.category, "advice added");
            Ok(entry)
        }
        Err(err) => {
            state.advice.write().await.abort();
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_with_three_entries() {
        let store = AdviceStore::default();
        assert_eq!(store.entries().len(), 3);
        assert_eq!(store.entries()[0].category, AdviceCategory::Nutrition);
        assert!(!store.is_loading());
    }

    #[test]
    fn blank_question_is_rejected() {
        let mut store = AdviceStore::default();
        assert!(matches!(store.resolve_question(Some("")), Err(AppError::EmptyQuestion)));
        assert!(matches!(
            store.resolve_question(Some(" \t\n ")),
            Err(AppError::EmptyQuestion)
        ));
        // Falls back to the pending question, which is empty too.
        assert!(store.resolve_question(None).unwrap_err().is_validation());

        store.set_question("Wat zijn gezonde snacks?");
        assert_eq!(store.resolve_question(None).unwrap(), "Wat zijn gezonde snacks?");
    }

    #[tokio::test]
    async fn ask_prepends_personal_entry_with_verbatim_question() {
        let state = AppState::fake();
        let question = "Hoe kan ik meer eiwitten eten?";
        state.advice.write().await.set_question(question);

        let entry = ask(&state, Some(question)).await.unwrap();

        let store = state.advice.read().await;
        assert_eq!(store.entries().len(), 4);
        assert_eq!(store.entries()[0], entry);
        assert_eq!(entry.category, AdviceCategory::Personal);
        assert_eq!(entry.timestamp_label, "just now");
        assert!(entry.body.contains(question));
        assert_eq!(store.entries()[1].id, 1);
        assert_eq!(store.pending_question(), "");
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn ask_with_whitespace_leaves_store_unchanged() {
        let state = AppState::fake();
        let before = state.advice.read().await.entries().to_vec();

        let err = ask(&state, Some("   ")).await.unwrap_err();
        assert!(err.is_validation());

        let store = state.advice.read().await;
        assert_eq!(store.entries(), before.as_slice());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn new_entries_get_fresh_ids() {
        let state = AppState::fake();
        let a = ask(&state, Some("one")).await.unwrap();
        let b = ask(&state, Some("two")).await.unwrap();
        assert_eq!((a.id, b.id), (4, 5));
        assert_eq!(state.advice.read().await.entries()[0].id, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn template_advisor_waits_for_its_delay() {
        let advisor = TemplateAdvisor::new(Duration::from_secs(2));
        let start = tokio::time::Instant::now();
        let draft = advisor.answer("snacks?").await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert_eq!(draft.title, "Personal advice");
    }

    #[tokio::test(start_paused = true)]
    async fn loading_clears_after_caller_goes_away() {
        let mut state = AppState::fake();
        state.advisor = std::sync::Arc::new(TemplateAdvisor::new(Duration::from_secs(2)));

        let runner = {
            let state = state.clone();
            tokio::spawn(async move { ask(&state, Some("snacks?")).await })
        };
        while !state.advice.read().await.is_loading() {
            tokio::task::yield_now().await;
        }
        runner.abort();
        tokio::time::sleep(Duration::from_secs(5)).await;

        let store = state.advice.read().await;
        assert!(!store.is_loading());
        assert_eq!(store.entries().len(), 4);
        assert!(store.entries()[0].body.contains("snacks?"));
    }
}
