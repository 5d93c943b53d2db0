use tracing::{info, warn};
use uuid::Uuid;

use super::analyzer::analyze_with_retry;
use super::model::{AnalyzedFood, ApiKey};
use super::session::{AnalysisOutcome, AnalysisTicket};
use crate::error::{AppError, AppResult};
use crate::food::FoodEntry;
use crate::state::AppState;

#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalysisReport {
    pub job_id: Uuid,
    pub food: AnalyzedFood,
    pub entry: FoodEntry,
    pub message: String,
}

/// Runs one analysis of the selected image and logs the result into the
/// selected meal. Selecting another image while this runs cancels it.
///
/// The job runs on its own task, so it reaches a final state even when the
/// caller stops waiting.
pub async fn run_analysis(state: &AppState, credential: ApiKey) -> AppResult<AnalysisReport> {
    if credential.is_blank() {
        return Err(AppError::MissingInput("credential"));
    }

    let ticket = state.photo.lock().await.begin()?;
    info!(job_id = %ticket.job_id, image = ?ticket.image, "photo analysis started");

    let job = tokio::spawn(complete(state.clone(), ticket, credential));
    job.await?
}

async fn complete(
    state: AppState,
    ticket: AnalysisTicket,
    credential: ApiKey,
) -> AppResult<AnalysisReport> {
    let job_id = ticket.job_id;
    let result = tokio::select! {
        res = analyze_with_retry(
            state.analyzer.as_ref(),
            &ticket.image,
            &credential,
            &state.config.analysis,
        ) => res,
        _ = ticket.cancelled => Err(AppError::AnalysisCancelled),
    };

    let mut photo = state.photo.lock().await;
    if !photo.is_current(job_id) {
        info!(%job_id, "analysis result discarded; job was superseded");
        return Err(AppError::AnalysisCancelled);
    }

    let logged = match result {
        Ok(food) => {
            let entry = state.food.write().await.log_analyzed(&food).cloned();
            entry.map(|entry| (food, entry))
        }
        Err(err) => Err(err),
    };

    match logged {
        Ok((food, entry)) => {
            photo.finish(
                job_id,
                AnalysisOutcome::Completed {
                    job_id,
                    food: food.clone(),
                    entry_id: entry.id,
                },
            );
            let message = format!(
                "{} detected with {}% confidence",
                food.name,
                food.confidence_percent()
            );
            info!(%job_id, entry_id = entry.id, confidence = food.confidence, "photo analysis completed");
            Ok(AnalysisReport {
                job_id,
                food,
                entry,
                message,
            })
        }
        Err(err) => {
            warn!(%job_id, error = %err, "photo analysis failed");
            photo.finish(
                job_id,
                AnalysisOutcome::Failed {
                    job_id,
                    message: err.to_string(),
                    unavailable: matches!(err, AppError::AnalysisUnavailable { .. }),
                },
            );
            Err(err)
        }
    }
}
