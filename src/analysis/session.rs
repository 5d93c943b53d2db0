use serde::Serialize;
use tokio::sync::oneshot;
use tracing::info;
use uuid::Uuid;

use super::model::{AnalyzedFood, ImageInfo, ImageUpload};
use crate::error::{AppError, AppResult};

enum Phase {
    Idle,
    ImageSelected(ImageUpload),
    Analyzing {
        job_id: Uuid,
        image: ImageUpload,
        cancel: oneshot::Sender<()>,
    },
}

/// How the most recent analysis ended.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Completed {
        job_id: Uuid,
        food: AnalyzedFood,
        entry_id: u64,
    },
    Failed {
        job_id: Uuid,
        message: String,
        unavailable: bool,
    },
    Cancelled {
        job_id: Uuid,
    },
}

/// Handed to the caller that runs an analysis job.
pub struct AnalysisTicket {
    pub job_id: Uuid,
    pub image: ImageUpload,
    /// Resolves when the job is abandoned.
    pub cancelled: oneshot::Receiver<()>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Idle,
    ImageSelected,
    Analyzing,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisStatus {
    pub state: PhaseKind,
    pub image: Option<ImageInfo>,
    pub job_id: Option<Uuid>,
    pub last_outcome: Option<AnalysisOutcome>,
}

/// Photo analysis state machine:
/// `Idle -> ImageSelected -> Analyzing -> Idle` (with a result or an error).
pub struct PhotoAnalysisSession {
    phase: Phase,
    last_outcome: Option<AnalysisOutcome>,
}

impl Default for PhotoAnalysisSession {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            last_outcome: None,
        }
    }
}

impl PhotoAnalysisSession {
    /// Picks a new image. An analysis still running is abandoned.
    pub fn select_image(&mut self, image: ImageUpload) -> Option<Uuid> {
        let cancelled = self.abandon();
        info!(image = ?image, "image selected");
        self.phase = Phase::ImageSelected(image);
        cancelled
    }

    pub fn clear_image(&mut self) -> Option<Uuid> {
        let cancelled = self.abandon();
        self.phase = Phase::Idle;
        cancelled
    }

    fn abandon(&mut self) -> Option<Uuid> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Analyzing { job_id, cancel, .. } => {
                let _ = cancel.send(());
                info!(%job_id, "analysis cancelled");
                self.last_outcome = Some(AnalysisOutcome::Cancelled { job_id });
                Some(job_id)
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Moves the selected image into the analyzing phase.
    pub fn begin(&mut self) -> AppResult<AnalysisTicket> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::ImageSelected(image) => {
                let job_id = Uuid::new_v4();
                let (cancel, cancelled) = oneshot::channel();
                self.phase = Phase::Analyzing {
                    job_id,
                    image: image.clone(),
                    cancel,
                };
                Ok(AnalysisTicket {
                    job_id,
                    image,
                    cancelled,
                })
            }
            analyzing @ Phase::Analyzing { .. } => {
                self.phase = analyzing;
                Err(AppError::AnalysisInProgress)
            }
            Phase::Idle => Err(AppError::MissingInput("image")),
        }
    }

    pub fn is_current(&self, job_id: Uuid) -> bool {
        matches!(&self.phase, Phase::Analyzing { job_id: current, .. } if *current == job_id)
    }

    /// Ends the given job and clears the image. Returns false when the job was
    /// already superseded, in which case nothing changes.
    pub fn finish(&mut self, job_id: Uuid, outcome: AnalysisOutcome) -> bool {
        if !self.is_current(job_id) {
            return false;
        }
        self.phase = Phase::Idle;
        self.last_outcome = Some(outcome);
        true
    }

    pub fn status(&self) -> AnalysisStatus {
        let (state, image, job_id) = match &self.phase {
            Phase::Idle => (PhaseKind::Idle, None, None),
            Phase::ImageSelected(image) => (PhaseKind::ImageSelected, Some(image.info()), None),
            Phase::Analyzing { job_id, image, .. } => {
                (PhaseKind::Analyzing, Some(image.info()), Some(*job_id))
            }
        };
        AnalysisStatus {
            state,
            image,
            job_id,
            last_outcome: self.last_outcome.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn image(name: &str) -> ImageUpload {
        ImageUpload::new(Bytes::from_static(b"jpeg"), "image/jpeg", Some(name.into())).unwrap()
    }

    #[test]
    fn begin_requires_an_image() {
        let mut s = PhotoAnalysisSession::default();
        assert!(matches!(s.begin(), Err(AppError::MissingInput("image"))));
        assert_eq!(s.status().state, PhaseKind::Idle);
    }

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut s = PhotoAnalysisSession::default();
        s.select_image(image("lunch.jpg"));
        assert_eq!(s.status().state, PhaseKind::ImageSelected);

        let ticket = s.begin().unwrap();
        assert_eq!(s.status().state, PhaseKind::Analyzing);
        assert!(matches!(s.begin(), Err(AppError::AnalysisInProgress)));

        let outcome = AnalysisOutcome::Completed {
            job_id: ticket.job_id,
            food: AnalyzedFood::grilled_salmon(),
            entry_id: 3,
        };
        assert!(s.finish(ticket.job_id, outcome.clone()));

        let status = s.status();
        assert_eq!(status.state, PhaseKind::Idle);
        assert!(status.image.is_none());
        assert_eq!(status.last_outcome, Some(outcome));
    }

    #[test]
    fn new_image_cancels_running_analysis() {
        let mut s = PhotoAnalysisSession::default();
        s.select_image(image("first.jpg"));
        let mut ticket = s.begin().unwrap();

        let cancelled = s.select_image(image("second.jpg"));
        assert_eq!(cancelled, Some(ticket.job_id));
        assert!(ticket.cancelled.try_recv().is_ok());

        let status = s.status();
        assert_eq!(status.state, PhaseKind::ImageSelected);
        assert_eq!(status.image.unwrap().file_name.as_deref(), Some("second.jpg"));

        // The stale job can no longer finish.
        let late = AnalysisOutcome::Failed {
            job_id: ticket.job_id,
            message: "late".into(),
            unavailable: false,
        };
        assert!(!s.finish(ticket.job_id, late));
        assert_eq!(
            s.status().last_outcome,
            Some(AnalysisOutcome::Cancelled {
                job_id: ticket.job_id
            })
        );
    }

    #[test]
    fn clear_image_goes_back_to_idle() {
        let mut s = PhotoAnalysisSession::default();
        s.select_image(image("a.jpg"));
        assert_eq!(s.clear_image(), None);
        assert_eq!(s.status().state, PhaseKind::Idle);
    }
}
