use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::errors::{MissingField, SubmitError};
use crate::models::{new_report_id, DraftReport, Report};
use crate::store::ReportStore;
use crate::upload::ImageUpload;

/// Submission phases. A failed attempt (validation or upload) surfaces as the
/// `SubmitError` returned by `submit`; the machine then rests at `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Uploading,
    Persisting,
    Done,
}

/// Drives one draft through validate → upload → persist. Steps are strictly
/// sequential; there is no cancellation once submit starts.
pub struct SubmissionPipeline<U, S> {
    uploader: U,
    store: S,
    in_flight: AtomicBool,
    state: Mutex<SubmitState>,
}

impl<U: ImageUpload, S: ReportStore> SubmissionPipeline<U, S> {
    pub fn new(uploader: U, store: S) -> Self {
        Self {
            uploader,
            store,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(SubmitState::Idle),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state.lock().map(|s| *s).unwrap_or(SubmitState::Idle)
    }

    fn set_state(&self, next: SubmitState) {
        if let Ok(mut state) = self.state.lock() {
            *state = next;
        }
    }

    /// Submits a draft. The draft is only read, so a failed attempt leaves
    /// every field in place and the user can resubmit as-is. A second submit
    /// while one is in flight is rejected outright.
    pub async fn submit(&self, draft: &DraftReport) -> Result<Report, SubmitError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SubmitError::InFlight);
        }
        self.set_state(SubmitState::Idle);

        let result = self.run(draft).await;
        match &result {
            Ok(report) => {
                tracing::info!("report {} persisted", report.id);
                self.set_state(SubmitState::Done);
            }
            Err(e) => {
                tracing::warn!("submission failed: {:#}", e);
                // Failure is signaled through the returned error; the machine
                // rests at Idle with the draft intact for a manual retry.
                self.set_state(SubmitState::Idle);
            }
        }

        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn run(&self, draft: &DraftReport) -> Result<Report, SubmitError> {
        self.set_state(SubmitState::Validating);
        if draft.description.trim().is_empty() {
            return Err(SubmitError::IncompleteForm(MissingField::Description));
        }
        let coordinates = draft
            .coordinates
            .ok_or(SubmitError::IncompleteForm(MissingField::Coordinates))?;
        let image = draft
            .image
            .as_ref()
            .ok_or(SubmitError::IncompleteForm(MissingField::Image))?;

        self.set_state(SubmitState::Uploading);
        let image_url = self.uploader.upload(image).await?;

        self.set_state(SubmitState::Persisting);
        let report = Report {
            id: new_report_id(),
            description: draft.description.clone(),
            location: coordinates.to_location_string(),
            current_location: draft.resolved_address.clone(),
            image_url,
        };
        self.store.add(report.clone()).await?;

        Ok(report)
    }
}
