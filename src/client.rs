use crate::api::{
    CreateEventRequest, EventResults, FinalizeRequest, PollApi, SubmitResponseRequest,
};
use crate::error::PollError;
use crate::event::{Event, SlotId};
use crate::form::EventForm;
use crate::response::ResponseDraft;
use log::{error, info, warn};
use std::convert::TryFrom;

/// Runs the page-level flows against a backend. Every call is a single
/// request: no retries, no de-duplication of repeated clicks.
#[derive(Debug, Clone)]
pub struct PollClient<A> {
    api: A,
}

impl<A: PollApi> PollClient<A> {
    pub fn new(api: A) -> PollClient<A> {
        PollClient { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Sends the host's form and returns the new event id.
    pub fn create_event(&self, form: &EventForm) -> Result<String, PollError> {
        let request = CreateEventRequest::try_from(form)?;

        let created = self.api.create_event(&request).map_err(|err| {
            error!("Error creating event {:?}: {}", request.name, err);
            err
        })?;

        info!(
            "Created event {} with {} dates",
            created.id,
            request.dates.len()
        );
        Ok(created.id)
    }

    pub fn load_event(&self, event_id: &str) -> Result<Event, PollError> {
        let dto = self.api.get_event(event_id).map_err(|err| {
            error!("Error loading event {}: {}", event_id, err);
            err
        })?;

        Ok(Event::try_from(&dto)?)
    }

    pub fn submit_response(&self, event: &Event, draft: &ResponseDraft) -> Result<(), PollError> {
        let request = SubmitResponseRequest::new(draft, event)?;

        self.api
            .submit_response(&event.id, &request)
            .map_err(|err| {
                error!("Error submitting response to {}: {}", event.id, err);
                err
            })?;

        info!(
            "Submitted {} answers to event {}",
            request.responses.len(),
            event.id
        );
        Ok(())
    }

    /// Fetches results. Summaries are always recomputed locally; a backend
    /// summary that disagrees is logged, not trusted.
    pub fn load_results(&self, event_id: &str) -> Result<EventResults, PollError> {
        let dto = self.api.get_results(event_id).map_err(|err| {
            error!("Error loading results for {}: {}", event_id, err);
            err
        })?;

        let results = EventResults::try_from(&dto)?;

        let mismatches = results.mismatches();
        if !mismatches.is_empty() {
            warn!(
                "Backend summary for event {} disagrees on slots {:?}",
                event_id, mismatches
            );
        }

        Ok(results)
    }

    /// Locks in `slot_id`, only if the results allow it.
    pub fn finalize(&self, results: &EventResults, slot_id: SlotId) -> Result<(), PollError> {
        results.aggregator().check_finalize(slot_id)?;

        let event_id = &results.event.id;
        self.api
            .finalize(
                event_id,
                &FinalizeRequest {
                    event_date_id: slot_id,
                },
            )
            .map_err(|err| {
                error!("Error finalizing {} on slot {}: {}", event_id, slot_id, err);
                err
            })?;

        info!("Finalized event {} on slot {}", event_id, slot_id);
        Ok(())
    }
}
