//! The backend's JSON contract and the trait the client talks through.

use crate::error::{PollError, ValidationError};
use crate::event::{Event, EventSlot, Slot, SlotId};
use crate::form::EventForm;
use crate::respondent::Respondent;
use crate::response::ResponseDraft;
use crate::results::{ResultsAggregator, SlotSummary};
use crate::time::{parse_stored_date, TimeRange};
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::convert::TryFrom;

/// The backend writes an empty list as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDateRequest {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl From<&Slot> for CreateDateRequest {
    fn from(slot: &Slot) -> Self {
        CreateDateRequest {
            date: slot.date.to_string(),
            start_time: slot.start().to_string(),
            end_time: slot.end().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub dates: Vec<CreateDateRequest>,
}

impl TryFrom<&EventForm> for CreateEventRequest {
    type Error = ValidationError;

    /// Slots are sent in date order.
    fn try_from(form: &EventForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(CreateEventRequest {
            name: form.name().trim().to_string(),
            dates: form
                .slots()
                .sorted()
                .into_iter()
                .map(CreateDateRequest::from)
                .collect(),
        })
    }
}

/// The backend answers a create with the whole event; only the id matters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedEvent {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDateDto {
    pub id: SlotId,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl TryFrom<&EventDateDto> for EventSlot {
    type Error = ValidationError;

    fn try_from(dto: &EventDateDto) -> Result<Self, Self::Error> {
        let date = parse_stored_date(&dto.date)?;
        let time = TimeRange::parse(&dto.start_time, &dto.end_time)?;
        Ok(EventSlot::new(dto.id, Slot::new(date, time)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDto {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dates: Vec<EventDateDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalized_date_id: Option<SlotId>,
}

impl TryFrom<&EventDto> for Event {
    type Error = ValidationError;

    fn try_from(dto: &EventDto) -> Result<Self, Self::Error> {
        Ok(Event {
            id: dto.id.clone(),
            name: dto.name.clone(),
            slots: dto
                .dates
                .iter()
                .map(EventSlot::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            finalized: dto.finalized_date_id,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseDto {
    pub event_date_id: SlotId,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentDto {
    pub id: u32,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub responses: Vec<ResponseDto>,
}

impl From<&RespondentDto> for Respondent {
    fn from(dto: &RespondentDto) -> Self {
        Respondent::new(
            dto.id,
            &dto.name,
            dto.responses
                .iter()
                .map(|response| (response.event_date_id, response.available)),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponseRequest {
    pub name: String,
    pub responses: Vec<ResponseDto>,
}

impl SubmitResponseRequest {
    /// Builds the submission for `draft`, refusing anything the backend
    /// should never see.
    pub fn new(draft: &ResponseDraft, event: &Event) -> Result<Self, ValidationError> {
        draft.validate(event)?;

        Ok(SubmitResponseRequest {
            name: draft.name().trim().to_string(),
            responses: draft
                .answers()
                .iter()
                .map(|(&event_date_id, &available)| ResponseDto {
                    event_date_id,
                    available,
                })
                .collect(),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeRequest {
    pub event_date_id: SlotId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummaryDto {
    pub event_date_id: SlotId,
    pub available_count: u32,
    pub unavailable_count: u32,
    /// The backend sends `null` rather than `[]` when nobody is available.
    #[serde(default)]
    pub available_names: Option<Vec<String>>,
}

impl From<&SlotSummaryDto> for SlotSummary {
    fn from(dto: &SlotSummaryDto) -> Self {
        SlotSummary {
            slot_id: dto.event_date_id,
            available_count: dto.available_count,
            unavailable_count: dto.unavailable_count,
            available_names: dto.available_names.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResultsDto {
    pub event: EventDto,
    #[serde(default, deserialize_with = "null_as_default")]
    pub respondents: Vec<RespondentDto>,
    /// Keyed by the slot id as a string. Entries are re-keyed by their
    /// `event_date_id` when parsed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: HashMap<String, SlotSummaryDto>,
}

/// A poll's results, parsed into domain types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventResults {
    pub event: Event,
    pub respondents: Vec<Respondent>,
    /// What the backend computed, kept for comparison.
    pub reported: HashMap<SlotId, SlotSummary>,
}

impl TryFrom<&EventResultsDto> for EventResults {
    type Error = ValidationError;

    fn try_from(dto: &EventResultsDto) -> Result<Self, Self::Error> {
        Ok(EventResults {
            event: Event::try_from(&dto.event)?,
            respondents: dto.respondents.iter().map(Respondent::from).collect(),
            reported: dto
                .summary
                .values()
                .map(|summary| (summary.event_date_id, SlotSummary::from(summary)))
                .collect(),
        })
    }
}

impl EventResults {
    pub fn aggregator(&self) -> ResultsAggregator<'_> {
        ResultsAggregator::for_event(&self.event, &self.respondents)
    }

    /// Slot ids whose reported summary disagrees with a recount, ascending.
    pub fn mismatches(&self) -> Vec<SlotId> {
        self.aggregator()
            .mismatches(&self.reported)
            .into_iter()
            .sorted()
            .collect()
    }
}

/// The five backend calls. Implementations map a missing event to
/// `PollError::NotFound` and every other failure to `PollError::Network`.
pub trait PollApi {
    fn create_event(&self, request: &CreateEventRequest) -> Result<CreatedEvent, PollError>;

    fn get_event(&self, event_id: &str) -> Result<EventDto, PollError>;

    fn submit_response(
        &self,
        event_id: &str,
        request: &SubmitResponseRequest,
    ) -> Result<(), PollError>;

    fn get_results(&self, event_id: &str) -> Result<EventResultsDto, PollError>;

    fn finalize(&self, event_id: &str, request: &FinalizeRequest) -> Result<(), PollError>;
}

impl<T> PollApi for &T
where
    T: PollApi + ?Sized,
{
    fn create_event(&self, request: &CreateEventRequest) -> Result<CreatedEvent, PollError> {
        (**self).create_event(request)
    }

    fn get_event(&self, event_id: &str) -> Result<EventDto, PollError> {
        (**self).get_event(event_id)
    }

    fn submit_response(
        &self,
        event_id: &str,
        request: &SubmitResponseRequest,
    ) -> Result<(), PollError> {
        (**self).submit_response(event_id, request)
    }

    fn get_results(&self, event_id: &str) -> Result<EventResultsDto, PollError> {
        (**self).get_results(event_id)
    }

    fn finalize(&self, event_id: &str, request: &FinalizeRequest) -> Result<(), PollError> {
        (**self).finalize(event_id, request)
    }
}
