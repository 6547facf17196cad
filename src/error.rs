use crate::event::SlotId;
use crate::time::ClockTime;
use chrono::NaiveDate;
use thiserror::Error;

/// Local, user-correctable problems. Nothing leaves the client while one of
/// these is outstanding.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("Invalid time {value:?}. Expected HH:MM")]
    InvalidTime { value: String },
    #[error("Invalid date {value:?}. Expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("Start time {start} must be before end time {end}")]
    InvalidRange { start: ClockTime, end: ClockTime },
    #[error("{date} is in the past")]
    PastDate { date: NaiveDate },
    #[error("{date} already has a time slot")]
    DuplicateDate { date: NaiveDate },
    #[error("No date is waiting for a time selection")]
    NoPendingSelection,
    #[error("Propose at least one date")]
    NoSlots,
    #[error("Answer at least one date")]
    NoAnswers,
    #[error("Slot {slot_id} is not part of this event")]
    UnknownSlot { slot_id: SlotId },
    #[error("This event has already been finalized")]
    AlreadyFinalized,
    #[error("Nobody is available for slot {slot_id}")]
    NoAvailability { slot_id: SlotId },
}

#[derive(Error, Debug)]
pub enum PollError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Request failed: {0}")]
    Network(String),
    #[error("Event {event_id} not found")]
    NotFound { event_id: String },
}

impl PollError {
    /// Text meant for the person in front of the screen. Network details stay
    /// in the log.
    pub fn user_message(&self) -> String {
        match self {
            PollError::Validation(err) => err.to_string(),
            PollError::Network(_) => String::from("Something went wrong. Please try again."),
            PollError::NotFound { .. } => String::from("Event not found. Please check the link."),
        }
    }
}
