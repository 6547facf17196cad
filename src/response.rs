use crate::error::ValidationError;
use crate::event::{Event, SlotId};
use std::collections::BTreeMap;

/// A respondent's answers before they are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseDraft {
    name: String,
    answers: BTreeMap<SlotId, bool>,
}

impl ResponseDraft {
    pub fn new() -> ResponseDraft {
        ResponseDraft::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Records (or overwrites) the answer for `slot`.
    pub fn answer(&mut self, slot: SlotId, available: bool) {
        self.answers.insert(slot, available);
    }

    pub fn clear_answer(&mut self, slot: SlotId) {
        self.answers.remove(&slot);
    }

    pub fn answers(&self) -> &BTreeMap<SlotId, bool> {
        &self.answers
    }

    /// Checks the draft against the event it answers.
    ///
    /// # Examples
    /// ```
    /// use datepoll_libs::error::ValidationError;
    /// use datepoll_libs::event::{Event, SlotId};
    /// use datepoll_libs::response::ResponseDraft;
    ///
    /// let event = Event {
    ///     id: "abc".to_string(),
    ///     name: "Team dinner".to_string(),
    ///     slots: vec![],
    ///     finalized: None,
    /// };
    ///
    /// let mut draft = ResponseDraft::new();
    /// draft.set_name("Ada");
    /// assert_eq!(draft.validate(&event), Err(ValidationError::NoAnswers));
    ///
    /// draft.answer(SlotId(7), true);
    /// assert_eq!(
    ///     draft.validate(&event),
    ///     Err(ValidationError::UnknownSlot { slot_id: SlotId(7) })
    /// );
    /// ```
    pub fn validate(&self, event: &Event) -> Result<(), ValidationError> {
        if event.is_finalized() {
            return Err(ValidationError::AlreadyFinalized);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "name" });
        }
        if self.answers.is_empty() {
            return Err(ValidationError::NoAnswers);
        }
        if let Some(&slot_id) = self.answers.keys().find(|&&id| event.slot(id).is_none()) {
            return Err(ValidationError::UnknownSlot { slot_id });
        }

        Ok(())
    }
}
