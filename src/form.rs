use crate::error::ValidationError;
use crate::pending::PendingSelection;
use crate::slot::{Action, SlotSet};
use chrono::NaiveDate;
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything the host can do on the create-event page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", content = "payload")
)]
pub enum FormAction {
    SetName(String),
    /// A click on a calendar day: removes its slot or starts a selection.
    Toggle(NaiveDate),
    BeginSelection(NaiveDate),
    SetStartTime(String),
    SetEndTime(String),
    Confirm,
    Cancel,
    Remove(NaiveDate),
    Reset,
}

/// State of the create-event page, driven only through [`EventForm::dispatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    name: String,
    slots: SlotSet,
    pending: PendingSelection,
    earliest_date: Option<NaiveDate>,
}

impl EventForm {
    pub fn new() -> EventForm {
        EventForm::default()
    }

    /// A form that refuses to start a selection on any day before `date`.
    pub fn with_earliest_date(date: NaiveDate) -> EventForm {
        EventForm {
            earliest_date: Some(date),
            ..EventForm::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slots(&self) -> &SlotSet {
        &self.slots
    }

    pub fn pending(&self) -> &PendingSelection {
        &self.pending
    }

    /// Applies `action`. On error the form is unchanged, except that a
    /// failed `Confirm` keeps the selection open for correction.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use datepoll_libs::form::{EventForm, FormAction};
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    /// let mut form = EventForm::new();
    ///
    /// form.dispatch(FormAction::SetName("Team dinner".to_string())).unwrap();
    /// form.dispatch(FormAction::Toggle(date)).unwrap();
    /// form.dispatch(FormAction::SetStartTime("18:00".to_string())).unwrap();
    /// form.dispatch(FormAction::SetEndTime("21:00".to_string())).unwrap();
    /// form.dispatch(FormAction::Confirm).unwrap();
    /// assert!(form.slots().contains(date));
    ///
    /// // A second click on the same day removes it again
    /// form.dispatch(FormAction::Toggle(date)).unwrap();
    /// assert!(form.slots().is_empty());
    /// ```
    pub fn dispatch(&mut self, action: FormAction) -> Result<(), ValidationError> {
        debug!("Form action {:?}", action);

        match action {
            FormAction::SetName(name) => self.name = name,
            FormAction::Toggle(date) => match self.slots.toggle(date) {
                Action::Remove(date) => {
                    self.slots.remove(date);
                }
                Action::BeginSelection(date) => self.begin_selection(date)?,
            },
            FormAction::BeginSelection(date) => self.begin_selection(date)?,
            FormAction::SetStartTime(value) => self.pending.set_start_time(&value)?,
            FormAction::SetEndTime(value) => self.pending.set_end_time(&value)?,
            FormAction::Confirm => {
                self.pending.confirm_staged(&mut self.slots)?;
            }
            FormAction::Cancel => self.pending.cancel(),
            FormAction::Remove(date) => {
                self.slots.remove(date);
            }
            FormAction::Reset => {
                self.name.clear();
                self.slots.clear();
                self.pending.cancel();
            }
        }

        Ok(())
    }

    fn begin_selection(&mut self, date: NaiveDate) -> Result<(), ValidationError> {
        if let Some(earliest) = self.earliest_date {
            if date < earliest {
                return Err(ValidationError::PastDate { date });
            }
        }
        if self.slots.contains(date) {
            return Err(ValidationError::DuplicateDate { date });
        }

        self.pending.begin(date);
        Ok(())
    }

    /// Checks that the form can be sent: a non-blank name and at least one
    /// slot.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            Err(ValidationError::MissingField { field: "event name" })
        } else if self.slots.is_empty() {
            Err(ValidationError::NoSlots)
        } else {
            Ok(())
        }
    }
}
