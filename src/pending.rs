use crate::error::ValidationError;
use crate::event::Slot;
use crate::slot::SlotSet;
use chrono::NaiveDate;
use log::{debug, trace};

/// A date picked on the calendar that still needs a time range.
///
/// There is no expiry: an edit stays open until it is confirmed or cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingSelection {
    Idle,
    Editing {
        date: NaiveDate,
        start_time: String,
        end_time: String,
    },
}

impl Default for PendingSelection {
    fn default() -> Self {
        PendingSelection::Idle
    }
}

impl PendingSelection {
    pub fn new() -> PendingSelection {
        PendingSelection::Idle
    }

    /// Starts editing `date` with both times blank. Any edit already in
    /// progress is discarded.
    pub fn begin(&mut self, date: NaiveDate) {
        if let PendingSelection::Editing { date: previous, .. } = self {
            trace!("Replacing pending selection for {} with {}", previous, date);
        }

        *self = PendingSelection::Editing {
            date,
            start_time: String::new(),
            end_time: String::new(),
        };
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, PendingSelection::Editing { .. })
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            PendingSelection::Editing { date, .. } => Some(*date),
            PendingSelection::Idle => None,
        }
    }

    pub fn set_start_time(&mut self, value: &str) -> Result<(), ValidationError> {
        match self {
            PendingSelection::Editing { start_time, .. } => {
                *start_time = value.to_string();
                Ok(())
            }
            PendingSelection::Idle => Err(ValidationError::NoPendingSelection),
        }
    }

    pub fn set_end_time(&mut self, value: &str) -> Result<(), ValidationError> {
        match self {
            PendingSelection::Editing { end_time, .. } => {
                *end_time = value.to_string();
                Ok(())
            }
            PendingSelection::Idle => Err(ValidationError::NoPendingSelection),
        }
    }

    /// Commits the pending date with the given times into `slots`.
    ///
    /// On success the selection returns to `Idle` and the committed slot is
    /// returned. On failure nothing changes: the selection keeps editing the
    /// same date, now holding `start_time` and `end_time`, so the caller can
    /// show the error next to the values that caused it.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use datepoll_libs::error::ValidationError;
    /// use datepoll_libs::pending::PendingSelection;
    /// use datepoll_libs::slot::SlotSet;
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    /// let mut slots = SlotSet::new();
    /// let mut pending = PendingSelection::new();
    ///
    /// pending.begin(date);
    /// assert!(pending.confirm(&mut slots, "12:00", "11:00").is_err());
    /// assert_eq!(pending.date(), Some(date));
    ///
    /// pending.confirm(&mut slots, "11:00", "12:00").unwrap();
    /// assert!(!pending.is_editing());
    /// assert!(slots.contains(date));
    /// ```
    pub fn confirm(
        &mut self,
        slots: &mut SlotSet,
        start_time: &str,
        end_time: &str,
    ) -> Result<Slot, ValidationError> {
        self.set_start_time(start_time)?;
        self.set_end_time(end_time)?;
        self.confirm_staged(slots)
    }

    /// Like [`PendingSelection::confirm`], using the times staged through
    /// `set_start_time` and `set_end_time`.
    pub fn confirm_staged(&mut self, slots: &mut SlotSet) -> Result<Slot, ValidationError> {
        let slot = match self {
            PendingSelection::Editing {
                date,
                start_time,
                end_time,
            } => slots.commit(*date, start_time, end_time)?,
            PendingSelection::Idle => return Err(ValidationError::NoPendingSelection),
        };

        debug!("Confirmed pending selection {}", slot);
        *self = PendingSelection::Idle;
        Ok(slot)
    }

    /// Drops the in-progress edit. Always succeeds, even when idle.
    pub fn cancel(&mut self) {
        if let Some(date) = self.date() {
            trace!("Cancelled pending selection for {}", date);
        }
        *self = PendingSelection::Idle;
    }
}
