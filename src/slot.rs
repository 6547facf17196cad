use crate::error::ValidationError;
use crate::event::Slot;
use crate::time::TimeRange;
use chrono::NaiveDate;
use itertools::Itertools;
use log::{debug, trace};

/// What a click on a calendar day should do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// The day already carries a slot; drop it.
    Remove(NaiveDate),
    /// The day is free; ask for a time range before anything is stored.
    BeginSelection(NaiveDate),
}

/// The host's proposed slots, at most one per calendar day.
///
/// Storage order is whatever order slots were committed in and means
/// nothing; use [`SlotSet::sorted`] for display.
#[derive(Debug, Clone, Default)]
pub struct SlotSet {
    slots: Vec<Slot>,
}

impl SlotSet {
    pub fn new() -> SlotSet {
        SlotSet::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.get(date).is_some()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.date == date)
    }

    /// Decides what selecting `date` means without touching the set.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use datepoll_libs::slot::{Action, SlotSet};
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    /// let mut slots = SlotSet::new();
    ///
    /// assert_eq!(slots.toggle(date), Action::BeginSelection(date));
    ///
    /// slots.commit(date, "10:00", "11:00").unwrap();
    /// assert_eq!(slots.toggle(date), Action::Remove(date));
    /// ```
    pub fn toggle(&self, date: NaiveDate) -> Action {
        if self.contains(date) {
            Action::Remove(date)
        } else {
            Action::BeginSelection(date)
        }
    }

    /// Validates the raw time values and stores a new slot for `date`.
    /// The set is left untouched on any error.
    ///
    /// # Errors
    /// * `MissingField` when either time is empty
    /// * `InvalidTime` when a time is not `HH:MM`
    /// * `InvalidRange` when the start is not before the end
    /// * `DuplicateDate` when `date` already has a slot
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use datepoll_libs::error::ValidationError;
    /// use datepoll_libs::slot::SlotSet;
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    /// let mut slots = SlotSet::new();
    ///
    /// assert!(matches!(
    ///     slots.commit(date, "10:00", "09:00"),
    ///     Err(ValidationError::InvalidRange { .. })
    /// ));
    /// assert!(slots.is_empty());
    ///
    /// let slot = slots.commit(date, "10:00", "11:00").unwrap();
    /// assert_eq!(slot.start().to_string(), "10:00");
    /// assert_eq!(slots.len(), 1);
    /// ```
    pub fn commit(
        &mut self,
        date: NaiveDate,
        start_time: &str,
        end_time: &str,
    ) -> Result<Slot, ValidationError> {
        let time = TimeRange::parse(start_time, end_time)?;
        let slot = Slot::new(date, time);
        self.insert(slot)?;
        Ok(slot)
    }

    /// Stores an already validated slot.
    pub fn insert(&mut self, slot: Slot) -> Result<(), ValidationError> {
        if self.contains(slot.date) {
            return Err(ValidationError::DuplicateDate { date: slot.date });
        }

        debug!("Adding slot {}", slot);
        self.slots.push(slot);
        Ok(())
    }

    /// Removes the slot on `date`, if there is one.
    pub fn remove(&mut self, date: NaiveDate) -> Option<Slot> {
        let index = self.slots.iter().position(|slot| slot.date == date)?;
        let removed = self.slots.remove(index);
        debug!("Removed slot {}", removed);
        Some(removed)
    }

    pub fn clear(&mut self) {
        trace!("Clearing {} slots", self.slots.len());
        self.slots.clear();
    }

    /// Slots ascending by date, then start time.
    pub fn sorted(&self) -> Vec<&Slot> {
        self.slots
            .iter()
            .sorted_by(|a, b| a.chronological(b))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }
}

impl PartialEq for SlotSet {
    /// Two sets are equal when they hold the same slots, in any order.
    fn eq(&self, other: &SlotSet) -> bool {
        self.slots.len() == other.slots.len()
            && other.slots.iter().all(|slot| self.slots.contains(slot))
    }
}

impl Eq for SlotSet {}
