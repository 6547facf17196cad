use crate::time::{ClockTime, TimeRange};
use chrono::NaiveDate;
use core::cmp::Ordering;
use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Backend identifier of a proposed slot (`event_date_id` on the wire).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct SlotId(pub u32);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A candidate calendar day and the time window proposed on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Slot {
    pub date: NaiveDate,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub time: TimeRange,
}

impl Slot {
    pub fn new(date: NaiveDate, time: TimeRange) -> Slot {
        Slot { date, time }
    }

    pub fn start(&self) -> ClockTime {
        self.time.start()
    }

    pub fn end(&self) -> ClockTime {
        self.time.end()
    }

    /// Display order: date, then start time.
    pub fn chronological(&self, other: &Slot) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.start().cmp(&other.start()))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

/// A slot that exists on the backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct EventSlot {
    pub id: SlotId,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub slot: Slot,
}

impl EventSlot {
    pub fn new(id: SlotId, slot: Slot) -> EventSlot {
        EventSlot { id, slot }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Event {
    pub id: String,
    pub name: String,
    pub slots: Vec<EventSlot>,
    pub finalized: Option<SlotId>,
}

impl Event {
    pub fn slot(&self, id: SlotId) -> Option<&EventSlot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.is_some()
    }

    pub fn finalized_slot(&self) -> Option<&EventSlot> {
        self.finalized.and_then(|id| self.slot(id))
    }
}
