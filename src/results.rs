use crate::error::ValidationError;
use crate::event::{Event, EventSlot, SlotId};
use crate::respondent::Respondent;
use itertools::Itertools;
use log::trace;
use num::rational::Ratio;
#[cfg(feature = "serde")]
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Tally of the answers given for one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SlotSummary {
    pub slot_id: SlotId,
    pub available_count: u32,
    pub unavailable_count: u32,
    /// Names of everyone who said yes, in respondent order.
    pub available_names: Vec<String>,
}

impl SlotSummary {
    pub fn empty(slot_id: SlotId) -> SlotSummary {
        SlotSummary {
            slot_id,
            ..SlotSummary::default()
        }
    }

    /// Respondents who answered this slot either way.
    pub fn total_responses(&self) -> u32 {
        self.available_count + self.unavailable_count
    }

    /// Share of answers that are "available", rounded half up to a whole
    /// percent. Zero when nobody answered.
    ///
    /// # Examples
    /// ```
    /// use datepoll_libs::event::SlotId;
    /// use datepoll_libs::results::SlotSummary;
    ///
    /// let mut summary = SlotSummary::empty(SlotId(1));
    /// assert_eq!(summary.availability_percentage(), 0);
    ///
    /// summary.available_count = 2;
    /// summary.unavailable_count = 1;
    /// assert_eq!(summary.availability_percentage(), 67);
    ///
    /// summary.available_count = 1;
    /// summary.unavailable_count = 7;
    /// assert_eq!(summary.availability_percentage(), 13);
    /// ```
    pub fn availability_percentage(&self) -> u32 {
        match self.total_responses() {
            0 => 0,
            total => Ratio::new(self.available_count * 100, total)
                .round()
                .to_integer(),
        }
    }
}

/// One line of the results page, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ResultRow<'a> {
    pub slot: &'a EventSlot,
    pub summary: SlotSummary,
    pub percentage: u32,
    pub finalized: bool,
    pub finalizable: bool,
}

/// One respondent's answers for every slot, in event slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GridRow<'a> {
    pub name: &'a str,
    pub answers: Vec<Option<bool>>,
}

/// Read-only view over a poll's answers.
#[derive(Debug, Clone, Copy)]
pub struct ResultsAggregator<'a> {
    slots: &'a [EventSlot],
    respondents: &'a [Respondent],
    finalized: Option<SlotId>,
}

impl<'a> ResultsAggregator<'a> {
    pub fn new(
        slots: &'a [EventSlot],
        respondents: &'a [Respondent],
        finalized: Option<SlotId>,
    ) -> ResultsAggregator<'a> {
        ResultsAggregator {
            slots,
            respondents,
            finalized,
        }
    }

    pub fn for_event(event: &'a Event, respondents: &'a [Respondent]) -> ResultsAggregator<'a> {
        ResultsAggregator::new(&event.slots, respondents, event.finalized)
    }

    fn tally(&self, slot_id: SlotId) -> SlotSummary {
        self.respondents.iter().fold(
            SlotSummary::empty(slot_id),
            |mut summary, respondent| {
                match respondent.answer(slot_id) {
                    Some(true) => {
                        summary.available_count += 1;
                        summary.available_names.push(respondent.name.clone());
                    }
                    Some(false) => summary.unavailable_count += 1,
                    None => {}
                }
                summary
            },
        )
    }

    fn contains(&self, slot_id: SlotId) -> bool {
        self.slots.iter().any(|slot| slot.id == slot_id)
    }

    /// Summaries for every slot, keyed by slot id.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use datepoll_libs::{
    ///     event::{EventSlot, Slot, SlotId},
    ///     respondent::Respondent,
    ///     results::ResultsAggregator,
    ///     time::TimeRange,
    /// };
    ///
    /// let slot = EventSlot::new(
    ///     SlotId(1),
    ///     Slot::new(
    ///         NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    ///         TimeRange::parse("10:00", "11:00").unwrap(),
    ///     ),
    /// );
    /// let respondents = vec![
    ///     Respondent::new(1, "A", vec![(SlotId(1), true)]),
    ///     Respondent::new(2, "B", vec![(SlotId(1), false)]),
    ///     // C only answered some other slot and is not counted either way
    ///     Respondent::new(3, "C", vec![(SlotId(2), true)]),
    /// ];
    ///
    /// let slots = [slot];
    /// let summary = ResultsAggregator::new(&slots, &respondents, None).summarize();
    ///
    /// assert_eq!(summary[&SlotId(1)].available_count, 1);
    /// assert_eq!(summary[&SlotId(1)].unavailable_count, 1);
    /// assert_eq!(summary[&SlotId(1)].available_names, vec!["A"]);
    /// ```
    pub fn summarize(&self) -> BTreeMap<SlotId, SlotSummary> {
        self.slots
            .iter()
            .map(|slot| (slot.id, self.tally(slot.id)))
            .collect()
    }

    /// `None` for a slot that is not part of this poll.
    pub fn summary(&self, slot_id: SlotId) -> Option<SlotSummary> {
        if self.contains(slot_id) {
            Some(self.tally(slot_id))
        } else {
            None
        }
    }

    pub fn availability_percentage(&self, slot_id: SlotId) -> u32 {
        self.summary(slot_id)
            .map_or(0, |summary| summary.availability_percentage())
    }

    /// Display order: the finalized slot first, then most available first,
    /// ties by date and start time. Input order never matters.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use datepoll_libs::{
    ///     event::{EventSlot, Slot, SlotId},
    ///     respondent::Respondent,
    ///     results::ResultsAggregator,
    ///     time::TimeRange,
    /// };
    ///
    /// let slot = |id, day| {
    ///     EventSlot::new(
    ///         SlotId(id),
    ///         Slot::new(
    ///             NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
    ///             TimeRange::parse("10:00", "11:00").unwrap(),
    ///         ),
    ///     )
    /// };
    /// let slots = vec![slot(3, 3), slot(2, 2), slot(1, 1)];
    /// let respondents = vec![Respondent::new(1, "A", vec![(SlotId(3), true)])];
    ///
    /// let ids = |finalized| {
    ///     ResultsAggregator::new(&slots, &respondents, finalized)
    ///         .ordered_slots()
    ///         .iter()
    ///         .map(|slot| slot.id.0)
    ///         .collect::<Vec<_>>()
    /// };
    ///
    /// assert_eq!(ids(None), vec![3, 1, 2]);
    /// assert_eq!(ids(Some(SlotId(2))), vec![2, 3, 1]);
    /// ```
    pub fn ordered_slots(&self) -> Vec<&'a EventSlot> {
        let counts: HashMap<SlotId, u32> = self
            .slots
            .iter()
            .map(|slot| (slot.id, self.tally(slot.id).available_count))
            .collect();
        let not_finalized = |slot: &EventSlot| Some(slot.id) != self.finalized;

        self.slots
            .iter()
            .sorted_by(|a, b| {
                not_finalized(*a)
                    .cmp(&not_finalized(*b))
                    .then_with(|| counts[&b.id].cmp(&counts[&a.id]))
                    .then_with(|| a.slot.chronological(&b.slot))
                    .then_with(|| a.id.cmp(&b.id))
            })
            .collect()
    }

    /// [`ResultsAggregator::ordered_slots`] with everything the results page
    /// shows for each slot.
    pub fn ordered_rows(&self) -> Vec<ResultRow<'a>> {
        self.ordered_slots()
            .into_iter()
            .map(|slot| {
                let summary = self.tally(slot.id);
                ResultRow {
                    slot,
                    percentage: summary.availability_percentage(),
                    finalized: Some(slot.id) == self.finalized,
                    finalizable: self.finalized.is_none() && summary.available_count > 0,
                    summary,
                }
            })
            .collect()
    }

    /// Whether the host may lock in `slot_id`.
    pub fn can_finalize(&self, slot_id: SlotId) -> bool {
        self.check_finalize(slot_id).is_ok()
    }

    /// Like [`ResultsAggregator::can_finalize`], with the reason when not.
    pub fn check_finalize(&self, slot_id: SlotId) -> Result<(), ValidationError> {
        if self.finalized.is_some() {
            return Err(ValidationError::AlreadyFinalized);
        }

        match self.summary(slot_id) {
            None => Err(ValidationError::UnknownSlot { slot_id }),
            Some(summary) if summary.available_count == 0 => {
                Err(ValidationError::NoAvailability { slot_id })
            }
            Some(_) => Ok(()),
        }
    }

    /// The detailed table: a row per respondent, a column per slot.
    pub fn answer_grid(&self) -> Vec<GridRow<'a>> {
        let slots = self.slots;
        self.respondents
            .iter()
            .map(|respondent| GridRow {
                name: respondent.name.as_str(),
                answers: slots
                    .iter()
                    .map(|slot| respondent.answer(slot.id))
                    .collect(),
            })
            .collect()
    }

    /// Slots whose `reported` summary differs from the one computed here,
    /// including slots missing from `reported`.
    pub fn mismatches(&self, reported: &HashMap<SlotId, SlotSummary>) -> Vec<SlotId> {
        self.slots
            .iter()
            .map(|slot| slot.id)
            .filter(|&id| {
                let matches = reported.get(&id) == Some(&self.tally(id));
                if !matches {
                    trace!("Summary for slot {} disagrees with recomputation", id);
                }
                !matches
            })
            .collect()
    }
}
