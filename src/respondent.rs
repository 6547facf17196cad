use crate::event::SlotId;
#[cfg(feature = "serde")]
use serde::Serialize;
use std::collections::BTreeMap;

/// Someone who answered the poll. Answers are sparse: a slot missing from
/// `answers` was left unanswered, which is different from answering `false`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Respondent {
    pub id: u32,
    pub name: String,
    pub answers: BTreeMap<SlotId, bool>,
}

impl Respondent {
    /// Constructs a new Respondent from `(slot, available)` pairs.
    /// A later pair for the same slot replaces an earlier one.
    pub fn new<I>(id: u32, name: &str, answers: I) -> Respondent
    where
        I: IntoIterator<Item = (SlotId, bool)>,
    {
        Respondent {
            id,
            name: name.to_string(),
            answers: answers.into_iter().collect(),
        }
    }

    /// `None` when this respondent did not answer for `slot`.
    pub fn answer(&self, slot: SlotId) -> Option<bool> {
        self.answers.get(&slot).copied()
    }

    pub fn is_available(&self, slot: SlotId) -> bool {
        self.answer(slot) == Some(true)
    }
}
