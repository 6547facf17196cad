#![no_main]
use datepoll_libs::{EventSlot, Respondent, ResultsAggregator, SlotId};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

fuzz_target!(|data: (Vec<EventSlot>, Vec<Vec<(SlotId, bool)>>, Option<SlotId>)| {
    let (slots, answers, finalized) = data;

    let respondents = answers
        .into_iter()
        .enumerate()
        .map(|(id, answers)| Respondent::new(id as u32, &format!("r{}", id), answers))
        .collect::<Vec<_>>();

    let aggregator = ResultsAggregator::new(&slots, &respondents, finalized);

    for summary in aggregator.summarize().values() {
        assert!(
            summary.total_responses() as usize <= respondents.len(),
            "Slot {} counted more answers than respondents",
            summary.slot_id
        );
        assert_eq!(summary.available_names.len(), summary.available_count as usize);
        assert!(summary.availability_percentage() <= 100);
    }

    let ordered = aggregator.ordered_slots();
    assert_eq!(ordered.len(), slots.len());

    if let Some(id) = finalized {
        if slots.iter().any(|slot| slot.id == id) {
            assert_eq!(ordered[0].id, id, "Finalized slot is not first");
            assert!(slots.iter().all(|slot| !aggregator.can_finalize(slot.id)));
        }
    }

    let mut reversed = slots.clone();
    reversed.reverse();
    let again = ResultsAggregator::new(&reversed, &respondents, finalized);
    let unique_ids = slots.iter().map(|slot| slot.id).collect::<HashSet<_>>();
    if unique_ids.len() == slots.len() {
        assert_eq!(
            ordered.iter().map(|slot| slot.id).collect::<Vec<_>>(),
            again.ordered_slots().iter().map(|slot| slot.id).collect::<Vec<_>>(),
            "Order depends on input order"
        );
    }
});
