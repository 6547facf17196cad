#![no_main]
use chrono::NaiveDate;
use datepoll_libs::{
    slot::{Action, SlotSet},
    time::ClockTime,
};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

fuzz_target!(|clicks: Vec<(NaiveDate, ClockTime, ClockTime)>| {
    #[cfg(feature = "log")]
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Trace)
        .chain(std::io::stdout())
        .apply();

    let mut slots = SlotSet::new();

    for (date, start, end) in clicks {
        let before = slots.clone();
        match slots.toggle(date) {
            Action::Remove(date) => {
                assert!(slots.remove(date).is_some(), "Toggled slot was not present");
                assert_eq!(slots.len() + 1, before.len());
            }
            Action::BeginSelection(date) => {
                let committed = slots.commit(date, &start.to_string(), &end.to_string());
                if start < end {
                    assert!(committed.is_ok(), "Valid range {} - {} rejected", start, end);
                    assert_eq!(slots.len(), before.len() + 1);
                } else {
                    assert!(committed.is_err(), "Empty range {} - {} accepted", start, end);
                    assert_eq!(slots, before, "Failed commit changed the set");
                }
            }
        }

        let mut days = HashSet::with_capacity(slots.len());
        for slot in slots.iter() {
            assert!(days.insert(slot.date), "Two slots on {}", slot.date);
            assert!(slot.start() < slot.end(), "Stored slot {} is empty", slot);
        }
    }

    let sorted = slots.sorted();
    assert!(
        sorted.iter().zip(sorted.iter().skip(1)).all(|(l, r)| l.date < r.date),
        "Sorted slots are out of order"
    );
});
