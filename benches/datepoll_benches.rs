use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use datepoll_libs::{
    EventForm, EventSlot, FormAction, Respondent, ResultsAggregator, Slot, SlotId, TimeRange,
};

fn poll(slot_count: u32, respondent_count: u32) -> (Vec<EventSlot>, Vec<Respondent>) {
    let first = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let slots = (0..slot_count)
        .map(|i| {
            EventSlot::new(
                SlotId(i),
                Slot::new(
                    first + Duration::days(i64::from(i)),
                    TimeRange::parse("10:00", "11:00").unwrap(),
                ),
            )
        })
        .collect();

    let respondents = (0..respondent_count)
        .map(|r| {
            Respondent::new(
                r,
                &format!("respondent {}", r),
                (0..slot_count)
                    .filter(|s| (r + s) % 4 != 0)
                    .map(|s| (SlotId(s), (r * s) % 3 != 0)),
            )
        })
        .collect();

    (slots, respondents)
}

fn aggregate(c: &mut Criterion) {
    let (slots, respondents) = poll(30, 100);

    c.bench_function("summarize", |b| {
        let aggregator = ResultsAggregator::new(&slots, &respondents, None);
        b.iter(|| black_box(aggregator.summarize()))
    });

    c.bench_function("ordered_slots", |b| {
        let aggregator = ResultsAggregator::new(&slots, &respondents, Some(SlotId(17)));
        b.iter(|| black_box(aggregator.ordered_slots()))
    });

    c.bench_function("answer_grid", |b| {
        let aggregator = ResultsAggregator::new(&slots, &respondents, None);
        b.iter(|| black_box(aggregator.answer_grid()))
    });
}

fn form(c: &mut Criterion) {
    let first = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    c.bench_function("fill_form", |b| {
        b.iter(|| {
            let mut form = EventForm::with_earliest_date(first);
            form.dispatch(FormAction::SetName("Planning".to_string()))
                .unwrap();

            for i in 0..30 {
                form.dispatch(FormAction::Toggle(first + Duration::days(i)))
                    .unwrap();
                form.dispatch(FormAction::SetStartTime("09:00".to_string()))
                    .unwrap();
                form.dispatch(FormAction::SetEndTime("17:30".to_string()))
                    .unwrap();
                form.dispatch(FormAction::Confirm).unwrap();
            }

            black_box(form)
        })
    });
}

criterion_group!(benches, aggregate, form);
criterion_main!(benches);
