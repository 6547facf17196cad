pub mod config;
pub mod error;
pub mod event;
pub mod form;
pub mod notify;
pub mod pending;
pub mod respondent;
pub mod response;
pub mod results;
pub mod slot;
pub mod time;

#[cfg(feature = "serde")]
pub mod api;
#[cfg(feature = "serde")]
pub mod client;
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{PollError, ValidationError};
pub use event::{Event, EventSlot, Slot, SlotId};
pub use form::{EventForm, FormAction};
pub use pending::PendingSelection;
pub use respondent::Respondent;
pub use response::ResponseDraft;
pub use results::{ResultsAggregator, SlotSummary};
pub use slot::{Action, SlotSet};
pub use time::{ClockTime, TimeRange};

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn event_slot(id: u32, date: u32, start: &str, end: &str) -> crate::event::EventSlot {
        use crate::event::{EventSlot, Slot, SlotId};
        use crate::time::TimeRange;

        EventSlot::new(
            SlotId(id),
            Slot::new(day(date), TimeRange::parse(start, end).unwrap()),
        )
    }

    #[test]
    fn commits_valid_ranges() {
        use crate::slot::SlotSet;

        let ranges = [
            ("00:00", "00:01"),
            ("06:00", "23:45"),
            ("09:59", "10:00"),
            ("22:30", "23:59"),
        ];

        for (index, (start, end)) in ranges.iter().enumerate() {
            let date = day(index as u32 + 1);
            let mut slots = SlotSet::new();

            let slot = slots.commit(date, start, end).unwrap();

            assert_eq!(slots.len(), 1);
            assert_eq!(slots.iter().filter(|s| s.date == date).count(), 1);
            assert_eq!(slot.start().to_string(), *start);
            assert_eq!(slot.end().to_string(), *end);
        }
    }

    #[test]
    fn rejects_inverted_and_empty_ranges() {
        use crate::error::ValidationError;
        use crate::slot::SlotSet;

        let mut slots = SlotSet::new();
        slots.commit(day(2), "09:00", "10:00").unwrap();
        let before = slots.clone();

        assert!(matches!(
            slots.commit(day(1), "10:00", "09:00"),
            Err(ValidationError::InvalidRange { .. })
        ));
        assert!(matches!(
            slots.commit(day(1), "10:00", "10:00"),
            Err(ValidationError::InvalidRange { .. })
        ));
        assert_eq!(
            slots.commit(day(1), "", "10:00"),
            Err(ValidationError::MissingField {
                field: "start time"
            })
        );
        assert_eq!(
            slots.commit(day(1), "10:00", "  "),
            Err(ValidationError::MissingField { field: "end time" })
        );
        assert_eq!(
            slots.commit(day(1), "10", "11:00"),
            Err(ValidationError::InvalidTime {
                value: "10".to_string()
            })
        );

        assert_eq!(slots, before);
    }

    #[test]
    fn one_slot_per_day() {
        use crate::error::ValidationError;
        use crate::slot::{Action, SlotSet};

        let mut slots = SlotSet::new();
        slots.commit(day(1), "10:00", "11:00").unwrap();

        assert_eq!(slots.toggle(day(1)), Action::Remove(day(1)));
        assert_eq!(
            slots.commit(day(1), "12:00", "13:00"),
            Err(ValidationError::DuplicateDate { date: day(1) })
        );
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn add_then_remove_restores_set() {
        use crate::slot::{Action, SlotSet};

        let mut slots = SlotSet::new();
        slots.commit(day(3), "10:00", "11:00").unwrap();
        slots.commit(day(5), "12:00", "13:00").unwrap();
        let original = slots.clone();

        assert_eq!(slots.toggle(day(4)), Action::BeginSelection(day(4)));
        slots.commit(day(4), "08:00", "09:00").unwrap();
        assert_ne!(slots, original);

        match slots.toggle(day(4)) {
            Action::Remove(date) => assert!(slots.remove(date).is_some()),
            action => panic!("Expected removal, got {:?}", action),
        }
        assert_eq!(slots, original);

        // Removing something absent is not an error
        assert!(slots.remove(day(20)).is_none());
        assert_eq!(slots, original);
    }

    #[test]
    fn sorted_ignores_insertion_order() {
        use crate::slot::SlotSet;

        let mut slots = SlotSet::new();
        slots.commit(day(9), "08:00", "09:00").unwrap();
        slots.commit(day(2), "14:00", "15:00").unwrap();
        slots.commit(day(5), "07:00", "08:00").unwrap();

        assert_eq!(
            slots
                .sorted()
                .iter()
                .map(|slot| slot.date)
                .collect::<Vec<_>>(),
            vec![day(2), day(5), day(9)]
        );
    }

    #[test]
    fn pending_selection_transitions() {
        use crate::error::ValidationError;
        use crate::pending::PendingSelection;
        use crate::slot::SlotSet;

        let mut slots = SlotSet::new();
        let mut pending = PendingSelection::new();

        assert_eq!(
            pending.confirm_staged(&mut slots),
            Err(ValidationError::NoPendingSelection)
        );
        assert_eq!(
            pending.set_start_time("10:00"),
            Err(ValidationError::NoPendingSelection)
        );

        pending.begin(day(1));
        pending.set_start_time("10:00").unwrap();
        assert!(matches!(
            pending.confirm_staged(&mut slots),
            Err(ValidationError::MissingField { .. })
        ));
        assert_eq!(pending.date(), Some(day(1)));
        assert!(slots.is_empty());

        pending.set_end_time("11:00").unwrap();
        let slot = pending.confirm_staged(&mut slots).unwrap();
        assert_eq!(slot.date, day(1));
        assert_eq!(pending, PendingSelection::Idle);

        pending.begin(day(2));
        pending.cancel();
        assert_eq!(pending, PendingSelection::Idle);
        assert_eq!(slots.len(), 1);

        // Cancelling while idle is fine too
        pending.cancel();
        assert_eq!(pending, PendingSelection::Idle);
    }

    #[test]
    fn begin_replaces_previous_selection() {
        use crate::pending::PendingSelection;

        let mut pending = PendingSelection::new();
        pending.begin(day(1));
        pending.set_start_time("10:00").unwrap();
        pending.begin(day(2));

        assert_eq!(
            pending,
            PendingSelection::Editing {
                date: day(2),
                start_time: String::new(),
                end_time: String::new(),
            }
        );
    }

    #[test]
    fn form_reducer() {
        use crate::error::ValidationError;
        use crate::form::{EventForm, FormAction};

        let mut form = EventForm::with_earliest_date(day(10));

        assert_eq!(
            form.dispatch(FormAction::Toggle(day(9))),
            Err(ValidationError::PastDate { date: day(9) })
        );
        assert!(!form.pending().is_editing());

        form.dispatch(FormAction::SetName("Planning".to_string()))
            .unwrap();
        form.dispatch(FormAction::Toggle(day(12))).unwrap();
        form.dispatch(FormAction::SetStartTime("11:00".to_string()))
            .unwrap();
        form.dispatch(FormAction::SetEndTime("10:00".to_string()))
            .unwrap();
        assert!(matches!(
            form.dispatch(FormAction::Confirm),
            Err(ValidationError::InvalidRange { .. })
        ));
        assert_eq!(form.pending().date(), Some(day(12)));

        form.dispatch(FormAction::SetEndTime("12:00".to_string()))
            .unwrap();
        form.dispatch(FormAction::Confirm).unwrap();
        assert!(form.slots().contains(day(12)));

        assert_eq!(
            form.dispatch(FormAction::BeginSelection(day(12))),
            Err(ValidationError::DuplicateDate { date: day(12) })
        );

        form.dispatch(FormAction::BeginSelection(day(14))).unwrap();
        form.dispatch(FormAction::Cancel).unwrap();
        assert!(!form.slots().contains(day(14)));

        form.dispatch(FormAction::Remove(day(12))).unwrap();
        assert_eq!(form.validate(), Err(ValidationError::NoSlots));

        form.dispatch(FormAction::Reset).unwrap();
        assert_eq!(form.name(), "");
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField {
                field: "event name"
            })
        );
    }

    #[test]
    fn summarizes_scenario() {
        use crate::event::SlotId;
        use crate::respondent::Respondent;
        use crate::results::{ResultsAggregator, SlotSummary};

        let slots = vec![
            event_slot(1, 1, "10:00", "11:00"),
            event_slot(2, 2, "09:00", "10:00"),
        ];
        let respondents = vec![
            Respondent::new(1, "A", vec![(SlotId(1), true), (SlotId(2), false)]),
            Respondent::new(2, "B", vec![(SlotId(1), true), (SlotId(2), true)]),
        ];

        let aggregator = ResultsAggregator::new(&slots, &respondents, None);
        let summary = aggregator.summarize();

        assert_eq!(
            summary[&SlotId(1)],
            SlotSummary {
                slot_id: SlotId(1),
                available_count: 2,
                unavailable_count: 0,
                available_names: vec!["A".to_string(), "B".to_string()],
            }
        );
        assert_eq!(
            summary[&SlotId(2)],
            SlotSummary {
                slot_id: SlotId(2),
                available_count: 1,
                unavailable_count: 1,
                available_names: vec!["B".to_string()],
            }
        );
        assert_eq!(
            aggregator
                .ordered_slots()
                .iter()
                .map(|slot| slot.id)
                .collect::<Vec<_>>(),
            vec![SlotId(1), SlotId(2)]
        );
        assert_eq!(aggregator.availability_percentage(SlotId(1)), 100);
        assert_eq!(aggregator.availability_percentage(SlotId(2)), 50);
    }

    #[test]
    fn counts_never_exceed_respondents() {
        use crate::event::SlotId;
        use crate::respondent::Respondent;
        use crate::results::ResultsAggregator;

        let slots = vec![
            event_slot(1, 1, "10:00", "11:00"),
            event_slot(2, 2, "10:00", "11:00"),
            event_slot(3, 3, "10:00", "11:00"),
        ];
        let respondents = vec![
            Respondent::new(1, "A", vec![(SlotId(1), true)]),
            Respondent::new(2, "B", vec![(SlotId(1), false), (SlotId(2), true)]),
            Respondent::new(3, "C", vec![(SlotId(1), true), (SlotId(99), true)]),
        ];

        let summary = ResultsAggregator::new(&slots, &respondents, None).summarize();

        for s in summary.values() {
            assert!(s.total_responses() as usize <= respondents.len());
        }
        assert_eq!(summary[&SlotId(1)].total_responses(), 3);
        assert_eq!(summary[&SlotId(2)].total_responses(), 1);
        assert_eq!(summary[&SlotId(3)].total_responses(), 0);
    }

    #[test]
    fn finalized_slot_sorts_first() {
        use crate::event::SlotId;
        use crate::respondent::Respondent;
        use crate::results::ResultsAggregator;

        let slots = vec![
            event_slot(1, 1, "10:00", "11:00"),
            event_slot(2, 2, "10:00", "11:00"),
            event_slot(3, 3, "10:00", "11:00"),
        ];
        let respondents = vec![
            Respondent::new(1, "A", vec![(SlotId(1), true), (SlotId(3), false)]),
            Respondent::new(2, "B", vec![(SlotId(1), true), (SlotId(2), true)]),
        ];

        for finalized in 1..=3 {
            let aggregator = ResultsAggregator::new(&slots, &respondents, Some(SlotId(finalized)));
            assert_eq!(aggregator.ordered_slots()[0].id, SlotId(finalized));
        }

        let rows = ResultsAggregator::new(&slots, &respondents, Some(SlotId(3))).ordered_rows();
        assert!(rows[0].finalized);
        assert_eq!(rows[0].summary.available_count, 0);
        assert!(rows.iter().all(|row| !row.finalizable));
    }

    #[test]
    fn ties_break_by_date_then_start() {
        use crate::event::SlotId;
        use crate::results::ResultsAggregator;

        let slots = vec![
            event_slot(4, 3, "09:00", "10:00"),
            event_slot(3, 1, "14:00", "15:00"),
            event_slot(1, 2, "08:00", "09:00"),
            event_slot(2, 1, "09:30", "10:00"),
        ];
        let mut reversed = slots.clone();
        reversed.reverse();

        let expected = vec![SlotId(2), SlotId(3), SlotId(1), SlotId(4)];
        for input in &[slots, reversed] {
            assert_eq!(
                ResultsAggregator::new(input, &[], None)
                    .ordered_slots()
                    .iter()
                    .map(|slot| slot.id)
                    .collect::<Vec<_>>(),
                expected
            );
        }
    }

    #[test]
    fn finalize_eligibility() {
        use crate::error::ValidationError;
        use crate::event::SlotId;
        use crate::respondent::Respondent;
        use crate::results::ResultsAggregator;

        let slots = vec![
            event_slot(1, 1, "10:00", "11:00"),
            event_slot(2, 2, "10:00", "11:00"),
        ];

        let nobody = ResultsAggregator::new(&slots, &[], None);
        assert_eq!(nobody.availability_percentage(SlotId(1)), 0);
        assert!(!nobody.can_finalize(SlotId(1)));

        let respondents = vec![Respondent::new(
            1,
            "A",
            vec![(SlotId(1), true), (SlotId(2), false)],
        )];

        let open = ResultsAggregator::new(&slots, &respondents, None);
        assert!(open.can_finalize(SlotId(1)));
        assert_eq!(
            open.check_finalize(SlotId(2)),
            Err(ValidationError::NoAvailability { slot_id: SlotId(2) })
        );
        assert_eq!(
            open.check_finalize(SlotId(9)),
            Err(ValidationError::UnknownSlot { slot_id: SlotId(9) })
        );

        let done = ResultsAggregator::new(&slots, &respondents, Some(SlotId(2)));
        assert_eq!(
            done.check_finalize(SlotId(1)),
            Err(ValidationError::AlreadyFinalized)
        );
    }

    #[test]
    fn answer_grid_keeps_gaps() {
        use crate::event::SlotId;
        use crate::respondent::Respondent;
        use crate::results::ResultsAggregator;

        let slots = vec![
            event_slot(1, 1, "10:00", "11:00"),
            event_slot(2, 2, "10:00", "11:00"),
        ];
        let respondents = vec![
            Respondent::new(1, "A", vec![(SlotId(2), false)]),
            Respondent::new(2, "B", vec![(SlotId(1), true), (SlotId(2), true)]),
        ];

        let grid = ResultsAggregator::new(&slots, &respondents, None).answer_grid();

        assert_eq!(grid[0].name, "A");
        assert_eq!(grid[0].answers, vec![None, Some(false)]);
        assert_eq!(grid[1].answers, vec![Some(true), Some(true)]);
    }

    #[test]
    fn response_draft_rules() {
        use crate::error::ValidationError;
        use crate::event::{Event, SlotId};
        use crate::response::ResponseDraft;

        let mut event = Event {
            id: "evt".to_string(),
            name: "Planning".to_string(),
            slots: vec![event_slot(1, 1, "10:00", "11:00")],
            finalized: None,
        };

        let mut draft = ResponseDraft::new();
        draft.answer(SlotId(1), true);
        assert_eq!(
            draft.validate(&event),
            Err(ValidationError::MissingField { field: "name" })
        );

        draft.set_name("Ada");
        assert_eq!(draft.validate(&event), Ok(()));

        draft.clear_answer(SlotId(1));
        assert_eq!(draft.validate(&event), Err(ValidationError::NoAnswers));

        draft.answer(SlotId(1), false);
        event.finalized = Some(SlotId(1));
        assert_eq!(
            draft.validate(&event),
            Err(ValidationError::AlreadyFinalized)
        );
    }

    #[test]
    fn notifications_expire() {
        use crate::notify::{Level, NotificationQueue};
        use chrono::{Duration, TimeZone, Utc};

        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let mut queue = NotificationQueue::default();

        queue.push("Link copied", Level::Success, now);
        queue.push("Second", Level::Info, now + Duration::seconds(2));

        assert_eq!(queue.active(now).count(), 2);
        assert_eq!(
            queue
                .active(now + Duration::seconds(3))
                .map(|n| n.message.as_str())
                .collect::<Vec<_>>(),
            vec!["Second"]
        );

        assert_eq!(queue.prune(now + Duration::seconds(3)), 1);
        assert_eq!(queue.prune(now + Duration::seconds(10)), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn client_config_endpoints() {
        use crate::config::ClientConfig;

        let config = ClientConfig {
            base_url: "https://example.org/api/".to_string(),
            timeout_secs: 5,
        };

        assert_eq!(
            config.endpoint("/events/abc/results"),
            "https://example.org/api/events/abc/results"
        );
        assert_eq!(config.timeout().as_secs(), 5);
    }

    #[test]
    fn links_for_sharing() {
        use crate::config::{results_link, share_link};

        assert_eq!(
            share_link("http://localhost:5173", "f3c9"),
            "http://localhost:5173/event/f3c9"
        );
        assert_eq!(
            results_link("http://localhost:5173/", "f3c9"),
            "http://localhost:5173/event/f3c9/results"
        );
    }

    #[test]
    fn empty_summary() {
        use crate::event::SlotId;
        use crate::results::SlotSummary;

        let summary = SlotSummary::empty(SlotId(4));

        assert_eq!(summary.slot_id, SlotId(4));
        assert_eq!(summary.total_responses(), 0);
        assert!(summary.available_names.is_empty());
        assert_eq!(SlotSummary::default().slot_id, SlotId::default());
    }

    #[test]
    fn stored_dates() {
        use crate::error::ValidationError;
        use crate::time::{parse_date, parse_stored_date};

        assert_eq!(parse_stored_date("2025-06-01T00:00:00Z"), Ok(day(1)));
        assert_eq!(parse_stored_date(" 2025-06-02 "), Ok(day(2)));
        assert_eq!(
            parse_stored_date("2025-06-01T00:00"),
            Err(ValidationError::InvalidDate {
                value: "2025-06-01T00:00".to_string()
            })
        );

        // The form only ever accepts the bare key
        assert!(parse_date("2025-06-01T00:00:00Z").is_err());
    }

    #[cfg(feature = "serde")]
    mod api {
        use super::{day, event_slot};
        use crate::api::{
            CreateEventRequest, CreatedEvent, EventDto, EventResults, EventResultsDto,
            FinalizeRequest, PollApi, RespondentDto, SubmitResponseRequest,
        };
        use crate::client::PollClient;
        use crate::error::{PollError, ValidationError};
        use crate::event::SlotId;
        use crate::form::{EventForm, FormAction};
        use crate::response::ResponseDraft;
        use std::cell::RefCell;
        use std::convert::TryFrom;

        /// Results for a poll nobody has answered yet, in the shape the sqlite
        /// backend writes it: timestamped dates, `null` respondents and names.
        const FRESH_RESULTS: &str = r#"{
            "event": {
                "id": "3f1d2c8e-0b7a-4c55-9d0e-51a2b7c4e901",
                "name": "Planning",
                "created_at": "2025-05-30T10:00:00.123456789Z",
                "dates": [
                    {"id": 7, "event_id": "3f1d2c8e-0b7a-4c55-9d0e-51a2b7c4e901", "date": "2025-06-02T00:00:00Z", "start_time": "09:00", "end_time": "10:00"},
                    {"id": 8, "event_id": "3f1d2c8e-0b7a-4c55-9d0e-51a2b7c4e901", "date": "2025-06-01T00:00:00Z", "start_time": "14:00", "end_time": "15:30"}
                ]
            },
            "respondents": null,
            "summary": {
                "7": {"event_date_id": 7, "available_count": 0, "unavailable_count": 0, "available_names": null},
                "8": {"event_date_id": 8, "available_count": 0, "unavailable_count": 0, "available_names": null}
            }
        }"#;

        const RESULTS: &str = r#"{
            "event": {
                "id": "evt",
                "name": "Planning",
                "created_at": "2025-05-30T10:00:00Z",
                "dates": [
                    {"id": 1, "event_id": "evt", "date": "2025-06-01", "start_time": "10:00", "end_time": "11:00"},
                    {"id": 2, "event_id": "evt", "date": "2025-06-02", "start_time": "09:00", "end_time": "10:00"}
                ]
            },
            "respondents": [
                {"id": 1, "event_id": "evt", "name": "A", "created_at": "2025-05-30T11:00:00Z",
                 "responses": [{"id": 1, "respondent_id": 1, "event_date_id": 1, "available": true},
                               {"id": 2, "respondent_id": 1, "event_date_id": 2, "available": false}]},
                {"id": 2, "event_id": "evt", "name": "B", "created_at": "2025-05-30T12:00:00Z",
                 "responses": [{"id": 3, "respondent_id": 2, "event_date_id": 1, "available": true},
                               {"id": 4, "respondent_id": 2, "event_date_id": 2, "available": true}]}
            ],
            "summary": {
                "1": {"event_date_id": 1, "available_count": 2, "unavailable_count": 0, "available_names": ["A", "B"]},
                "2": {"event_date_id": 2, "available_count": 1, "unavailable_count": 1, "available_names": ["B"]}
            }
        }"#;

        /// Records every call and answers from canned data.
        #[derive(Default)]
        struct FakeApi {
            calls: RefCell<Vec<String>>,
            results: Option<EventResultsDto>,
            offline: bool,
        }

        impl FakeApi {
            fn record(&self, call: String) -> Result<(), PollError> {
                self.calls.borrow_mut().push(call);
                if self.offline {
                    Err(PollError::Network("connection refused".to_string()))
                } else {
                    Ok(())
                }
            }
        }

        impl PollApi for FakeApi {
            fn create_event(
                &self,
                request: &CreateEventRequest,
            ) -> Result<CreatedEvent, PollError> {
                self.record(format!("create {}", request.dates.len()))?;
                Ok(CreatedEvent {
                    id: "new".to_string(),
                })
            }

            fn get_event(&self, event_id: &str) -> Result<EventDto, PollError> {
                self.record(format!("get {}", event_id))?;
                self.results
                    .as_ref()
                    .filter(|results| results.event.id == event_id)
                    .map(|results| results.event.clone())
                    .ok_or_else(|| PollError::NotFound {
                        event_id: event_id.to_string(),
                    })
            }

            fn submit_response(
                &self,
                event_id: &str,
                request: &SubmitResponseRequest,
            ) -> Result<(), PollError> {
                self.record(format!("respond {} {}", event_id, request.responses.len()))
            }

            fn get_results(&self, event_id: &str) -> Result<EventResultsDto, PollError> {
                self.record(format!("results {}", event_id))?;
                self.results.clone().ok_or_else(|| PollError::NotFound {
                    event_id: event_id.to_string(),
                })
            }

            fn finalize(
                &self,
                event_id: &str,
                request: &FinalizeRequest,
            ) -> Result<(), PollError> {
                self.record(format!("finalize {} {}", event_id, request.event_date_id))
            }
        }

        fn fake() -> FakeApi {
            FakeApi {
                results: Some(serde_json::from_str(RESULTS).unwrap()),
                ..FakeApi::default()
            }
        }

        #[test]
        fn parses_backend_results() {
            let dto: EventResultsDto = serde_json::from_str(RESULTS).unwrap();
            let results = EventResults::try_from(&dto).unwrap();

            assert_eq!(
                results.event.slots,
                vec![
                    event_slot(1, 1, "10:00", "11:00"),
                    event_slot(2, 2, "09:00", "10:00"),
                ]
            );
            assert_eq!(results.respondents[1].answer(SlotId(2)), Some(true));
            assert!(results.mismatches().is_empty());
        }

        #[test]
        fn null_names_and_disagreeing_summaries() {
            let mut dto: EventResultsDto = serde_json::from_str(RESULTS).unwrap();
            let raw = r#"{"event_date_id": 2, "available_count": 0, "unavailable_count": 2, "available_names": null}"#;
            dto.summary
                .insert("2".to_string(), serde_json::from_str(raw).unwrap());

            let results = EventResults::try_from(&dto).unwrap();

            assert!(results.reported[&SlotId(2)].available_names.is_empty());
            assert_eq!(results.mismatches(), vec![SlotId(2)]);
        }

        #[test]
        fn create_request_from_form() {
            let mut form = EventForm::new();
            assert!(CreateEventRequest::try_from(&form).is_err());

            form.dispatch(FormAction::SetName(" Planning ".to_string()))
                .unwrap();
            for (date, start, end) in &[(day(3), "12:00", "13:00"), (day(1), "10:00", "11:00")] {
                form.dispatch(FormAction::Toggle(*date)).unwrap();
                form.dispatch(FormAction::SetStartTime(start.to_string()))
                    .unwrap();
                form.dispatch(FormAction::SetEndTime(end.to_string()))
                    .unwrap();
                form.dispatch(FormAction::Confirm).unwrap();
            }

            let request = CreateEventRequest::try_from(&form).unwrap();
            assert_eq!(
                serde_json::to_value(&request).unwrap(),
                serde_json::json!({
                    "name": "Planning",
                    "dates": [
                        {"date": "2025-06-01", "start_time": "10:00", "end_time": "11:00"},
                        {"date": "2025-06-03", "start_time": "12:00", "end_time": "13:00"}
                    ]
                })
            );

            let api = fake();
            let client = PollClient::new(&api);
            assert_eq!(client.create_event(&form).unwrap(), "new");
            assert_eq!(*api.calls.borrow(), vec!["create 2".to_string()]);
        }

        #[test]
        fn submit_is_gated_locally() {
            let api = fake();
            let client = PollClient::new(&api);
            let event = client.load_event("evt").unwrap();

            let mut draft = ResponseDraft::new();
            draft.set_name("Ada");
            assert!(matches!(
                client.submit_response(&event, &draft),
                Err(PollError::Validation(ValidationError::NoAnswers))
            ));

            draft.answer(SlotId(2), true);
            client.submit_response(&event, &draft).unwrap();

            assert_eq!(
                *api.calls.borrow(),
                vec!["get evt".to_string(), "respond evt 1".to_string()]
            );
        }

        #[test]
        fn finalize_is_gated_locally() {
            let api = fake();
            let client = PollClient::new(&api);
            let mut results = client.load_results("evt").unwrap();

            client.finalize(&results, SlotId(1)).unwrap();

            results.event.finalized = Some(SlotId(1));
            assert!(matches!(
                client.finalize(&results, SlotId(2)),
                Err(PollError::Validation(ValidationError::AlreadyFinalized))
            ));

            assert_eq!(
                *api.calls.borrow(),
                vec!["results evt".to_string(), "finalize evt 1".to_string()]
            );
        }

        #[test]
        fn network_and_missing_events() {
            let client = PollClient::new(FakeApi::default());
            let err = client.load_event("nope").unwrap_err();
            assert!(matches!(err, PollError::NotFound { .. }));
            assert_eq!(err.user_message(), "Event not found. Please check the link.");

            let offline = FakeApi {
                offline: true,
                ..fake()
            };
            let err = PollClient::new(offline).load_results("evt").unwrap_err();
            assert!(matches!(err, PollError::Network(_)));
            assert_eq!(err.user_message(), "Something went wrong. Please try again.");
        }

        #[test]
        fn rejects_malformed_backend_slots() {
            let raw = r#"{"id": "evt", "name": "x", "dates": [
                {"id": 1, "date": "2025-06-01", "start_time": "11:00", "end_time": "10:00"}
            ]}"#;
            let dto: EventDto = serde_json::from_str(raw).unwrap();

            assert!(matches!(
                crate::event::Event::try_from(&dto),
                Err(ValidationError::InvalidRange { .. })
            ));
        }

        #[test]
        fn loads_fresh_backend_results() {
            let api = FakeApi {
                results: Some(serde_json::from_str(FRESH_RESULTS).unwrap()),
                ..FakeApi::default()
            };
            let client = PollClient::new(&api);

            let event = client
                .load_event("3f1d2c8e-0b7a-4c55-9d0e-51a2b7c4e901")
                .unwrap();
            assert_eq!(
                event.slots,
                vec![
                    event_slot(7, 2, "09:00", "10:00"),
                    event_slot(8, 1, "14:00", "15:30"),
                ]
            );

            let results = client
                .load_results("3f1d2c8e-0b7a-4c55-9d0e-51a2b7c4e901")
                .unwrap();
            let aggregator = results.aggregator();

            assert!(results.respondents.is_empty());
            assert!(results.mismatches().is_empty());
            assert_eq!(aggregator.availability_percentage(SlotId(7)), 0);
            assert!(!aggregator.can_finalize(SlotId(7)));
            assert_eq!(
                aggregator
                    .ordered_slots()
                    .iter()
                    .map(|slot| slot.id)
                    .collect::<Vec<_>>(),
                vec![SlotId(8), SlotId(7)]
            );
        }

        #[test]
        fn null_and_missing_lists() {
            let raw = r#"{"id": "evt", "name": "x", "created_at": "2025-05-30T10:00:00Z"}"#;
            let dto: EventDto = serde_json::from_str(raw).unwrap();
            let event = crate::event::Event::try_from(&dto).unwrap();
            assert!(event.slots.is_empty());

            let raw = r#"{"id": "evt", "name": "x", "dates": null}"#;
            let dto: EventDto = serde_json::from_str(raw).unwrap();
            assert!(dto.dates.is_empty());

            let raw = r#"{"id": 3, "event_id": "evt", "name": "C", "responses": null}"#;
            let respondent: RespondentDto = serde_json::from_str(raw).unwrap();
            assert!(respondent.responses.is_empty());

            let raw = r#"{"event": {"id": "evt", "name": "x"}, "respondents": null, "summary": null}"#;
            let results: EventResultsDto = serde_json::from_str(raw).unwrap();
            assert!(results.respondents.is_empty());
            assert!(results.summary.is_empty());
        }

        #[test]
        fn summaries_keyed_by_slot_not_map_key() {
            let mut dto: EventResultsDto = serde_json::from_str(RESULTS).unwrap();
            let entry = dto.summary.remove("1").unwrap();
            dto.summary.insert("first".to_string(), entry);

            let results = EventResults::try_from(&dto).unwrap();

            assert_eq!(results.reported[&SlotId(1)].available_count, 2);
            assert!(results.mismatches().is_empty());
        }

        #[test]
        fn form_actions_from_json() {
            let action: FormAction =
                serde_json::from_str(r#"{"type": "Toggle", "payload": "2025-06-04"}"#).unwrap();
            assert_eq!(action, FormAction::Toggle(day(4)));

            let action: FormAction = serde_json::from_str(r#"{"type": "Confirm"}"#).unwrap();
            assert_eq!(action, FormAction::Confirm);
        }
    }
}
