use crate::api::{CreateEventRequest, EventResults, EventResultsDto};
use crate::config::{self, PickerConfig};
use crate::form::{EventForm, FormAction};
use chrono::NaiveDate;
use serde::Serialize;
use std::convert::TryFrom;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn error_to_js<E: ToString>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// The create-event form, held on the Rust side of the page.
#[wasm_bindgen]
pub struct EventFormHandle {
    form: EventForm,
}

#[wasm_bindgen]
impl EventFormHandle {
    /// `today` (`YYYY-MM-DD`), when given, blocks selecting earlier days.
    #[wasm_bindgen(constructor)]
    pub fn new(today: Option<String>) -> Result<EventFormHandle, JsValue> {
        let form = match today {
            Some(today) => EventForm::with_earliest_date(
                today.parse::<NaiveDate>().map_err(error_to_js)?,
            ),
            None => EventForm::new(),
        };

        Ok(EventFormHandle { form })
    }

    /// Applies a `{ type, payload }` action object.
    pub fn dispatch(&mut self, action: JsValue) -> Result<(), JsValue> {
        let action: FormAction = serde_wasm_bindgen::from_value(action)?;
        self.form.dispatch(action).map_err(error_to_js)
    }

    /// Committed slots in display order.
    pub fn slots(&self) -> Result<JsValue, JsValue> {
        to_js(&self.form.slots().sorted())
    }

    #[wasm_bindgen(js_name = pendingDate)]
    pub fn pending_date(&self) -> Option<String> {
        self.form.pending().date().map(|date| date.to_string())
    }

    /// The body for `POST /events`, or the reason the form is not ready.
    pub fn request(&self) -> Result<JsValue, JsValue> {
        let request = CreateEventRequest::try_from(&self.form).map_err(error_to_js)?;
        to_js(&request)
    }
}

/// Turns a `GET /events/{id}/results` body into display rows.
#[wasm_bindgen(js_name = resultRows)]
pub fn result_rows(results: JsValue) -> Result<JsValue, JsValue> {
    let dto: EventResultsDto = serde_wasm_bindgen::from_value(results)?;
    let results = EventResults::try_from(&dto).map_err(error_to_js)?;
    to_js(&results.aggregator().ordered_rows())
}

/// The per-respondent answer table for a results body.
#[wasm_bindgen(js_name = answerGrid)]
pub fn answer_grid(results: JsValue) -> Result<JsValue, JsValue> {
    let dto: EventResultsDto = serde_wasm_bindgen::from_value(results)?;
    let results = EventResults::try_from(&dto).map_err(error_to_js)?;
    to_js(&results.aggregator().answer_grid())
}

/// Entries for the start/end time dropdowns.
#[wasm_bindgen(js_name = timeOptions)]
pub fn time_options() -> Vec<JsValue> {
    PickerConfig::default()
        .options()
        .into_iter()
        .map(|time| JsValue::from_str(&time.to_string()))
        .collect()
}

#[wasm_bindgen(js_name = shareLink)]
pub fn share_link(origin: &str, event_id: &str) -> String {
    config::share_link(origin, event_id)
}

#[wasm_bindgen(js_name = resultsLink)]
pub fn results_link(origin: &str, event_id: &str) -> String {
    config::results_link(origin, event_id)
}
