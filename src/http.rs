use crate::api::{
    CreateEventRequest, CreatedEvent, EventDto, EventResultsDto, FinalizeRequest, PollApi,
    SubmitResponseRequest,
};
use crate::config::ClientConfig;
use crate::error::PollError;
use log::{debug, trace};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// [`PollApi`] over HTTP, one blocking request per call.
#[derive(Debug, Clone)]
pub struct HttpPollApi {
    client: Client,
    config: ClientConfig,
}

impl HttpPollApi {
    pub fn new(config: ClientConfig) -> Result<HttpPollApi, PollError> {
        let client = Client::builder()
            .user_agent(concat!("datepoll/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|err| PollError::Network(err.to_string()))?;

        Ok(HttpPollApi { client, config })
    }

    pub fn from_env() -> Result<HttpPollApi, PollError> {
        HttpPollApi::new(ClientConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// Sends `request`, turning transport failures and non-2xx statuses into
    /// `PollError`s. A 404 means the event id is unknown.
    fn send(&self, request: RequestBuilder, event_id: Option<&str>) -> Result<Response, PollError> {
        let response = request
            .send()
            .map_err(|err| PollError::Network(err.to_string()))?;

        let status = response.status();
        trace!("{} {}", status, response.url());

        match (status, event_id) {
            (StatusCode::NOT_FOUND, Some(event_id)) => Err(PollError::NotFound {
                event_id: event_id.to_string(),
            }),
            (status, _) if !status.is_success() => Err(PollError::Network(format!(
                "Server responded with {}",
                status
            ))),
            _ => Ok(response),
        }
    }

    fn json<T: DeserializeOwned>(response: Response) -> Result<T, PollError> {
        response
            .json()
            .map_err(|err| PollError::Network(format!("Unreadable response: {}", err)))
    }
}

impl PollApi for HttpPollApi {
    fn create_event(&self, request: &CreateEventRequest) -> Result<CreatedEvent, PollError> {
        debug!("POST events");
        let response = self.send(self.client.post(self.url("events")).json(request), None)?;
        HttpPollApi::json(response)
    }

    fn get_event(&self, event_id: &str) -> Result<EventDto, PollError> {
        debug!("GET events/{}", event_id);
        let url = self.url(&format!("events/{}", event_id));
        let response = self.send(self.client.get(url), Some(event_id))?;
        HttpPollApi::json(response)
    }

    fn submit_response(
        &self,
        event_id: &str,
        request: &SubmitResponseRequest,
    ) -> Result<(), PollError> {
        debug!("POST events/{}/respond", event_id);
        let url = self.url(&format!("events/{}/respond", event_id));
        self.send(self.client.post(url).json(request), Some(event_id))?;
        Ok(())
    }

    fn get_results(&self, event_id: &str) -> Result<EventResultsDto, PollError> {
        debug!("GET events/{}/results", event_id);
        let url = self.url(&format!("events/{}/results", event_id));
        let response = self.send(self.client.get(url), Some(event_id))?;
        HttpPollApi::json(response)
    }

    fn finalize(&self, event_id: &str, request: &FinalizeRequest) -> Result<(), PollError> {
        debug!("PATCH events/{}/finalize", event_id);
        let url = self.url(&format!("events/{}/finalize", event_id));
        self.send(self.client.patch(url).json(request), Some(event_id))?;
        Ok(())
    }
}
