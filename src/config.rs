use crate::time::{time_options, ClockTime, PICKER_EARLIEST, PICKER_LATEST};
use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Bounds of the time dropdowns on the create-event page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PickerConfig {
    pub earliest: ClockTime,
    pub latest: ClockTime,
    #[cfg_attr(feature = "serde", serde(rename = "stepMinutes"))]
    pub step_minutes: u16,
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            earliest: PICKER_EARLIEST,
            latest: PICKER_LATEST,
            step_minutes: 15,
        }
    }
}

impl PickerConfig {
    /// # Examples
    /// ```
    /// use datepoll_libs::config::PickerConfig;
    ///
    /// let options = PickerConfig::default().options();
    ///
    /// assert_eq!(options.first().unwrap().to_string(), "06:00");
    /// assert_eq!(options.last().unwrap().to_string(), "23:45");
    /// assert_eq!(options.len(), 72);
    /// ```
    pub fn options(&self) -> Vec<ClockTime> {
        time_options(self.earliest, self.latest, self.step_minutes)
    }
}

pub const API_URL_VAR: &str = "DATEPOLL_API_URL";
pub const TIMEOUT_VAR: &str = "DATEPOLL_TIMEOUT_SECS";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ClientConfig {
    #[cfg_attr(feature = "serde", serde(rename = "baseUrl"))]
    pub base_url: String,
    #[cfg_attr(feature = "serde", serde(rename = "timeoutSecs"))]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: String::from("http://localhost:8080/api"),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `DATEPOLL_API_URL` and `DATEPOLL_TIMEOUT_SECS`
    /// when set. An unparsable timeout keeps the default.
    pub fn from_env() -> ClientConfig {
        let mut config = ClientConfig::default();

        if let Ok(url) = env::var(API_URL_VAR) {
            config.base_url = url;
        }
        if let Ok(raw) = env::var(TIMEOUT_VAR) {
            match raw.parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => warn!("Ignoring {}={:?}, expected whole seconds", TIMEOUT_VAR, raw),
            }
        }

        config
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `path` appended to the base URL with exactly one slash between them.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// The link a host hands out so others can answer, `{origin}/event/{id}`.
///
/// # Examples
/// ```
/// use datepoll_libs::config::{results_link, share_link};
///
/// assert_eq!(
///     share_link("https://polls.example.org/", "a1b2"),
///     "https://polls.example.org/event/a1b2"
/// );
/// assert_eq!(
///     results_link("https://polls.example.org", "a1b2"),
///     "https://polls.example.org/event/a1b2/results"
/// );
/// ```
pub fn share_link(origin: &str, event_id: &str) -> String {
    format!("{}/event/{}", origin.trim_end_matches('/'), event_id)
}

pub fn results_link(origin: &str, event_id: &str) -> String {
    format!("{}/results", share_link(origin, event_id))
}
