use crate::error::ValidationError;
use chrono::{DateTime, NaiveDate};
use core::fmt;
use core::str::FromStr;
use num::Integer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// First and last entries of the default time dropdown.
pub const PICKER_EARLIEST: ClockTime = ClockTime(6 * 60);
pub const PICKER_LATEST: ClockTime = ClockTime(23 * 60 + 45);

/// Wall-clock time with minute precision, `00:00` through `23:59`.
/// Stored as minutes since midnight so ordering is plain integer ordering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// # Examples
    /// ```
    /// use datepoll_libs::time::ClockTime;
    ///
    /// let time = ClockTime::new(9, 30).unwrap();
    /// assert_eq!(time.minutes(), 570);
    /// assert!(ClockTime::new(24, 0).is_none());
    /// ```
    pub fn new(hour: u16, minute: u16) -> Option<ClockTime> {
        if hour < 24 && minute < 60 {
            Some(ClockTime(hour * 60 + minute))
        } else {
            None
        }
    }

    pub fn from_minutes(minutes: u16) -> Option<ClockTime> {
        if minutes < MINUTES_PER_DAY {
            Some(ClockTime(minutes))
        } else {
            None
        }
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0.div_rem(&60).0
    }

    pub fn minute(self) -> u16 {
        self.0.div_rem(&60).1
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, minute) = self.0.div_rem(&60);
        write!(f, "{:02}:{:02}", hour, minute)
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    /// Accepts exactly `HH:MM`, zero padded, 24 hour.
    ///
    /// # Examples
    /// ```
    /// use datepoll_libs::time::ClockTime;
    ///
    /// assert_eq!("07:05".parse::<ClockTime>().unwrap().to_string(), "07:05");
    /// assert!("7:05".parse::<ClockTime>().is_err());
    /// assert!("24:00".parse::<ClockTime>().is_err());
    /// ```
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime {
            value: value.to_string(),
        };

        let bytes = value.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }

        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }

        let [h1, h2, m1, m2] = digits.map(|d| u16::from(d - b'0'));
        ClockTime::new(h1 * 10 + h2, m1 * 10 + m2).ok_or_else(invalid)
    }
}

#[cfg(feature = "serde")]
impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for ClockTime {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(ClockTime(u.int_in_range(0..=MINUTES_PER_DAY - 1)?))
    }
}

/// Half-open `[start, end)` range within a single day. `start < end` always.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TimeRange {
    #[cfg_attr(feature = "serde", serde(rename = "start_time"))]
    start: ClockTime,
    #[cfg_attr(feature = "serde", serde(rename = "end_time"))]
    end: ClockTime,
}

impl TimeRange {
    /// Construct a new Time Range
    ///
    /// # Examples
    /// ```
    /// use datepoll_libs::error::ValidationError;
    /// use datepoll_libs::time::{ClockTime, TimeRange};
    ///
    /// let ten = ClockTime::new(10, 0).unwrap();
    /// let eleven = ClockTime::new(11, 0).unwrap();
    ///
    /// assert!(TimeRange::new(ten, eleven).is_ok());
    /// assert_eq!(
    ///     TimeRange::new(eleven, ten),
    ///     Err(ValidationError::InvalidRange { start: eleven, end: ten })
    /// );
    /// assert!(TimeRange::new(ten, ten).is_err());
    /// ```
    pub fn new(start: ClockTime, end: ClockTime) -> Result<TimeRange, ValidationError> {
        if start < end {
            Ok(TimeRange { start, end })
        } else {
            Err(ValidationError::InvalidRange { start, end })
        }
    }

    /// Parses the raw picker values. Empty fields are reported before
    /// malformed ones, and both before the ordering check.
    ///
    /// # Examples
    /// ```
    /// use datepoll_libs::error::ValidationError;
    /// use datepoll_libs::time::TimeRange;
    ///
    /// assert!(TimeRange::parse("10:00", "11:30").is_ok());
    /// assert_eq!(
    ///     TimeRange::parse("", "11:30"),
    ///     Err(ValidationError::MissingField { field: "start time" })
    /// );
    /// assert!(matches!(
    ///     TimeRange::parse("10:00", "09:00"),
    ///     Err(ValidationError::InvalidRange { .. })
    /// ));
    /// ```
    pub fn parse(start: &str, end: &str) -> Result<TimeRange, ValidationError> {
        let start = start.trim();
        let end = end.trim();

        if start.is_empty() {
            return Err(ValidationError::MissingField {
                field: "start time",
            });
        }
        if end.is_empty() {
            return Err(ValidationError::MissingField { field: "end time" });
        }

        TimeRange::new(start.parse()?, end.parse()?)
    }

    /// Convenience function for readability
    pub fn start(self) -> ClockTime {
        self.start
    }

    /// Convenience function for readability
    pub fn end(self) -> ClockTime {
        self.end
    }

    pub fn duration_minutes(self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for TimeRange {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let start = u.int_in_range(0..=MINUTES_PER_DAY - 2)?;
        let end = u.int_in_range(start + 1..=MINUTES_PER_DAY - 1)?;
        Ok(TimeRange {
            start: ClockTime(start),
            end: ClockTime(end),
        })
    }
}

/// Parses the canonical `YYYY-MM-DD` date key.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use datepoll_libs::time::parse_date;
///
/// assert_eq!(parse_date("2025-06-01"), Ok(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
/// assert!(parse_date("01.06.2025").is_err());
/// ```
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField { field: "date" });
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        value: value.to_string(),
    })
}

/// Parses a date as the backend hands it back: the bare `YYYY-MM-DD` key, or
/// an RFC 3339 timestamp of which only the calendar day is kept.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use datepoll_libs::time::parse_stored_date;
///
/// let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
///
/// assert_eq!(parse_stored_date("2025-06-01"), Ok(day));
/// assert_eq!(parse_stored_date("2025-06-01T00:00:00Z"), Ok(day));
/// assert_eq!(parse_stored_date("2025-06-01T00:00:00+02:00"), Ok(day));
/// assert!(parse_stored_date("2025-06-01T25:00:00Z").is_err());
/// ```
pub fn parse_stored_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.len() <= 10 {
        return parse_date(value);
    }

    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| ValidationError::InvalidDate {
            value: value.to_string(),
        })
}

/// Every selectable time from `earliest` through `latest`, `step` minutes
/// apart. A zero step is treated as one minute.
///
/// # Examples
/// ```
/// use datepoll_libs::time::{time_options, ClockTime};
///
/// let options = time_options(
///     ClockTime::new(6, 0).unwrap(),
///     ClockTime::new(7, 0).unwrap(),
///     15,
/// );
///
/// assert_eq!(
///     options.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
///     vec!["06:00", "06:15", "06:30", "06:45", "07:00"]
/// );
/// ```
pub fn time_options(earliest: ClockTime, latest: ClockTime, step: u16) -> Vec<ClockTime> {
    let step = step.max(1);

    (earliest.minutes()..=latest.minutes())
        .step_by(usize::from(step))
        .map(ClockTime)
        .collect()
}
