//! Title/date overrides: decoding from the page URL and validation.
//!
//! Query values are resolved per field: an invalid `title` keeps the default
//! title without affecting a valid `date`, and vice versa. The on-page form is
//! stricter and only navigates when both fields pass.

use crate::config::{
    DATE_PARAM, DEFAULT_TARGET_ISO, DEFAULT_TITLE, TITLE_MAX_CHARS, TITLE_MIN_CHARS, TITLE_PARAM,
};
use crate::PageSession;
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;
use url::Url;

// YYYY-MM-DDTHH:MM:SS[.fraction][Z|±HH:MM]; seconds stop at 59 (no leap seconds)
static ISO_DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:[0-5]\d(?:\.\d+)?)(Z|[+-]\d{2}:\d{2})?$").unwrap()
});
static OFFSET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-])(\d{2}):(\d{2})$").unwrap());

static DEFAULT_TARGET: Lazy<TargetDate> = Lazy::new(|| {
    TargetDate::parse(DEFAULT_TARGET_ISO).expect("DEFAULT_TARGET_ISO must be a valid datetime")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Title is {0} characters long (at most {max} allowed)", max = TITLE_MAX_CHARS)]
    TitleTooLong(usize),
    #[error("Invalid ISO datetime {0:?}. Use e.g. 2025-08-30T00:00:00")]
    InvalidDate(String),
    #[error("Invalid page URL: {0}")]
    InvalidUrl(String),
}

/// A validated ISO-8601 datetime, with or without a UTC offset.
///
/// Offset-less values are wall-clock times and only become an instant once a
/// time zone is supplied (the browser's local zone in the page).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetDate {
    wall: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl TargetDate {
    /// Parse `YYYY-MM-DDTHH:MM:SS[.fff][Z|±HH:MM]`, rejecting impossible calendar dates.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDate(input.to_string());

        let captures = ISO_DATETIME_REGEX.captures(input).ok_or_else(invalid)?;
        let wall: NaiveDateTime = captures[1].parse().map_err(|_| invalid())?;
        let offset = match captures.get(2) {
            None => None,
            Some(m) => Some(parse_offset(m.as_str()).ok_or_else(invalid)?),
        };

        Ok(Self { wall, offset })
    }

    /// The compiled-in countdown target.
    pub fn default_target() -> Self {
        *DEFAULT_TARGET
    }

    pub fn wall_clock(&self) -> NaiveDateTime {
        self.wall
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// The instant this value names, expressed in `tz`.
    ///
    /// Offset-less values are read as local time in `tz`. A wall time skipped by a
    /// DST jump is moved forward by an hour; ambiguous ones take the earlier instant.
    pub fn resolve_in<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        match self.offset {
            Some(offset) => tz.from_utc_datetime(&(self.wall - offset)),
            None => tz
                .from_local_datetime(&self.wall)
                .earliest()
                .or_else(|| {
                    tz.from_local_datetime(&(self.wall + Duration::hours(1)))
                        .earliest()
                })
                .unwrap_or_else(|| tz.from_utc_datetime(&self.wall)),
        }
    }

    pub fn epoch_ms_in<Tz: TimeZone>(&self, tz: &Tz) -> i64 {
        self.resolve_in(tz).timestamp_millis()
    }
}

impl fmt::Display for TargetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wall.format("%Y-%m-%dT%H:%M:%S%.f"))?;
        match self.offset {
            Some(offset) if offset.local_minus_utc() == 0 => write!(f, "Z"),
            Some(offset) => write!(f, "{offset}"),
            None => Ok(()),
        }
    }
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    if raw == "Z" {
        return FixedOffset::east_opt(0);
    }
    let captures = OFFSET_REGEX.captures(raw)?;
    let hours: i32 = captures[2].parse().ok()?;
    let minutes: i32 = captures[3].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    let seconds = hours * 3_600 + minutes * 60;
    match &captures[1] {
        "-" => FixedOffset::west_opt(seconds),
        _ => FixedOffset::east_opt(seconds),
    }
}

/// Check a title override is 1–60 characters long.
///
/// Length is measured in UTF-16 code units, the unit the form input's
/// `maxlength` counts in, so the query string and the form accept the same titles.
pub fn validate_title(input: &str) -> Result<String, ValidationError> {
    let len = input.encode_utf16().count();
    if len < TITLE_MIN_CHARS {
        Err(ValidationError::EmptyTitle)
    } else if len > TITLE_MAX_CHARS {
        Err(ValidationError::TitleTooLong(len))
    } else {
        Ok(input.to_string())
    }
}

/// Raw, still unvalidated override values taken from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub title: Option<String>,
    pub date: Option<String>,
}

impl QueryParams {
    /// Collect `title`/`date` from decoded key/value pairs; the last occurrence wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                TITLE_PARAM => params.title = Some(value.into()),
                DATE_PARAM => params.date = Some(value.into()),
                _ => {}
            }
        }
        params
    }

    /// Read the overrides from a full URL. An unparsable URL yields no overrides.
    pub fn from_href(href: &str) -> Self {
        match Url::parse(href) {
            Ok(url) => Self::from_pairs(url.query_pairs()),
            Err(err) => {
                debug!("Ignoring query string of unparsable URL {href:?}: {err}");
                Self::default()
            }
        }
    }

    /// Validate each field independently, substituting defaults for rejected ones.
    pub fn resolve(&self) -> PageSession {
        let title = self
            .title
            .as_deref()
            .and_then(|raw| {
                validate_title(raw)
                    .map_err(|err| debug!("Ignoring title override: {err}"))
                    .ok()
            })
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let target = self
            .date
            .as_deref()
            .and_then(|raw| {
                TargetDate::parse(raw)
                    .map_err(|err| debug!("Ignoring date override: {err}"))
                    .ok()
            })
            .unwrap_or_else(TargetDate::default_target);

        PageSession { title, target }
    }
}

/// Contents of the on-page override form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideForm {
    pub title: String,
    pub date: String,
}

impl OverrideForm {
    /// Prefill with the values currently on display.
    pub fn from_session(session: &PageSession) -> Self {
        Self {
            title: session.title.clone(),
            date: session.target.to_string(),
        }
    }

    /// Both fields must pass; the first failure is returned.
    pub fn validate(&self) -> Result<(String, TargetDate), ValidationError> {
        let title = validate_title(&self.title)?;
        let date = TargetDate::parse(&self.date)?;
        Ok((title, date))
    }

    /// URL to navigate to for this form, or the reason the form was rejected.
    pub fn submit_href(&self, current_href: &str) -> Result<String, ValidationError> {
        self.validate()?;
        override_href(current_href, &self.title, &self.date)
    }
}

/// Replace the `title` and `date` query parameters of `current_href`, keeping the rest.
pub fn override_href(current_href: &str, title: &str, date: &str) -> Result<String, ValidationError> {
    let mut url =
        Url::parse(current_href).map_err(|err| ValidationError::InvalidUrl(err.to_string()))?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != TITLE_PARAM && key != DATE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(TITLE_PARAM, title)
        .append_pair(DATE_PARAM, date);

    Ok(url.into())
}
