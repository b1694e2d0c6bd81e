//! Input validation
//!
//! Every command checks its inputs here before any request is issued, so a
//! missing field never costs a round trip to the backend.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use studio_core::dto::job::Clip;

/// A user input that cannot be sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Returns the trimmed value, failing when it is blank
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional value, treating blank as absent
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trims every entry and drops blank ones, failing when nothing is left
pub fn require_items(field: &'static str, items: &[String]) -> Result<Vec<String>, ValidationError> {
    let kept: Vec<String> = items
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(str::to_string)
        .collect();

    if kept.is_empty() {
        return Err(ValidationError::new(field, "at least one value is required"));
    }
    Ok(kept)
}

/// Checks that a number lies within `min..=max`
pub fn require_range<T>(field: &'static str, value: T, min: T, max: T) -> Result<T, ValidationError>
where
    T: PartialOrd + fmt::Display + Copy,
{
    if value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("{} is outside {}..={}", value, min, max),
        ));
    }
    Ok(value)
}

/// Output frame size, written as `WIDTHxHEIGHT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Resolution {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::new("resolution", format!("'{}' is not WIDTHxHEIGHT", s));

        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;

        // Encoders need even dimensions
        if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
            return Err(ValidationError::new(
                "resolution",
                format!("{}x{} must be non-zero even dimensions", width, height),
            ));
        }
        if width > 4096 || height > 4096 {
            return Err(ValidationError::new(
                "resolution",
                format!("{}x{} exceeds 4096 pixels", width, height),
            ));
        }

        Ok(Self { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses a clip written as `URL` or `URL@START-END`
///
/// Either bound of the trim range may be omitted (`@5-`, `@-12.5`). A suffix
/// after `@` that is not a numeric range is kept as part of the URL.
pub fn parse_clip(input: &str) -> Result<Clip, ValidationError> {
    let input = input.trim();

    let (url, range) = match input.rsplit_once('@') {
        Some((url, range))
            if !range.is_empty()
                && range.contains('-')
                && range.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') =>
        {
            (url, Some(range))
        }
        _ => (input, None),
    };

    let url = require_text("clip", url)?;

    let (start, end) = match range {
        None => (None, None),
        Some(range) => {
            let (s, e) = range
                .split_once('-')
                .ok_or_else(|| ValidationError::new("clip", "trim must be START-END"))?;
            (parse_seconds(s)?, parse_seconds(e)?)
        }
    };

    if let (Some(s), Some(e)) = (start, end) {
        if e <= s {
            return Err(ValidationError::new(
                "clip",
                format!("trim end {} must be after start {}", e, s),
            ));
        }
    }

    Ok(Clip { url, start, end })
}

fn parse_seconds(value: &str) -> Result<Option<f64>, ValidationError> {
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(Some(secs)),
        _ => Err(ValidationError::new(
            "clip",
            format!("'{}' is not a number of seconds", value),
        )),
    }
}
