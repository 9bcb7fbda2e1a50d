// FieldOps
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Time-series points and their sample values

use crate::error::{ResampleError, ResampleResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value carried by a point: a single reading or a fixed-width vector for multi-series charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sample {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl Sample {
    pub fn shape(&self) -> Shape {
        match self {
            Sample::Scalar(_) => Shape::Scalar,
            Sample::Vector(values) => Shape::Vector(values.len()),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Sample::Scalar(value) => Some(*value),
            Sample::Vector(_) => None,
        }
    }
}

impl From<f64> for Sample {
    fn from(value: f64) -> Self {
        Sample::Scalar(value)
    }
}

impl From<Vec<f64>> for Sample {
    fn from(values: Vec<f64>) -> Self {
        Sample::Vector(values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Vector(usize),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => write!(f, "scalar"),
            Shape::Vector(width) => write!(f, "vector[{width}]"),
        }
    }
}

/// A single `{x, y}` observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    #[serde(with = "timestamp")]
    pub x: DateTime<Utc>,
    pub y: Sample,
}

impl TimePoint {
    pub fn new(x: DateTime<Utc>, y: impl Into<Sample>) -> Self {
        Self { x, y: y.into() }
    }

    /// Build a point from any timestamp format accepted on the wire
    pub fn parse(x: &str, y: impl Into<Sample>) -> ResampleResult<Self> {
        Ok(Self::new(parse_timestamp(x)?, y))
    }
}

/// Parse an RFC 3339 instant, a naive `YYYY-MM-DD[ HH:MM:SS]` timestamp (read as UTC), or a bare date
pub fn parse_timestamp(raw: &str) -> ResampleResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ResampleError::InvalidTimestamp(raw.to_string()))
}

/// Check that every point shares the shape of the first one
pub fn validate_shapes(data: &[TimePoint]) -> ResampleResult<()> {
    let Some(first) = data.first() else {
        return Ok(());
    };

    let expected = first.y.shape();
    for (index, point) in data.iter().enumerate().skip(1) {
        let found = point.y.shape();
        if found != expected {
            return Err(ResampleError::ShapeMismatch { index, expected, found });
        }
    }

    Ok(())
}

/// Running component-wise sum used to average a bucket
///
/// Callers validate shapes beforehand; vectors are combined pairwise.
#[derive(Debug, Clone)]
pub(crate) struct Accumulator {
    sum: Sample,
    count: usize,
}

impl Accumulator {
    pub(crate) fn new(first: &Sample) -> Self {
        Self { sum: first.clone(), count: 1 }
    }

    pub(crate) fn add(&mut self, sample: &Sample) {
        match (&mut self.sum, sample) {
            (Sample::Scalar(total), Sample::Scalar(value)) => *total += value,
            (Sample::Vector(totals), Sample::Vector(values)) => {
                for (total, value) in totals.iter_mut().zip(values) {
                    *total += value;
                }
            }
            _ => return,
        }
        self.count += 1;
    }

    pub(crate) fn mean(&self) -> Sample {
        let count = self.count as f64;
        match &self.sum {
            Sample::Scalar(total) => Sample::Scalar(total / count),
            Sample::Vector(totals) => Sample::Vector(totals.iter().map(|total| total / count).collect()),
        }
    }
}

/// Mean of a non-empty run of samples
pub(crate) fn mean<'a>(mut samples: impl Iterator<Item = &'a Sample>) -> Option<Sample> {
    let mut acc = Accumulator::new(samples.next()?);
    for sample in samples {
        acc.add(sample);
    }
    Some(acc.mean())
}

mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Float(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => DateTime::from_timestamp_millis(ms).ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
            Raw::Float(ms) => DateTime::from_timestamp_millis(ms as i64).ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
            Raw::Text(text) => super::parse_timestamp(&text).map_err(D::Error::custom),
        }
    }
}
