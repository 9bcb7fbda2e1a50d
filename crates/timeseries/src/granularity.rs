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

//! Time units and resampling modes

use crate::error::ResampleError;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Requested time unit for a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    pub const ALL: [Granularity; 9] = [
        Granularity::Millisecond,
        Granularity::Second,
        Granularity::Minute,
        Granularity::Hour,
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Quarter,
        Granularity::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Millisecond => "millisecond",
            Granularity::Second => "second",
            Granularity::Minute => "minute",
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        }
    }

    /// Nominal length of one unit; month, quarter and year use 30, 90 and 365 days
    pub fn unit_millis(&self) -> i64 {
        match self {
            Granularity::Millisecond => 1,
            Granularity::Second => MILLIS_PER_SECOND,
            Granularity::Minute => MILLIS_PER_MINUTE,
            Granularity::Hour => MILLIS_PER_HOUR,
            Granularity::Day => MILLIS_PER_DAY,
            Granularity::Week => 7 * MILLIS_PER_DAY,
            Granularity::Month => 30 * MILLIS_PER_DAY,
            Granularity::Quarter => 90 * MILLIS_PER_DAY,
            Granularity::Year => 365 * MILLIS_PER_DAY,
        }
    }

    /// Units whose windows widen to the sparse lookback when they come back short
    pub fn is_sub_hour(&self) -> bool {
        matches!(self, Granularity::Millisecond | Granularity::Second | Granularity::Minute)
    }

    /// Bucket length in days used to spot a partial oldest bucket
    pub fn trim_span_days(&self) -> Option<i64> {
        match self {
            Granularity::Week => Some(7),
            Granularity::Month => Some(30),
            Granularity::Quarter => Some(90),
            _ => None,
        }
    }

    /// Calendar bucket a timestamp falls into
    ///
    /// Day and week are epoch-aligned; month, quarter and year follow the calendar.
    pub fn bucket_key(&self, at: &DateTime<Utc>) -> i64 {
        let millis = at.timestamp_millis();
        let month0 = i64::from(at.month0());
        let year = i64::from(at.year());

        match self {
            Granularity::Month => year * 12 + month0,
            Granularity::Quarter => year * 4 + month0 / 3,
            Granularity::Year => year,
            _ => millis.div_euclid(self.unit_millis()),
        }
    }

    /// Abbreviated unit names accepted on the command line
    fn from_short(abbreviation: &str) -> Option<Self> {
        match abbreviation {
            "ms" | "msec" => Some(Granularity::Millisecond),
            "s" | "sec" => Some(Granularity::Second),
            "min" => Some(Granularity::Minute),
            "h" | "hr" => Some(Granularity::Hour),
            "d" => Some(Granularity::Day),
            "w" | "wk" => Some(Granularity::Week),
            "mo" => Some(Granularity::Month),
            "q" | "qtr" => Some(Granularity::Quarter),
            "y" | "yr" => Some(Granularity::Year),
            _ => None,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ResampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let singular = normalized.strip_suffix('s').unwrap_or(&normalized);

        Granularity::from_short(&normalized)
            .or_else(|| Granularity::from_short(singular))
            .or_else(|| Granularity::ALL.into_iter().find(|granularity| granularity.as_str() == singular))
            .ok_or_else(|| ResampleError::UnknownGranularity(s.to_string()))
    }
}

/// How a window is reduced once selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleMode {
    /// Chunks of raw points collapse to their mean
    #[default]
    Average,
    /// Chunks of raw points collapse to their first point
    Pick,
    /// Most recent calendar buckets, each averaged
    #[serde(alias = "fixedBucket")]
    FixedBucket,
}

impl fmt::Display for ResampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResampleMode::Average => f.write_str("average"),
            ResampleMode::Pick => f.write_str("pick"),
            ResampleMode::FixedBucket => f.write_str("fixed-bucket"),
        }
    }
}

impl FromStr for ResampleMode {
    type Err = ResampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "average" | "avg" => Ok(ResampleMode::Average),
            "pick" => Ok(ResampleMode::Pick),
            "fixedbucket" | "fixed" => Ok(ResampleMode::FixedBucket),
            _ => Err(ResampleError::UnknownMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_granularity_parsing() {
        assert_eq!("week".parse::<Granularity>().unwrap(), Granularity::Week);
        assert_eq!("Months".parse::<Granularity>().unwrap(), Granularity::Month);
        assert_eq!(" second ".parse::<Granularity>().unwrap(), Granularity::Second);
        assert!(matches!("bogus".parse::<Granularity>(), Err(ResampleError::UnknownGranularity(_))));
    }

    #[test]
    fn test_short_unit_names() {
        let cases = [
            ("ms", Granularity::Millisecond),
            ("s", Granularity::Second),
            ("secs", Granularity::Second),
            ("min", Granularity::Minute),
            ("mins", Granularity::Minute),
            ("h", Granularity::Hour),
            ("hrs", Granularity::Hour),
            ("d", Granularity::Day),
            ("w", Granularity::Week),
            ("mo", Granularity::Month),
            ("q", Granularity::Quarter),
            ("Y", Granularity::Year),
        ];

        for (name, expected) in cases {
            assert_eq!(name.parse::<Granularity>().unwrap(), expected, "{name}");
        }
        assert_eq!("minutes".parse::<Granularity>().unwrap(), Granularity::Minute);
        assert!("m".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("average".parse::<ResampleMode>().unwrap(), ResampleMode::Average);
        assert_eq!("fixedBucket".parse::<ResampleMode>().unwrap(), ResampleMode::FixedBucket);
        assert_eq!("fixed-bucket".parse::<ResampleMode>().unwrap(), ResampleMode::FixedBucket);
        assert!("median".parse::<ResampleMode>().is_err());
    }

    #[test]
    fn test_calendar_bucket_keys() {
        let jan = Utc.with_ymd_and_hms(2024, 1, 31, 23, 0, 0).unwrap();
        let feb = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let apr = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();

        assert_eq!(Granularity::Month.bucket_key(&jan), 2024 * 12);
        assert_eq!(Granularity::Month.bucket_key(&feb), 2024 * 12 + 1);
        assert_eq!(Granularity::Quarter.bucket_key(&feb), 2024 * 4);
        assert_eq!(Granularity::Quarter.bucket_key(&apr), 2024 * 4 + 1);
        assert_eq!(Granularity::Year.bucket_key(&apr), 2024);
        assert_ne!(Granularity::Day.bucket_key(&jan), Granularity::Day.bucket_key(&feb));
    }

    #[test]
    fn test_pre_epoch_keys_floor() {
        let before = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(Granularity::Day.bucket_key(&before), -1);
        assert_eq!(Granularity::Hour.bucket_key(&before), -1);
    }
}
