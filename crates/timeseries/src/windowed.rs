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

//! Recent-window selection followed by raw-point chunking

use crate::config::ResampleConfig;
use crate::granularity::{Granularity, ResampleMode};
use crate::point::{TimePoint, mean};
use chrono::{DateTime, Utc};
use tracing::{debug, trace};

/// Start of the lookback window, never earlier than the first point
pub fn window_start(data: &[TimePoint], granularity: Granularity, window_size: usize) -> Option<DateTime<Utc>> {
    let (first, last) = (data.first()?, data.last()?);
    let span = granularity.unit_millis().saturating_mul(i64::try_from(window_size).unwrap_or(i64::MAX));
    let requested = last.x.timestamp_millis().saturating_sub(span);

    if requested <= first.x.timestamp_millis() {
        Some(first.x)
    } else {
        DateTime::from_timestamp_millis(requested)
    }
}

fn since(data: &[TimePoint], start: DateTime<Utc>) -> Vec<TimePoint> {
    data.iter().filter(|point| point.x >= start).cloned().collect()
}

pub(crate) fn reduce(data: &[TimePoint], granularity: Granularity, window_size: usize, mode: ResampleMode, config: &ResampleConfig) -> Vec<TimePoint> {
    let (Some(start), Some(last)) = (window_start(data, granularity, window_size), data.last()) else {
        return Vec::new();
    };

    let mut selected = since(data, start);

    if granularity.is_sub_hour() {
        if selected.len() < window_size {
            let fallback = last.x.timestamp_millis().saturating_sub(config.sparse_lookback_millis());
            debug!(
                granularity = %granularity,
                window_size,
                selected = selected.len(),
                lookback_secs = config.sparse_lookback_secs,
                "Sparse window, widening to fixed lookback"
            );
            selected = data.iter().filter(|point| point.x.timestamp_millis() >= fallback).cloned().collect();
        }
        return selected;
    }

    let Some(chunk_size) = config.chunk_sizes.for_granularity(granularity) else {
        return selected;
    };

    let reduced: Vec<TimePoint> = selected
        .chunks(chunk_size)
        .filter_map(|chunk| {
            let head = chunk.first()?;
            match mode {
                ResampleMode::Pick => Some(head.clone()),
                _ => mean(chunk.iter().map(|point| &point.y)).map(|y| TimePoint { x: head.x, y }),
            }
        })
        .collect();

    trace!(granularity = %granularity, chunk_size, input = selected.len(), output = reduced.len(), "Chunked window");
    reduced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Sample;
    use chrono::{Duration, TimeZone};

    fn minutes(count: i64, step: Duration) -> Vec<TimePoint> {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        (0..count).map(|i| TimePoint::new(base + step * i as i32, i as f64)).collect()
    }

    #[test]
    fn test_window_start_clamps_to_first_point() {
        let data = minutes(10, Duration::minutes(1));
        assert_eq!(window_start(&data, Granularity::Minute, 1_000), Some(data[0].x));
        assert_eq!(window_start(&data, Granularity::Minute, 3), Some(data[9].x - Duration::minutes(3)));
        assert_eq!(window_start(&[], Granularity::Minute, 3), None);
    }

    #[test]
    fn test_hour_and_day_return_window_slice() {
        let data = minutes(48, Duration::hours(1));
        let out = reduce(&data, Granularity::Hour, 5, ResampleMode::Average, &ResampleConfig::default());

        assert_eq!(out.len(), 6);
        assert_eq!(out.first().unwrap().y, Sample::Scalar(42.0));
        assert_eq!(out.last().unwrap().y, Sample::Scalar(47.0));
    }

    #[test]
    fn test_sparse_minutes_widen_to_lookback() {
        // one point every 30 minutes; a 5 minute window only sees the last point
        let data = minutes(20, Duration::minutes(30));
        let out = reduce(&data, Granularity::Minute, 5, ResampleMode::Average, &ResampleConfig::default());

        // last point is at 9h30, the 4 hour lookback starts at 5h30
        assert_eq!(out.len(), 9);
        assert_eq!(out[0].x, data[11].x);
    }

    #[test]
    fn test_dense_minutes_keep_requested_window() {
        let data = minutes(120, Duration::minutes(1));
        let out = reduce(&data, Granularity::Minute, 10, ResampleMode::Average, &ResampleConfig::default());

        assert_eq!(out.len(), 11);
        assert_eq!(out[0].x, data[109].x);
    }

    #[test]
    fn test_average_and_pick_chunks() {
        let data = minutes(10, Duration::days(1));
        let config = ResampleConfig::default();

        let averaged = reduce(&data, Granularity::Week, 52, ResampleMode::Average, &config);
        assert_eq!(averaged.len(), 2);
        assert_eq!(averaged[0].x, data[0].x);
        assert_eq!(averaged[0].y, Sample::Scalar(3.0));
        assert_eq!(averaged[1].x, data[7].x);
        assert_eq!(averaged[1].y, Sample::Scalar(8.0));

        let picked = reduce(&data, Granularity::Week, 52, ResampleMode::Pick, &config);
        assert_eq!(picked, vec![data[0].clone(), data[7].clone()]);
    }
}
