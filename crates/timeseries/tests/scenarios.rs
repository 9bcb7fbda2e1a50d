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

use chrono::{Duration, TimeZone, Utc};
use fieldops_timeseries::{EdgeTrim, Granularity, ResampleConfig, ResampleMode, Resampler, Sample, TimePoint, resample};

fn load(json: &str) -> Vec<TimePoint> {
    serde_json::from_str(json).expect("fixture parses")
}

#[test]
fn test_sparse_weekly_average() {
    let data = load(r#"[{"x": "2024-01-01", "y": 10}, {"x": "2024-01-08", "y": 20}, {"x": "2024-01-15", "y": 30}]"#);

    let out = resample(&data, Granularity::Week, 2, ResampleMode::Average).unwrap();

    assert!(out.len() <= 2);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].x, data[0].x);
    assert_eq!(out[0].y, Sample::Scalar(20.0));
}

#[test]
fn test_daily_revenue_by_month_pick() {
    let base = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let data: Vec<TimePoint> = (0..365).map(|d| TimePoint::new(base + Duration::days(d), d as f64)).collect();

    // six 30-day months back from the last point
    let out = resample(&data, Granularity::Month, 6, ResampleMode::Pick).unwrap();

    assert_eq!(out.len(), 7);
    assert_eq!(out[0].x, data[184].x);
    assert!(out.iter().all(|point| data.contains(point)));
}

#[test]
fn test_multi_series_week_average() {
    let base = Utc.with_ymd_and_hms(2024, 2, 5, 0, 0, 0).unwrap();
    let data: Vec<TimePoint> = (0..14).map(|d| TimePoint::new(base + Duration::days(d), vec![d as f64, 100.0])).collect();

    let out = resample(&data, Granularity::Week, 4, ResampleMode::Average).unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].y, Sample::Vector(vec![3.0, 100.0]));
    assert_eq!(out[1].y, Sample::Vector(vec![10.0, 100.0]));
}

#[test]
fn test_fixed_bucket_quarters_from_json() {
    let data = load(
        r#"[
            {"x": "2023-11-15", "y": 1},
            {"x": "2024-01-10", "y": 2},
            {"x": "2024-02-10", "y": 4},
            {"x": "2024-04-10", "y": 6},
            {"x": "2024-05-10", "y": 8},
            {"x": "2024-07-10", "y": 10}
        ]"#,
    );

    let legacy = resample(&data, Granularity::Quarter, 3, ResampleMode::FixedBucket).unwrap();
    assert_eq!(legacy.len(), 2);
    assert_eq!(legacy[0].y, Sample::Scalar(7.0));
    assert_eq!(legacy[1].y, Sample::Scalar(10.0));

    let resampler = Resampler::new(ResampleConfig {
        edge_trim: EdgeTrim::PartialOnly,
        ..ResampleConfig::default()
    })
    .unwrap();
    let kept = resampler.resample(&data, Granularity::Quarter, 3, ResampleMode::FixedBucket).unwrap();
    assert_eq!(kept.len(), 3);
    assert_eq!(kept[0].y, Sample::Scalar(3.0));
}

#[test]
fn test_output_serializes_for_charts() {
    let data = load(r#"[{"x": "2024-03-01T08:00:00Z", "y": 1.5}, {"x": "2024-03-01T09:00:00Z", "y": 2.5}]"#);

    let out = resample(&data, Granularity::Hour, 24, ResampleMode::Average).unwrap();
    let rendered = serde_json::to_string(&out).unwrap();

    assert_eq!(rendered, r#"[{"x":"2024-03-01T08:00:00.000Z","y":1.5},{"x":"2024-03-01T09:00:00.000Z","y":2.5}]"#);
}
