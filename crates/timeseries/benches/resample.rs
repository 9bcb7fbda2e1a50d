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
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fieldops_timeseries::{Granularity, ResampleMode, TimePoint, resample};

fn minute_series(len: i64) -> Vec<TimePoint> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..len).map(|i| TimePoint::new(base + Duration::minutes(i), (i % 97) as f64)).collect()
}

fn bench_modes(c: &mut Criterion) {
    let data = minute_series(100_000);
    let mut group = c.benchmark_group("resample_100k");

    for mode in [ResampleMode::Average, ResampleMode::Pick, ResampleMode::FixedBucket] {
        for granularity in [Granularity::Minute, Granularity::Day, Granularity::Week] {
            group.bench_with_input(BenchmarkId::new(mode.to_string(), granularity), &granularity, |b, &granularity| {
                b.iter(|| resample(black_box(&data), granularity, 60, mode).unwrap())
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_modes);
criterion_main!(benches);
