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

//! Calendar-aligned buckets over the most recent part of a series

use crate::config::{EdgeTrim, ResampleConfig};
use crate::granularity::{Granularity, MILLIS_PER_DAY};
use crate::point::{Accumulator, TimePoint};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Bucket being filled during the newest-to-oldest walk
struct OpenBucket {
    key: i64,
    earliest: DateTime<Utc>,
    acc: Accumulator,
    len: usize,
}

impl OpenBucket {
    fn new(key: i64, point: &TimePoint) -> Self {
        Self {
            key,
            earliest: point.x,
            acc: Accumulator::new(&point.y),
            len: 1,
        }
    }

    fn add(&mut self, point: &TimePoint) {
        self.earliest = self.earliest.min(point.x);
        self.acc.add(&point.y);
        self.len += 1;
    }

    fn close(self, granularity: Granularity) -> TimePoint {
        trace!(granularity = %granularity, key = self.key, points = self.len, "Closed bucket");
        TimePoint {
            x: self.earliest,
            y: self.acc.mean(),
        }
    }
}

pub(crate) fn reduce(data: &[TimePoint], granularity: Granularity, window_size: usize, config: &ResampleConfig) -> Vec<TimePoint> {
    let mut buckets: VecDeque<TimePoint> = VecDeque::with_capacity(window_size.min(data.len()));
    let mut open: Option<OpenBucket> = None;

    for point in data.iter().rev() {
        let key = granularity.bucket_key(&point.x);

        if let Some(bucket) = open.as_mut() {
            if bucket.key == key {
                bucket.add(point);
                continue;
            }
        }

        if let Some(closed) = open.take() {
            buckets.push_front(closed.close(granularity));
            if buckets.len() >= window_size {
                break;
            }
        }

        open = Some(OpenBucket::new(key, point));
    }

    if let Some(closed) = open {
        if buckets.len() < window_size {
            buckets.push_front(closed.close(granularity));
        }
    }

    trim_oldest(&mut buckets, granularity, config.edge_trim);
    buckets.into()
}

fn trim_oldest(buckets: &mut VecDeque<TimePoint>, granularity: Granularity, policy: EdgeTrim) {
    let Some(span_days) = granularity.trim_span_days() else {
        return;
    };

    let (Some(oldest), Some(next)) = (buckets.front(), buckets.get(1)) else {
        return;
    };

    let gap_days = (next.x.timestamp_millis() - oldest.x.timestamp_millis()) as f64 / MILLIS_PER_DAY as f64;
    let partial = gap_days < span_days as f64;

    let drop = match policy {
        EdgeTrim::Legacy => true,
        EdgeTrim::PartialOnly => partial,
    };

    debug!(granularity = %granularity, gap_days, partial, dropped = drop, "Edge trim on oldest bucket");

    if drop {
        buckets.pop_front();
    }
}
