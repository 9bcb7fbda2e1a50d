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

//! Time-series resampling for dashboard charts
//!
//! Chart series arrive as `{x, y}` points sorted by time. Rendering every raw
//! point is wasteful, so a series is reduced for the requested granularity:
//!
//! - `Average` and `Pick` first keep the most recent `window_size` units of
//!   data, then fold week/month/quarter/year windows into chunks of raw
//!   points (mean or first point).
//! - `FixedBucket` walks back from the newest point and emits the latest
//!   `window_size` calendar buckets, each averaged.
//!
//! # Usage
//!
//! ```rust
//! use fieldops_timeseries::{Granularity, ResampleMode, TimePoint, resample};
//!
//! let data = vec![
//!     TimePoint::parse("2024-01-01", 10.0).unwrap(),
//!     TimePoint::parse("2024-01-08", 20.0).unwrap(),
//!     TimePoint::parse("2024-01-15", 30.0).unwrap(),
//! ];
//!
//! let reduced = resample(&data, Granularity::Week, 2, ResampleMode::Average).unwrap();
//! assert_eq!(reduced.len(), 1);
//! assert_eq!(reduced[0].y.as_scalar(), Some(20.0));
//! ```

pub mod config;
pub mod error;
mod fixed_bucket;
pub mod granularity;
pub mod point;
pub mod resampler;
pub mod windowed;

pub use config::{ChunkSizes, EdgeTrim, ResampleConfig};
pub use error::{ResampleError, ResampleResult};
pub use granularity::{Granularity, ResampleMode};
pub use point::{Sample, Shape, TimePoint, parse_timestamp, validate_shapes};
pub use resampler::{Resampler, resample, resample_named};
pub use windowed::window_start;
