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

//! Entry point tying window selection and bucketing together

use crate::config::ResampleConfig;
use crate::error::{ResampleError, ResampleResult};
use crate::granularity::{Granularity, ResampleMode};
use crate::point::{TimePoint, validate_shapes};
use crate::{fixed_bucket, windowed};
use tracing::debug;

/// Reduces chart series to a bounded number of points
#[derive(Debug, Clone, Default)]
pub struct Resampler {
    config: ResampleConfig,
}

impl Resampler {
    pub fn new(config: ResampleConfig) -> ResampleResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ResampleConfig {
        &self.config
    }

    /// Resample a series that is already sorted by `x`
    ///
    /// Empty input always yields an empty output. A zero window or points of
    /// mixed shape are caller errors.
    pub fn resample(&self, data: &[TimePoint], granularity: Granularity, window_size: usize, mode: ResampleMode) -> ResampleResult<Vec<TimePoint>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        if window_size == 0 {
            return Err(ResampleError::InvalidWindow);
        }
        validate_shapes(data)?;

        let reduced = match mode {
            ResampleMode::Average | ResampleMode::Pick => windowed::reduce(data, granularity, window_size, mode, &self.config),
            ResampleMode::FixedBucket => fixed_bucket::reduce(data, granularity, window_size, &self.config),
        };

        debug!(
            granularity = %granularity,
            mode = %mode,
            window_size,
            input = data.len(),
            output = reduced.len(),
            "Resampled series"
        );

        Ok(reduced)
    }

    /// Same as [`Resampler::resample`] with the unit given by name
    ///
    /// An unrecognised unit hands the series back untouched.
    pub fn resample_named(&self, data: &[TimePoint], granularity: &str, window_size: usize, mode: ResampleMode) -> ResampleResult<Vec<TimePoint>> {
        match granularity.parse::<Granularity>() {
            Ok(granularity) => self.resample(data, granularity, window_size, mode),
            Err(_) => {
                debug!(granularity, points = data.len(), "Unknown granularity, passing series through");
                Ok(data.to_vec())
            }
        }
    }
}

/// [`Resampler::resample`] with the default configuration
pub fn resample(data: &[TimePoint], granularity: Granularity, window_size: usize, mode: ResampleMode) -> ResampleResult<Vec<TimePoint>> {
    Resampler::default().resample(data, granularity, window_size, mode)
}

/// [`Resampler::resample_named`] with the default configuration
pub fn resample_named(data: &[TimePoint], granularity: &str, window_size: usize, mode: ResampleMode) -> ResampleResult<Vec<TimePoint>> {
    Resampler::default().resample_named(data, granularity, window_size, mode)
}
