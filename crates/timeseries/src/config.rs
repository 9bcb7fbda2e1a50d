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

//! Resampler tuning

use crate::error::{ResampleError, ResampleResult};
use crate::granularity::{Granularity, MILLIS_PER_SECOND};
use serde::{Deserialize, Serialize};

/// Raw points folded into one output point per chunked granularity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkSizes {
    pub week: usize,
    pub month: usize,
    pub quarter: usize,
    pub year: usize,
}

impl Default for ChunkSizes {
    fn default() -> Self {
        Self {
            week: 7,
            month: 30,
            quarter: 90,
            year: 182,
        }
    }
}

impl ChunkSizes {
    pub fn for_granularity(&self, granularity: Granularity) -> Option<usize> {
        match granularity {
            Granularity::Week => Some(self.week),
            Granularity::Month => Some(self.month),
            Granularity::Quarter => Some(self.quarter),
            Granularity::Year => Some(self.year),
            _ => None,
        }
    }
}

/// What happens to the oldest fixed bucket of a week, month or quarter series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeTrim {
    /// Drop the oldest bucket whenever at least two were emitted
    #[default]
    Legacy,
    /// Drop the oldest bucket only when it sits closer to its successor than one bucket length
    PartialOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleConfig {
    /// Lookback used when a sub-hour window holds fewer points than requested
    pub sparse_lookback_secs: u64,

    pub chunk_sizes: ChunkSizes,

    pub edge_trim: EdgeTrim,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            sparse_lookback_secs: 4 * 60 * 60,
            chunk_sizes: ChunkSizes::default(),
            edge_trim: EdgeTrim::default(),
        }
    }
}

impl ResampleConfig {
    pub fn validate(&self) -> ResampleResult<()> {
        if self.sparse_lookback_secs == 0 {
            return Err(ResampleError::InvalidConfig("sparse_lookback_secs must be positive".to_string()));
        }

        let sizes = &self.chunk_sizes;
        for (name, size) in [("week", sizes.week), ("month", sizes.month), ("quarter", sizes.quarter), ("year", sizes.year)] {
            if size == 0 {
                return Err(ResampleError::InvalidConfig(format!("chunk_sizes.{name} must be positive")));
            }
        }

        Ok(())
    }

    pub fn sparse_lookback_millis(&self) -> i64 {
        i64::try_from(self.sparse_lookback_secs).unwrap_or(i64::MAX).saturating_mul(MILLIS_PER_SECOND)
    }
}
