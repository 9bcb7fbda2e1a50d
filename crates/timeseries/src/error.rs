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

use crate::point::Shape;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ResampleError {
    #[error("Window size must be at least 1")]
    InvalidWindow,
    #[error("Shape mismatch at index {index}: expected {expected}, found {found}")]
    ShapeMismatch { index: usize, expected: Shape, found: Shape },
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Unknown granularity: {0}")]
    UnknownGranularity(String),
    #[error("Unknown resample mode: {0}")]
    UnknownMode(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ResampleResult<T> = Result<T, ResampleError>;
