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

use super::read_input;
use crate::config::FieldOpsConfig;
use anyhow::{Context, Result};
use fieldops_timeseries::{ResampleMode, Resampler, TimePoint};
use std::path::Path;
use tracing::info;

pub struct ResampleArgs<'a> {
    pub granularity: &'a str,
    pub window: usize,
    pub mode: ResampleMode,
    pub pretty: bool,
}

pub fn handle_resample(config: &FieldOpsConfig, input: &Path, args: &ResampleArgs<'_>) -> Result<()> {
    let raw = read_input(input)?;
    let output = resample_json(config, &raw, args)?;
    println!("{output}");
    Ok(())
}

pub fn resample_json(config: &FieldOpsConfig, raw: &str, args: &ResampleArgs<'_>) -> Result<String> {
    let data: Vec<TimePoint> = serde_json::from_str(raw).context("input must be a JSON array of {x, y} points")?;
    let resampler = Resampler::new(config.resample.clone())?;

    let resampled = resampler.resample_named(&data, args.granularity, args.window, args.mode)?;
    info!(
        granularity = %args.granularity,
        window = args.window,
        mode = %args.mode,
        input = data.len(),
        output = resampled.len(),
        "Series resampled"
    );

    let output = if args.pretty {
        serde_json::to_string_pretty(&resampled)?
    } else {
        serde_json::to_string(&resampled)?
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn args(granularity: &str, window: usize, mode: ResampleMode) -> ResampleArgs<'_> {
        ResampleArgs { granularity, window, mode, pretty: false }
    }

    #[test]
    fn test_weekly_average() {
        let raw = r#"[
            {"x": "2024-01-01", "y": 10},
            {"x": "2024-01-02", "y": 20},
            {"x": "2024-01-03", "y": 30}
        ]"#;

        let output = resample_json(&FieldOpsConfig::default(), raw, &args("week", 1, ResampleMode::Average)).unwrap();
        let points: Vec<Value> = serde_json::from_str(&output).unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0]["y"], 20.0);
        assert_eq!(points[0]["x"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_unknown_granularity_passes_through() {
        let raw = r#"[{"x": 0, "y": 1}, {"x": 1000, "y": 2}]"#;

        let output = resample_json(&FieldOpsConfig::default(), raw, &args("fortnight", 1, ResampleMode::Pick)).unwrap();
        let points: Vec<TimePoint> = serde_json::from_str(&output).unwrap();

        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_short_granularity_names() {
        let points: Vec<String> = (0..600).map(|i| format!(r#"{{"x": {}, "y": {i}}}"#, 1_704_067_200_000i64 + i * 60_000)).collect();
        let raw = format!("[{}]", points.join(","));

        let output = resample_json(&FieldOpsConfig::default(), &raw, &args("min", 5, ResampleMode::Average)).unwrap();
        let resampled: Vec<TimePoint> = serde_json::from_str(&output).unwrap();

        assert_eq!(resampled.len(), 6);
    }

    #[test]
    fn test_rejects_bad_input() {
        let config = FieldOpsConfig::default();

        assert!(resample_json(&config, r#"{"x": 0}"#, &args("day", 1, ResampleMode::Average)).is_err());
        assert!(resample_json(&config, r#"[{"x": 0, "y": 1}]"#, &args("day", 0, ResampleMode::Average)).is_err());
    }
}
