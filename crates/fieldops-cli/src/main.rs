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

mod commands;
mod config;

use clap::{ArgGroup, Parser, Subcommand};
use config::FieldOpsConfig;
use fieldops_access::AccessRequirement;
use fieldops_timeseries::ResampleMode;
use std::path::PathBuf;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DENIED_EXIT_CODE: i32 = 2;

#[derive(Parser)]
#[command(name = "fieldops")]
#[command(about = "FieldOps - chart resampling and access inspection")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML, overrides $FIELDOPS_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resample a JSON series for display
    Resample {
        /// JSON array of {x, y} points, or - for stdin
        #[arg(short, long)]
        input: PathBuf,
        /// millisecond, second, minute, hour, day, week, month, quarter or year (ms, s, min, h, d, w, mo, q, y also work)
        #[arg(short, long)]
        granularity: String,
        /// Number of granularity units (or buckets) to keep
        #[arg(short, long)]
        window: usize,
        #[arg(short, long, default_value = "average")]
        mode: ResampleMode,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Show normalized roles and effective permissions for a user
    Roles {
        /// JSON user snapshot, or - for stdin
        #[arg(short, long)]
        user: PathBuf,
    },
    /// Evaluate an access rule against a user
    #[command(group(ArgGroup::new("requirement").required(true).args(["any", "all", "role"])))]
    Check {
        /// JSON user snapshot, or - for stdin
        #[arg(short, long)]
        user: PathBuf,
        /// Allow if the user holds any of these permissions
        #[arg(long, num_args = 1..)]
        any: Vec<String>,
        /// Allow only if the user holds all of these permissions
        #[arg(long, num_args = 1..)]
        all: Vec<String>,
        /// Allow if the user holds any of these roles
        #[arg(long, num_args = 1..)]
        role: Vec<String>,
    },
}

fn requirement_from_flags(any: Vec<String>, all: Vec<String>, role: Vec<String>) -> AccessRequirement {
    if !role.is_empty() {
        AccessRequirement::AnyRole(role)
    } else if !all.is_empty() {
        AccessRequirement::AllPermissions(all)
    } else {
        AccessRequirement::AnyPermission(any)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match FieldOpsConfig::resolve_config(cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Resample {
            input,
            granularity,
            window,
            mode,
            pretty,
        } => {
            let args = commands::resample::ResampleArgs {
                granularity: &granularity,
                window,
                mode,
                pretty,
            };
            commands::resample::handle_resample(&config, &input, &args).map(|()| 0)
        }
        Commands::Roles { user } => commands::access::handle_roles(&config, &user).map(|()| 0),
        Commands::Check { user, any, all, role } => {
            let requirement = requirement_from_flags(any, all, role);
            commands::access::handle_check(&config, &user, &requirement).map(|decision| if decision.is_allowed() { 0 } else { DENIED_EXIT_CODE })
        }
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Command failed: {:#}", e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resample() {
        let cli = Cli::try_parse_from(["fieldops", "resample", "-i", "-", "-g", "month", "-w", "3", "--mode", "fixed-bucket"]).unwrap();

        match cli.command {
            Commands::Resample { granularity, window, mode, .. } => {
                assert_eq!(granularity, "month");
                assert_eq!(window, 3);
                assert_eq!(mode, ResampleMode::FixedBucket);
            }
            _ => panic!("expected resample"),
        }
    }

    #[test]
    fn test_check_requires_a_rule() {
        assert!(Cli::try_parse_from(["fieldops", "check", "--user", "u.json"]).is_err());
        assert!(Cli::try_parse_from(["fieldops", "check", "--user", "u.json", "--any", "view reports", "--role", "admin"]).is_err());

        let cli = Cli::try_parse_from(["fieldops", "check", "--user", "u.json", "--all", "view reports", "view billing"]).unwrap();
        let Commands::Check { any, all, role, .. } = cli.command else {
            panic!("expected check");
        };
        assert_eq!(
            requirement_from_flags(any, all, role),
            AccessRequirement::all_of(["view reports", "view billing"])
        );
    }
}
