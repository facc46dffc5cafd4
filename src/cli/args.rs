//! Command-line argument parsing for lawnbook
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{Frequency, JobId, ServiceType, SubscriptionStatus, SubscriptionType};

/// lawnbook - Keep the lawn-care job book and its seasonal mowing table
#[derive(Parser, Debug)]
#[command(name = "lawnbook")]
#[command(version)]
#[command(about = "Job book and seasonal mowing cadence table for a lawn-care service", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Job book file (overrides the configured data_file)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the sample job book to the data file
    Init {
        /// Overwrite an existing job book
        #[arg(long)]
        force: bool,
    },

    /// List jobs
    List {
        /// Only jobs with this subscription status
        #[arg(long)]
        status: Option<SubscriptionStatus>,

        /// Only jobs including this service
        #[arg(long)]
        service: Option<ServiceType>,
    },

    /// Show one job
    Show { id: JobId },

    /// Add a pending job
    Add {
        #[arg(long)]
        customer: String,

        #[arg(long)]
        address: String,

        /// Service type (repeatable)
        #[arg(long = "service", required = true)]
        services: Vec<ServiceType>,

        #[arg(long, default_value = "Recurring")]
        subscription: SubscriptionType,

        /// Weekly, Biweekly, Monthly or Auto-Seasonal
        #[arg(long, default_value = Frequency::AUTO_SEASONAL)]
        frequency: Frequency,

        /// First visit (YYYY-MM-DD)
        #[arg(long)]
        scheduled: NaiveDate,
    },

    /// Record a completed visit
    Complete {
        id: JobId,

        /// Completion date (today by default)
        #[arg(long)]
        on: Option<NaiveDate>,
    },

    /// Move a pending job to active
    Activate { id: JobId },

    /// Stop servicing a job
    Deactivate { id: JobId },

    /// Show the cadence that applies to a job on a date
    Cadence {
        id: JobId,

        /// Date to look up (today by default)
        #[arg(long)]
        on: Option<NaiveDate>,
    },

    /// Display the season table
    Seasons,

    /// Check the job book for problems
    Validate {
        /// Reference date for completion checks (today by default)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Log filter for this verbosity; `Normal` defers to the configured level
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => configured,
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }
}
