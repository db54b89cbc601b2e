//! Command-line argument definitions for the Nimbus CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global options select the configuration file and logging
//! verbosity; the [`Command`] picks between rendering the blueprint and
//! probing storage credentials.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use nimbus::{Engine, OutputFormat};

/// Command-line arguments for the Nimbus tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the "Jira/Bitbucket Data Center on AWS" blueprint
    Diagram {
        /// Output format (png, jpg, svg, pdf, dot); overrides the config file
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Layout engine (graphviz, builtin); overrides the config file
        #[arg(short, long)]
        engine: Option<Engine>,

        /// Directory the diagram is written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Verify storage credentials by creating and deleting a throwaway bucket
    Probe {
        /// Bucket name prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Region override
        #[arg(short, long)]
        region: Option<String>,

        /// Custom endpoint for S3-compatible services
        #[arg(long)]
        endpoint_url: Option<String>,

        /// Use path-style bucket addressing
        #[arg(long)]
        path_style: bool,
    },
}
