use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::platform::config::LogTarget;

#[derive(Debug, Parser)]
#[command(name = "minutes")]
#[command(about = "Submit meeting transcripts to the minutes service and keep the report")]
pub struct Cli {
    /// RON config file
    #[arg(long, global = true, default_value = "minutes.ron", env = "MINUTES_CONFIG")]
    pub config: PathBuf,

    /// Service base URL, overrides the config file
    #[arg(long, global = true, env = "MINUTES_BASE_URL")]
    pub base_url: Option<String>,

    /// Where log output goes, overrides the config file
    #[arg(long, global = true, value_enum)]
    pub log: Option<LogTarget>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process a transcript and write the rendered report page
    Submit {
        /// Transcript file, or `-` to read standard input
        transcript: PathBuf,
        /// Meeting identifier; generated from the current time when omitted
        #[arg(short, long)]
        meeting_id: Option<String>,
        /// Directory for the report page and downloads, overrides the config file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also save the DOCX, PDF and RTF artifacts the service produced
        #[arg(long)]
        download: bool,
    },
    /// Check that the service is up
    Health,
}
