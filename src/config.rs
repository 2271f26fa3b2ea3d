use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::export::ReportFormat;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Parser, Debug)]
#[command(name = "judge-scheduler", version, about = "Assign judges to games without team conflicts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load judges and games, generate the schedule and print both reports
    Schedule(ScheduleArgs),

    /// Write the example judges.csv and games.csv
    Example {
        /// Directory to write into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Start the web front
    Web(WebConfig),
}

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// CSV with Name and Team columns
    #[arg(long, required_unless_present = "example")]
    pub judges: Option<PathBuf>,

    /// CSV with Team and Judges_Needed columns
    #[arg(long, required_unless_present = "example")]
    pub games: Option<PathBuf>,

    /// Use the built-in example data instead of files
    #[arg(long, conflicts_with_all = ["judges", "games"])]
    pub example: bool,

    /// Write judge-assignments and judge-workload reports here
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Report file format
    #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
    pub format: ReportFormat,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    #[arg(long, env = "JUDGE_SCHEDULER_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, env = "JUDGE_SCHEDULER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl WebConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
