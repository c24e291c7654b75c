// src/cli.rs

use crate::sort::SortMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "runlog - A personal running log for the command line",
    long_about = "runlog records your runs (date, distance, time) in a local database and lists them sorted by date, distance or pace."
)]
pub struct Cli {
    /// Database file. Defaults to ~/.config/runlog/runlog.db
    #[arg(long, global = true, env = "RUNLOG_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// How long to wait for stored runs at startup before showing an empty log
    #[arg(long, global = true, env = "RUNLOG_LOAD_TIMEOUT_MS", value_name = "MS")]
    pub load_timeout_ms: Option<u64>,

    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Creates the database if needed and shows where it lives.
    Init,

    /// Records a new run.
    Add {
        #[arg(short, long, default_value = "today", help = "Day of the run: today, yesterday, YYYY-MM-DD or DD.MM.YYYY")]
        date: String,

        #[arg(short = 'k', long, help = "Distance in kilometres, e.g. 5.2")]
        distance: String,

        #[arg(short, long, help = "Time as MM:SS or whole minutes")]
        time: String,
    },

    /// Lists recorded runs.
    List {
        #[arg(short, long, value_enum, default_value_t = SortArg::Date, help = "Order of the listing")]
        sort: SortArg,

        #[arg(short, long, help = "Show only the first N runs")]
        num: Option<usize>,
    },

    /// Interactive mode: add runs and toggle the sort order.
    Session,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortArg {
    Date,
    Distance,
    Pace,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortMode::ByDate,
            SortArg::Distance => SortMode::ByDistance,
            SortArg::Pace => SortMode::ByPace,
        }
    }
}
