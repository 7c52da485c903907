//! This module defines the command line interface (CLI) for the application.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum NumericType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

#[derive(Parser, Debug)]
#[command(version, about = "Evaluate a pipeline of primitive operators", long_about = None)]
pub struct Args {
    #[arg(
        value_name = "INPUT",
        required = true,
        allow_negative_numbers = true,
        help = "Values fed through the pipeline"
    )]
    pub inputs: Vec<String>,

    #[arg(
        short = 's',
        long = "step",
        value_name = "STEP",
        help = "A pipeline step such as 'add:1' or 'neg'; repeat for more steps"
    )]
    pub steps: Vec<String>,

    #[arg(
        short = 'f',
        long = "steps-file",
        value_name = "STEPS_FILE",
        help = "Read further steps from a file"
    )]
    pub steps_file: Option<PathBuf>,

    #[arg(
        short = 't',
        long = "type",
        value_enum,
        default_value = "long",
        help = "The primitive type of the values"
    )]
    pub numeric_type: NumericType,

    #[arg(short = 'm', long, help = "Memoize the pipeline")]
    pub memoize: bool,

    #[arg(short = 'p', long, help = "Evaluate the inputs in parallel")]
    pub parallel: bool,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase verbosity level"
    )]
    pub verbosity: u8,

    #[arg(short = 'q', long, help = "Only log errors")]
    pub quiet: bool,

    #[arg(
        long,
        short = 'l',
        value_name = "LOG_FILE",
        help = "Optional path to the log file. Defaults to stderr if not specified."
    )]
    pub log_output: Option<PathBuf>,
}
