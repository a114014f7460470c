use arom_core::SizeClass;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::*;

use std::io::Write;

use crate::{build::build, check::check};

mod build;
mod check;

#[derive(Parser, Debug)]
enum Command {
    /// Build a ROM image from one or more binary files
    #[command(arg_required_else_help = true)]
    Build {
        /// Input file(s), concatenated in order
        #[clap(required = true)]
        inputs: Vec<String>,

        /// Create a large (512 kb) ROM image. Default is 256 kb
        #[clap(short, long)]
        large: bool,

        /// Output file name (default: first input file + ".rom")
        #[clap(short, long)]
        output: Option<String>,
    },
    /// Check a ROM image's checksum and length fields, optionally fixing them
    #[command(arg_required_else_help = true)]
    Check {
        /// ROM image to check
        file: String,

        /// Fix a length error by extending the image to whole 32 bit words
        #[clap(short = 'x', long)]
        extend: bool,

        /// Fix a checksum error (overwrites the input file unless --output is given)
        #[clap(short, long)]
        fix: bool,

        /// Output file name (default: the input file)
        #[clap(short, long)]
        output: Option<String>,
    },
}

#[derive(Parser, Debug, Default)]
#[clap(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Set the logging verbosity
    #[clap(short, long, value_enum, global = true, default_value_t = LogLevel::Info)]
    verbose: LogLevel,

    /// Print nothing but errors
    #[clap(short, long, global = true)]
    quiet: bool,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Off => LevelFilter::Off,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LevelFilter::Error
    } else {
        cli.verbose.into()
    };

    env_logger::Builder::from_env(Env::default())
        .filter_level(level)
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            let level = record.level();
            if level == Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(buf, "{}: {}", record.level(), record.args())
            }
        })
        .init();

    let command = match cli.command {
        Some(command) => command,
        None => return Ok(()),
    };

    match command {
        Command::Build {
            inputs,
            large,
            output,
        } => {
            let size = if large {
                SizeClass::Large
            } else {
                SizeClass::Small
            };

            build(&inputs, size, output.as_deref())
        }
        Command::Check {
            file,
            extend,
            fix,
            output,
        } => check(&file, extend, fix, output.as_deref()),
    }
}
