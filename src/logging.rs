//! Logger setup for the `primfn` binary.

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Maps the number of `-v` flags to a level; `--quiet` wins over them.
pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger. Module directives from `RUST_LOG` still apply
/// on top of the level chosen on the command line.
pub fn setup_logger(verbosity: u8, quiet: bool, log_output: Option<&Path>) {
    let mut builder = Builder::from_default_env();
    builder
        .format_timestamp(None)
        .format_module_path(verbosity >= 2)
        .filter_level(level_for(verbosity, quiet));

    let target = match log_output {
        Some(log_path) => match File::create(log_path) {
            Ok(file) => Target::Pipe(Box::new(file) as Box<dyn Write + Send>),
            Err(e) => {
                eprintln!(
                    "Could not create log file at {}: {}. Defaulting to stderr.",
                    log_path.display(),
                    e
                );
                Target::Stderr
            }
        },
        None => Target::Stderr,
    };
    builder.target(target);

    builder.init();
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(level_for(0, false), LevelFilter::Warn);
        assert_eq!(level_for(1, false), LevelFilter::Info);
        assert_eq!(level_for(2, false), LevelFilter::Debug);
        assert_eq!(level_for(7, false), LevelFilter::Trace);
        assert_eq!(level_for(3, true), LevelFilter::Error);
    }
}
