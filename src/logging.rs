//! Logging setup for dup.
//!
//! Uses the `log` facade with an `env_logger` backend. The level comes from
//! `RUST_LOG` when it is set, otherwise from the `--quiet` / `--verbose` flags:
//!
//! | flags      | level |
//! |------------|-------|
//! | `-q`       | error |
//! | (none)     | info  |
//! | `-v`       | debug |
//! | `-vv`, ... | trace |
//!
//! Log output goes to stderr so it never interleaves with the duplicate
//! table or JSON document on stdout.

use std::env;
use std::io::Write;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Initialize the logger from CLI verbosity flags.
///
/// Call once, before the first log statement. Later calls are ignored,
/// which keeps integration tests that drive [`crate::run_app`] repeatedly
/// from panicking.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();
    builder.target(Target::Stderr);

    let from_env = env::var("RUST_LOG").is_ok();
    if from_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    let with_module = verbose >= 1;
    builder.format(move |buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        if with_module {
            writeln!(
                buf,
                "{style}{level:<5}{style:#} [{}] {}",
                record.module_path().unwrap_or("dup"),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{level:<5}{style:#} {}", record.args())
        }
    });

    if builder.try_init().is_ok() {
        log::debug!(
            "Logging initialized at {} (from RUST_LOG: {})",
            log::max_level(),
            from_env
        );
    }
}

/// Map `--verbose` / `--quiet` onto a level filter. Quiet wins.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
