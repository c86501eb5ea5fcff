//! Logging setup for the command-line front end

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins when set. Otherwise the crate logs at `warn`, or at
/// `debug` with `--verbose`, and `--quiet` limits output to errors.
/// Events go to stderr so command output can be piped.
pub fn init_logger(verbose: bool, quiet: bool) {
    let default_directive = if quiet {
        "fcore=error"
    } else if verbose {
        "fcore=debug,warn"
    } else {
        "fcore=warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (e.g. in tests) is not fatal
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
