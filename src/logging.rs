//! tracing subscriber setup for the command-line binary

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "spritestack=warn";

/// Filter directive used with `--verbose`.
pub const VERBOSE_DIRECTIVE: &str = "spritestack=debug";

/// Build the env filter: `RUST_LOG` if set, else the default directive.
///
/// `verbose` always adds the debug directive on top.
pub fn build_filter(verbose: bool) -> EnvFilter {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    if verbose {
        match VERBOSE_DIRECTIVE.parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        }
    } else {
        filter
    }
}

/// Install the global subscriber writing to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(build_filter(verbose))
        .try_init();
}
