pub mod builders;
pub mod fake_executor;

use std::sync::Once;

use taskweave::graph::Callable;
use taskweave::logging::LOG_ENV;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Route `tracing` output through the test harness, once per test binary.
///
/// Output is only shown for failing tests. The filter is read from
/// `TASKWEAVE_LOG` (same directives as the binary) and defaults to `warn`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

        // Another test framework may have installed a subscriber already.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// A callable named `noop` that does nothing.
pub fn noop() -> Callable {
    Callable::named("noop", || Ok(()))
}

/// An anonymous callable that does nothing.
pub fn anon() -> Callable {
    Callable::new(|| Ok(()))
}
