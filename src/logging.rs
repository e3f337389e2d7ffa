//! `tracing` subscriber setup shared by the binaries.
//!
//! Logs go to stderr so stdout stays free for payloads and statistics.
//! `RUST_LOG` wins over the defaults chosen here.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // try_init fails only when a subscriber is already installed.
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init(false, false);
        init(true, true);
        tracing::info!("logging initialised");
    }
}
