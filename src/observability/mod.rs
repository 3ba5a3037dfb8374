// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured logging support.
//!
//! Logging goes through `tracing`; the subscriber writes to stderr so that
//! stdout carries only invocation results. The default level is `warn`,
//! verbose mode raises it to `debug`, and `RUST_LOG` overrides both.

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Install the global stderr subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
