//! Telemetry helpers for applications embedding `autocoin-rules`.
//!
//! The codec logs through `tracing` only. Hosts either call
//! `init_default_tracing` or wire their own subscriber and filters.
//!
//! Levels used by the crate:
//! - `warn`: every [`CodecWarning`](crate::codec::CodecWarning) as it is
//!   collected, and stored payloads that fall back to the default rule set.
//! - `info`: locale switches of the rule editor.
//! - `debug`: one summary per encode/decode/load (node and setting counts,
//!   warning count, payload length), snapshot rebuilds, stored blobs.
//! - `trace`: one event per trade setting encoded or restored.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter comes from `RUST_LOG` and defaults to `info`; use
/// `RUST_LOG=autocoin_rules=debug` for the per-call summaries.
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
