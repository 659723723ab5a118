//! Metrics/tracing hooks.
//!
//! Without the `tracing` feature these compile to nothing.

#[cfg(feature = "tracing")]
pub fn emit_span(event: &str, key_values: &[(&str, usize)]) {
    let span = tracing::span!(tracing::Level::TRACE, "lazyseq", event);
    let _entered = span.enter();
    for (k, v) in key_values {
        tracing::trace!(%event, %k, v, "terminal");
    }
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub fn emit_span(_event: &str, _key_values: &[(&str, usize)]) {}
