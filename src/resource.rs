//! Capabilities the pool needs from the resources it manages

use std::fmt::Display;

/// A closeable resource managed by a [`Pool`](crate::Pool)
///
/// The pool never inspects a resource. It only caches it, hands it out, and
/// closes it when discarding it.
///
/// # Examples
///
/// ```
/// use bounded_pool::Resource;
///
/// struct Buffer(Vec<u8>);
///
/// impl Resource for Buffer {
///     type Error = std::convert::Infallible;
///
///     fn close(self) -> Result<(), Self::Error> {
///         Ok(())
///     }
/// }
/// ```
pub trait Resource: Send + 'static {
    /// Error reported when closing fails
    type Error: Display;

    /// Release the underlying system resources
    fn close(self) -> Result<(), Self::Error>;
}

/// Close a resource the pool is discarding. Failures are logged, never returned.
pub(crate) fn close_quietly<R: Resource>(resource: R, reason: &'static str) {
    if let Err(err) = resource.close() {
        tracing::warn!(reason, error = %err, "failed to close pooled resource");
    }
}
