//! Pool configuration options

use std::time::Duration;

use tokio::sync::Semaphore;

use crate::errors::{PoolError, PoolResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for pool capacity and acquisition behavior
///
/// # Examples
///
/// ```
/// use bounded_pool::PoolConfiguration;
/// use std::time::Duration;
///
/// let config = PoolConfiguration::new()
///     .with_max_active(16)
///     .with_max_idle(4)
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.max_active, 16);
/// assert_eq!(config.max_idle, 4);
/// assert_eq!(config.operation_timeout, Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoolConfiguration {
    /// Maximum number of resources that can be checked out simultaneously
    pub max_active: usize,

    /// Maximum number of resources kept idle for reuse (clamped to `max_active`)
    pub max_idle: usize,

    /// Default deadline used by `Pool::get_default_timeout`
    pub operation_timeout: Option<Duration>,

    /// Whether to fill the idle cache right after construction
    pub fill_on_create: bool,
}

impl Default for PoolConfiguration {
    fn default() -> Self {
        Self {
            max_active: 8,
            max_idle: 8,
            operation_timeout: None,
            fill_on_create: false,
        }
    }
}

impl PoolConfiguration {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of active resources
    pub fn with_max_active(mut self, count: usize) -> Self {
        self.max_active = count;
        self
    }

    /// Set the maximum number of idle resources
    ///
    /// # Examples
    ///
    /// ```
    /// use bounded_pool::PoolConfiguration;
    ///
    /// let config = PoolConfiguration::new()
    ///     .with_max_active(2)
    ///     .with_max_idle(10);
    ///
    /// // Clamping happens when the pool is built, not here.
    /// assert_eq!(config.max_idle, 10);
    /// ```
    pub fn with_max_idle(mut self, count: usize) -> Self {
        self.max_idle = count;
        self
    }

    /// Set the default acquisition timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Fill the idle cache when the pool is created
    pub fn with_fill_on_create(mut self) -> Self {
        self.fill_on_create = true;
        self
    }

    /// Check capacity parameters
    pub fn validate(&self) -> PoolResult<()> {
        if self.max_active == 0 {
            return Err(PoolError::InvalidArgument(
                "max_active must be positive".to_string(),
            ));
        }
        if self.max_active > Semaphore::MAX_PERMITS {
            return Err(PoolError::InvalidArgument(format!(
                "max_active must not exceed {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(())
    }

    /// Idle ceiling after clamping to `max_active`
    pub(crate) fn effective_max_idle(&self) -> usize {
        self.max_idle.min(self.max_active)
    }
}
