//! # bounded_pool
//!
//! Bounded, thread-safe resource pool that caps how many resources are
//! checked out at once and, separately, how many idle resources are kept
//! for reuse.
//!
//! ## Features
//!
//! - Active-slot limit with waiting acquisition, cancellable through a
//!   `CancellationToken` or a timeout
//! - Lock-free bounded idle cache; overflow is closed rather than cached
//! - Pre-population with `fill`, bulk eviction with `clear`
//! - Idempotent `close` that wakes waiting callers
//! - Optional RAII handles that return resources on drop
//! - Manual exclusive access with `freeze`/`thaw`
//!
//! ## Quick Start
//!
//! ```rust
//! use bounded_pool::{Pool, Resource};
//!
//! struct Socket(u16);
//!
//! impl Resource for Socket {
//!     type Error = std::io::Error;
//!     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! let pool = Pool::new(|| Socket(8080), 4, 2).unwrap();
//! pool.fill();
//! assert_eq!(pool.idle_num(), 2);
//!
//! let socket = pool.try_get().unwrap();
//! assert_eq!(socket.0, 8080);
//! pool.put(socket);
//! assert_eq!(pool.active_num(), 0);
//! ```

mod pool;
mod config;
mod idle;
mod slots;
mod resource;
mod errors;

pub use pool::{Pool, PooledResource};
pub use config::PoolConfiguration;
pub use resource::Resource;
pub use errors::{PoolError, PoolResult};
pub use tokio_util::sync::CancellationToken;
