//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     RouteConfig[] / register calls
//!     → pattern.rs (classify exact vs subtree, reject empty)
//!     → registry.rs (insert, reject duplicates)
//!     → Dispatcher frozen behind Arc
//!
//! Incoming request path
//!     → dispatcher.rs (Handler entry point)
//!     → registry.rs (exact lookup, then longest subtree prefix)
//!     → matched Handler, or 404 naming the path
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable while serving
//! - No regex and no path parameters: literal and prefix matching only
//! - Exact beats subtree; longer subtree beats shorter
//! - Registration order never affects the outcome

pub mod dispatcher;
pub mod pattern;
pub mod registry;

pub use dispatcher::Dispatcher;
pub use pattern::{Pattern, PatternKind};
pub use registry::{Binding, HandlerRegistry, RegistrationError};
