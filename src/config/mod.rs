//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + CLI overrides
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → lifecycle::startup builds store and dispatcher from it
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; routes cannot change while serving
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    HandlerKind, ListenerConfig, ObservabilityConfig, RouteConfig, ServerConfig, StoreConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
