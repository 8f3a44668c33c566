//! Configuration for the policy CLI
//!
//! - XDG-compliant config directory resolution
//! - Persisted defaults for allocation and rebalancing

pub mod paths;
pub mod settings;

pub use paths::PolicyPaths;
pub use settings::Settings;
