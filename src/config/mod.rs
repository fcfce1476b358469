//! Configuration module for Simple Bank
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BankPaths;
pub use settings::Settings;
