//! Core types and error handling for pomgrade.
//!
//! The core module holds the pieces every other module depends on: the
//! [`PomError`] enum raised by the resolution engine and the [`ErrorContext`]
//! wrapper the CLI uses to print actionable messages.
//!
//! # Integration with Other Modules
//!
//! - **Descriptor parsing** raises [`PomError::ParseError`]
//! - **Project loading** raises the parent-chain errors
//! - **Resolution** raises version and property errors
//! - **CLI commands** convert any failure with [`user_friendly_error`]

pub mod error;

pub use error::{ErrorContext, PomError, user_friendly_error};
