//! Core types and error handling for appup.
//!
//! This module hosts the strongly-typed error taxonomy ([`AppupError`]) and
//! the user-facing error presentation layer ([`ErrorContext`],
//! [`user_friendly_error`]) shared by every command.

pub mod error;

pub use error::{AppupError, ErrorContext, user_friendly_error};
