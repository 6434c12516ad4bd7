//! Nexus Core - Shared types for the Nexus admin dashboard.
//!
//! This crate provides the records used across all Nexus components:
//! - `admin` - The server-rendered dashboard
//! - `cli` - Command-line export tools
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP, no
//! async runtime. This keeps it lightweight and usable anywhere.
//!
//! # Modules
//!
//! - [`types`] - Dashboard records, type-safe IDs, statuses, emails, and money formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
