//! tagping - subscribable #tags with a durable JSON store
//!
//! This crate provides the core functionality for the `tagping` CLI.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Tag, Subscriber)
//! - [`repo`] - The tag repository (the single root aggregate)
//! - [`storage`] - JSON document persistence and legacy migration
//! - [`scan`] - `#tag` candidate extraction from free text
//! - [`config`] - Data path resolution
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod repo;
pub mod scan;
pub mod storage;

pub use error::{Error, Result};
pub use repo::TagRepository;
