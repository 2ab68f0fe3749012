//! Data models for tagping.
//!
//! This module contains the domain models:
//! - Tag
//! - Subscriber

pub mod tag;

pub use tag::{Subscriber, Tag, CREATOR_QUOTA, DESCRIPTION_MAX, NAME_MAX};
