//! # Domain Models
//!
//! This crate contains pure navigation types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no DOM access, networking, or heavy logic. Just data and simple helpers.

pub mod config;
pub mod constants;
pub mod navigation;
