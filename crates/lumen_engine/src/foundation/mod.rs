//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Model, view and projection transforms
//! - Frame timing
//! - Logging utilities

pub mod math;
pub mod transform;
pub mod time;
pub mod logging;
