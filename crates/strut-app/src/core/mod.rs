//! # Core Application Module
//!
//! The container frontends hold: [`AppCore`] owns the process-wide overlay
//! stack and toast queue, and is the defined initialization point for both.

mod app;

pub use app::AppCore;
