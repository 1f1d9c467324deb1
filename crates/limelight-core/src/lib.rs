#![forbid(unsafe_code)]

//! Core: deterministic motion, rate limiting, and interaction logic for the
//! Limelight landing page.
//!
//! Nothing in this crate touches the DOM or reads a wall clock. Time is always
//! supplied by the host as a monotonic [`Duration`](core::time::Duration), which
//! keeps every decision reproducible in native tests while `limelight-web`
//! performs the actual browser wiring.

pub mod animation;
pub mod clock;
pub mod config;
pub mod count_up;
pub mod easter_egg;
pub mod error;
pub mod geometry;
pub mod glow;
pub mod key_sequence;
pub mod loading;
pub mod logging;
pub mod navigation;
pub mod performance;
pub mod rate_limit;
pub mod visualizer;

pub use config::{Components, SiteConfig};
pub use error::SiteError;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace, warn};
