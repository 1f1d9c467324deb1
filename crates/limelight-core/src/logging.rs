#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the usual macros are re-exported from `tracing`.
//! Without it, no-op macros of the same names keep call sites compiling so the
//! core crate stays dependency-light for hosts that do not collect logs.
//!
//! Core code calls them as `crate::debug!` and friends. Everything logs under
//! the fixed targets in [`targets`], which lets the browser console layer
//! (and tests) filter by component.

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, trace, warn};

/// Log targets, one per page component.
pub mod targets {
    pub const SITE: &str = "limelight::site";
    pub const LOADING: &str = "limelight::loading";
    pub const NAVIGATION: &str = "limelight::navigation";
    pub const SCROLL: &str = "limelight::scroll";
    pub const INTERACTIVE: &str = "limelight::interactive";
    pub const PERFORMANCE: &str = "limelight::performance";
    pub const VISUALIZER: &str = "limelight::visualizer";
    pub const EASTER_EGG: &str = "limelight::easter_egg";

    /// Every target, in component attach order.
    pub const ALL: [&str; 8] = [
        SITE,
        LOADING,
        NAVIGATION,
        SCROLL,
        INTERACTIVE,
        PERFORMANCE,
        VISUALIZER,
        EASTER_EGG,
    ];
}

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Discards its arguments when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments when tracing is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// Discards its arguments when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

#[cfg(test)]
mod tests {
    use super::targets;

    #[test]
    fn targets_are_unique_and_namespaced() {
        for (i, a) in targets::ALL.iter().enumerate() {
            assert!(a.starts_with("limelight::"), "{a}");
            for b in &targets::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
