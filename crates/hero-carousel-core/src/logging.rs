//! Logging facilities.
//!
//! The carousel uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("hero_carousel::autoplay=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Timer system target.
    pub const TIMER: &str = "hero_carousel_core::timer";
    /// Signal system target.
    pub const SIGNAL: &str = "hero_carousel_core::signal";
    /// Page event loop target.
    pub const PAGE: &str = "hero_carousel::page";
    /// Block decoration target.
    pub const DECORATE: &str = "hero_carousel::decorate";
    /// Autoplay lifecycle target.
    pub const AUTOPLAY: &str = "hero_carousel::autoplay";
    /// Navigation requests target.
    pub const NAVIGATION: &str = "hero_carousel::navigation";
    /// Visibility reconciliation target.
    pub const RECONCILE: &str = "hero_carousel::reconcile";
}
