//! Decision logic shared by every platform.
//!
//! This crate is independent of concrete platform providers:
//! - Dotted version comparison.
//! - Payment-app catalog probing.
//! - Update resolution, kind selection, and update start.
//! - Store redirect fallback (native scheme, then web).
//! - The flexible-update install listener state machine.

mod listener;
mod prober;
mod redirect;
mod resolver;
mod timeout;
mod version;

#[cfg(test)]
mod test_support;

/// Flexible-update listener lifecycle and its async driver.
pub use listener::{
    DeferredInstallListener, ListenerAction, ListenerState, drive_install_listener,
    spawn_install_listener,
};
/// Catalog probing entry point.
pub use prober::detect_installed_apps;
/// Store redirect targets and the two-tier open helper.
pub use redirect::{RedirectTargets, open_with_fallback};
/// Update availability check and start.
pub use resolver::{
    DEFAULT_ORACLE_TIMEOUT, UpdateResolver, lookup_target, priority_kind, select_kind,
};
/// Dotted version comparison.
pub use version::{compare_versions, is_remote_newer};
