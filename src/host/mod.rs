//! Host inspection: privilege/tooling preflight, OS detection and the
//! OS compatibility table.

pub mod detect;
pub mod preflight;
pub mod support;

pub use detect::{detect, DistroFamily, HostEnvironment};
pub use support::{ensure_supported, is_supported};
