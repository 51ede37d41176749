//! Axis enable-state type-state markers.
//!
//! Motion commands exist only on an enabled axis; the compiler rejects a
//! `move_by` on a disabled one.

/// Axis is disabled: EN low, ticks produce no motion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

/// Axis is enabled and accepts motion commands.
#[derive(Debug, Clone, Copy)]
pub struct Enabled;

/// Trait for axis states.
pub trait AxisState: private::Sealed {}

impl AxisState for Disabled {}
impl AxisState for Enabled {}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Disabled {}
    impl Sealed for super::Enabled {}
}

/// State name for display/debugging.
pub trait StateName {
    /// Get the state name as a static string.
    fn name() -> &'static str;
}

impl StateName for Disabled {
    fn name() -> &'static str {
        "Disabled"
    }
}

impl StateName for Enabled {
    fn name() -> &'static str {
        "Enabled"
    }
}
