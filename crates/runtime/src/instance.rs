//! BridgedInstance - base trait for native objects tracked by the bridge.

use downcast_rs::{DowncastSync, impl_downcast};

/// A native object the [`InstanceRegistry`](crate::registry::InstanceRegistry)
/// can track.
///
/// The bridge never owns the object; it holds either a strong or weak
/// reference to it and names it to the remote runtime by identifier.
/// Platform glue implements this for each wrapped widget type and can
/// recover the concrete type from a registry lookup via downcasting.
pub trait BridgedInstance: DowncastSync {
    /// Short type name used in diagnostics (e.g. `"ContentView"`).
    fn type_name(&self) -> &'static str;
}

impl_downcast!(sync BridgedInstance);
