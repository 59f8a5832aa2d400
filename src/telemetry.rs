//! Analytics sink backed by `tracing`

use crate::publish::Analytics;
use tracing::info;

/// Emits analytics events as `tracing` events under the `pubflow::analytics` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn event(&self, name: &str, attributes: &[(&str, &str)]) {
        info!(target: "pubflow::analytics", event = name, attributes = ?attributes, "analytics event");
    }
}
