//! Optional timing metrics, enabled via COMMITDIFF_METRICS=1.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Log target used for timings.
pub const TARGET: &str = "commitdiff::metrics";

static METRICS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Initialize metrics from environment. Call once at startup.
pub fn init() {
    let enabled = std::env::var("COMMITDIFF_METRICS")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);
    METRICS_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Log filter override so timings reach the log at `info` even when the
/// global level is stricter. `None` when metrics are off.
pub fn log_directive() -> Option<(&'static str, log::LevelFilter)> {
    directive_for(enabled())
}

fn directive_for(enabled: bool) -> Option<(&'static str, log::LevelFilter)> {
    enabled.then_some((TARGET, log::LevelFilter::Info))
}

/// Check if metrics collection is enabled.
#[inline]
pub fn enabled() -> bool {
    METRICS_ENABLED.load(Ordering::Relaxed)
}

/// RAII timer that logs duration on drop.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Start a timer if metrics are enabled.
    #[inline]
    pub fn start(label: &'static str) -> Option<Self> {
        if enabled() {
            Some(Self {
                label,
                start: Instant::now(),
            })
        } else {
            None
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log_metric(self.label, self.start.elapsed());
    }
}

fn log_metric(label: &str, duration: Duration) {
    log::info!(target: TARGET, "{}: {:?}", label, duration);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_is_none_when_disabled() {
        METRICS_ENABLED.store(false, Ordering::Relaxed);
        assert!(Timer::start("noop").is_none());
    }

    #[test]
    fn directive_raises_metrics_target_to_info() {
        assert_eq!(directive_for(false), None);
        assert_eq!(
            directive_for(true),
            Some(("commitdiff::metrics", log::LevelFilter::Info))
        );
    }
}
