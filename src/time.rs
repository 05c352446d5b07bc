//! Platform-agnostic time utilities
//!
//! Elapsed seconds since an arbitrary per-process origin; only differences
//! are meaningful.

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Fires at most once per `period` seconds
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    period: f64,
    last: Option<f64>,
}

impl Throttle {
    pub fn new(period: f64) -> Self {
        Self { period, last: None }
    }

    /// True if `now` is at least one period past the last firing. The first
    /// call only arms the throttle.
    pub fn ready(&mut self, now: f64) -> bool {
        match self.last {
            None => {
                self.last = Some(now);
                false
            }
            Some(last) if now - last >= self.period => {
                self.last = Some(now);
                true
            }
            Some(_) => false,
        }
    }
}
