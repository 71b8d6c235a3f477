//! Platform abstraction layer
//!
//! The simulation never reads the time itself. Hosts sample a [`Clock`] once
//! per frame and hand the timestamp to [`crate::sim::tick`].

/// Monotonic millisecond clock
#[derive(Debug, Clone)]
pub struct Clock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        Self {}
    }

    /// Milliseconds since the clock was created
    #[cfg(not(target_arch = "wasm32"))]
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// `performance.now()`, falling back to `Date.now()` without a window
    #[cfg(target_arch = "wasm32")]
    pub fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

/// Wall-clock Unix time in ms, for leaderboard timestamps
#[cfg(not(target_arch = "wasm32"))]
pub fn unix_time_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(target_arch = "wasm32")]
pub fn unix_time_ms() -> f64 {
    js_sys::Date::now()
}

/// LocalStorage access for browser builds
#[cfg(target_arch = "wasm32")]
pub(crate) mod storage {
    pub const CONFIG_KEY: &str = "scuba_dive_config";
    pub const HIGH_SCORES_KEY: &str = "scuba_dive_highscores";

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub fn get(key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    pub fn set(key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("LocalStorage write for '{}' failed", key);
            }
        }
    }
}
