use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::nav::EasingType;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Optional log file; stdout logging corrupts the alternate screen
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a section transition is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u16,
    /// Show the status bar at the bottom
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            show_status_bar: default_true(),
        }
    }
}

/// Tunables for the section-navigation engine.
///
/// The thresholds are empirically chosen UX constants, not correctness
/// constants; they are surfaced here so they can be tuned per terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Fraction of a section that must be crossed before the resolver
    /// switches the active index. Must stay in (0, 0.5].
    #[serde(default = "default_hysteresis")]
    pub hysteresis_threshold: f64,
    /// Accumulated wheel magnitude below which a burst is discarded as noise
    #[serde(default = "default_wheel_min")]
    pub wheel_min_magnitude: f64,
    /// Accumulated wheel magnitude above which a burst jumps two sections
    #[serde(default = "default_wheel_double_jump")]
    pub wheel_double_jump_magnitude: f64,
    /// Quiet period after the last wheel event before the burst is evaluated
    #[serde(default = "default_wheel_debounce")]
    pub wheel_debounce_ms: u64,
    /// Wheel intents arriving this soon after a transition start are dropped
    #[serde(default = "default_wheel_cooldown")]
    pub wheel_cooldown_ms: u64,
    /// Nominal duration of an animated section transition
    #[serde(default = "default_transition_duration")]
    pub transition_duration_ms: u64,
    /// Easing curve for animated transitions
    #[serde(default = "default_easing")]
    pub easing: EasingType,
    /// Quiet period before an off-section idle offset snaps back
    #[serde(default = "default_snap_idle")]
    pub snap_idle_ms: u64,
    /// Offset discrepancy tolerated before the settle check corrects it
    #[serde(default = "default_settle_tolerance")]
    pub settle_tolerance: f64,
    /// Debounce applied to viewport resize events
    #[serde(default = "default_resize_debounce")]
    pub resize_debounce_ms: u64,
    /// Pointer travel ignored as jitter before a drag is classified
    #[serde(default = "default_drag_dead_zone")]
    pub drag_dead_zone: f64,
    /// Minimum vertical pointer travel for a drag to count as a swipe
    #[serde(default = "default_drag_min_swipe")]
    pub drag_min_swipe: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            hysteresis_threshold: default_hysteresis(),
            wheel_min_magnitude: default_wheel_min(),
            wheel_double_jump_magnitude: default_wheel_double_jump(),
            wheel_debounce_ms: default_wheel_debounce(),
            wheel_cooldown_ms: default_wheel_cooldown(),
            transition_duration_ms: default_transition_duration(),
            easing: default_easing(),
            snap_idle_ms: default_snap_idle(),
            settle_tolerance: default_settle_tolerance(),
            resize_debounce_ms: default_resize_debounce(),
            drag_dead_zone: default_drag_dead_zone(),
            drag_min_swipe: default_drag_min_swipe(),
        }
    }
}

impl NavConfig {
    /// Return a copy with out-of-range tunables replaced by their defaults.
    pub fn validated(mut self) -> Self {
        if !(self.hysteresis_threshold > 0.0 && self.hysteresis_threshold <= 0.5) {
            tracing::warn!(
                value = self.hysteresis_threshold,
                "hysteresis_threshold outside (0, 0.5], using default"
            );
            self.hysteresis_threshold = default_hysteresis();
        }
        if self.wheel_double_jump_magnitude < self.wheel_min_magnitude {
            tracing::warn!("wheel_double_jump_magnitude below noise floor, using defaults");
            self.wheel_min_magnitude = default_wheel_min();
            self.wheel_double_jump_magnitude = default_wheel_double_jump();
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the audit backend
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Polling interval for the progress fallback, in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u16 {
    60
}

fn default_true() -> bool {
    true
}

fn default_hysteresis() -> f64 {
    0.3
}

fn default_wheel_min() -> f64 {
    10.0
}

fn default_wheel_double_jump() -> f64 {
    240.0
}

fn default_wheel_debounce() -> u64 {
    60
}

fn default_wheel_cooldown() -> u64 {
    250
}

fn default_transition_duration() -> u64 {
    360
}

fn default_easing() -> EasingType {
    EasingType::Cubic
}

fn default_snap_idle() -> u64 {
    120
}

fn default_settle_tolerance() -> f64 {
    2.0
}

fn default_resize_debounce() -> u64 {
    150
}

fn default_drag_dead_zone() -> f64 {
    8.0
}

fn default_drag_min_swipe() -> f64 {
    50.0
}

fn default_endpoint() -> String {
    "http://localhost:8000/api/v1".to_string()
}

fn default_poll_interval() -> u64 {
    2
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self =
                toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
            Ok(config.validated())
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/auditdeck/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("auditdeck")
            .join("config.toml")
    }

    /// Get the log file path (with tilde expansion)
    pub fn log_file(&self) -> Option<PathBuf> {
        self.general.log_file.as_deref().map(expand_tilde)
    }

    fn validated(mut self) -> Self {
        self.nav = self.nav.validated();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_nav_config() {
        let nav = NavConfig::default();
        assert_eq!(nav.hysteresis_threshold, 0.3);
        assert_eq!(nav.transition_duration_ms, 360);
        assert_eq!(nav.easing, EasingType::Cubic);
        assert!(nav.wheel_min_magnitude < nav.wheel_double_jump_magnitude);
    }

    #[test]
    fn test_validated_rejects_bad_hysteresis() {
        let nav = NavConfig {
            hysteresis_threshold: 0.9,
            ..Default::default()
        }
        .validated();
        assert_eq!(nav.hysteresis_threshold, 0.3);

        let nav = NavConfig {
            hysteresis_threshold: 0.0,
            ..Default::default()
        }
        .validated();
        assert_eq!(nav.hysteresis_threshold, 0.3);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.nav.hysteresis_threshold, config.nav.hysteresis_threshold);
        assert_eq!(parsed.ui.tick_rate_ms, config.ui.tick_rate_ms);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let parsed: AppConfig = toml::from_str("").unwrap();
        assert_eq!(parsed.nav.wheel_debounce_ms, 60);
        assert_eq!(parsed.general.log_level, "info");
    }
}
