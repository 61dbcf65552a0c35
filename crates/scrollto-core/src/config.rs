use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Defaults applied to every scroll animation that does not override them.
///
/// Loaded from `~/.config/scrollto/config.toml` when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Selector of the scroll owner when a call names none
    #[serde(default = "default_container")]
    pub container: String,
    /// Animation length in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
    /// Wait before the animation starts, in milliseconds
    #[serde(default)]
    pub delay_ms: f64,
    /// Added to the computed target on both axes
    #[serde(default)]
    pub offset: f64,
    /// Interpolation curve
    #[serde(default)]
    pub easing: EasingType,
    /// Animate the horizontal offset
    #[serde(default)]
    pub scroll_x: bool,
    /// Animate the vertical offset
    #[serde(default = "default_true")]
    pub scroll_y: bool,
    /// Frames per second used by native frame drivers
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            container: default_container(),
            duration_ms: default_duration_ms(),
            delay_ms: 0.0,
            offset: 0.0,
            easing: EasingType::default(),
            scroll_x: false,
            scroll_y: default_true(),
            frame_rate: default_frame_rate(),
        }
    }
}

/// Named easing curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    #[default]
    CubicInOut,
    QuintOut,
    SineInOut,
    ExpoOut,
}

impl EasingType {
    pub const ALL: [EasingType; 10] = [
        EasingType::Linear,
        EasingType::QuadIn,
        EasingType::QuadOut,
        EasingType::QuadInOut,
        EasingType::CubicIn,
        EasingType::CubicOut,
        EasingType::CubicInOut,
        EasingType::QuintOut,
        EasingType::SineInOut,
        EasingType::ExpoOut,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EasingType::Linear => "linear",
            EasingType::QuadIn => "quad_in",
            EasingType::QuadOut => "quad_out",
            EasingType::QuadInOut => "quad_in_out",
            EasingType::CubicIn => "cubic_in",
            EasingType::CubicOut => "cubic_out",
            EasingType::CubicInOut => "cubic_in_out",
            EasingType::QuintOut => "quint_out",
            EasingType::SineInOut => "sine_in_out",
            EasingType::ExpoOut => "expo_out",
        }
    }
}

impl fmt::Display for EasingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EasingType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        EasingType::ALL
            .into_iter()
            .find(|easing| easing.name() == wanted)
            .ok_or_else(|| crate::Error::Config(format!("unknown easing: {}", s)))
    }
}

fn default_container() -> String {
    "body".to_string()
}

fn default_duration_ms() -> f64 {
    500.0
}

fn default_true() -> bool {
    true
}

fn default_frame_rate() -> u32 {
    60
}

impl ScrollConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_or_default(&Self::config_path())
    }

    /// Load configuration from `path`, or return defaults if it does not exist
    pub fn load_or_default(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/scrollto/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrollto")
            .join("config.toml")
    }

    /// Animation duration as a `Duration` (negative values collapse to zero)
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_ms.max(0.0) / 1000.0)
    }

    /// Interval between frames for native drivers
    pub fn frame_interval(&self) -> Duration {
        if self.frame_rate == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_secs_f64(1.0 / self.frame_rate as f64)
        }
    }
}
