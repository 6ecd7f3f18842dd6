use std::fmt;
use std::str::FromStr;

use raylib::prelude::*;

use crate::constants::*;
use crate::error::CrossFadeError;

/// Fade duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timeout(u64);

impl Timeout {
    /// Negative values are clamped to zero, which completes the fade on the
    /// next tick.
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.max(0) as u64)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_secs_f32(self) -> f32 {
        self.0 as f32 / 1000.0
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self(DEFAULT_TIMEOUT_MS)
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl FromStr for Timeout {
    type Err = CrossFadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Timeout::from_millis)
            .map_err(|_| CrossFadeError::InvalidTimeout(s.to_string()))
    }
}

/// Styling handed through to whoever draws the outer container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerStyle {
    pub bounds: Rectangle,
    pub background: Option<Color>,
}

impl Default for ContainerStyle {
    fn default() -> Self {
        Self {
            bounds: Rectangle::new(0.0, 0.0, RENDER_WIDTH as f32, RENDER_HEIGHT as f32),
            background: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrossFadeConfig {
    pub timeout: Timeout,
    /// Freeze the hidden slot while no fade is running.
    pub freeze_hidden: bool,
    pub style: ContainerStyle,
}

impl Default for CrossFadeConfig {
    fn default() -> Self {
        Self {
            timeout: Timeout::default(),
            freeze_hidden: true,
            style: ContainerStyle::default(),
        }
    }
}

impl CrossFadeConfig {
    pub fn with_timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_freeze_hidden(mut self, freeze_hidden: bool) -> Self {
        self.freeze_hidden = freeze_hidden;
        self
    }

    pub fn with_style(mut self, style: ContainerStyle) -> Self {
        self.style = style;
        self
    }
}
