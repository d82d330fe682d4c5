use serde::{Deserialize, Serialize};

/// Layout mode chosen by viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Desktop,
    Mobile,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Widths at or below this many logical pixels are mobile.
    pub breakpoint: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { breakpoint: 600.0 }
    }
}

impl ViewportConfig {
    pub fn mode_for(&self, width: f32) -> Mode {
        if width <= self.breakpoint {
            Mode::Mobile
        } else {
            Mode::Desktop
        }
    }
}

/// Edge-triggered breakpoint watcher.
///
/// Reports a mode only when a reading lands on the other side of the breakpoint
/// from the previous reading. Starts out assuming desktop.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportMonitor {
    config: ViewportConfig,
    last: Mode,
}

impl ViewportMonitor {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            last: Mode::Desktop,
        }
    }

    pub fn mode(&self) -> Mode {
        self.last
    }

    pub fn check(&mut self, width: f32) -> Option<Mode> {
        let mode = self.config.mode_for(width);
        if mode == self.last {
            return None;
        }
        self.last = mode;
        Some(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_inclusive_for_mobile() {
        let config = ViewportConfig::default();
        assert_eq!(config.mode_for(600.0), Mode::Mobile);
        assert_eq!(config.mode_for(600.5), Mode::Desktop);
    }

    #[test]
    fn test_first_wide_reading_reports_nothing() {
        let mut monitor = ViewportMonitor::new(ViewportConfig::default());
        assert_eq!(monitor.check(1280.0), None);
    }

    #[test]
    fn test_reports_only_crossings() {
        let mut monitor = ViewportMonitor::new(ViewportConfig::default());
        assert_eq!(monitor.check(400.0), Some(Mode::Mobile));
        assert_eq!(monitor.check(380.0), None);
        assert_eq!(monitor.check(590.0), None);
        assert_eq!(monitor.check(900.0), Some(Mode::Desktop));
        assert_eq!(monitor.check(1200.0), None);
        assert_eq!(monitor.mode(), Mode::Desktop);
    }
}
