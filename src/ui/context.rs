use assetline::config::{ColorMode, Config};

use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(config: &Config) -> Self {
        Self::from_caps(config, detect_capabilities())
    }

    pub(crate) fn from_caps(config: &Config, caps: TerminalCapabilities) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match config.output.color {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => caps.supports_color && !caps.is_ci,
        };

        Self { color, unicode }
    }
}
