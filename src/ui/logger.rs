use assetline::domain::ports::{BuildEvent, BuildEventSink};
use chrono::Local;

use crate::ui::context::UiContext;
use crate::ui::views::build::{is_error_event, render_build_event};

/// Console sink: one timestamped line per event
pub struct BuildLogger {
    ui: UiContext,
}

impl BuildLogger {
    pub fn new(ui: UiContext) -> Self {
        Self { ui }
    }
}

impl BuildEventSink for BuildLogger {
    fn on_event(&self, event: BuildEvent) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        let line = render_build_event(&timestamp, &event, self.ui.color, self.ui.unicode);
        if is_error_event(&event) {
            eprint!("{line}");
        } else {
            print!("{line}");
        }
    }
}
