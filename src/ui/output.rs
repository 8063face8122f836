use assetline::config::ConfigWarning;

use crate::ui::primitives::icon::Icon;

pub fn print_config_warnings(warnings: &[ConfigWarning], unicode: bool) {
    for w in warnings {
        eprintln!("{} {w}", Icon::Warning.render(unicode));

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}
