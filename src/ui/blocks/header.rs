use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Title line followed by aligned `label: value` rows
#[derive(Debug, Clone)]
pub struct CommandHeader {
    icon: Icon,
    title: String,
    items: Vec<(String, String)>,
}

impl CommandHeader {
    pub fn new(icon: Icon, title: impl Into<String>) -> Self {
        Self {
            icon,
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.items.push((label.into(), value.into()));
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut out = String::new();
        let title = ColoredText::info(self.title.as_str())
            .bold()
            .render(supports_color);
        out.push_str(&format!(
            "{} {}\n",
            self.icon.colored(supports_color, supports_unicode),
            title
        ));

        let width = self.items.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (label, value) in &self.items {
            let label = format!("{label}:");
            out.push_str(&format!(
                "  {} {}\n",
                ColoredText::dim(format!("{label:<w$}", w = width + 1)).render(supports_color),
                value
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_ascii_icon_when_unicode_unsupported() {
        let mut header = CommandHeader::new(Icon::Build, "Build complete");
        header.add("Environment", "Production");

        let rendered = header.render(false, false);
        assert!(rendered.contains("[BUILD] Build complete"));
    }

    #[test]
    fn aligns_labels() {
        let mut header = CommandHeader::new(Icon::Build, "Done");
        header.add("Output", "dist");
        header.add("Build time", "12 ms");

        let rendered = header.render(false, true);
        assert!(rendered.contains("  Output:     dist\n"), "{rendered}");
        assert!(rendered.contains("  Build time: 12 ms\n"), "{rendered}");
    }
}
