use assetline::domain::ports::BuildEvent;
use assetline::BuildEnv;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn format_bytes_compact(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let b = bytes as f64;
    if b < KB {
        return format!("{} B", bytes);
    }
    if b < MB {
        return format!("{:.1} KB", b / KB);
    }
    if b < GB {
        return format!("{:.1} MB", b / MB);
    }
    format!("{:.1} GB", b / GB)
}

/// Events that belong on stderr
pub fn is_error_event(event: &BuildEvent) -> bool {
    matches!(
        event,
        BuildEvent::TaskFailed { .. } | BuildEvent::Warning { .. }
    )
}

pub fn render_build_event(
    timestamp: &str,
    event: &BuildEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);

    match event {
        BuildEvent::TaskStarted { task } => format!(
            "{} {} {}...\n",
            prefix,
            Icon::Progress.colored(supports_color, supports_unicode),
            task.start_label()
        ),
        BuildEvent::TaskFinished { task } => format!(
            "{} {} {}\n",
            prefix,
            Icon::Success.colored(supports_color, supports_unicode),
            ColoredText::success(task.end_label()).render(supports_color)
        ),
        BuildEvent::TaskFailed { task, message } => format!(
            "{} {} {}: {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error(format!("Error in {}", task.error_label()))
                .bold()
                .render(supports_color),
            message
        ),
        BuildEvent::ArtifactWritten { task, path, size } => format!(
            "{} {} {} size: {} {}\n",
            prefix,
            Icon::Arrow.colored(supports_color, supports_unicode),
            task.size_label(),
            format_bytes_compact(*size),
            ColoredText::dim(format!("({})", path.display())).render(supports_color)
        ),
        BuildEvent::Info { message } => format!(
            "{} {} {}\n",
            prefix,
            Icon::Info.colored(supports_color, supports_unicode),
            message
        ),
        BuildEvent::Warning { message } => format!(
            "{} {} {}\n",
            prefix,
            Icon::Warning.colored(supports_color, supports_unicode),
            ColoredText::warning(message.as_str()).render(supports_color)
        ),
        BuildEvent::FilesChanged { paths } => {
            let list: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
            format!(
                "{} {} Changed: {}\n",
                prefix,
                Icon::Watch.colored(supports_color, supports_unicode),
                list.join(", ")
            )
        }
        BuildEvent::Completed {
            env,
            output,
            server_url,
            elapsed_ms,
            failed,
        } => {
            let title = match failed {
                0 => "Build complete".to_string(),
                1 => "Build finished with 1 failed task".to_string(),
                n => format!("Build finished with {n} failed tasks"),
            };
            let icon = if *failed == 0 { Icon::Build } else { Icon::Warning };

            let mut header = CommandHeader::new(icon, title);
            header.add("Environment", env.label());
            if let Some(url) = server_url {
                header.add("Server", url.as_str());
            }
            header.add("Public path", output.display().to_string());
            header.add("Source maps", enabled(*env == BuildEnv::Development));
            header.add("Minification", enabled(env.is_production()));
            header.add("Build time", format!("{elapsed_ms} ms"));
            format!("\n{}", header.render(supports_color, supports_unicode))
        }
    }
}

fn enabled(on: bool) -> &'static str {
    if on {
        "enabled"
    } else {
        "disabled"
    }
}
