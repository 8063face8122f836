//! Task kind value object - the four leaf transform tasks

/// Leaf transform task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    Html,
    Css,
    Javascript,
    Assets,
}

impl TaskKind {
    /// All tasks in the order they are spawned by the orchestrator
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Css,
        TaskKind::Javascript,
        TaskKind::Html,
        TaskKind::Assets,
    ];

    /// Short identifier (CLI / log key)
    pub fn id(&self) -> &'static str {
        match self {
            TaskKind::Html => "html",
            TaskKind::Css => "css",
            TaskKind::Javascript => "javascript",
            TaskKind::Assets => "assets",
        }
    }

    /// Shown while the task runs
    pub fn start_label(&self) -> &'static str {
        match self {
            TaskKind::Html => "Compiling HTML",
            TaskKind::Css => "Processing CSS & utilities",
            TaskKind::Javascript => "Bundling JavaScript",
            TaskKind::Assets => "Copying assets",
        }
    }

    /// Shown when the task finishes
    pub fn end_label(&self) -> &'static str {
        match self {
            TaskKind::Html => "HTML compiled",
            TaskKind::Css => "CSS processed",
            TaskKind::Javascript => "JavaScript bundled",
            TaskKind::Assets => "Assets copied",
        }
    }

    /// Used in "Error in ..." lines
    pub fn error_label(&self) -> &'static str {
        match self {
            TaskKind::Html => "HTML compilation",
            TaskKind::Css => "CSS processing",
            TaskKind::Javascript => "JavaScript bundling",
            TaskKind::Assets => "Assets copying",
        }
    }

    /// Prefix for size lines
    pub fn size_label(&self) -> &'static str {
        match self {
            TaskKind::Html => "HTML",
            TaskKind::Css => "CSS",
            TaskKind::Javascript => "JavaScript",
            TaskKind::Assets => "Assets",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
