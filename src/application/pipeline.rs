//! Task orchestration
//!
//! [`BuildContext`] carries everything a pass needs. [`Pipeline`] runs the
//! production pass (clean, four tasks in parallel, report) and the
//! development pass (four tasks, dev server, report, watch loop).

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::domain::ports::{
    BuildEvent, BuildEventSink, Clock, NoopEventSink, NoopNotifier, ReloadNotifier, SystemClock,
};
use crate::domain::value_objects::{BuildEnv, TaskKind};
use crate::error::BuildResult;
use crate::infrastructure::{DevServer, ReloadHub};
use crate::transform::{build_task, Task};

use super::clean::OutputDir;
use super::runner::{TaskOutcome, TaskRunner};
use super::watch::WatchUseCase;

/// Project, configuration and ports for one process
#[derive(Clone)]
pub struct BuildContext {
    pub root: PathBuf,
    pub config: Config,
    /// Configuration file path (watched; may not exist)
    pub config_path: PathBuf,
    pub env: BuildEnv,
    pub clock: Arc<dyn Clock>,
    pub events: Arc<dyn BuildEventSink>,
    pub notifier: Arc<dyn ReloadNotifier>,
}

impl BuildContext {
    pub fn new(root: impl Into<PathBuf>, config: Config, config_path: PathBuf, env: BuildEnv) -> Self {
        Self {
            root: root.into(),
            config,
            config_path,
            env,
            clock: Arc::new(SystemClock),
            events: Arc::new(NoopEventSink),
            notifier: Arc::new(NoopNotifier),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn BuildEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn ReloadNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.out)
    }

    pub fn runner(&self) -> TaskRunner {
        TaskRunner::new(self.out_dir(), self.events.clone(), self.notifier.clone())
    }

    pub fn task(&self, kind: TaskKind) -> Box<dyn Task> {
        build_task(kind, &self.root, &self.config, self.env, self.clock.clone())
    }
}

/// Outcome of a full pass
#[derive(Debug, Clone)]
pub struct PassReport {
    pub outcomes: Vec<TaskOutcome>,
    pub elapsed: Duration,
}

impl PassReport {
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }
}

pub struct Pipeline {
    ctx: BuildContext,
}

impl Pipeline {
    pub fn new(ctx: BuildContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &BuildContext {
        &self.ctx
    }

    pub fn run_single(&self, kind: TaskKind) -> TaskOutcome {
        self.ctx.runner().run(self.ctx.task(kind).as_ref())
    }

    /// Run all four tasks concurrently and wait for every one of them.
    pub fn run_all(&self) -> Vec<TaskOutcome> {
        let runner = self.ctx.runner();
        let tasks: Vec<Box<dyn Task>> = TaskKind::ALL.iter().map(|k| self.ctx.task(*k)).collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = tasks
                .iter()
                .map(|task| {
                    let runner = &runner;
                    scope.spawn(move || runner.run(task.as_ref()))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        })
    }

    /// Clean the output root, then run every task and report.
    ///
    /// A failed clean is reported and the build carries on.
    pub fn production(&self) -> PassReport {
        let started = Instant::now();

        if let Err(e) = OutputDir::new(self.ctx.out_dir()).clean() {
            self.ctx.events.on_event(BuildEvent::Warning {
                message: format!("Failed to clean output directory: {e}"),
            });
        }

        let report = PassReport {
            outcomes: self.run_all(),
            elapsed: started.elapsed(),
        };
        self.complete(&report, None);
        report
    }

    /// Initial pass, dev server, report, then watch until `running` clears.
    ///
    /// Only start-up failures (server bind, watcher) are returned.
    pub fn development(mut self, running: Arc<AtomicBool>) -> BuildResult<()> {
        let hub = Arc::new(ReloadHub::new());
        self.ctx.notifier = hub.clone();

        let started = Instant::now();
        let report = PassReport {
            outcomes: self.run_all(),
            elapsed: started.elapsed(),
        };

        let server = DevServer::start(
            &self.ctx.config.server.host,
            self.ctx.config.server.port,
            self.ctx.out_dir(),
            hub,
        )?;
        self.complete(&report, Some(server.url().to_string()));
        self.ctx.events.on_event(BuildEvent::Info {
            message: "Watching for changes...".to_string(),
        });

        let result = WatchUseCase::new(self.ctx).and_then(|watch| watch.start(running));
        drop(server);
        result
    }

    fn complete(&self, report: &PassReport, server_url: Option<String>) {
        self.ctx.events.on_event(BuildEvent::Completed {
            env: self.ctx.env,
            output: self.ctx.out_dir(),
            server_url,
            elapsed_ms: report.elapsed.as_millis(),
            failed: report.failed(),
        });
    }
}
