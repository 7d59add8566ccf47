use std::sync::Arc;

use crate::config::settings::ScanConfig;
use crate::core::dispatcher::Dispatcher;
use crate::core::events::{self, Event, EventReceiver};
use crate::error::{ExitCode, ScanError};
use crate::models::scan_result::TaskOutcome;

/// One line of console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleLine {
    Out(String),
    Err(String),
}

impl ConsoleLine {
    fn print(&self) {
        match self {
            ConsoleLine::Out(line) => println!("{}", line),
            ConsoleLine::Err(line) => eprintln!("{}", line),
        }
    }
}

pub struct App {
    config: Arc<ScanConfig>,
}

impl App {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub async fn run(&self) -> ExitCode {
        let mute = self.config.mute;
        for line in banner_lines(&self.config) {
            line.print();
        }

        let (event_tx, event_rx) = events::create_event_channel();
        let narrator = tokio::spawn(narrate(event_rx, mute));

        let dispatcher = Dispatcher::new(Arc::clone(&self.config), event_tx);
        let outcomes = dispatcher.run().await;
        // Last sender goes with the dispatcher; the narrator then drains and stops.
        drop(dispatcher);
        if let Err(e) = narrator.await {
            tracing::error!("Narrator task panicked: {}", e);
        }

        match outcomes {
            Ok(outcomes) => {
                for line in failure_lines(&outcomes) {
                    line.print();
                }
                for outcome in &outcomes {
                    if let Ok(ref report) = outcome.result {
                        tracing::info!(
                            "Pass {:?}: visited {}, deleted {} file(s), pruned {} folder(s), {} error(s)",
                            report.filter,
                            report.entries_visited,
                            report.files_deleted,
                            report.dirs_pruned,
                            report.errors.len()
                        );
                    }
                }
                exit_code(&outcomes)
            }
            Err(e) => {
                tracing::debug!("Run aborted before launch: {}", e);
                error_line(&e).print();
                e.exit_code()
            }
        }
    }
}

async fn narrate(mut event_rx: EventReceiver, mute: bool) {
    while let Some(event) = event_rx.recv().await {
        if let Some(line) = render_event(&event, mute) {
            line.print();
        }
    }
}

/// Startup banner and root line; empty when muted.
pub fn banner_lines(config: &ScanConfig) -> Vec<ConsoleLine> {
    if config.mute {
        return Vec::new();
    }
    vec![
        ConsoleLine::Out(format!(
            "ZeroFile Utility version {}\n",
            env!("CARGO_PKG_VERSION")
        )),
        ConsoleLine::Out(format!(
            "Root Folder is '{}' ...",
            config.root.to_string_lossy().to_uppercase()
        )),
    ]
}

/// Console line for a scan event. Listings are always shown; narration is
/// dropped when muted.
pub fn render_event(event: &Event, mute: bool) -> Option<ConsoleLine> {
    match event {
        Event::Listed { name, .. } => Some(ConsoleLine::Out(name.clone())),
        _ if mute => None,
        Event::FileDeleted { name, .. } => Some(ConsoleLine::Out(format!(
            "Deleting file : '{}'",
            name.to_uppercase()
        ))),
        Event::FolderPruned { name, .. } => Some(ConsoleLine::Out(format!(
            "Deleting folder '{}' ...",
            name.to_uppercase()
        ))),
        Event::EntryFailed { error } => Some(ConsoleLine::Err(format!(
            "Error : {} ({})",
            error.path.display(),
            error.message
        ))),
        Event::ScanStarted { .. } | Event::ScanCompleted { .. } => None,
    }
}

pub fn error_line(error: &ScanError) -> ConsoleLine {
    ConsoleLine::Err(format!("Error : {}", error))
}

/// One error line per failed pass. Fatal conditions are reported even when muted.
pub fn failure_lines(outcomes: &[TaskOutcome]) -> Vec<ConsoleLine> {
    outcomes
        .iter()
        .filter_map(|outcome| outcome.result.as_ref().err())
        .map(error_line)
        .collect()
}

/// Exit code of the first failed pass in filter order. A pass cancelled by
/// fail-fast only decides the code when no pass failed for a real reason.
pub fn exit_code(outcomes: &[TaskOutcome]) -> ExitCode {
    let mut errors = outcomes.iter().filter_map(|o| o.result.as_ref().err());
    let first_real = errors
        .clone()
        .find(|e| !matches!(e, ScanError::Cancelled));

    match first_real.or_else(|| errors.next()) {
        Some(e) => e.exit_code(),
        None => ExitCode::Success,
    }
}
