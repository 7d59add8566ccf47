use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::settings::ScanConfig;
use crate::error::ScanError;
use crate::models::scan_result::{ScanResult, TaskOutcome};

use super::events::EventSender;
use super::scanner::{check_root, filter_label, Scanner};

/// Launches one scan task per object type and waits for all of them.
pub struct Dispatcher {
    scanner: Scanner,
}

impl Dispatcher {
    pub fn new(config: Arc<ScanConfig>, event_tx: EventSender) -> Self {
        Self {
            scanner: Scanner::new(config, event_tx),
        }
    }

    /// Whether a failed pass raised the shared fail-fast flag.
    pub fn is_cancelled(&self) -> bool {
        self.scanner.is_cancelled()
    }

    /// Run every pass and return their outcomes in filter order.
    ///
    /// A missing root fails the whole run before anything is launched.
    /// Otherwise every launched task is awaited, whatever its siblings did.
    pub async fn run(&self) -> Result<Vec<TaskOutcome>, ScanError> {
        let config = self.scanner.config();
        check_root(&config.root)?;

        let mut handles: Vec<(Option<String>, JoinHandle<ScanResult>)> = Vec::new();
        for filter in config.passes() {
            let scanner = self.scanner.clone();
            let task_filter = filter.clone();
            let handle = tokio::spawn(async move { scanner.scan(task_filter).await });
            handles.push((filter, handle));
        }
        tracing::debug!("Launched {} scan task(s)", handles.len());

        let mut outcomes = Vec::with_capacity(handles.len());
        for (filter, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::debug!("Scan task panicked: {}", e);
                    if config.fail_fast {
                        self.scanner.cancel();
                    }
                    Err(ScanError::TaskFailed {
                        filter: filter_label(filter.as_deref()),
                        message: e.to_string(),
                    })
                }
            };
            outcomes.push(TaskOutcome { filter, result });
        }

        Ok(outcomes)
    }
}
