//! Busy indicator shown around blocking inference calls

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Cloneable handle to at most one live spinner
#[derive(Clone, Default)]
pub struct BusyIndicator {
    spinner: Arc<Mutex<Option<ProgressBar>>>,
    hidden: bool,
}

impl BusyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never draws anything; used for machine-readable output
    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::default()
        }
    }

    pub fn start(&self, message: &str) {
        if self.hidden {
            return;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    pub fn set_message(&self, message: String) {
        if let Ok(slot) = self.spinner.lock() {
            if let Some(pb) = slot.as_ref() {
                pb.set_message(message);
            }
        }
    }

    pub fn stop(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }
}
