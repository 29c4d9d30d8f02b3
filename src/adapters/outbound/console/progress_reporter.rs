use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;
use std::time::Duration;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with stdout output.
/// Uses an indicatif spinner while packages are being resolved, since the
/// total number of packages is not known up front.
pub struct StderrProgressReporter {
    spinner: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
        }
    }

    fn get_or_create_spinner(&self) -> ProgressBar {
        let mut spinner_option = self.spinner.borrow_mut();
        if let Some(pb) = spinner_option.as_ref() {
            return pb.clone();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("   {spinner:.green} {pos} resolved - {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        *spinner_option = Some(pb.clone());
        pb
    }

    fn clear_spinner(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.clear_spinner();
        eprintln!("{}", message);
    }

    fn report_activity(&self, resolved: usize, package: &str) {
        let pb = self.get_or_create_spinner();
        pb.set_position(resolved as u64);
        pb.set_message(package.to_string());
    }

    fn report_error(&self, message: &str) {
        self.clear_spinner();
        eprintln!("{}", message.yellow());
    }

    fn report_completion(&self, message: &str) {
        self.clear_spinner();
        eprintln!();
        eprintln!("{}", message.green());
    }
}
