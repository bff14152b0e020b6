//! Batch mode: every provider listed in a config file

use crate::config::RenderTask;
use crate::output::{print_error, print_info};

use super::execute;

/// Render each task in order; a failing task does not stop the others
pub fn run_batch(tasks: &[RenderTask]) {
    let mut failed = Vec::new();

    for task in tasks {
        if !task.config.quiet {
            print_info(&format!("Rendering {}", task.provider.id));
        }
        if let Err(e) = execute(task) {
            print_error(&format!("{}: {}", task.provider.id, e));
            failed.push(task.provider.id);
        }
    }

    if !failed.is_empty() {
        print_error(&format!(
            "{} of {} providers failed: {}",
            failed.len(),
            tasks.len(),
            failed.join(", ")
        ));
        std::process::exit(1);
    }
}
