//! Single provider render mode

use crate::config::RenderTask;
use crate::output::print_error;

use super::execute;

/// Render one provider's heat map, exiting on failure
pub fn run_render(task: &RenderTask) {
    if let Err(e) = execute(task) {
        print_error(&e);
        std::process::exit(1);
    }
}
