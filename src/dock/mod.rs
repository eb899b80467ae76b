//! The Dock: the operator's control surface. It browses and filters the
//! collection, holds the selection and presentation options, and drives the
//! Display through an [`OutputChannel`](crate::output::OutputChannel).

mod app;
mod keys;
mod state;

use anyhow::Result;

pub use app::{DockApp, Focus};
pub use keys::{global_action, GlobalAction};
pub use state::DockState;

/// Run the Dock until the operator quits.
pub fn run_dock(app: &mut DockApp) -> Result<()> {
    crate::terminal::run(app)
}
