//! Full-screen terminal client for the event service.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod router;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};
use std::sync::Arc;

use anyhow::Result;
use evently_core::api::ApiClient;
use evently_core::config::Config;
pub use runtime::TuiRuntime;

use crate::state::AppState;

/// Runs the TUI until the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal or terminal I/O fails.
pub async fn run_interactive(config: &Config, client: ApiClient) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive client requires a terminal.\n\
             Use `evently events list` and friends for scripted use."
        );
    }

    let state = AppState::new(
        Arc::clone(client.session()),
        client.base_url().to_string(),
        config.redirect_delay(),
    );
    tracing::info!(base_url = client.base_url(), "starting tui");
    let mut runtime = TuiRuntime::new(state, client)?;
    runtime.run()
}
