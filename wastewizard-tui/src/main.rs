//! Terminal dashboard for wastewizard that shows simulated smart bin telemetry.

mod app;
mod config;
mod input;
mod ui;

use std::{fs::File, io, path::Path, sync::Arc, time::Duration as StdDuration};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use env_logger::{Env, Target};
use log::{debug, error, info, warn};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tokio::time::sleep;
use wastewizard_core::{plugin::DeploymentRegistry, service::DashboardService};
use wastewizard_provider_simulated as simulated;

use crate::app::App;
use crate::config::DashboardConfig;
use crate::input::Action;

/// Log level for the workspace crates unless `RUST_LOG` says otherwise.
const DEFAULT_LOG_FILTER: &str =
    "wastewizard_core=info,wastewizard_provider_simulated=info,wastewizard_tui=info";

#[tokio::main]
async fn main() -> Result<()> {
    let config = DashboardConfig::parse();
    init_logging(config.log_file.as_deref())?;

    // Source + service setup
    let registry = Arc::new(DeploymentRegistry::new(simulated::plugins(config.seed)));
    let service = Arc::new(DashboardService::new(registry));

    // App state
    let mut app = App::new(service);
    let mut initial_action = Action::None;
    if let Some(id) = config.deployment.as_deref() {
        if app.preselect(id) {
            initial_action = Action::LoadSnapshot;
        } else {
            warn!("unknown deployment {id:?}, showing the deployment list");
            app.error_message = Some(format!("Unknown deployment \"{id}\""));
        }
    }

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    info!("dashboard started");
    let res = run(&mut terminal, app, initial_action, config.update_delay()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("dashboard stopped: {err:#}");
    }
    res
}

/// Route logs to `log_file`; without one the logger stays uninstalled so
/// nothing writes over the alternate screen.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    initial_action: Action,
    update_delay: StdDuration,
) -> Result<()> {
    let mut pending = initial_action;

    loop {
        match pending {
            Action::Quit => break,
            Action::None => {}
            Action::LoadSnapshot => {
                refresh(terminal, &mut app, StdDuration::ZERO).await?;
                discard_pending_input()?;
            }
            Action::SimulateUpdate => {
                simulate_update(terminal, &mut app, update_delay).await?;
                discard_pending_input()?;
            }
        }
        pending = Action::None;

        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            pending = input::handle_key_event(key, &mut app);
        }
    }

    Ok(())
}

/// Drop keys pressed while a refresh was in flight.
fn discard_pending_input() -> Result<()> {
    let discarded = input::discard_queued(|| event::poll(StdDuration::ZERO), event::read)?;
    if discarded > 0 {
        debug!("dropped {discarded} events queued during refresh");
    }
    Ok(())
}

/// The "live update": refresh after `delay`, then confirm in the status bar.
async fn simulate_update<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    delay: StdDuration,
) -> Result<()> {
    refresh(terminal, app, delay).await?;
    if app.error_message.is_none() {
        app.info_message = Some("Data updated!".into());
    }
    Ok(())
}

/// Take a fresh snapshot of the selected deployment after `delay`.
async fn refresh<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    delay: StdDuration,
) -> Result<()> {
    let Some(id) = app.selected_id() else {
        app.error_message = Some("Select a deployment first".into());
        return Ok(());
    };

    app.is_loading = true;
    app.error_message = None;
    app.info_message = None;
    terminal.draw(|frame| ui::draw(frame, app))?;

    // Simulated network latency
    if !delay.is_zero() {
        sleep(delay).await;
    }

    let res = app.service.snapshot(&id).await;

    app.is_loading = false;
    match res {
        Ok(snapshot) => {
            info!("refreshed {id}: {} readings", snapshot.readings.len());
            app.snapshot = Some(snapshot);
        }
        Err(err) => {
            warn!("refresh of {id} failed: {err}");
            app.error_message = Some(format!("Failed to load readings: {err}"));
        }
    }
    Ok(())
}
