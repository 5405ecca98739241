//! Blend TUI entry point.

use blend_core::default_template;
use blend_form::{render_document, ControllerOptions, FormController, PersistenceStore};
use blend_tui::api_client::ApiClient;
use blend_tui::config::TuiConfig;
use blend_tui::error::TuiError;
use blend_tui::events::TuiEvent;
use blend_tui::keys::{map_edit_key, map_key, Action};
use blend_tui::market::{chart_series, price_text, PRICE_UNAVAILABLE};
use blend_tui::nav::View;
use blend_tui::persistence::FileStore;
use blend_tui::state::{App, KEYBOARD_RESIZE_STEP};
use blend_tui::views::render_view;
use chrono::Utc;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type FileApp = App<FileStore>;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    init_logging(&config)?;
    let api = ApiClient::new(&config)?;

    let store = PersistenceStore::new(
        FileStore::new(&config.snapshot_path),
        config.snapshot_key.clone(),
    );
    let options = ControllerOptions {
        field_width: config.default_field_width,
        notification_ttl: config.notification_ttl(),
    };
    let mut controller =
        FormController::new(render_document(&default_template()), store, options);
    let report = controller.initialize();
    info!(
        schema = ?report.schema,
        spec_fields = report.rules.spec_fields,
        restore = ?report.restore,
        "form initialized"
    );
    let mut app = App::new(config, controller);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;
    app.viewport = terminal.size()?;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);

    spawn_input_reader(event_tx.clone());
    spawn_chart_fetch(api.clone(), event_tx.clone());

    let mut clock = tokio::time::interval(Duration::from_millis(app.config.clock_interval_ms));
    let mut price_refresh =
        tokio::time::interval(Duration::from_millis(app.config.price_refresh_interval_ms));

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = clock.tick() => app.tick_clock(Utc::now()),
            // Fire and forget: a slow response never holds back the next tick.
            _ = price_refresh.tick() => spawn_price_fetch(api.clone(), event_tx.clone()),
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, &api, &event_tx, event) {
                    break;
                }
            }
        }
    }

    app.controller.save();
    Ok(())
}

fn init_logging(config: &TuiConfig) -> Result<(), TuiError> {
    if let Some(parent) = config.error_log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.error_log_path)?;
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("blend_tui=info,blend_form=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| TuiError::Logging(e.to_string()))
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let event = match evt {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        TuiEvent::Input(key)
                    }
                    CrosstermEvent::Mouse(mouse) => TuiEvent::Mouse(mouse),
                    CrosstermEvent::Resize(width, height) => TuiEvent::Resize { width, height },
                    _ => continue,
                };
                if sender.blocking_send(event).is_err() {
                    break;
                }
            }
        }
    });
}

fn spawn_price_fetch(api: ApiClient, sender: mpsc::Sender<TuiEvent>) {
    tokio::spawn(async move {
        let text = match api.price().await {
            Ok(payload) => price_text(&payload),
            Err(err) => {
                warn!(error = %err, "price fetch failed");
                PRICE_UNAVAILABLE.to_string()
            }
        };
        let _ = sender.send(TuiEvent::PriceLoaded(text)).await;
    });
}

fn spawn_chart_fetch(api: ApiClient, sender: mpsc::Sender<TuiEvent>) {
    tokio::spawn(async move {
        let series = match api.chart().await {
            Ok(payload) => {
                let series = chart_series(&payload);
                if series.is_none() {
                    debug!("chart payload without labels or values");
                }
                series
            }
            Err(err) => {
                warn!(error = %err, "chart fetch failed");
                None
            }
        };
        let _ = sender.send(TuiEvent::ChartLoaded(series)).await;
    });
}

fn spawn_submit(api: ApiClient, sender: mpsc::Sender<TuiEvent>, pairs: Vec<(String, String)>) {
    tokio::spawn(async move {
        let result = api.submit(&pairs).await.map_err(|err| {
            warn!(error = %err, "form submission failed");
            err.to_string()
        });
        let _ = sender.send(TuiEvent::SubmitDone(result)).await;
    });
}

/// Returns `true` when the app should exit.
fn handle_event(
    app: &mut FileApp,
    api: &ApiClient,
    sender: &mpsc::Sender<TuiEvent>,
    event: TuiEvent,
) -> bool {
    match event {
        TuiEvent::Input(key) => {
            if app.editing.is_some() {
                if let Some(action) = map_edit_key(key) {
                    app.edit(action);
                }
            } else if let Some(action) = map_key(key) {
                return handle_action(app, api, sender, action);
            }
        }
        TuiEvent::Mouse(mouse) => app.mouse(mouse),
        TuiEvent::Resize { width, height } => app.viewport = Rect::new(0, 0, width, height),
        TuiEvent::PriceLoaded(text) => app.set_price(text),
        TuiEvent::ChartLoaded(series) => app.set_chart(series),
        TuiEvent::SubmitDone(result) => app.finish_submit(result),
    }
    false
}

fn handle_action(
    app: &mut FileApp,
    api: &ApiClient,
    sender: &mpsc::Sender<TuiEvent>,
    action: Action,
) -> bool {
    match action {
        Action::Quit => return true,
        Action::NextView => app.switch_view(app.active_view.next()),
        Action::PrevView => app.switch_view(app.active_view.previous()),
        Action::SwitchView(index) => {
            if let Some(view) = View::from_index(index) {
                app.switch_view(view);
            }
        }
        Action::MoveUp => app.move_focus(-1, 0),
        Action::MoveDown => app.move_focus(1, 0),
        Action::MoveLeft => app.move_focus(0, -1),
        Action::MoveRight => app.move_focus(0, 1),
        Action::EditField => app.begin_edit(),
        Action::AddRow => app.add_row(),
        Action::DeleteRow => app.delete_row(),
        Action::Submit => {
            if let Some(pairs) = app.begin_submit() {
                spawn_submit(api.clone(), sender.clone(), pairs);
            }
        }
        Action::WidenField => app.resize_focused(KEYBOARD_RESIZE_STEP),
        Action::NarrowField => app.resize_focused(-KEYBOARD_RESIZE_STEP),
        Action::RefreshMarket => {
            spawn_price_fetch(api.clone(), sender.clone());
            spawn_chart_fetch(api.clone(), sender.clone());
        }
        Action::Cancel => app.controller.pointer_release(),
    }
    false
}
