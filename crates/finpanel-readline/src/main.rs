mod commands;
mod helper;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use finpanel_application::panels::PROCESSING_LABEL;
use finpanel_application::{ActiveView, LoanOutcome, Navigator, PanelError, SessionGate};
use finpanel_core::FinanceApi;
use finpanel_core::config::ClientConfig;
use finpanel_core::route::Route;
use finpanel_core::stock::StockSeries;
use finpanel_core::transcript::{Speaker, Transcript, Turn, TurnId};
use finpanel_infrastructure::{ConfigService, FileSessionStore, FinpanelPaths};
use finpanel_interaction::BackendClient;

use commands::{Command, HELP};
use helper::CliHelper;

/// Output produced by background calls, printed by the response handler.
enum UiEvent {
    Turns(Vec<Turn>),
    Series(StockSeries),
    Outcome(LoanOutcome),
    Notice(String),
    Error(String),
}

/// Logs go to a daily file so they never interleave with the prompt.
fn init_tracing(paths: &FinpanelPaths, config: &ClientConfig) -> Result<WorkerGuard> {
    let log_dir = config
        .logging
        .directory
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.log_dir());
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::daily(&log_dir, "finpanel.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}

/// The reply turn `id` and anything appended after it.
fn replies(transcript: &Transcript, id: TurnId) -> Vec<Turn> {
    transcript
        .position(id)
        .map(|pos| transcript.turns()[pos..].to_vec())
        .unwrap_or_default()
}

fn panel_event(error: PanelError) -> Option<UiEvent> {
    match error {
        PanelError::Cancelled => None,
        other => Some(UiEvent::Error(other.to_string())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ===== Backend Initialization =====
    let paths = FinpanelPaths::new(None)?;
    let config = ConfigService::new(paths.clone()).get_config()?;
    let _log_guard = init_tracing(&paths, &config)?;
    tracing::info!(base_url = %config.backend.base_url, "Starting finpanel");

    let api: Arc<dyn FinanceApi> = Arc::new(BackendClient::new(config.backend.base_url.clone())?);
    let gate = Arc::new(SessionGate::load(Arc::new(FileSessionStore::from_paths(&paths))).await?);
    let mut navigator = Navigator::new(gate, api.clone()).await;

    let (event_tx, mut event_rx) = mpsc::channel::<UiEvent>(32);

    let response_handler = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                UiEvent::Turns(turns) => turns.iter().for_each(render::turn),
                UiEvent::Series(series) => render::series(&series),
                UiEvent::Outcome(outcome) => render::outcome(outcome),
                UiEvent::Notice(message) => render::notice(&message),
                UiEvent::Error(message) => render::error(&message),
            }
        }
    });

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    println!("{}", "=== Finpanel ===".bright_magenta().bold());
    println!("{}", "Type '/help' for commands or 'quit' to exit.".bright_black());
    render::view(navigator.view()).await;

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(&line);

        let command = match commands::parse(&line) {
            Ok(command) => command,
            Err(usage) => {
                render::error(&usage);
                continue;
            }
        };

        match command {
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Command::Help => println!("{}", HELP.bright_black()),
            Command::Login(method) => {
                if navigator.current_route() != Route::Login {
                    render::notice("Already signed in.");
                    continue;
                }
                match navigator.login(&method).await {
                    Ok(_) => render::view(navigator.view()).await,
                    Err(e) => render::error(&format!("Sign-in failed: {}", e)),
                }
            }
            Command::Logout => {
                if navigator.current_route() == Route::Login {
                    render::notice("Not signed in.");
                    continue;
                }
                match navigator.logout().await {
                    Ok(_) => render::view(navigator.view()).await,
                    Err(e) => render::error(&format!("Sign-out failed: {}", e)),
                }
            }
            Command::Go(path) => {
                let resolution = navigator.navigate(&path).await;
                if resolution.redirected {
                    render::notice(&format!("{} redirected to {}", path, resolution.path));
                }
                render::view(navigator.view()).await;
            }
            Command::Home => {
                navigator.navigate(Route::Home.path()).await;
                render::view(navigator.view()).await;
            }
            Command::Switch(choice) => {
                navigator.switch(choice).await;
                render::view(navigator.view()).await;
            }
            Command::Show => render::view(navigator.view()).await,
            Command::Health => {
                let api = api.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let event = match api.health().await {
                        Ok(health) => {
                            UiEvent::Notice(format!("Backend {}: {}", health.status, health.message))
                        }
                        Err(e) => UiEvent::Error(format!("Backend unavailable: {}", e)),
                    };
                    let _ = tx.send(event).await;
                });
            }
            Command::SetField(field, value) => match navigator.view() {
                ActiveView::Loan(panel) => {
                    if let Err(e) = panel.set_field(field, &value).await {
                        render::error(&e.to_string());
                    }
                }
                _ => render::error("Open the loan approver first (/loan)."),
            },
            Command::Form => match navigator.view() {
                ActiveView::Loan(panel) => render::loan_form(panel).await,
                _ => render::error("Open the loan approver first (/loan)."),
            },
            Command::Submit => match navigator.view() {
                ActiveView::Loan(panel) => {
                    let panel = panel.clone();
                    let tx = event_tx.clone();
                    render::notice(PROCESSING_LABEL);
                    tokio::spawn(async move {
                        let event = match panel.submit().await {
                            Ok(outcome) => Some(UiEvent::Outcome(outcome)),
                            Err(e) => panel_event(e),
                        };
                        if let Some(event) = event {
                            let _ = tx.send(event).await;
                        }
                    });
                }
                _ => render::error("Open the loan approver first (/loan)."),
            },
            Command::Symbol(company) => match navigator.view() {
                ActiveView::Analysis(panel) => {
                    let panel = panel.clone();
                    let tx = event_tx.clone();
                    tokio::spawn(async move {
                        let event = match panel.resolve_symbol(&company).await {
                            Ok(id) => Some(UiEvent::Turns(replies(&panel.transcript().await, id))),
                            Err(e) => panel_event(e),
                        };
                        if let Some(event) = event {
                            let _ = tx.send(event).await;
                        }
                    });
                }
                _ => render::error("Open stock analysis first (/analysis)."),
            },
            Command::Message(text) => match navigator.view() {
                ActiveView::Advisor(panel) => {
                    println!("{}", format!("> {}", text).green());
                    let panel = panel.clone();
                    let tx = event_tx.clone();
                    tokio::spawn(async move {
                        let event = match panel.send(&text).await {
                            Ok(id) => Some(UiEvent::Turns(replies(&panel.transcript().await, id))),
                            Err(e) => panel_event(e),
                        };
                        if let Some(event) = event {
                            let _ = tx.send(event).await;
                        }
                    });
                }
                ActiveView::Analysis(panel) => {
                    println!("{}", format!("> {}", text).green());
                    let panel = panel.clone();
                    let tx = event_tx.clone();
                    tokio::spawn(async move {
                        let before = panel.transcript().await.len();
                        if let Err(e) = panel.send(&text).await {
                            if let Some(event) = panel_event(e) {
                                let _ = tx.send(event).await;
                            }
                            return;
                        }
                        let series = panel.series().await;
                        if series.company == text.trim() {
                            let _ = tx.send(UiEvent::Series(series)).await;
                        }
                        // Everything this send added, minus the echoed company name.
                        let turns: Vec<Turn> = panel
                            .transcript()
                            .await
                            .turns()
                            .iter()
                            .skip(before)
                            .filter(|turn| turn.speaker == Speaker::Assistant)
                            .cloned()
                            .collect();
                        let _ = tx.send(UiEvent::Turns(turns)).await;
                    });
                }
                ActiveView::Login => render::login(),
                ActiveView::Home(_) => {
                    render::notice("Pick a tool: /advisor, /analysis or /loan.")
                }
                ActiveView::Loan(_) => {
                    render::notice("Use /set <field>=<value> to fill in the form, then /submit.")
                }
            },
        }
    }

    // Drop the sender to signal shutdown
    drop(event_tx);
    let _ = response_handler.await;

    Ok(())
}
