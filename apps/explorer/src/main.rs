use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    BufferedInput, ControllerEvent, ExplorerSession, HttpSaveTransport, InputPort, SaveOrdering,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::{parse_command, Command, HELP};
use config::{load_settings, DEFAULT_CONFIG_PATH};
use render::render_view;

#[derive(Parser, Debug)]
#[command(about = "Curate a list of favorite artist ids and save it to the server")]
struct Args {
    /// Base url of the server exposing POST /save.
    #[arg(long)]
    server_url: Option<String>,
    /// Bootstrap payload: a JSON file, or an HTML page with a <script id="data"> island.
    #[arg(long)]
    bootstrap: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// latest_issued or completion_order.
    #[arg(long)]
    save_ordering: Option<SaveOrdering>,
}

struct App {
    session: Arc<ExplorerSession>,
    input: Arc<BufferedInput>,
}

impl App {
    fn print_view(&self) {
        println!("{}", render_view(&self.session.view(), &self.input.read()));
    }

    /// Re-renders after every list change and reports save results, the way
    /// the page re-renders on state updates.
    fn spawn_renderer(&self) -> tokio::task::JoinHandle<()> {
        let session = Arc::clone(&self.session);
        let input = Arc::clone(&self.input);
        let mut list_events = session.store().subscribe();
        let mut save_events = session.controller().subscribe_events();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    event = list_events.recv() => match event {
                        Ok(_) | Err(RecvError::Lagged(_)) => {
                            println!("{}", render_view(&session.view(), &input.read()));
                        }
                        Err(RecvError::Closed) => break,
                    },
                    event = save_events.recv() => match event {
                        Ok(ControllerEvent::SaveApplied { sequence, artist_ids }) => {
                            println!("save #{sequence} confirmed ({} artists)", artist_ids.len());
                        }
                        Ok(ControllerEvent::SaveSuperseded { sequence }) => {
                            println!("save #{sequence} answered late, newer save kept");
                        }
                        Ok(ControllerEvent::SaveFailed { sequence, message }) => {
                            println!("save #{sequence} failed: {message}");
                        }
                        Ok(ControllerEvent::SaveStarted { .. }) | Err(RecvError::Lagged(_)) => {}
                        Err(RecvError::Closed) => break,
                    },
                }
            }
        })
    }

    /// Returns `false` once the user asks to leave.
    fn handle(&self, command: Command) -> bool {
        let controller = self.session.controller();
        match command {
            Command::Input(text) => {
                self.input.set(text);
                self.print_view();
            }
            Command::Add(text) => {
                if let Some(text) = text {
                    self.input.set(text);
                }
                controller.add();
            }
            Command::Delete(index) => {
                if let Err(err) = controller.delete(index) {
                    println!("{err}");
                }
            }
            Command::Save => {
                let session = Arc::clone(&self.session);
                // Saves run in the background; the prompt stays usable.
                tokio::spawn(async move {
                    if let Err(err) = session.controller().save().await {
                        warn!("save did not complete: {err}");
                    }
                });
            }
            Command::Show => self.print_view(),
            Command::Help => println!("{HELP}"),
            Command::Quit => return false,
        }
        true
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(bootstrap) = args.bootstrap {
        settings.bootstrap_path = Some(bootstrap);
    }
    if let Some(ordering) = args.save_ordering {
        settings.save_ordering = ordering;
    }
    info!(
        server_url = %settings.server_url,
        bootstrap = ?settings.bootstrap_path,
        save_ordering = %settings.save_ordering,
        "starting explorer"
    );

    let transport = HttpSaveTransport::new(&settings.server_url)
        .with_context(|| format!("failed to configure save endpoint for '{}'", settings.server_url))?;
    let input = Arc::new(BufferedInput::new());
    let session = Arc::new(ExplorerSession::mount(
        settings.payload_source().as_ref(),
        input.clone(),
        Arc::new(transport),
        settings.save_ordering,
    ));

    let app = App { session, input };
    let renderer = app.spawn_renderer();
    app.print_view();
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read from stdin")? {
        match parse_command(&line) {
            Ok(Some(command)) => {
                if !app.handle(command) {
                    break;
                }
            }
            Ok(None) => {}
            Err(message) => println!("{message}"),
        }
    }

    renderer.abort();
    if let Err(err) = renderer.await {
        if !err.is_cancelled() {
            error!("renderer task failed: {err}");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
