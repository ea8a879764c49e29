use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use xfchess_sync::core::{load_settings, save_settings, settings_path};
use xfchess_sync::game::ai::{GameMode, HttpMoveProvider};
use xfchess_sync::game::resources::{ChessEngine, Session};
use xfchess_sync::game::types::PieceColor;
use xfchess_sync::game::{GameDriver, SessionContext};
use xfchess_sync::input::read_commands;
use xfchess_sync::networking::{ConnectionManager, WsConnector};
use xfchess_sync::rendering::TextSurface;

#[derive(Parser, Debug)]
#[command(name = "xfchess-sync", about = "Play synchronized chess from the terminal")]
struct Args {
    /// Game server WebSocket URL
    #[arg(long)]
    server: Option<String>,

    /// Move provider base URL
    #[arg(long)]
    provider_url: Option<String>,

    /// multiplayer, random, minimax or nn
    #[arg(long, default_value = "multiplayer")]
    mode: GameMode,

    /// Local color against a move provider (w or b)
    #[arg(long)]
    color: Option<String>,

    /// Hide legal move hints
    #[arg(long)]
    no_hints: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let first_run = !settings_path().exists();
    let mut settings = load_settings();
    if first_run {
        if let Err(e) = save_settings(&settings) {
            warn!("[SETTINGS] Could not write default settings: {}", e);
        }
    }
    settings.apply_env();
    if let Some(server) = args.server {
        settings.server_url = server;
    }
    if let Some(provider_url) = args.provider_url {
        settings.provider_url = provider_url;
    }
    if args.no_hints {
        settings.show_hints = false;
    }
    settings.validate().context("invalid settings")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    runtime.block_on(run(args.mode, args.color, settings))
}

async fn run(
    mode: GameMode,
    color: Option<String>,
    settings: xfchess_sync::core::GameSettings,
) -> Result<()> {
    let connection = ConnectionManager::new(settings.server_url.clone(), &settings.reconnect);
    let mut session = Session::new(mode, connection);

    if mode.is_automated() {
        let color = match color {
            Some(code) => PieceColor::from_code(&code)?,
            None if rand::rng().random_bool(0.5) => PieceColor::White,
            None => PieceColor::Black,
        };
        session.choose_local_color(color)?;
    }

    let provider = Arc::new(HttpMoveProvider::new(
        settings.provider_url.clone(),
        settings.csrf_token.clone(),
    ));
    let surface = TextSurface::new(settings.highlight_theme.clone());
    let ctx = SessionContext::new(ChessEngine::new(), session, &settings);
    let driver = GameDriver::new(ctx, surface, WsConnector, provider)?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    tokio::spawn(read_commands(stdin, driver.sender()));

    info!("Connecting to {} in {:?} mode", settings.server_url, mode);
    driver.run().await?;
    Ok(())
}
