//! `slab` — terminal UI for the slab card collection.
//!
//! # Usage
//!
//! ```
//! slab --url http://localhost:5280 --email a@example.com --password secret
//! slab --config ~/.config/slab/config.toml
//! slab --register --name "Jo Collector"   # first run
//! ```

mod app;
mod client;
mod form;
mod imgbb;
mod media;
mod ui;

use std::{io, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
  },
};
use imgbb::ImgbbHost;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "slab", about = "Terminal UI for the slab card collection")]
struct Args {
  /// Path to a TOML config file (url, email, password, imgbb settings).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the slab server (default: http://localhost:5280).
  #[arg(long, env = "SLAB_URL")]
  url: Option<String>,

  /// Account email.
  #[arg(long, env = "SLAB_EMAIL")]
  email: Option<String>,

  /// Account password (plaintext).
  #[arg(long, env = "SLAB_PASSWORD")]
  password: Option<String>,

  /// Image-host API key; image upload is disabled without one.
  #[arg(long, env = "SLAB_IMGBB_KEY")]
  imgbb_key: Option<String>,

  /// Image-host upload endpoint.
  #[arg(long, env = "SLAB_IMGBB_URL")]
  imgbb_url: Option<String>,

  /// Register the account before starting.
  #[arg(long)]
  register: bool,

  /// Display name used with --register.
  #[arg(long)]
  name: Option<String>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:       String,
  #[serde(default)]
  email:     String,
  #[serde(default)]
  password:  String,
  #[serde(default)]
  imgbb_key: String,
  #[serde(default)]
  imgbb_url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let pick = |flag: Option<String>, file: &str, default: &str| {
    flag
      .or_else(|| (!file.is_empty()).then(|| file.to_owned()))
      .unwrap_or_else(|| default.to_owned())
  };

  let api_config = ApiConfig {
    base_url: pick(args.url, &file_cfg.url, "http://localhost:5280"),
    email:    pick(args.email, &file_cfg.email, ""),
    password: pick(args.password, &file_cfg.password, ""),
  };
  anyhow::ensure!(
    !api_config.email.is_empty(),
    "an account email is required (--email or config file)"
  );

  let imgbb_key = pick(args.imgbb_key, &file_cfg.imgbb_key, "");
  let imgbb_url =
    pick(args.imgbb_url, &file_cfg.imgbb_url, imgbb::DEFAULT_ENDPOINT);
  let image_host =
    (!imgbb_key.is_empty()).then(|| ImgbbHost::new(imgbb_url, imgbb_key));

  let client = ApiClient::new(api_config.clone())?;

  // First-run registration, before the terminal is taken over.
  if args.register {
    let name = args
      .name
      .clone()
      .unwrap_or_else(|| {
        api_config.email.split('@').next().unwrap_or_default().to_owned()
      });
    let profile = client.register(&name).await.context("registration failed")?;
    println!("registered {} ({})", profile.email, profile.name);
  }

  // Verify the credentials up front for a readable error.
  let profile = client.me().await.context("sign-in failed")?;

  let mut app = App::new(client, image_host);
  app.status_msg = format!("Welcome, {}!", profile.name);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Load initial data.
  let load_result = app.load_cards().await;

  // Run the event loop; restore terminal even on error.
  let run_result = if load_result.is_ok() {
    run_event_loop(&mut terminal, &mut app).await
  } else {
    load_result
  };

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
