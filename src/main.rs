// src/main.rs
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use gtk4::prelude::*;
use tracing::{info, warn};

use hugopane::logging::init_logging;
use hugopane::style::install_css;
use hugopane::{Cli, PaneOptions, Session, SettingsStore};

const APP_ID: &str = "com.example.hugopane";

fn settings_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => SettingsStore::default_path().context("no configuration directory for this user"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let path = settings_path(&cli)?;
    let existed = path.exists();
    let settings = Rc::new(
        SettingsStore::load(&path).with_context(|| format!("failed to load settings from {}", path.display()))?,
    );

    let app = gtk4::Application::builder().application_id(APP_ID).build();
    // Only the first window honors the command line
    let overrides = RefCell::new(Some(cli.overrides()));

    let session = Session::new(&app, Rc::clone(&settings));
    app.connect_activate(move |_| {
        install_css();
        let overrides = overrides.borrow_mut().take().unwrap_or_default();
        session.open_window(PaneOptions::new().with_overrides(overrides));
    });

    // Write a starter file on first run so profiles can be edited
    app.connect_shutdown(move |_| {
        if existed {
            return;
        }
        match settings.save(&path) {
            Ok(()) => info!("Wrote default settings to {}", path.display()),
            Err(e) => warn!("Could not write {}: {}", path.display(), e),
        }
    });

    // Our flags were parsed by clap; GTK only sees the program name
    let program: Vec<String> = std::env::args().take(1).collect();
    let status = app.run_with_args(&program);
    if status != glib::ExitCode::SUCCESS {
        anyhow::bail!("application exited with {:?}", status);
    }
    Ok(())
}
