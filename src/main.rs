//! Binary entry point: parse arguments, load config, start logging, then hand
//! the terminal to either the Dock or a Display.
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use hymn_presenter::cli::{Cli, Command, DisplayTarget, HELP_TEXT, VERSION};
use hymn_presenter::config::{AppConfig, AppPaths};
use hymn_presenter::content::spawn_load;
use hymn_presenter::display::{render_location_html, run_display, DisplayApp};
use hymn_presenter::dock::{run_dock, DockApp};
use hymn_presenter::logging;
use hymn_presenter::output::{NamedWindow, TerminalWindowHost, WindowRegistry};

/// Spawned Displays may start in another working directory.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn main() -> Result<()> {
    let cli = Cli::parse(env::args().skip(1))?;
    match cli.command {
        Command::Help => {
            println!("{HELP_TEXT}");
            return Ok(());
        }
        Command::Version => {
            println!("hymn-presenter {VERSION}");
            return Ok(());
        }
        _ => {}
    }

    let paths = AppPaths::discover()?;
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file.clone());
    let mut config = AppConfig::load(&config_path, cli.config.is_some())?;
    if let Some(content) = &cli.content {
        config.content_path = content.clone();
    }
    let log_path = logging::init(&paths.log_dir, &config.log_filter)?;
    info!(log = %log_path.display(), config = %config_path.display(), "starting");

    let registry = WindowRegistry::new(
        config
            .window_dir
            .clone()
            .unwrap_or_else(|| paths.window_dir.clone()),
    );

    match cli.command {
        Command::Dock => {
            let exe = env::current_exe().context("failed to locate own executable")?;
            let mut forwarded = vec![
                "--content".to_string(),
                absolute(&config.content_path).display().to_string(),
            ];
            if let Some(path) = &cli.config {
                forwarded.push("--config".to_string());
                forwarded.push(absolute(path).display().to_string());
            }
            let host = TerminalWindowHost::new(registry, config.launcher.clone(), exe)
                .with_forwarded_args(forwarded);
            let channel = NamedWindow::new(host, &config.window_name, &config.display_path);
            let mut app = DockApp::new(config.defaults.clone(), Box::new(channel))
                .with_pending_load(spawn_load(config.content_path.clone()));
            run_dock(&mut app)
        }
        Command::Display(DisplayTarget::Location(location)) => {
            let mut app = DisplayApp::with_location(&location, config.content_path);
            run_display(&mut app)
        }
        Command::Display(DisplayTarget::Window(name)) => {
            let mut app = DisplayApp::for_window(registry, &name, config.content_path);
            run_display(&mut app)
        }
        Command::Display(DisplayTarget::Html(location)) => {
            print!("{}", render_location_html(&location, &config.content_path));
            Ok(())
        }
        Command::Help | Command::Version => Ok(()),
    }
}
