//! taglist - demo of the terminal tag list widget.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use taglist::app::{sample_tags, App};
use taglist::config::Settings;
use taglist::error::{AppError, Result};
use taglist::events::EventHandler;
use taglist::terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui};
use taglist::{logging, Tag, TagListMode};

#[derive(Parser, Debug)]
#[command(name = "taglist")]
#[command(version)]
#[command(about = "Terminal tag list widget demo")]
struct Cli {
    /// Mode to start in (expanded, collapsed or edit)
    #[arg(long)]
    mode: Option<TagListMode>,

    /// Path to a config file (default: platform config dir)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start without the sample tags
    #[arg(long)]
    no_seed: bool,

    /// Extra tag to start with; may be repeated
    #[arg(long = "tag", value_name = "TEXT")]
    tags: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("warning: logging disabled: {e}");
    }

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    };

    let app = build_app(&cli, &settings);

    install_panic_hook();
    let result = setup_terminal().and_then(|mut terminal| {
        let outcome = run(&mut terminal, app, &settings);
        let restored = restore_terminal();
        outcome.and(restored)
    });

    logging::shutdown();

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(mode) = cli.mode {
        settings.default_mode = mode;
    }
    Ok(settings)
}

fn build_app(cli: &Cli, settings: &Settings) -> App {
    let tags: Vec<Tag> = if cli.no_seed {
        Vec::new()
    } else {
        sample_tags()
    };
    let mut app = App::with_tags(settings, tags);
    for content in &cli.tags {
        if app.add_tag(content).is_none() {
            warn!("Ignoring blank --tag value");
        }
    }
    app
}

fn run(terminal: &mut Tui, mut app: App, settings: &Settings) -> Result<()> {
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);
    info!(mode = %app.mode(), tags = app.tags().len(), "Entering event loop");

    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;
        let event = events.next()?;
        app.update(event);
    }
    Ok(())
}

fn report(error: &AppError) {
    eprintln!("error: {}", error.user_message());
    if let Some(action) = error.suggested_action() {
        eprintln!("hint: {action}");
    }
    if let Some(dir) = logging::log_directory() {
        eprintln!("logs: {}", dir.display());
    }
}
