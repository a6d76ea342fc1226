use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod action;
mod app;
mod chat;
mod config;
mod data;
mod dispatch;
mod gemini;
mod handler;
mod lang;
mod state;
mod tui;
mod ui;

use app::App;
use config::Config;

#[derive(Parser)]
#[command(name = "springwell")]
#[command(about = "TUI mission control for India's groundwater with an AI assistant")]
struct Cli {
    /// Prompt submitted to the assistant on startup
    prompt: Option<String>,

    /// Gemini model to use
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    let mut app = App::new(cli.model);
    if let Some(prompt) = &cli.prompt {
        app.chat.submit_initial(prompt);
        app.scroll_chat_to_bottom();
    }

    let mut events = tui::EventHandler::new();
    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(&mut app, event);
        }

        // Collect a finished assistant turn and let it drive the UI
        if let Some(descriptor) = app.chat.poll().await {
            dispatch::apply_action(&mut app.dashboard, &descriptor);
            if let Some(location) = &descriptor.location {
                app.select_state(location);
            }
            app.scroll_chat_to_bottom();
        }
    }

    tui::restore()?;
    Ok(())
}

/// Logs go to a file; the alternate screen owns stderr.
fn init_logging() {
    let Ok(dir) = Config::config_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(dir.join("springwell.log")) else {
        return;
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("springwell=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .init();
}
