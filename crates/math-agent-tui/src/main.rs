mod app;
mod handler;
mod logging;
mod markdown;
mod tui;
mod ui;

use anyhow::Result;
use math_agent_core::Config;
use tracing::info;

use app::App;
use tui::{EventHandler, Tui};

#[tokio::main]
async fn main() -> Result<()> {
    // Config errors are reported before the terminal switches screens.
    let config = Config::load()?;

    if let Some(log_path) = logging::init() {
        info!(log = %log_path.display(), model = %config.model, "starting math agent");
    }
    if config.gemini_api_key.is_none() {
        info!("GEMINI_API_KEY not set; solving will fail until it is provided");
    }

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();
    let mut app = App::new(&config);

    let result = run(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    info!("exiting");
    result
}

async fn run(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    let tx = events.sender();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event, &tx),
            None => break,
        }
    }

    Ok(())
}
