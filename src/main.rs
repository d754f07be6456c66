use clap::{Parser, Subcommand};
use rosette::config;
use rosette::gui::app::AppModel;
use rosette::gui::menu::{CairoMeasure, MenuState};
use rosette::sys::{runtime, server};
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Send a command to the running daemon instead of starting one
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the popup at the cursor
    Show,
    /// Close the popup and run the selected item
    Hide,
    /// Close the popup without running anything
    Cancel,
}

impl Command {
    fn as_str(&self) -> &'static str {
        match self {
            Command::Show => "show",
            Command::Hide => "hide",
            Command::Cancel => "cancel",
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if let Some(command) = cli.command {
        return server::send_command(command.as_str());
    }

    let config = config::load_or_setup();
    let measure = CairoMeasure::new(config.metrics().scale);
    let state = MenuState::from_config(&config, &measure);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // GTK would otherwise try to parse our subcommand arguments
    let app = RelmApp::new("org.troia.rosette").with_args(Vec::new());

    app.run::<AppModel>((state, rx));
    Ok(())
}
