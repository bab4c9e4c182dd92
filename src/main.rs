use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use popask::clipboard::{system_copy_simulator, SystemClipboard};
use popask::config::{self, Config};
use popask::dispatch::{Dispatcher, JsonlSink, UiEvent};
use popask::event_loop::pump_os_events;
use popask::hotkeys::{GlobalHotkeyHook, KeyHook};
use popask::logging;
use popask::network::HttpRegionProbe;
use popask::platform::Platform;
use popask::screenshot::system_screenshot_capture;
use popask::selection::SelectionAcquirer;
use popask::stdin_commands::{self, ExternalCommand};
use popask::{DispatchError, HotkeyEngine, RegistrationReport};

#[derive(Parser)]
#[command(name = "popask")]
#[command(version)]
#[command(about = "Global hotkey engine for PopAsk", long_about = None)]
struct Cli {
    /// Config file (default: ~/.popask/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the network check before OCR
    #[arg(long)]
    no_region_check: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn load_config(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    if cli.no_region_check {
        config.dispatch.check_ocr_region = false;
    }
    config
}

fn log_report(result: Result<RegistrationReport, DispatchError>, dispatcher: &Dispatcher) {
    match result {
        Ok(report) => {
            for skipped in &report.skipped {
                info!(
                    shortcut = %skipped.combo,
                    label = %skipped.label,
                    reason = ?skipped.reason,
                    "Shortcut skipped"
                );
            }
        }
        Err(e) => {
            logging::log_error("HOTKEY", &e.to_string(), Some("register_keyboard_shortcut"));
            dispatcher.emit(UiEvent::error(e.user_message()));
        }
    }
}

/// Apply one command. Returns `false` when the process should exit.
fn handle_command<H: KeyHook>(engine: &mut HotkeyEngine<H>, cmd: ExternalCommand) -> bool {
    let request_id = cmd.request_id().map(str::to_string);
    match cmd {
        ExternalCommand::SetShortcutList { payload, .. } => {
            if let Err(e) = engine.set_shortcut_list(&payload) {
                warn!(request_id = ?request_id, error = %e, "Rejected shortcut list");
                engine.dispatcher().emit(UiEvent::error(e.user_message()));
            }
        }
        ExternalCommand::RegisterKeyboardShortcut { .. } => {
            let result = engine.register_keyboard_shortcut();
            log_report(result, engine.dispatcher());
        }
        ExternalCommand::SyncShortcutList { payload, .. } => {
            let result = engine.sync_shortcut_list(&payload);
            log_report(result, engine.dispatcher());
        }
        ExternalCommand::Shutdown => {
            info!("Shutdown requested");
            return false;
        }
    }
    true
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logging_guard = logging::init();

    let mut config = load_config(&cli);
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let platform = Platform::current();
    info!(platform = %platform, log_file = %logging::log_path().display(), "Starting popask");

    let clipboard = Arc::new(SystemClipboard::new().context("Failed to access clipboard")?);
    let acquirer = SelectionAcquirer::new(
        clipboard.clone(),
        system_copy_simulator(),
        config.selection.clone(),
    );
    let dispatcher = Arc::new(Dispatcher::new(
        acquirer,
        system_screenshot_capture(platform, clipboard),
        Arc::new(HttpRegionProbe::from_config(&config.network)),
        Arc::new(JsonlSink::stdout()),
        config.dispatch.clone(),
    ));

    let hook = GlobalHotkeyHook::new(config.hook.poll_interval())
        .context("Failed to create hotkey manager")?;
    let mut engine = HotkeyEngine::new(platform, hook, dispatcher, config.hook.clone());

    if let Some(shortcuts) = config.shortcuts.take() {
        engine.set_shortcuts(shortcuts);
        let result = engine.register_keyboard_shortcut();
        log_report(result, engine.dispatcher());
    }

    let commands = stdin_commands::start_stdin_listener();
    let poll_interval = config.hook.poll_interval();
    loop {
        match commands.try_recv() {
            Ok(cmd) => {
                if !handle_command(&mut engine, cmd) {
                    break;
                }
            }
            Err(async_channel::TryRecvError::Closed) => {
                logging::log("STDIN", "Stdin closed, exiting");
                break;
            }
            Err(async_channel::TryRecvError::Empty) => pump_os_events(poll_interval),
        }
    }

    engine.shutdown();
    Ok(())
}
