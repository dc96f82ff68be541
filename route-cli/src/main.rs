use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{self, Write};
use std::sync::Arc;

use tauri_plugin_audio_route::audio::{dispatch, ChannelListener, MethodResult};
use tauri_plugin_audio_route::desktop::DesktopPlatform;
use tauri_plugin_audio_route::memory::MemoryPlatform;
use tauri_plugin_audio_route::{
    AudioOutputKind, AudioPlatform, AudioRouteController, BondedDevice, PluginConfig,
    RouteSession, SharedListener,
};

// ============================================================================
// Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and switch call-audio routing", long_about = None)]
struct Args {
    /// Use an in-memory audio session instead of the host's devices
    #[arg(long, global = true)]
    simulate: bool,

    /// Log at debug level (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the output audio is currently routed to
    Current,
    /// List the outputs that can be switched to
    Inputs,
    /// Route audio to receiver, speaker, headphones or bluetooth, then print
    /// the resulting output. Desktop route flags only last for this process.
    Switch { kind: AudioOutputKind },
    /// Run a plugin method by name and print its JSON result. Switches made
    /// on desktop only last for this process.
    Invoke { method: String },
    /// Print every output change until interrupted
    Watch {
        /// Hot-plug polling interval in milliseconds
        #[arg(long, default_value_t = 2000)]
        interval_ms: u64,
    },
}

impl Command {
    fn switches_route(&self) -> bool {
        match self {
            Command::Switch { .. } => true,
            Command::Invoke { method } => method.starts_with("changeTo"),
            _ => false,
        }
    }
}

// ============================================================================
// Setup
// ============================================================================

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn build_platform(simulate: bool) -> Arc<dyn AudioPlatform> {
    if simulate {
        info!("🧪 Using simulated audio session");
        Arc::new(
            MemoryPlatform::default()
                .with_wired_headset(true)
                .with_sco_available_off_call(true)
                .with_bonded_device(
                    BondedDevice::new("Simulated Headset", "00:11:22:33:44:55"),
                    true,
                ),
        )
    } else {
        Arc::new(DesktopPlatform::new())
    }
}

fn print_output_change(controller: &AudioRouteController) {
    let report = controller.current_output();
    println!("inputChanged -> {}", report);
}

// ============================================================================
// Commands
// ============================================================================

async fn watch(platform: Arc<dyn AudioPlatform>, interval_ms: u64) -> Result<()> {
    let config = PluginConfig {
        monitor_hotplug: true,
        hotplug_poll_interval_ms: interval_ms,
    };
    let (listener, mut notifications) = ChannelListener::new();
    let listener: SharedListener = Arc::new(listener);
    let session = RouteSession::attach(platform, listener, &config);

    let controller = session
        .controller()
        .context("Audio route session failed to attach")?;
    print_output_change(&controller);
    info!("👀 Watching for output changes, press Ctrl+C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                break;
            }
            notification = notifications.recv() => {
                match notification {
                    Some(_) => print_output_change(&controller),
                    None => {
                        warn!("Notification channel closed");
                        break;
                    }
                }
            }
        }
    }

    session.detach();
    Ok(())
}

/// One-shot commands against a controller that lives for this process only
fn run(
    controller: &AudioRouteController,
    platform: &dyn AudioPlatform,
    command: Command,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Current => {
            writeln!(out, "{}", controller.current_output())?;
            match platform.mode() {
                Ok(mode) => writeln!(out, "mode: {:?}", mode)?,
                Err(e) => warn!("Failed to read audio mode: {}", e),
            }
        }
        Command::Inputs => {
            for report in controller.available_inputs() {
                writeln!(out, "{}", report)?;
            }
        }
        Command::Switch { kind } => {
            writeln!(out, "{}", controller.switch_to(kind))?;
            writeln!(out, "now: {}", controller.current_output())?;
        }
        Command::Invoke { method } => {
            let routes = method.starts_with("changeTo");
            match dispatch(controller, &method) {
                MethodResult::Success(value) => {
                    writeln!(out, "{}", serde_json::to_string(&value)?)?;
                }
                MethodResult::NotImplemented => bail!("Method not implemented: {}", method),
            }
            if routes {
                writeln!(out, "now: {}", controller.current_output())?;
            }
        }
        Command::Watch { .. } => bail!("watch needs a long-lived session"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Background tasks go on this runtime instead of a second one
    tauri::async_runtime::set(tokio::runtime::Handle::current());

    let platform = build_platform(args.simulate);

    if let Command::Watch { interval_ms } = args.command {
        return watch(platform, interval_ms).await;
    }

    if !args.simulate && args.command.switches_route() {
        warn!("Desktop route flags only last for this process; use `watch` to keep a session");
    }

    let listener: SharedListener = Arc::new(|| info!("📣 inputChanged"));
    let controller = AudioRouteController::new(platform.clone(), listener);
    run(&controller, platform.as_ref(), args.command, &mut io::stdout().lock())
}
