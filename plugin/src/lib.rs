//! Tauri plugin for call-audio routing.
//!
//! Lets the webview pick where voice audio plays (earpiece receiver,
//! loudspeaker, wired headset or a Bluetooth hands-free device), asks which
//! of those are available, and emits `inputChanged` with payload `1`
//! whenever the route may have changed.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tauri_plugin_audio_route::AudioRouteExt;
//!
//! tauri::Builder::default()
//!     .plugin(tauri_plugin_audio_route::init())
//!     .setup(|app| {
//!         let current = app.audio_route().current_output();
//!         log::info!("Audio currently routed to {}", current);
//!         Ok(())
//!     })
//!     .run(tauri::generate_context!())
//!     .expect("error while running tauri application");
//! ```
//!
//! Output codes are fixed: `"1"` Receiver, `"2"` Speaker, `"3"` Headset,
//! `"4"` Bluetooth.

use log::info;
use std::sync::Arc;
use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};

pub mod audio;
pub mod config;
pub mod error;
pub mod memory;
pub mod models;
pub mod session;

mod commands;
mod native;
#[cfg(not(target_os = "android"))]
pub mod desktop;
#[cfg(target_os = "android")]
mod mobile;

pub use audio::{AudioEventListener, AudioPlatform, AudioRouteController, SharedListener};
pub use config::PluginConfig;
pub use error::{PlatformError, PlatformResult};
pub use models::*;
pub use session::RouteSession;

/// Extensions to [`tauri::App`], [`tauri::AppHandle`] and [`tauri::Window`]
/// to reach the audio route session.
pub trait AudioRouteExt<R: Runtime> {
    fn audio_route(&self) -> &RouteSession;
}

impl<R: Runtime, T: Manager<R>> AudioRouteExt<R> for T {
    fn audio_route(&self) -> &RouteSession {
        self.state::<RouteSession>().inner()
    }
}

/// Initializes the plugin.
#[must_use]
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<PluginConfig>> {
    Builder::<R, Option<PluginConfig>>::new("audio-route")
        .invoke_handler(tauri::generate_handler![
            commands::get_current_output,
            commands::get_available_inputs,
            commands::change_to_receiver,
            commands::change_to_speaker,
            commands::change_to_headphones,
            commands::change_to_bluetooth,
        ])
        .setup(|app, api| {
            let config = api.config().clone().unwrap_or_default();
            info!("🔧 Audio route plugin config: {:?}", config);

            #[cfg(target_os = "android")]
            let platform: Arc<dyn AudioPlatform> = Arc::new(mobile::init(app, &api)?);
            #[cfg(not(target_os = "android"))]
            let platform: Arc<dyn AudioPlatform> = Arc::new(desktop::DesktopPlatform::new());

            let listener: SharedListener = Arc::new(audio::EmitListener::new(app.clone()));
            app.manage(RouteSession::attach(platform, listener, &config));
            Ok(())
        })
        .on_drop(|app| {
            if let Some(session) = app.try_state::<RouteSession>() {
                session.detach();
            }
        })
        .build()
}
