// Plugin-lifetime context: created on attach, torn down on detach
use log::{info, warn};
use serde_json::{json, Value};
use std::sync::{Arc, RwLock};

use crate::audio::dispatch::{MethodResult, RouteMethod};
use crate::audio::hotplug::{HardwareEventPump, HardwareEventSender, HeadsetMonitor};
use crate::audio::{AudioPlatform, AudioRouteController, SharedListener};
use crate::config::PluginConfig;
use crate::models::{AudioOutputKind, OutputReport};

struct Attached {
    controller: Arc<AudioRouteController>,
    hardware_events: HardwareEventSender,
    // Held for their Drop, which signals the background tasks to stop
    _pump: HardwareEventPump,
    _monitor: Option<HeadsetMonitor>,
}

/// Owns the platform handle, listener and background tasks for as long as
/// the plugin is attached.
///
/// Once detached, operations answer like an absent audio service: switches
/// still return `true` and notify, the current output is Receiver and the
/// only available input is Receiver. The listener outlives the attachment.
pub struct RouteSession {
    inner: RwLock<Option<Attached>>,
    listener: SharedListener,
}

impl RouteSession {
    pub fn attach(
        platform: Arc<dyn AudioPlatform>,
        listener: SharedListener,
        config: &PluginConfig,
    ) -> Self {
        let controller = Arc::new(AudioRouteController::new(platform.clone(), listener.clone()));
        let (pump, hardware_events) = HardwareEventPump::start(listener.clone());

        let monitor = if config.monitor_hotplug {
            Some(HeadsetMonitor::start(
                platform,
                hardware_events.clone(),
                config.poll_interval(),
            ))
        } else {
            None
        };

        info!("✅ Audio route session attached");
        Self {
            inner: RwLock::new(Some(Attached {
                controller,
                hardware_events,
                _pump: pump,
                _monitor: monitor,
            })),
            listener,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.read(|attached| attached.is_some())
    }

    pub fn controller(&self) -> Option<Arc<AudioRouteController>> {
        self.read(|attached| attached.map(|a| a.controller.clone()))
    }

    /// Channel the host pushes plug/unplug events into
    pub fn hardware_events(&self) -> Option<HardwareEventSender> {
        self.read(|attached| attached.map(|a| a.hardware_events.clone()))
    }

    pub fn detach(&self) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if guard.take().is_some() {
            info!("Audio route session detached");
        }
    }

    pub fn current_output(&self) -> OutputReport {
        match self.controller() {
            Some(controller) => controller.current_output(),
            None => {
                warn!("getCurrentOutput called while detached");
                AudioOutputKind::Receiver.report()
            }
        }
    }

    pub fn available_inputs(&self) -> Vec<OutputReport> {
        match self.controller() {
            Some(controller) => controller.available_inputs(),
            None => {
                warn!("getAvailableInputs called while detached");
                vec![AudioOutputKind::Receiver.report()]
            }
        }
    }

    pub fn switch_to(&self, kind: AudioOutputKind) -> bool {
        match self.controller() {
            Some(controller) => controller.switch_to(kind),
            None => {
                warn!("Switch to {} requested while detached", kind);
                self.listener.on_changed();
                true
            }
        }
    }

    /// Run the method called `name`. Unknown names are not implemented;
    /// known ones answer even while detached.
    pub fn dispatch(&self, name: &str) -> MethodResult {
        match name.parse::<RouteMethod>() {
            Ok(method) => MethodResult::Success(self.invoke(method)),
            Err(e) => {
                warn!("{}", e);
                MethodResult::NotImplemented
            }
        }
    }

    pub fn invoke(&self, method: RouteMethod) -> Value {
        match method {
            RouteMethod::GetCurrentOutput => json!(self.current_output()),
            RouteMethod::GetAvailableInputs => json!(self.available_inputs()),
            RouteMethod::ChangeToReceiver => json!(self.switch_to(AudioOutputKind::Receiver)),
            RouteMethod::ChangeToSpeaker => json!(self.switch_to(AudioOutputKind::Speaker)),
            RouteMethod::ChangeToHeadphones => json!(self.switch_to(AudioOutputKind::Headset)),
            RouteMethod::ChangeToBluetooth => json!(self.switch_to(AudioOutputKind::Bluetooth)),
        }
    }

    fn read<T>(&self, f: impl FnOnce(Option<&Attached>) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(guard.as_ref())
    }
}

impl Drop for RouteSession {
    fn drop(&mut self) {
        self.detach();
    }
}
