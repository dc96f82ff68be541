// Hardware plug/unplug handling: an event pump feeding the listener, and a
// polling monitor for hosts that have no push notifications
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tauri::async_runtime::{self, JoinHandle};
use tokio::sync::{mpsc, Notify};

use super::controller::has_connected_bluetooth_device;
use super::listener::SharedListener;
use super::platform::AudioPlatform;
use crate::models::HardwareEvent;

pub type HardwareEventSender = mpsc::UnboundedSender<HardwareEvent>;

/// Calls the listener once for every hardware event pushed into its channel
pub struct HardwareEventPump {
    handle: Option<JoinHandle<()>>,
    stop_signal: Arc<Notify>,
}

impl HardwareEventPump {
    pub fn start(listener: SharedListener) -> (Self, HardwareEventSender) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<HardwareEvent>();
        let stop_signal = Arc::new(Notify::new());
        let stop = stop_signal.clone();

        let handle = async_runtime::spawn(async move {
            loop {
                tokio::select! {
                    _ = stop.notified() => {
                        debug!("Hardware event pump received stop signal");
                        break;
                    }
                    event = receiver.recv() => {
                        match event {
                            Some(event) => {
                                info!("🎧 Hardware event: {:?}", event);
                                listener.on_changed();
                            }
                            None => {
                                debug!("All hardware event senders dropped");
                                break;
                            }
                        }
                    }
                }
            }
        });

        (
            Self {
                handle: Some(handle),
                stop_signal,
            },
            sender,
        )
    }

    pub async fn stop(&mut self) {
        self.stop_signal.notify_one();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for HardwareEventPump {
    fn drop(&mut self) {
        self.stop_signal.notify_one();
    }
}

/// What the monitor compares between polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeadsetSnapshot {
    pub wired_headset: bool,
    pub bluetooth_connected: bool,
}

impl HeadsetSnapshot {
    pub(crate) fn read(platform: &dyn AudioPlatform) -> Self {
        Self {
            wired_headset: platform.is_wired_headset_on().unwrap_or(false),
            bluetooth_connected: has_connected_bluetooth_device(platform),
        }
    }

    /// Events describing the transition from `self` to `next`
    pub(crate) fn diff(&self, next: &HeadsetSnapshot) -> Vec<HardwareEvent> {
        let mut events = Vec::new();
        if self.wired_headset != next.wired_headset {
            events.push(HardwareEvent::HeadsetPlug {
                plugged: next.wired_headset,
                name: None,
            });
        }
        if self.bluetooth_connected != next.bluetooth_connected {
            events.push(HardwareEvent::BluetoothChanged {
                connected: next.bluetooth_connected,
            });
        }
        events
    }
}

/// Polls the platform for headset presence and pushes a [`HardwareEvent`]
/// on every change. The first poll only records a baseline.
pub struct HeadsetMonitor {
    monitor_handle: Option<JoinHandle<()>>,
    stop_signal: Arc<Notify>,
}

impl HeadsetMonitor {
    pub fn start(
        platform: Arc<dyn AudioPlatform>,
        events: HardwareEventSender,
        interval: Duration,
    ) -> Self {
        let stop_signal = Arc::new(Notify::new());
        let stop = stop_signal.clone();

        let baseline = HeadsetSnapshot::read(platform.as_ref());
        debug!("Headset monitor baseline: {:?}", baseline);

        let handle = async_runtime::spawn(async move {
            Self::monitor_loop(platform, baseline, events, interval, stop).await;
        });

        info!("✅ Headset monitor started (interval: {:?})", interval);
        Self {
            monitor_handle: Some(handle),
            stop_signal,
        }
    }

    pub async fn stop(&mut self) {
        info!("Stopping headset monitor");
        self.stop_signal.notify_one();

        if let Some(handle) = self.monitor_handle.take() {
            let _ = handle.await;
        }

        info!("Headset monitor stopped");
    }

    async fn monitor_loop(
        platform: Arc<dyn AudioPlatform>,
        mut last: HeadsetSnapshot,
        events: HardwareEventSender,
        interval: Duration,
        stop_signal: Arc<Notify>,
    ) {
        loop {
            tokio::select! {
                _ = stop_signal.notified() => {
                    info!("Headset monitor received stop signal");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }

            // Platform calls block (device enumeration, native calls)
            let polled = platform.clone();
            let current = match async_runtime::spawn_blocking(move || {
                HeadsetSnapshot::read(polled.as_ref())
            })
            .await
            {
                Ok(current) => current,
                Err(e) => {
                    error!("Headset poll failed: {}", e);
                    continue;
                }
            };

            for event in last.diff(&current) {
                if events.send(event).is_err() {
                    error!("Hardware event channel closed, stopping headset monitor");
                    return;
                }
            }
            last = current;
        }
    }
}

impl Drop for HeadsetMonitor {
    fn drop(&mut self) {
        self.stop_signal.notify_one();
    }
}
