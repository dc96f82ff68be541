// Audio route switching and current-output classification
use log::{debug, info, warn};
use std::sync::Arc;

use super::listener::SharedListener;
use super::platform::AudioPlatform;
use crate::error::PlatformResult;
use crate::models::{AudioMode, AudioOutputKind, OutputReport};

/// Translates route operations into calls on the platform port and notifies
/// the listener after every switch.
///
/// All operations are best-effort: a failing platform call is logged and the
/// safe answer (Receiver / `true` / "not connected") is used instead.
pub struct AudioRouteController {
    platform: Arc<dyn AudioPlatform>,
    listener: SharedListener,
}

impl AudioRouteController {
    pub fn new(platform: Arc<dyn AudioPlatform>, listener: SharedListener) -> Self {
        Self { platform, listener }
    }

    pub fn platform(&self) -> &Arc<dyn AudioPlatform> {
        &self.platform
    }

    /// Route audio to `kind`. Always returns `true` and always notifies,
    /// even when the route is already active.
    pub fn switch_to(&self, kind: AudioOutputKind) -> bool {
        info!("🔀 Switching audio output to {}", kind);
        match kind {
            // Wired headsets use the communication path; the OS routes to the
            // physical headset when one is plugged in.
            AudioOutputKind::Receiver | AudioOutputKind::Headset => {
                self.apply("set mode", self.platform.set_mode(AudioMode::InCommunication));
                self.apply("stop SCO", self.platform.stop_bluetooth_sco());
                self.apply("clear SCO flag", self.platform.set_bluetooth_sco_on(false));
                self.apply("disable speakerphone", self.platform.set_speakerphone_on(false));
            }
            AudioOutputKind::Speaker => {
                self.apply("set mode", self.platform.set_mode(AudioMode::Normal));
                self.apply("stop SCO", self.platform.stop_bluetooth_sco());
                self.apply("clear SCO flag", self.platform.set_bluetooth_sco_on(false));
                self.apply("enable speakerphone", self.platform.set_speakerphone_on(true));
            }
            AudioOutputKind::Bluetooth => {
                self.apply("set mode", self.platform.set_mode(AudioMode::InCommunication));
                self.apply("start SCO", self.platform.start_bluetooth_sco());
                self.apply("set SCO flag", self.platform.set_bluetooth_sco_on(true));
            }
        }
        self.listener.on_changed();
        true
    }

    pub fn change_to_receiver(&self) -> bool {
        self.switch_to(AudioOutputKind::Receiver)
    }

    pub fn change_to_speaker(&self) -> bool {
        self.switch_to(AudioOutputKind::Speaker)
    }

    pub fn change_to_headphones(&self) -> bool {
        self.switch_to(AudioOutputKind::Headset)
    }

    pub fn change_to_bluetooth(&self) -> bool {
        self.switch_to(AudioOutputKind::Bluetooth)
    }

    /// Classify the active output: speakerphone, then Bluetooth SCO with a
    /// connected device, then wired headset, else receiver.
    ///
    /// A SCO flag with no connected device behind it is stale and gets
    /// cleared before classification.
    pub fn current_output(&self) -> OutputReport {
        let sco_on = self.read_flag("SCO flag", self.platform.is_bluetooth_sco_on());
        let has_connected_device = has_connected_bluetooth_device(self.platform.as_ref());

        if sco_on && !has_connected_device {
            debug!("SCO flagged on without a connected device, clearing flag");
            self.apply("clear stale SCO flag", self.platform.set_bluetooth_sco_on(false));
        }

        let kind = if self.read_flag("speakerphone", self.platform.is_speakerphone_on()) {
            AudioOutputKind::Speaker
        } else if sco_on && has_connected_device {
            AudioOutputKind::Bluetooth
        } else if self.read_flag("wired headset", self.platform.is_wired_headset_on()) {
            AudioOutputKind::Headset
        } else {
            AudioOutputKind::Receiver
        };

        debug!(
            "Current output: {} (SCO: {}, connected BT device: {})",
            kind, sco_on, has_connected_device
        );
        kind.report()
    }

    /// Inputs currently usable. Receiver is always first; each kind appears
    /// at most once.
    pub fn available_inputs(&self) -> Vec<OutputReport> {
        let mut kinds = vec![AudioOutputKind::Receiver];

        match self.platform.output_devices() {
            Ok(Some(devices)) => {
                for device in &devices {
                    if let Some(kind) = device.device_type.route_kind() {
                        debug!("Output device '{}' offers {}", device.name, kind);
                        kinds.push(kind);
                    }
                }
            }
            Ok(None) => {
                if self.read_flag("wired headset", self.platform.is_wired_headset_on()) {
                    kinds.push(AudioOutputKind::Headset);
                }
                if self.read_flag(
                    "SCO off-call availability",
                    self.platform.is_bluetooth_sco_available_off_call(),
                ) {
                    kinds.push(AudioOutputKind::Bluetooth);
                }
            }
            Err(e) => {
                warn!("Failed to enumerate output devices: {}", e);
            }
        }

        let mut seen = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        seen.into_iter().map(AudioOutputKind::report).collect()
    }

    fn read_flag(&self, what: &str, result: PlatformResult<bool>) -> bool {
        result.unwrap_or_else(|e| {
            warn!("Failed to read {}: {}", what, e);
            false
        })
    }

    fn apply(&self, what: &str, result: PlatformResult<()>) {
        if let Err(e) = result {
            warn!("Failed to {}: {}", what, e);
        }
    }
}

/// True when at least one bonded device reports connected. A missing
/// permission or any failing check counts as "not connected", and without
/// the permission no device is checked at all.
pub(crate) fn has_connected_bluetooth_device(platform: &dyn AudioPlatform) -> bool {
    match platform.has_bluetooth_connect_permission() {
        Ok(true) => {}
        Ok(false) => {
            info!("🔐 No Bluetooth connect permission, assuming no connected device");
            return false;
        }
        Err(e) => {
            warn!("Failed to check Bluetooth connect permission: {}", e);
            return false;
        }
    }

    platform.any_bonded_device_connected().unwrap_or_else(|e| {
        warn!("Failed to check bonded Bluetooth devices: {}", e);
        false
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::listener::CountingListener;
    use crate::memory::MemoryPlatform;
    use crate::models::{BondedDevice, OutputDevice, OutputDeviceType};

    fn controller_with(
        platform: MemoryPlatform,
    ) -> (AudioRouteController, Arc<MemoryPlatform>, Arc<CountingListener>) {
        let platform = Arc::new(platform);
        let listener = Arc::new(CountingListener::default());
        let controller = AudioRouteController::new(platform.clone(), listener.clone());
        (controller, platform, listener)
    }

    fn headset() -> BondedDevice {
        BondedDevice::new("WH-1000XM4", "AA:BB:CC:DD:EE:FF")
    }

    #[test]
    fn test_every_switch_returns_true_and_notifies_once() {
        let (controller, _platform, listener) = controller_with(MemoryPlatform::default());

        for (i, kind) in AudioOutputKind::ALL.into_iter().enumerate() {
            assert!(controller.switch_to(kind));
            assert_eq!(listener.count(), i + 1);
        }
    }

    #[test]
    fn test_switch_notifies_even_when_unchanged() {
        let (controller, _platform, listener) = controller_with(MemoryPlatform::default());
        controller.change_to_speaker();
        controller.change_to_speaker();
        assert_eq!(listener.count(), 2);
    }

    #[test]
    fn test_receiver_switch_flags() {
        let (controller, platform, _) =
            controller_with(MemoryPlatform::default().with_speakerphone(true).with_sco(true));
        platform.update(|s| s.sco_started = true);

        controller.change_to_receiver();

        let state = platform.snapshot();
        assert_eq!(state.mode, AudioMode::InCommunication);
        assert!(!state.sco_started);
        assert!(!state.sco_on);
        assert!(!state.speakerphone_on);
    }

    #[test]
    fn test_speaker_switch_flags() {
        let (controller, platform, _) = controller_with(MemoryPlatform::default().with_sco(true));

        controller.change_to_speaker();

        let state = platform.snapshot();
        assert_eq!(state.mode, AudioMode::Normal);
        assert!(!state.sco_on);
        assert!(state.speakerphone_on);
    }

    #[test]
    fn test_headphones_matches_receiver() {
        let (receiver, receiver_platform, _) =
            controller_with(MemoryPlatform::default().with_speakerphone(true));
        let (headphones, headphones_platform, _) =
            controller_with(MemoryPlatform::default().with_speakerphone(true));

        receiver.change_to_receiver();
        headphones.change_to_headphones();

        let a = receiver_platform.snapshot();
        let b = headphones_platform.snapshot();
        assert_eq!(a.mode, b.mode);
        assert_eq!(a.speakerphone_on, b.speakerphone_on);
        assert_eq!(a.sco_on, b.sco_on);
        assert_eq!(a.sco_started, b.sco_started);
    }

    #[test]
    fn test_bluetooth_switch_flags() {
        let (controller, platform, _) = controller_with(MemoryPlatform::default());

        controller.change_to_bluetooth();

        let state = platform.snapshot();
        assert_eq!(state.mode, AudioMode::InCommunication);
        assert!(state.sco_started);
        assert!(state.sco_on);
    }

    #[test]
    fn test_speaker_wins_over_everything() {
        let (controller, _, _) = controller_with(
            MemoryPlatform::default()
                .with_speakerphone(true)
                .with_sco(true)
                .with_bonded_device(headset(), true)
                .with_wired_headset(true),
        );
        assert_eq!(controller.current_output().to_pair(), ["Speaker", "2"]);
    }

    #[test]
    fn test_stale_sco_is_cleared_when_speaker_wins() {
        let (controller, platform, _) = controller_with(
            MemoryPlatform::default()
                .with_speakerphone(true)
                .with_sco(true)
                .with_bonded_device(headset(), false),
        );

        assert_eq!(controller.current_output().to_pair(), ["Speaker", "2"]);
        assert!(!platform.snapshot().sco_on);
    }

    #[test]
    fn test_bluetooth_when_sco_and_connected() {
        let (controller, platform, _) = controller_with(
            MemoryPlatform::default()
                .with_sco(true)
                .with_bonded_device(BondedDevice::new("Old Car Kit", "01:02:03:04:05:06"), false)
                .with_bonded_device(headset(), true)
                .with_wired_headset(true),
        );
        assert_eq!(controller.current_output().kind, AudioOutputKind::Bluetooth);
        assert!(platform.snapshot().sco_on);
    }

    #[test]
    fn test_stale_sco_is_cleared_and_falls_through_to_headset() {
        let (controller, platform, _) = controller_with(
            MemoryPlatform::default()
                .with_sco(true)
                .with_bonded_device(headset(), false)
                .with_wired_headset(true),
        );

        assert_eq!(controller.current_output().to_pair(), ["Headset", "3"]);
        assert!(!platform.snapshot().sco_on);
    }

    #[test]
    fn test_stale_sco_falls_through_to_receiver() {
        let (controller, platform, _) =
            controller_with(MemoryPlatform::default().with_sco(true));

        assert_eq!(controller.current_output().kind, AudioOutputKind::Receiver);
        assert!(!platform.snapshot().sco_on);
    }

    #[test]
    fn test_permission_denied_never_reports_bluetooth() {
        let (controller, platform, _) = controller_with(
            MemoryPlatform::default()
                .with_sco(true)
                .with_bonded_device(headset(), true)
                .with_permission(false),
        );

        assert_eq!(controller.current_output().kind, AudioOutputKind::Receiver);
        assert!(!platform.snapshot().sco_on);
    }

    #[test]
    fn test_all_flags_off() {
        let (controller, _, _) = controller_with(MemoryPlatform::default());
        assert_eq!(controller.current_output().to_pair(), ["Receiver", "1"]);
        assert_eq!(controller.available_inputs(), vec![AudioOutputKind::Receiver.report()]);
    }

    #[test]
    fn test_failing_reads_degrade_to_receiver() {
        let platform = MemoryPlatform::default().with_speakerphone(true);
        platform.update(|s| s.fail_reads = true);
        let (controller, _, _) = controller_with(platform);

        assert_eq!(controller.current_output().kind, AudioOutputKind::Receiver);
        assert_eq!(controller.available_inputs(), vec![AudioOutputKind::Receiver.report()]);
    }

    #[test]
    fn test_legacy_inputs() {
        let (controller, _, _) = controller_with(
            MemoryPlatform::default()
                .with_wired_headset(true)
                .with_sco_available_off_call(true),
        );

        let kinds: Vec<_> = controller.available_inputs().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AudioOutputKind::Receiver,
                AudioOutputKind::Headset,
                AudioOutputKind::Bluetooth
            ]
        );
    }

    #[test]
    fn test_enumerated_inputs_are_deduplicated() {
        let outputs = vec![
            OutputDevice::new("Speaker", OutputDeviceType::BuiltinSpeaker),
            OutputDevice::new("USB-C Headset", OutputDeviceType::UsbHeadset),
            OutputDevice::new("Wired Headset", OutputDeviceType::WiredHeadset),
            OutputDevice::new("Pixel Buds", OutputDeviceType::BluetoothSco),
            OutputDevice::new("Pixel Buds LE", OutputDeviceType::BleHeadset),
        ];
        let (controller, _, _) = controller_with(
            MemoryPlatform::default()
                .with_outputs(Some(outputs))
                // Ignored on the enumeration path
                .with_sco_available_off_call(false),
        );

        let kinds: Vec<_> = controller.available_inputs().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AudioOutputKind::Receiver,
                AudioOutputKind::Headset,
                AudioOutputKind::Bluetooth
            ]
        );
    }

    #[test]
    fn test_inputs_always_start_with_receiver() {
        let outputs = vec![OutputDevice::new("Pixel Buds", OutputDeviceType::BluetoothSco)];
        let (controller, _, _) =
            controller_with(MemoryPlatform::default().with_outputs(Some(outputs)));

        let inputs = controller.available_inputs();
        assert_eq!(inputs[0].kind, AudioOutputKind::Receiver);
        assert_eq!(inputs.len(), 2);
    }
}
