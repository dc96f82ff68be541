// Desktop platform: device state from cpal, session flags kept in-process
use cpal::traits::{DeviceTrait, HostTrait};
use log::{debug, info, warn};
use std::sync::Mutex;

use crate::audio::device_detection::classify_device_name;
use crate::audio::AudioPlatform;
use crate::error::PlatformResult;
use crate::models::{AudioMode, BondedDevice, OutputDevice, OutputDeviceType};

/// Session flags a desktop host has no native notion of
#[derive(Debug, Default)]
struct SessionFlags {
    mode: AudioMode,
    speakerphone_on: bool,
    sco_on: bool,
    sco_started: bool,
}

type OutputNames = Box<dyn Fn() -> PlatformResult<Vec<String>> + Send + Sync>;

/// Output device names from the default cpal host
fn host_output_names() -> PlatformResult<Vec<String>> {
    let host = cpal::default_host();
    let mut names = Vec::new();
    for device in host.output_devices()? {
        match device.name() {
            Ok(name) => names.push(name),
            Err(e) => warn!("Skipping output device without a name: {}", e),
        }
    }
    Ok(names)
}

/// Desktop hosts have no call-audio session, so mode / speakerphone / SCO
/// are tracked here while headset and Bluetooth presence come from the real
/// output device list.
///
/// Each port call lists the host's devices at most once.
pub struct DesktopPlatform {
    flags: Mutex<SessionFlags>,
    output_names: OutputNames,
}

impl DesktopPlatform {
    pub fn new() -> Self {
        info!("🔊 Desktop audio platform using host {:?}", cpal::default_host().id());
        Self::with_output_names(host_output_names)
    }

    fn with_output_names(
        output_names: impl Fn() -> PlatformResult<Vec<String>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            flags: Mutex::new(SessionFlags::default()),
            output_names: Box::new(output_names),
        }
    }

    fn flags(&self) -> std::sync::MutexGuard<'_, SessionFlags> {
        self.flags.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn enumerate_outputs(&self) -> PlatformResult<Vec<OutputDevice>> {
        let devices: Vec<OutputDevice> = (self.output_names)()?
            .into_iter()
            .map(|name| {
                let device_type = classify_device_name(&name);
                OutputDevice::new(name, device_type)
            })
            .collect();
        debug!("Enumerated {} output devices", devices.len());
        Ok(devices)
    }

    fn bluetooth_outputs(&self) -> PlatformResult<Vec<OutputDevice>> {
        Ok(self
            .enumerate_outputs()?
            .into_iter()
            .filter(|d| d.device_type.is_bluetooth())
            .collect())
    }
}

impl Default for DesktopPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlatform for DesktopPlatform {
    fn mode(&self) -> PlatformResult<AudioMode> {
        Ok(self.flags().mode)
    }

    fn set_mode(&self, mode: AudioMode) -> PlatformResult<()> {
        self.flags().mode = mode;
        Ok(())
    }

    fn is_speakerphone_on(&self) -> PlatformResult<bool> {
        Ok(self.flags().speakerphone_on)
    }

    fn set_speakerphone_on(&self, on: bool) -> PlatformResult<()> {
        self.flags().speakerphone_on = on;
        Ok(())
    }

    fn is_bluetooth_sco_on(&self) -> PlatformResult<bool> {
        Ok(self.flags().sco_on)
    }

    fn set_bluetooth_sco_on(&self, on: bool) -> PlatformResult<()> {
        self.flags().sco_on = on;
        Ok(())
    }

    fn start_bluetooth_sco(&self) -> PlatformResult<()> {
        self.flags().sco_started = true;
        Ok(())
    }

    fn stop_bluetooth_sco(&self) -> PlatformResult<()> {
        self.flags().sco_started = false;
        Ok(())
    }

    fn is_bluetooth_sco_available_off_call(&self) -> PlatformResult<bool> {
        Ok(self
            .bluetooth_outputs()?
            .iter()
            .any(|d| d.device_type.route_kind().is_some()))
    }

    fn is_wired_headset_on(&self) -> PlatformResult<bool> {
        Ok(self.enumerate_outputs()?.iter().any(|d| {
            matches!(
                d.device_type,
                OutputDeviceType::WiredHeadset
                    | OutputDeviceType::WiredHeadphones
                    | OutputDeviceType::UsbHeadset
            )
        }))
    }

    fn has_bluetooth_connect_permission(&self) -> PlatformResult<bool> {
        Ok(true)
    }

    /// Every Bluetooth sink the host exposes is both paired and connected,
    /// since desktop hosts drop sinks for disconnected devices.
    fn bonded_devices(&self) -> PlatformResult<Vec<BondedDevice>> {
        Ok(self
            .bluetooth_outputs()?
            .into_iter()
            .map(|d| BondedDevice::new(d.name.clone(), d.name))
            .collect())
    }

    fn is_device_connected(&self, device: &BondedDevice) -> PlatformResult<bool> {
        Ok(self
            .bluetooth_outputs()?
            .iter()
            .any(|d| d.name == device.address))
    }

    fn any_bonded_device_connected(&self) -> PlatformResult<bool> {
        Ok(!self.bluetooth_outputs()?.is_empty())
    }

    fn output_devices(&self) -> PlatformResult<Option<Vec<OutputDevice>>> {
        self.enumerate_outputs().map(Some)
    }
}
