//! Android platform backed by the native `AudioRoutePlugin` class.
//!
//! Each capability is a single synchronous `run_mobile_plugin` call; the
//! Kotlin side forwards it to `AudioManager` / `BluetoothManager`.

use log::info;
use serde::{
    de::{DeserializeOwned, IgnoredAny},
    Deserialize, Serialize,
};
use tauri::{
    plugin::{PluginApi, PluginHandle},
    AppHandle, Runtime,
};

use crate::audio::AudioPlatform;
use crate::error::PlatformResult;
use crate::models::{AudioMode, BondedDevice, OutputDevice};
use crate::native::{self, PLUGIN_CLASS, PLUGIN_IDENTIFIER};

pub fn init<R: Runtime, C: DeserializeOwned>(
    _app: &AppHandle<R>,
    api: &PluginApi<R, C>,
) -> anyhow::Result<MobilePlatform<R>> {
    let handle = api
        .register_android_plugin(PLUGIN_IDENTIFIER, PLUGIN_CLASS)
        .map_err(|e| anyhow::anyhow!("Failed to register Android audio route plugin: {}", e))?;
    info!("📱 Registered Android audio route plugin");
    Ok(MobilePlatform(handle))
}

#[derive(Serialize)]
struct FlagArgs {
    on: bool,
}

#[derive(Serialize)]
struct ModeArgs {
    mode: AudioMode,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceArgs<'a> {
    address: &'a str,
}

#[derive(Deserialize)]
struct FlagResponse {
    value: bool,
}

#[derive(Deserialize)]
struct ModeResponse {
    mode: AudioMode,
}

#[derive(Deserialize)]
struct BondedResponse {
    devices: Vec<BondedDevice>,
}

#[derive(Deserialize)]
struct OutputsResponse {
    /// Absent on OS versions without device enumeration
    devices: Option<Vec<OutputDevice>>,
}

/// Access to the native audio session
pub struct MobilePlatform<R: Runtime>(PluginHandle<R>);

impl<R: Runtime> MobilePlatform<R> {
    fn call<T: DeserializeOwned>(
        &self,
        command: &str,
        payload: impl Serialize,
    ) -> PlatformResult<T> {
        self.0.run_mobile_plugin(command, payload).map_err(Into::into)
    }

    /// Commands whose response body carries nothing of interest
    fn run(&self, command: &str, payload: impl Serialize) -> PlatformResult<()> {
        self.call::<IgnoredAny>(command, payload).map(|_| ())
    }

    fn flag(&self, command: &str) -> PlatformResult<bool> {
        self.call::<FlagResponse>(command, ()).map(|r| r.value)
    }

    fn set_flag(&self, command: &str, on: bool) -> PlatformResult<()> {
        self.run(command, FlagArgs { on })
    }
}

impl<R: Runtime> AudioPlatform for MobilePlatform<R> {
    fn mode(&self) -> PlatformResult<AudioMode> {
        self.call::<ModeResponse>(native::GET_MODE, ()).map(|r| r.mode)
    }

    fn set_mode(&self, mode: AudioMode) -> PlatformResult<()> {
        self.run(native::SET_MODE, ModeArgs { mode })
    }

    fn is_speakerphone_on(&self) -> PlatformResult<bool> {
        self.flag(native::IS_SPEAKERPHONE_ON)
    }

    fn set_speakerphone_on(&self, on: bool) -> PlatformResult<()> {
        self.set_flag(native::SET_SPEAKERPHONE_ON, on)
    }

    fn is_bluetooth_sco_on(&self) -> PlatformResult<bool> {
        self.flag(native::IS_BLUETOOTH_SCO_ON)
    }

    fn set_bluetooth_sco_on(&self, on: bool) -> PlatformResult<()> {
        self.set_flag(native::SET_BLUETOOTH_SCO_ON, on)
    }

    fn start_bluetooth_sco(&self) -> PlatformResult<()> {
        self.run(native::START_BLUETOOTH_SCO, ())
    }

    fn stop_bluetooth_sco(&self) -> PlatformResult<()> {
        self.run(native::STOP_BLUETOOTH_SCO, ())
    }

    fn is_bluetooth_sco_available_off_call(&self) -> PlatformResult<bool> {
        self.flag(native::IS_BLUETOOTH_SCO_AVAILABLE_OFF_CALL)
    }

    fn is_wired_headset_on(&self) -> PlatformResult<bool> {
        self.flag(native::IS_WIRED_HEADSET_ON)
    }

    fn has_bluetooth_connect_permission(&self) -> PlatformResult<bool> {
        self.flag(native::HAS_BLUETOOTH_CONNECT_PERMISSION)
    }

    fn bonded_devices(&self) -> PlatformResult<Vec<BondedDevice>> {
        self.call::<BondedResponse>(native::GET_BONDED_DEVICES, ())
            .map(|r| r.devices)
    }

    fn is_device_connected(&self, device: &BondedDevice) -> PlatformResult<bool> {
        self.call::<FlagResponse>(
            native::IS_DEVICE_CONNECTED,
            DeviceArgs {
                address: &device.address,
            },
        )
        .map(|r| r.value)
    }

    fn output_devices(&self) -> PlatformResult<Option<Vec<OutputDevice>>> {
        self.call::<OutputsResponse>(native::GET_OUTPUT_DEVICES, ())
            .map(|r| r.devices)
    }
}
