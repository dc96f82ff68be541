// Capability port over the host's audio session and Bluetooth stack
use log::{info, warn};

use crate::error::PlatformResult;
use crate::models::{AudioMode, BondedDevice, OutputDevice};

/// Narrow interface onto the OS-owned audio/Bluetooth managers.
///
/// Every call is synchronous and cheap. Implementations must never panic;
/// failures are reported as [`PlatformError`](crate::error::PlatformError)
/// and the controller decides how to degrade.
pub trait AudioPlatform: Send + Sync {
    fn mode(&self) -> PlatformResult<AudioMode>;
    fn set_mode(&self, mode: AudioMode) -> PlatformResult<()>;

    fn is_speakerphone_on(&self) -> PlatformResult<bool>;
    fn set_speakerphone_on(&self, on: bool) -> PlatformResult<()>;

    fn is_bluetooth_sco_on(&self) -> PlatformResult<bool>;
    fn set_bluetooth_sco_on(&self, on: bool) -> PlatformResult<()>;
    fn start_bluetooth_sco(&self) -> PlatformResult<()>;
    fn stop_bluetooth_sco(&self) -> PlatformResult<()>;

    /// Whether the SCO link can be used outside of a phone call
    fn is_bluetooth_sco_available_off_call(&self) -> PlatformResult<bool>;

    fn is_wired_headset_on(&self) -> PlatformResult<bool>;

    /// Whether the app may query Bluetooth connection state.
    /// Platforms without a runtime permission model return `Ok(true)`.
    fn has_bluetooth_connect_permission(&self) -> PlatformResult<bool>;

    fn bonded_devices(&self) -> PlatformResult<Vec<BondedDevice>>;
    fn is_device_connected(&self, device: &BondedDevice) -> PlatformResult<bool>;

    /// Whether any bonded device is connected. The default checks each
    /// bonded device in turn; a denied or failing check counts as not
    /// connected. Platforms that learn this from one device listing override it.
    fn any_bonded_device_connected(&self) -> PlatformResult<bool> {
        let devices = self.bonded_devices()?;
        Ok(devices.iter().any(|device| match self.is_device_connected(device) {
            Ok(connected) => connected,
            Err(e) if e.is_permission_denied() => {
                info!("🔐 Connection check for '{}' denied: {}", device.name, e);
                false
            }
            Err(e) => {
                warn!("Connection check for '{}' failed: {}", device.name, e);
                false
            }
        }))
    }

    /// Enumerated output devices, or `None` when the platform cannot
    /// enumerate and the legacy flag checks should be used instead.
    fn output_devices(&self) -> PlatformResult<Option<Vec<OutputDevice>>>;
}
