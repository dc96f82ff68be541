// Scriptable in-process platform used by tests and the CLI simulate mode
use std::sync::Mutex;

use crate::audio::AudioPlatform;
use crate::error::{PlatformError, PlatformResult};
use crate::models::{AudioMode, BondedDevice, OutputDevice};

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub mode: AudioMode,
    pub speakerphone_on: bool,
    pub sco_on: bool,
    pub sco_started: bool,
    pub sco_available_off_call: bool,
    pub wired_headset_on: bool,
    pub permission_granted: bool,
    /// Bonded devices with their connection state
    pub bonded: Vec<(BondedDevice, bool)>,
    /// `None` simulates a platform without output enumeration
    pub outputs: Option<Vec<OutputDevice>>,
    /// Make every read fail, to exercise degradation paths
    pub fail_reads: bool,
    /// Number of `is_device_connected` calls made so far
    pub connection_checks: usize,
}

/// Platform whose whole state lives in a mutex.
///
/// Starts with every flag off and the Bluetooth permission granted.
pub struct MemoryPlatform {
    state: Mutex<MemoryState>,
}

impl Default for MemoryPlatform {
    fn default() -> Self {
        Self::new(MemoryState {
            permission_granted: true,
            ..MemoryState::default()
        })
    }
}

impl MemoryPlatform {
    pub fn new(state: MemoryState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn snapshot(&self) -> MemoryState {
        self.lock().clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut MemoryState)) {
        f(&mut self.lock());
    }

    pub fn with_speakerphone(self, on: bool) -> Self {
        self.update(|s| s.speakerphone_on = on);
        self
    }

    pub fn with_sco(self, on: bool) -> Self {
        self.update(|s| s.sco_on = on);
        self
    }

    pub fn with_wired_headset(self, on: bool) -> Self {
        self.update(|s| s.wired_headset_on = on);
        self
    }

    pub fn with_permission(self, granted: bool) -> Self {
        self.update(|s| s.permission_granted = granted);
        self
    }

    pub fn with_bonded_device(self, device: BondedDevice, connected: bool) -> Self {
        self.update(|s| s.bonded.push((device, connected)));
        self
    }

    pub fn with_outputs(self, outputs: Option<Vec<OutputDevice>>) -> Self {
        self.update(|s| s.outputs = outputs);
        self
    }

    pub fn with_sco_available_off_call(self, available: bool) -> Self {
        self.update(|s| s.sco_available_off_call = available);
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A poisoned lock only means a panicking test thread; the state is plain data
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn read<T>(&self, f: impl FnOnce(&MemoryState) -> T) -> PlatformResult<T> {
        let state = self.lock();
        if state.fail_reads {
            return Err(PlatformError::Unavailable("simulated read failure".to_string()));
        }
        Ok(f(&state))
    }

    fn write(&self, f: impl FnOnce(&mut MemoryState)) -> PlatformResult<()> {
        f(&mut self.lock());
        Ok(())
    }
}

impl AudioPlatform for MemoryPlatform {
    fn mode(&self) -> PlatformResult<AudioMode> {
        self.read(|s| s.mode)
    }

    fn set_mode(&self, mode: AudioMode) -> PlatformResult<()> {
        self.write(|s| s.mode = mode)
    }

    fn is_speakerphone_on(&self) -> PlatformResult<bool> {
        self.read(|s| s.speakerphone_on)
    }

    fn set_speakerphone_on(&self, on: bool) -> PlatformResult<()> {
        self.write(|s| s.speakerphone_on = on)
    }

    fn is_bluetooth_sco_on(&self) -> PlatformResult<bool> {
        self.read(|s| s.sco_on)
    }

    fn set_bluetooth_sco_on(&self, on: bool) -> PlatformResult<()> {
        self.write(|s| s.sco_on = on)
    }

    fn start_bluetooth_sco(&self) -> PlatformResult<()> {
        self.write(|s| s.sco_started = true)
    }

    fn stop_bluetooth_sco(&self) -> PlatformResult<()> {
        self.write(|s| s.sco_started = false)
    }

    fn is_bluetooth_sco_available_off_call(&self) -> PlatformResult<bool> {
        self.read(|s| s.sco_available_off_call)
    }

    fn is_wired_headset_on(&self) -> PlatformResult<bool> {
        self.read(|s| s.wired_headset_on)
    }

    fn has_bluetooth_connect_permission(&self) -> PlatformResult<bool> {
        self.read(|s| s.permission_granted)
    }

    fn bonded_devices(&self) -> PlatformResult<Vec<BondedDevice>> {
        self.read(|s| s.bonded.iter().map(|(device, _)| device.clone()).collect())
    }

    fn is_device_connected(&self, device: &BondedDevice) -> PlatformResult<bool> {
        let mut state = self.lock();
        state.connection_checks += 1;
        if !state.permission_granted {
            return Err(PlatformError::PermissionDenied(
                "BLUETOOTH_CONNECT not granted".to_string(),
            ));
        }
        Ok(state
            .bonded
            .iter()
            .any(|(bonded, connected)| bonded == device && *connected))
    }

    fn output_devices(&self) -> PlatformResult<Option<Vec<OutputDevice>>> {
        self.read(|s| s.outputs.clone())
    }
}
