// Output device classification from device names
//
// Desktop audio hosts (CoreAudio, WASAPI, ALSA/PulseAudio) only expose a
// device name, so the output type is inferred from naming conventions.

use log::debug;

use crate::models::OutputDeviceType;

/// High confidence Bluetooth names (vendor product lines and stack names)
const BLUETOOTH_PATTERNS: &[&str] = &[
    "airpods",
    "bluetooth",
    "bluez",
    "wh-1000xm",
    "quietcomfort",
    "freebuds",
    "galaxy buds",
    "beats",
    "jabra",
    "plantronics",
];

/// Weaker Bluetooth hints, checked after wired patterns
const WEAK_BLUETOOTH_PATTERNS: &[&str] = &["wireless", "bt ", " bt"];

/// Profiles that carry call audio (SCO / hands-free)
const HANDS_FREE_PATTERNS: &[&str] = &["hands-free", "handsfree", "hfp", "hsp", "headset"];

const USB_PATTERNS: &[&str] = &["usb"];

const WIRED_HEADPHONE_PATTERNS: &[&str] = &["headphone", "earphone", "line out"];

const SPEAKER_PATTERNS: &[&str] = &["speaker", "display", "hdmi", "built-in output"];

/// Infer the output device type from its name
pub fn classify_device_name(device_name: &str) -> OutputDeviceType {
    let name_lower = device_name.to_lowercase();
    let matches = |patterns: &[&str]| patterns.iter().any(|p| name_lower.contains(p));

    let device_type = if matches(BLUETOOTH_PATTERNS) {
        bluetooth_profile(&name_lower)
    } else if matches(USB_PATTERNS) {
        if matches(HANDS_FREE_PATTERNS) {
            OutputDeviceType::UsbHeadset
        } else {
            OutputDeviceType::UsbDevice
        }
    } else if name_lower.contains("headset") {
        OutputDeviceType::WiredHeadset
    } else if matches(WIRED_HEADPHONE_PATTERNS) {
        OutputDeviceType::WiredHeadphones
    } else if matches(WEAK_BLUETOOTH_PATTERNS) {
        bluetooth_profile(&name_lower)
    } else if matches(SPEAKER_PATTERNS) {
        OutputDeviceType::BuiltinSpeaker
    } else {
        OutputDeviceType::Other
    };

    debug!("Classified output '{}' as {:?}", device_name, device_type);
    device_type
}

/// Bluetooth devices expose media (A2DP) and call (SCO) profiles as separate
/// sinks; only the call profile is routable for voice.
fn bluetooth_profile(name_lower: &str) -> OutputDeviceType {
    if name_lower.contains("a2dp") {
        OutputDeviceType::BluetoothA2dp
    } else if name_lower.contains(" le") || name_lower.contains("le audio") {
        OutputDeviceType::BleHeadset
    } else {
        OutputDeviceType::BluetoothSco
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airpods_detection() {
        assert_eq!(
            classify_device_name("John's AirPods Pro"),
            OutputDeviceType::BluetoothSco
        );
    }

    #[test]
    fn test_bluez_a2dp_sink() {
        assert_eq!(
            classify_device_name("bluez_output.AA_BB_CC.a2dp-sink"),
            OutputDeviceType::BluetoothA2dp
        );
    }

    #[test]
    fn test_usb_headset() {
        assert_eq!(
            classify_device_name("Logitech USB Headset H390"),
            OutputDeviceType::UsbHeadset
        );
        assert_eq!(
            classify_device_name("USB Audio Device"),
            OutputDeviceType::UsbDevice
        );
    }

    #[test]
    fn test_wired_outputs() {
        assert_eq!(
            classify_device_name("External Headphones"),
            OutputDeviceType::WiredHeadphones
        );
        assert_eq!(
            classify_device_name("Analog Headset"),
            OutputDeviceType::WiredHeadset
        );
    }

    #[test]
    fn test_builtin_speaker() {
        assert_eq!(
            classify_device_name("MacBook Pro Speakers"),
            OutputDeviceType::BuiltinSpeaker
        );
        assert_eq!(classify_device_name("default"), OutputDeviceType::Other);
    }
}
