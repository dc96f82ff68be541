// Names shared with the Kotlin bridge under android/
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

pub(crate) const PLUGIN_IDENTIFIER: &str = "app.tauri.audioroute";
pub(crate) const PLUGIN_CLASS: &str = "AudioRoutePlugin";

pub(crate) const GET_MODE: &str = "getMode";
pub(crate) const SET_MODE: &str = "setMode";
pub(crate) const IS_SPEAKERPHONE_ON: &str = "isSpeakerphoneOn";
pub(crate) const SET_SPEAKERPHONE_ON: &str = "setSpeakerphoneOn";
pub(crate) const IS_BLUETOOTH_SCO_ON: &str = "isBluetoothScoOn";
pub(crate) const SET_BLUETOOTH_SCO_ON: &str = "setBluetoothScoOn";
pub(crate) const START_BLUETOOTH_SCO: &str = "startBluetoothSco";
pub(crate) const STOP_BLUETOOTH_SCO: &str = "stopBluetoothSco";
pub(crate) const IS_BLUETOOTH_SCO_AVAILABLE_OFF_CALL: &str = "isBluetoothScoAvailableOffCall";
pub(crate) const IS_WIRED_HEADSET_ON: &str = "isWiredHeadsetOn";
pub(crate) const HAS_BLUETOOTH_CONNECT_PERMISSION: &str = "hasBluetoothConnectPermission";
pub(crate) const GET_BONDED_DEVICES: &str = "getBondedDevices";
pub(crate) const IS_DEVICE_CONNECTED: &str = "isDeviceConnected";
pub(crate) const GET_OUTPUT_DEVICES: &str = "getOutputDevices";

pub(crate) const ALL_COMMANDS: [&str; 14] = [
    GET_MODE,
    SET_MODE,
    IS_SPEAKERPHONE_ON,
    SET_SPEAKERPHONE_ON,
    IS_BLUETOOTH_SCO_ON,
    SET_BLUETOOTH_SCO_ON,
    START_BLUETOOTH_SCO,
    STOP_BLUETOOTH_SCO,
    IS_BLUETOOTH_SCO_AVAILABLE_OFF_CALL,
    IS_WIRED_HEADSET_ON,
    HAS_BLUETOOTH_CONNECT_PERMISSION,
    GET_BONDED_DEVICES,
    IS_DEVICE_CONNECTED,
    GET_OUTPUT_DEVICES,
];

#[cfg(test)]
mod tests {
    use super::*;

    const BRIDGE_SOURCE: &str =
        include_str!("../android/src/main/java/app/tauri/audioroute/AudioRoutePlugin.kt");

    #[test]
    fn test_bridge_class_matches_registration() {
        assert!(BRIDGE_SOURCE.contains(&format!("package {}", PLUGIN_IDENTIFIER)));
        assert!(BRIDGE_SOURCE.contains(&format!("class {}(", PLUGIN_CLASS)));
    }

    #[test]
    fn test_bridge_implements_every_command() {
        for command in ALL_COMMANDS {
            let declaration = format!("@Command\n    fun {}(invoke: Invoke)", command);
            assert!(
                BRIDGE_SOURCE.contains(&declaration),
                "Kotlin bridge is missing command {}",
                command
            );
        }
    }

    #[test]
    fn test_bridge_device_types_deserialize() {
        use crate::models::OutputDeviceType;

        for name in [
            "usbAccessory",
            "usbDevice",
            "usbHeadset",
            "wiredHeadphones",
            "wiredHeadset",
            "bluetoothSco",
            "bleHeadset",
            "bluetoothA2dp",
            "builtinSpeaker",
            "builtinEarpiece",
        ] {
            assert!(BRIDGE_SOURCE.contains(&format!("\"{}\"", name)));
            let parsed: OutputDeviceType = serde_json::from_value(serde_json::json!(name)).unwrap();
            assert_ne!(parsed, OutputDeviceType::Other, "{} fell through to Other", name);
        }
    }
}
