use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Audio output route. The numeric codes are part of the wire contract
/// with the calling application and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioOutputKind {
    Receiver,
    Speaker,
    Headset,
    Bluetooth,
}

impl AudioOutputKind {
    pub const ALL: [AudioOutputKind; 4] = [
        AudioOutputKind::Receiver,
        AudioOutputKind::Speaker,
        AudioOutputKind::Headset,
        AudioOutputKind::Bluetooth,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AudioOutputKind::Receiver => "Receiver",
            AudioOutputKind::Speaker => "Speaker",
            AudioOutputKind::Headset => "Headset",
            AudioOutputKind::Bluetooth => "Bluetooth",
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            AudioOutputKind::Receiver => 1,
            AudioOutputKind::Speaker => 2,
            AudioOutputKind::Headset => 3,
            AudioOutputKind::Bluetooth => 4,
        }
    }

    /// Code as sent over the wire ("1".."4")
    pub fn code_string(&self) -> String {
        self.code().to_string()
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub fn report(self) -> OutputReport {
        OutputReport::new(self)
    }
}

impl fmt::Display for AudioOutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AudioOutputKind {
    type Err = String;

    /// Accepts names (any case), codes, and the "headphones" alias used by
    /// the switch surface.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_code(code).ok_or_else(|| format!("Unknown output code: {}", code));
        }

        match trimmed.to_lowercase().as_str() {
            "receiver" | "earpiece" => Ok(AudioOutputKind::Receiver),
            "speaker" => Ok(AudioOutputKind::Speaker),
            "headset" | "headphones" => Ok(AudioOutputKind::Headset),
            "bluetooth" => Ok(AudioOutputKind::Bluetooth),
            _ => Err(format!("Unknown output kind: {}", s)),
        }
    }
}

/// The currently active output, serialized as `[name, code]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputReport {
    pub kind: AudioOutputKind,
}

impl OutputReport {
    pub fn new(kind: AudioOutputKind) -> Self {
        Self { kind }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn code(&self) -> String {
        self.kind.code_string()
    }

    pub fn to_pair(&self) -> [String; 2] {
        [self.name().to_string(), self.code()]
    }
}

impl Serialize for OutputReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.name(), self.code()).serialize(serializer)
    }
}

impl fmt::Display for OutputReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// Audio session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AudioMode {
    #[default]
    Normal,
    InCommunication,
}

/// Output device types reported by platforms that can enumerate devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputDeviceType {
    UsbAccessory,
    UsbDevice,
    UsbHeadset,
    WiredHeadphones,
    WiredHeadset,
    BluetoothSco,
    BleHeadset,
    BluetoothA2dp,
    BuiltinSpeaker,
    BuiltinEarpiece,
    #[serde(other)]
    Other,
}

impl OutputDeviceType {
    /// Which input route (if any) a device of this type makes available
    pub fn route_kind(&self) -> Option<AudioOutputKind> {
        match self {
            OutputDeviceType::UsbAccessory
            | OutputDeviceType::UsbDevice
            | OutputDeviceType::UsbHeadset
            | OutputDeviceType::WiredHeadphones
            | OutputDeviceType::WiredHeadset => Some(AudioOutputKind::Headset),
            OutputDeviceType::BleHeadset | OutputDeviceType::BluetoothSco => {
                Some(AudioOutputKind::Bluetooth)
            }
            OutputDeviceType::BluetoothA2dp
            | OutputDeviceType::BuiltinSpeaker
            | OutputDeviceType::BuiltinEarpiece
            | OutputDeviceType::Other => None,
        }
    }

    pub fn is_bluetooth(&self) -> bool {
        matches!(
            self,
            OutputDeviceType::BluetoothSco
                | OutputDeviceType::BleHeadset
                | OutputDeviceType::BluetoothA2dp
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDevice {
    pub name: String,
    pub device_type: OutputDeviceType,
}

impl OutputDevice {
    pub fn new(name: impl Into<String>, device_type: OutputDeviceType) -> Self {
        Self {
            name: name.into(),
            device_type,
        }
    }
}

/// A Bluetooth device paired with the host; not necessarily connected
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondedDevice {
    pub name: String,
    pub address: String,
}

impl BondedDevice {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Hardware events pushed in by the host environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardwareEvent {
    HeadsetPlug {
        plugged: bool,
        name: Option<String>,
    },
    BluetoothChanged {
        connected: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(AudioOutputKind::Receiver.code_string(), "1");
        assert_eq!(AudioOutputKind::Speaker.code_string(), "2");
        assert_eq!(AudioOutputKind::Headset.code_string(), "3");
        assert_eq!(AudioOutputKind::Bluetooth.code_string(), "4");
    }

    #[test]
    fn test_report_serializes_as_pair() {
        let json = serde_json::to_string(&AudioOutputKind::Speaker.report()).unwrap();
        assert_eq!(json, r#"["Speaker","2"]"#);

        let list = vec![
            AudioOutputKind::Receiver.report(),
            AudioOutputKind::Bluetooth.report(),
        ];
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[["Receiver","1"],["Bluetooth","4"]]"#);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("speaker".parse::<AudioOutputKind>(), Ok(AudioOutputKind::Speaker));
        assert_eq!("Headphones".parse::<AudioOutputKind>(), Ok(AudioOutputKind::Headset));
        assert_eq!("4".parse::<AudioOutputKind>(), Ok(AudioOutputKind::Bluetooth));
        assert!("9".parse::<AudioOutputKind>().is_err());
        assert!("radio".parse::<AudioOutputKind>().is_err());
    }

    #[test]
    fn test_device_type_classification() {
        assert_eq!(
            OutputDeviceType::UsbHeadset.route_kind(),
            Some(AudioOutputKind::Headset)
        );
        assert_eq!(
            OutputDeviceType::WiredHeadphones.route_kind(),
            Some(AudioOutputKind::Headset)
        );
        assert_eq!(
            OutputDeviceType::BleHeadset.route_kind(),
            Some(AudioOutputKind::Bluetooth)
        );
        assert_eq!(OutputDeviceType::BluetoothA2dp.route_kind(), None);
        assert_eq!(OutputDeviceType::BuiltinSpeaker.route_kind(), None);
    }

    #[test]
    fn test_unknown_device_type_deserializes_as_other() {
        let device: OutputDevice =
            serde_json::from_str(r#"{"name":"HDMI","deviceType":"hdmi"}"#).unwrap();
        assert_eq!(device.device_type, OutputDeviceType::Other);
    }
}
