pub mod controller;
pub mod device_detection;
pub mod dispatch;
pub mod hotplug;
pub mod listener;
pub mod platform;

pub use controller::AudioRouteController;
pub use device_detection::classify_device_name;
pub use dispatch::{dispatch, MethodResult, RouteMethod};
pub use hotplug::{HardwareEventPump, HardwareEventSender, HeadsetMonitor};
pub use listener::{
    AudioEventListener, ChannelListener, CountingListener, EmitListener, SharedListener,
    INPUT_CHANGED_EVENT, INPUT_CHANGED_PAYLOAD,
};
pub use platform::AudioPlatform;
