// Method-name dispatch matching the plugin's public method surface
use log::warn;
use serde_json::{json, Value};
use std::str::FromStr;

use super::controller::AudioRouteController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMethod {
    GetCurrentOutput,
    GetAvailableInputs,
    ChangeToReceiver,
    ChangeToSpeaker,
    ChangeToHeadphones,
    ChangeToBluetooth,
}

impl RouteMethod {
    pub const ALL: [RouteMethod; 6] = [
        RouteMethod::GetCurrentOutput,
        RouteMethod::GetAvailableInputs,
        RouteMethod::ChangeToReceiver,
        RouteMethod::ChangeToSpeaker,
        RouteMethod::ChangeToHeadphones,
        RouteMethod::ChangeToBluetooth,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RouteMethod::GetCurrentOutput => "getCurrentOutput",
            RouteMethod::GetAvailableInputs => "getAvailableInputs",
            RouteMethod::ChangeToReceiver => "changeToReceiver",
            RouteMethod::ChangeToSpeaker => "changeToSpeaker",
            RouteMethod::ChangeToHeadphones => "changeToHeadphones",
            RouteMethod::ChangeToBluetooth => "changeToBluetooth",
        }
    }

    pub fn invoke(&self, controller: &AudioRouteController) -> Value {
        match self {
            RouteMethod::GetCurrentOutput => json!(controller.current_output()),
            RouteMethod::GetAvailableInputs => json!(controller.available_inputs()),
            RouteMethod::ChangeToReceiver => json!(controller.change_to_receiver()),
            RouteMethod::ChangeToSpeaker => json!(controller.change_to_speaker()),
            RouteMethod::ChangeToHeadphones => json!(controller.change_to_headphones()),
            RouteMethod::ChangeToBluetooth => json!(controller.change_to_bluetooth()),
        }
    }
}

impl FromStr for RouteMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.name() == s)
            .ok_or_else(|| format!("Unknown method: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MethodResult {
    Success(Value),
    NotImplemented,
}

/// Run the method called `name`, or report it as not implemented
pub fn dispatch(controller: &AudioRouteController, name: &str) -> MethodResult {
    match name.parse::<RouteMethod>() {
        Ok(method) => MethodResult::Success(method.invoke(controller)),
        Err(e) => {
            warn!("{}", e);
            MethodResult::NotImplemented
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::listener::CountingListener;
    use crate::memory::MemoryPlatform;
    use std::sync::Arc;

    fn controller() -> (AudioRouteController, Arc<CountingListener>) {
        let listener = Arc::new(CountingListener::default());
        let controller =
            AudioRouteController::new(Arc::new(MemoryPlatform::default()), listener.clone());
        (controller, listener)
    }

    #[test]
    fn test_method_names_round_trip() {
        for method in RouteMethod::ALL {
            assert_eq!(method.name().parse::<RouteMethod>(), Ok(method));
        }
        assert!("GetCurrentOutput".parse::<RouteMethod>().is_err());
    }

    #[test]
    fn test_dispatch_current_output() {
        let (controller, _) = controller();
        assert_eq!(
            dispatch(&controller, "getCurrentOutput"),
            MethodResult::Success(json!(["Receiver", "1"]))
        );
    }

    #[test]
    fn test_dispatch_available_inputs() {
        let (controller, _) = controller();
        assert_eq!(
            dispatch(&controller, "getAvailableInputs"),
            MethodResult::Success(json!([["Receiver", "1"]]))
        );
    }

    #[test]
    fn test_dispatch_switch() {
        let (controller, listener) = controller();
        assert_eq!(
            dispatch(&controller, "changeToBluetooth"),
            MethodResult::Success(json!(true))
        );
        assert_eq!(listener.count(), 1);
    }

    #[test]
    fn test_dispatch_unknown_method() {
        let (controller, listener) = controller();
        assert_eq!(dispatch(&controller, "setVolume"), MethodResult::NotImplemented);
        assert_eq!(listener.count(), 0);
    }
}
