use tauri::{command, State};

use crate::models::{AudioOutputKind, OutputReport};
use crate::session::RouteSession;

#[command]
pub fn get_current_output(session: State<'_, RouteSession>) -> OutputReport {
    session.current_output()
}

#[command]
pub fn get_available_inputs(session: State<'_, RouteSession>) -> Vec<OutputReport> {
    session.available_inputs()
}

#[command]
pub fn change_to_receiver(session: State<'_, RouteSession>) -> bool {
    session.switch_to(AudioOutputKind::Receiver)
}

#[command]
pub fn change_to_speaker(session: State<'_, RouteSession>) -> bool {
    session.switch_to(AudioOutputKind::Speaker)
}

/// Same routing as the receiver; the OS prefers a plugged headset over the
/// earpiece once speakerphone and SCO are off.
#[command]
pub fn change_to_headphones(session: State<'_, RouteSession>) -> bool {
    session.switch_to(AudioOutputKind::Headset)
}

#[command]
pub fn change_to_bluetooth(session: State<'_, RouteSession>) -> bool {
    session.switch_to(AudioOutputKind::Bluetooth)
}
