const COMMANDS: &[&str] = &[
    "get_current_output",
    "get_available_inputs",
    "change_to_receiver",
    "change_to_speaker",
    "change_to_headphones",
    "change_to_bluetooth",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS)
        .android_path("android")
        .build();
}
