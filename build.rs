const COMMANDS: &[&str] = &[
    "create_live_activity",
    "update_live_activity",
    "remove_live_activity",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}
