const COMMANDS: &[&str] = &["routes"];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}
