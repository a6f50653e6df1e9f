// Tauri build hook; only needed for the desktop shell.
fn main() {
    #[cfg(feature = "tauri-app")]
    tauri_build::build();
}
