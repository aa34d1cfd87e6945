const COMMANDS: &[&str] = &["get_sample", "save_image", "write_cache_file", "share_file"];

fn main() {
    tauri_plugin::Builder::new(COMMANDS)
        .android_path("android")
        .ios_path("ios")
        .build();
}
