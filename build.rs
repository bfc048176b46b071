// Commands the plugin registers. Each one gets `allow-*` and `deny-*`
// permissions generated under `permissions/autogenerated`.
#[cfg(feature = "tauri")]
const COMMANDS: &[&str] = &[
    "bootstrap",
    "load_document",
    "show_page",
    "elements_of_current_page",
    "get_page_sizes",
    "publish",
];

fn main() {
    #[cfg(feature = "tauri")]
    tauri_plugin::Builder::new(COMMANDS).build();
}
