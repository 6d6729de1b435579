use client::app::App;

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug)
        .unwrap_or_else(|err| leptos::logging::error!("logger init failed: {err}"));

    log::info!("sketchpad starting");
    leptos::mount::mount_to_body(App);
}
