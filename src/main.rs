mod api;
mod app;
mod components;
mod config;
mod envelope;
mod error;
mod hooks;
mod identity;
mod models;
mod period;
mod screens;
mod session;
#[cfg(test)]
mod testing;
mod toast;
mod transport;
mod validation;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("expense tracker starting");
    yew::Renderer::<app::App>::new().render();
}
