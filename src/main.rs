mod api;
mod app;
mod calibration;
mod components;
mod navigation;
mod objects;
mod pages;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
