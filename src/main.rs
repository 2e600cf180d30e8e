mod components;
mod game;
mod schedule;

fn main() {
    yew::start_app::<components::app::App>();
}
