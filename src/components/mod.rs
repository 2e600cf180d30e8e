pub mod app;
pub mod block;
pub mod game;
pub mod progress;
