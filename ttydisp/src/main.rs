use std::process::ExitCode;

mod app;
mod cli;
mod config;
mod context;
mod error;
mod logger;
mod playback;
mod render;
mod signal;
mod terminal;

fn main() -> ExitCode {
    ExitCode::from(app::run())
}
