mod app;
mod config;
mod frame;
mod integrator;
mod pendulum;
mod render;
mod sim;
mod terminal;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
