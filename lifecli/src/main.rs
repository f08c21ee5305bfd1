use std::env;

use config::Config;
use liblife::Grid;
use session::Session;

mod cli;
mod config;
mod session;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = env::args().skip(1);

    let grid = match args.next().filter(|seed| seed != "-") {
        Some(seed) => session::load_seed(&seed)?,
        None => Grid::empty(),
    };

    let config = if let Some(config_path) = args.next() {
        Config::load(config_path)?
    } else {
        Config::default()
    };

    log::info!(
        "starting with population {} under {}",
        grid.population(),
        config.rule
    );

    cli::run_cli(Session::new(config, grid))
}
