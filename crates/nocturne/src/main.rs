mod app;
mod logging;
mod ui;

use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use nocturne_config::{CliArgs, Config};

use crate::app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();

    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => Config::default_path().ok(),
    };
    let mut config = match &path {
        Some(path) => Config::load_or_default(path)
            .wrap_err_with(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);
    config.validate()?;

    if args.init_config {
        let path = path.ok_or_else(|| eyre!("no config directory, pass --config"))?;
        config.save(&path)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    logging::init(&config)?;

    let terminal = ratatui::init();
    let result = App::new(&config).run(terminal);
    ratatui::restore();
    result
}
