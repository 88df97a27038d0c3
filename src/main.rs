use clap::Parser;
use env_logger::Env;

use glyphgrid::cli::{self, Args, Command};
use glyphgrid::config::Config;

fn load_config(path: Option<&std::path::Path>) -> Config {
    // An explicit --config must exist; the default location may be absent
    if let Some(path) = path {
        if !path.exists() {
            eprintln!("Error: Config file not found: {}", path.display());
            std::process::exit(1);
        }
    }
    match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config_path = args.config.as_deref();

    let result = match args.command {
        Command::Convert {
            source,
            render,
            format,
            output,
        } => {
            let config = load_config(config_path);
            cli::run_convert(&config, &source, &render, format, output.as_deref())
        }
        Command::Interactive { source, render } => {
            let config = load_config(config_path);
            cli::run_interactive(&config, &source, &render)
        }
        Command::Charsets => {
            cli::list_charsets();
            Ok(())
        }
        Command::Config { action } => {
            cli::handle_config_action(action, config_path);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
