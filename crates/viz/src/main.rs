use std::path::PathBuf;
use std::process;

use anim::theme::ThemeSignal;
use viz::{run_backdrop, SceneConfig, SceneKind};

const USAGE: &str = "usage: backdrop [gridwarp|flow|both] [--config PATH] [--dark] [--glow] [--compact]";

fn parse_args() -> Result<SceneConfig, String> {
    let mut config = SceneConfig::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| "--config requires a path".to_string())?;
                config = SceneConfig::load(&PathBuf::from(path)).map_err(|e| e.to_string())?;
            }
            "--dark" => config.dark = true,
            "--glow" => config.glow = true,
            "--compact" => config.compact = true,
            "--help" | "-h" => return Err(USAGE.to_string()),
            other => match SceneKind::from_arg(other) {
                Some(scene) => config.scene = scene,
                None => return Err(format!("unknown argument '{other}'\n{USAGE}")),
            },
        }
    }

    Ok(config)
}

fn main() {
    env_logger::init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("{msg}");
            process::exit(2);
        }
    };

    let theme = ThemeSignal::new(config.initial_theme());
    log::info!("starting backdrop: {config:?}");

    if let Err(err) = run_backdrop(config, theme) {
        log::error!("backdrop failed: {err}");
        process::exit(1);
    }
}
