use gallery_folder::cli::{Args, Command};
use gallery_folder::config::{self, LOG_FILE, PathConfig, RootResolver, SETTINGS_FILE};
use gallery_folder::{DeviceConfig, Gallery, GalleryApi, GalleryPlugin, GalleryServer, Plugin, Settings};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let args = Args::parse();

    let path_config = PathConfig::from_env_and_cli(args.config_dir.clone());
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }

    if let Err(e) = init_logging(&args, &path_config) {
        eprintln!("Warning: {:#}", e);
    }
    debug!("Command-line args: {:?}", args);

    match run(args, &path_config) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Console logging respects RUST_LOG; `--log` writes to a file instead.
/// 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
fn init_logging(args: &Args, path_config: &PathConfig) -> Result<()> {
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .clone()
            .unwrap_or_else(|| config::data_file(LOG_FILE, path_config));

        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("tiny_http", log::LevelFilter::Warn)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("tiny_http", log::LevelFilter::Warn)
            .format_timestamp_millis()
            .init();
    }

    Ok(())
}

fn run(args: Args, path_config: &PathConfig) -> Result<ExitCode> {
    let resolver = RootResolver::from_env_and_cli(args.root)?;
    info!("Gallery root: {}", resolver.root().display());
    let gallery = Gallery::new(Arc::new(resolver));

    match args.command {
        Command::Serve { host, port } => {
            let api = Arc::new(GalleryApi::new(gallery));
            GalleryServer::new(format!("{}:{}", host, port), api).run()
        }
        Command::Next { settings } => {
            let settings_path: PathBuf =
                settings.unwrap_or_else(|| config::data_file(SETTINGS_FILE, path_config));
            let mut settings = Settings::load(&settings_path)?;

            let plugin = GalleryPlugin::new(gallery);
            let Some(image) = plugin.generate_image(&mut settings, &DeviceConfig::default()) else {
                eprintln!("No image available (see log for details)");
                return Ok(ExitCode::from(2));
            };

            settings.save(&settings_path)?;
            println!(
                "image_index={} ({}x{})",
                settings.image_index(),
                image.width(),
                image.height()
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::List => {
            let images = gallery.list_images().context("Failed to list gallery")?;
            if images.is_empty() {
                println!("no images in gallery");
            }
            for name in images {
                println!("{}", name);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
