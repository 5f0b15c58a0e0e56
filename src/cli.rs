use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Build version with format info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Formats: png, jpg, jpeg, bmp, gif\n",
    "Target:  ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Folder slideshow and gallery REST API
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Base directory holding static/images/gallery (default: GALLERY_ROOT or current dir)
    #[arg(short = 'r', long = "root", value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Custom directory for settings and logs (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Enable logging to file (default: gallery.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE", global = true)]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the gallery REST API
    Serve {
        /// Interface to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short = 'p', long, default_value_t = 9876)]
        port: u16,
    },

    /// Pick the next slideshow image and remember it
    Next {
        /// Settings file (default: gallery_settings.json in the data dir)
        #[arg(short = 's', long = "settings", value_name = "FILE")]
        settings: Option<PathBuf>,
    },

    /// Print the recognized images in the gallery folder
    List,
}
