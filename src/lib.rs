//! gallery-folder - folder-backed slideshow plugin and gallery REST API
//!
//! Re-exports all modules for use by the binary target.

pub mod cli;
pub mod config;
pub mod gallery;
pub mod plugin;
pub mod selector;
pub mod server;
pub mod settings;
pub mod slideshow;

pub use config::{FolderResolver, PathConfig, RootResolver};
pub use gallery::{Gallery, GalleryError};
pub use plugin::{DeviceConfig, Plugin};
pub use selector::select_new_index;
pub use server::{GalleryApi, GalleryServer};
pub use settings::Settings;
pub use slideshow::GalleryPlugin;
