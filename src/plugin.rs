//! Display plugin interface.

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Target display description, handed to plugins as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub resolution: (u32, u32),
    pub orientation: Orientation,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            resolution: (800, 480),
            orientation: Orientation::Horizontal,
        }
    }
}

/// A source of images for the display.
///
/// `generate_image` returns `None` when nothing can be shown; implementations
/// log the reason themselves. `settings` belongs to the caller and must only
/// be modified when an image is returned.
pub trait Plugin {
    fn id(&self) -> &str;

    fn generate_image(&self, settings: &mut Settings, device: &DeviceConfig) -> Option<DynamicImage>;
}
