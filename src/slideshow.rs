//! Folder slideshow plugin.
//!
//! Each call to [`GalleryPlugin::generate_image`] picks a random image from
//! the gallery folder, different from the one shown last time, and records
//! the new position in the caller's settings.

use image::DynamicImage;

use crate::gallery::Gallery;
use crate::plugin::{DeviceConfig, Plugin};
use crate::selector::select_new_index;
use crate::settings::Settings;

pub struct GalleryPlugin {
    gallery: Gallery,
}

impl GalleryPlugin {
    pub const ID: &'static str = "gallery_folder";

    pub fn new(gallery: Gallery) -> Self {
        Self { gallery }
    }
}

impl Plugin for GalleryPlugin {
    fn id(&self) -> &str {
        Self::ID
    }

    fn generate_image(&self, settings: &mut Settings, _device: &DeviceConfig) -> Option<DynamicImage> {
        let current = settings.image_index();

        let images = match self.gallery.image_paths() {
            Ok(images) => images,
            Err(e) => {
                log::error!("Gallery unavailable: {}", e);
                return None;
            }
        };
        if images.is_empty() {
            log::error!("No images found in gallery folder");
            return None;
        }

        let index = select_new_index(current, images.len());
        let path = &images[index];

        let image = match image::open(path) {
            Ok(image) => image,
            Err(e) => {
                log::error!("Error opening image {}: {}", path.display(), e);
                return None;
            }
        };

        log::info!(
            "Slideshow: {} -> {} ({}, {}x{})",
            current,
            index,
            path.display(),
            image.width(),
            image.height()
        );
        settings.set_image_index(index);
        Some(image)
    }
}
