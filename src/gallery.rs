//! Gallery folder operations shared by the slideshow and the REST API.
//!
//! Every call resolves the folder fresh through the [`FolderResolver`]; no
//! listing is cached between calls, so concurrent uploads or deletes are seen
//! immediately (and may race with a list-then-fetch sequence).

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::config::{FolderResolver, GALLERY_RELATIVE_PATH};

/// Recognized image extensions (lowercase, without the dot)
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// True when the path ends in one of [`SUPPORTED_EXTENSIONS`] (case-insensitive)
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// MIME type for a gallery file, by extension. Unknown types report JPEG.
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "image/jpeg",
    }
}

/// Gallery operation errors
#[derive(Debug)]
pub enum GalleryError {
    /// Resolver returned nothing, or the path is not a directory
    FolderNotFound,
    /// Filename is empty or not a single plain path component
    InvalidFilename(String),
    ImageNotFound(String),
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl GalleryError {
    /// HTTP status the REST API reports for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GalleryError::FolderNotFound | GalleryError::InvalidFilename(_) => 400,
            GalleryError::ImageNotFound(_) => 404,
            GalleryError::Io { .. } => 500,
        }
    }
}

impl std::fmt::Display for GalleryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GalleryError::FolderNotFound => write!(f, "Configured gallery folder not found"),
            GalleryError::InvalidFilename(name) => write!(f, "Invalid filename: {:?}", name),
            GalleryError::ImageNotFound(name) => write!(f, "Image not found: {}", name),
            GalleryError::Io { action, path, source } => {
                write!(f, "Failed to {} {}: {}", action, path.display(), source)
            }
        }
    }
}

impl std::error::Error for GalleryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GalleryError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Handle to the gallery folder.
///
/// Cheap to clone; the resolver is shared.
#[derive(Clone)]
pub struct Gallery {
    resolver: Arc<dyn FolderResolver>,
    relative: PathBuf,
}

impl Gallery {
    /// Gallery at the standard `static/images/gallery` location
    pub fn new(resolver: Arc<dyn FolderResolver>) -> Self {
        Self::with_relative_path(resolver, GALLERY_RELATIVE_PATH)
    }

    pub fn with_relative_path(resolver: Arc<dyn FolderResolver>, relative: impl Into<PathBuf>) -> Self {
        Self {
            resolver,
            relative: relative.into(),
        }
    }

    /// Resolve the folder without checking that it exists
    pub fn resolve(&self) -> Result<PathBuf, GalleryError> {
        self.resolver
            .resolve_path(&self.relative)
            .ok_or(GalleryError::FolderNotFound)
    }

    /// Resolve the folder and require it to be an existing directory
    pub fn folder(&self) -> Result<PathBuf, GalleryError> {
        let folder = self.resolve()?;
        if !folder.is_dir() {
            return Err(GalleryError::FolderNotFound);
        }
        Ok(folder)
    }

    /// Paths of all recognized images, in directory listing order
    pub fn image_paths(&self) -> Result<Vec<PathBuf>, GalleryError> {
        let folder = self.folder()?;
        let entries = fs::read_dir(&folder).map_err(|source| GalleryError::Io {
            action: "list",
            path: folder.clone(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| GalleryError::Io {
                action: "list",
                path: folder.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() || !is_supported_image(&path) {
                continue;
            }
            // Names must round-trip through the REST API
            if path.file_name().and_then(|n| n.to_str()).is_none() {
                log::debug!("Skipping non UTF-8 file name: {}", path.display());
                continue;
            }
            paths.push(path);
        }
        Ok(paths)
    }

    /// File names of all recognized images
    pub fn list_images(&self) -> Result<Vec<String>, GalleryError> {
        Ok(self
            .image_paths()?
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .collect())
    }

    /// Raw bytes of a file in the folder
    pub fn read_image(&self, filename: &str) -> Result<Vec<u8>, GalleryError> {
        let path = self.existing_file(filename)?;
        fs::read(&path).map_err(|source| GalleryError::Io {
            action: "read",
            path,
            source,
        })
    }

    /// Write a file into the folder, creating the folder first if needed.
    /// An existing file with the same name is overwritten.
    pub fn save_image(&self, filename: &str, data: &[u8]) -> Result<PathBuf, GalleryError> {
        validate_filename(filename)?;
        let folder = self.resolve()?;
        if !folder.exists() {
            fs::create_dir_all(&folder).map_err(|source| GalleryError::Io {
                action: "create",
                path: folder.clone(),
                source,
            })?;
            log::info!("Created gallery folder {}", folder.display());
        }

        let path = folder.join(filename);
        fs::write(&path, data).map_err(|source| GalleryError::Io {
            action: "write",
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Remove a file from the folder
    pub fn delete_image(&self, filename: &str) -> Result<(), GalleryError> {
        let path = self.existing_file(filename)?;
        fs::remove_file(&path).map_err(|source| GalleryError::Io {
            action: "delete",
            path,
            source,
        })
    }

    fn existing_file(&self, filename: &str) -> Result<PathBuf, GalleryError> {
        let folder = self.folder()?;
        validate_filename(filename)?;
        let path = folder.join(filename);
        if !path.is_file() {
            return Err(GalleryError::ImageNotFound(filename.to_string()));
        }
        Ok(path)
    }
}

/// Accept only a single normal path component (no separators, `.` or `..`).
pub fn validate_filename(filename: &str) -> Result<(), GalleryError> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !filename.contains(['/', '\\']) => Ok(()),
        _ => Err(GalleryError::InvalidFilename(filename.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RootResolver;
    use tempfile::TempDir;

    fn gallery_in(temp: &TempDir) -> Gallery {
        Gallery::new(Arc::new(RootResolver::new(temp.path())))
    }

    fn gallery_dir(temp: &TempDir) -> PathBuf {
        let dir = temp.path().join(GALLERY_RELATIVE_PATH);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("a.JPG")));
        assert!(is_supported_image(Path::new("a.Jpeg")));
        assert!(is_supported_image(Path::new("dir/a.bmp")));
        assert!(is_supported_image(Path::new("a.gif")));
        assert!(!is_supported_image(Path::new("a.txt")));
        assert!(!is_supported_image(Path::new("a.tiff")));
        assert!(!is_supported_image(Path::new("png")));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.GIF"), "image/gif");
        assert_eq!(content_type_for("a.bmp"), "image/bmp");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("noext"), "image/jpeg");
    }

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("a.png").is_ok());
        assert!(validate_filename("my photo.jpg").is_ok());
        for bad in ["", ".", "..", "../a.png", "sub/a.png", "/etc/passwd", "..\\a.png"] {
            assert!(
                matches!(validate_filename(bad), Err(GalleryError::InvalidFilename(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_missing_folder() {
        let temp = TempDir::new().unwrap();
        let gallery = gallery_in(&temp);

        assert!(matches!(gallery.list_images(), Err(GalleryError::FolderNotFound)));
        assert!(matches!(gallery.read_image("a.png"), Err(GalleryError::FolderNotFound)));
        assert!(matches!(gallery.delete_image("a.png"), Err(GalleryError::FolderNotFound)));
    }

    #[test]
    fn test_folder_path_is_a_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("static/images");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("gallery"), b"not a dir").unwrap();

        let gallery = gallery_in(&temp);
        assert!(matches!(gallery.folder(), Err(GalleryError::FolderNotFound)));
    }

    #[test]
    fn test_list_filters_extensions_and_dirs() {
        let temp = TempDir::new().unwrap();
        let dir = gallery_dir(&temp);
        fs::write(dir.join("a.png"), b"a").unwrap();
        fs::write(dir.join("B.JPG"), b"b").unwrap();
        fs::write(dir.join("notes.txt"), b"c").unwrap();
        fs::create_dir(dir.join("nested.png")).unwrap();

        let mut images = gallery_in(&temp).list_images().unwrap();
        images.sort();
        assert_eq!(images, vec!["B.JPG".to_string(), "a.png".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_skipped_everywhere() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let dir = gallery_dir(&temp);
        fs::write(dir.join("ok.png"), b"a").unwrap();
        fs::write(dir.join(OsStr::from_bytes(b"bad\xff.png")), b"b").unwrap();

        let gallery = gallery_in(&temp);
        assert_eq!(gallery.list_images().unwrap(), vec!["ok.png".to_string()]);
        assert_eq!(gallery.image_paths().unwrap(), vec![dir.join("ok.png")]);
    }

    #[test]
    fn test_empty_folder_lists_nothing() {
        let temp = TempDir::new().unwrap();
        gallery_dir(&temp);
        assert!(gallery_in(&temp).list_images().unwrap().is_empty());
    }

    #[test]
    fn test_save_creates_folder_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let gallery = gallery_in(&temp);

        let path = gallery.save_image("a.png", b"first").unwrap();
        assert!(path.is_file());
        gallery.save_image("a.png", b"second").unwrap();
        assert_eq!(gallery.read_image("a.png").unwrap(), b"second");
    }

    #[test]
    fn test_delete_then_read_is_not_found() {
        let temp = TempDir::new().unwrap();
        let gallery = gallery_in(&temp);
        gallery.save_image("a.png", b"data").unwrap();

        gallery.delete_image("a.png").unwrap();
        assert!(matches!(gallery.read_image("a.png"), Err(GalleryError::ImageNotFound(_))));
        assert!(matches!(gallery.delete_image("a.png"), Err(GalleryError::ImageNotFound(_))));
    }

    #[test]
    fn test_traversal_is_rejected() {
        let temp = TempDir::new().unwrap();
        gallery_dir(&temp);
        fs::write(temp.path().join("secret.png"), b"secret").unwrap();
        let gallery = gallery_in(&temp);

        let err = gallery.read_image("../../../secret.png").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(gallery.save_image("../x.png", b"x").is_err());
        assert!(temp.path().join("secret.png").exists());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(GalleryError::FolderNotFound.status_code(), 400);
        assert_eq!(GalleryError::ImageNotFound("a".into()).status_code(), 404);
        let io = GalleryError::Io {
            action: "read",
            path: PathBuf::from("a"),
            source: std::io::Error::other("boom"),
        };
        assert_eq!(io.status_code(), 500);
    }
}
