//! REST API implementation using rouille.
//!
//! # Key types
//!
//! - [`GalleryApi`] - request router, built once at startup and shared by reference
//! - [`GalleryServer`] - binds the router to an address and serves it
//!
//! Handlers run on rouille's worker threads. They share nothing mutable: every
//! request resolves the gallery folder again and works on the filesystem directly.

use std::io::Read;
use std::sync::Arc;

use rouille::{Request, Response};
use serde::Serialize;

use crate::gallery::{Gallery, GalleryError, content_type_for};

const IMAGE_ROUTE: &str = "/gallery/image";
const IMAGE_PREFIX: &str = "/gallery/image/";

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD: &str = "image";

/// Generic API response
#[derive(Serialize)]
struct ApiResponse<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> ApiResponse<'a> {
    fn ok_msg(msg: &'a str) -> Self {
        Self { message: Some(msg), filename: None, error: None }
    }

    fn err(msg: &'a str) -> Self {
        Self { message: None, filename: None, error: Some(msg) }
    }
}

#[derive(Serialize)]
struct ImageList {
    images: Vec<String>,
}

fn error_response(status: u16, msg: &str) -> Response {
    Response::json(&ApiResponse::err(msg)).with_status_code(status)
}

/// Map a gallery error to its JSON error response. `io_msg` is used for 5xx.
fn gallery_error_response(error: &GalleryError, io_msg: &str) -> Response {
    let msg = match error {
        GalleryError::FolderNotFound => "Configured folder not found",
        GalleryError::InvalidFilename(_) => "Invalid filename",
        GalleryError::ImageNotFound(_) => "Image not found",
        GalleryError::Io { .. } => {
            log::error!("{}", error);
            io_msg
        }
    };
    error_response(error.status_code(), msg)
}

/// Router for the gallery endpoints.
///
/// | Method | Path                          | Description              |
/// |--------|-------------------------------|--------------------------|
/// | GET    | `/gallery/image`              | List recognized images   |
/// | GET    | `/gallery/image/{filename}`   | Raw image bytes          |
/// | POST   | `/gallery/image`              | Multipart upload (`image`) |
/// | DELETE | `/gallery/image/{filename}`   | Remove an image          |
pub struct GalleryApi {
    gallery: Gallery,
}

impl GalleryApi {
    pub fn new(gallery: Gallery) -> Self {
        Self { gallery }
    }

    pub fn handle_request(&self, request: &Request) -> Response {
        log::debug!("{} {}", request.method(), request.raw_url());

        // Handle preflight
        if request.method() == "OPTIONS" {
            return Response::empty_204()
                .with_additional_header("Access-Control-Allow-Origin", "*")
                .with_additional_header("Access-Control-Allow-Methods", "GET, POST, DELETE, OPTIONS")
                .with_additional_header("Access-Control-Allow-Headers", "Content-Type");
        }

        self.route(request)
            .with_additional_header("Access-Control-Allow-Origin", "*")
    }

    fn route(&self, request: &Request) -> Response {
        let path = request.url();

        if path == IMAGE_ROUTE {
            return match request.method() {
                "GET" => self.list_images(),
                "POST" => self.upload_image(request),
                _ => error_response(405, "Method not allowed"),
            };
        }

        // Filename segment handled manually, same as the rest of the path
        if let Some(filename) = path.strip_prefix(IMAGE_PREFIX).filter(|f| !f.is_empty()) {
            return match request.method() {
                "GET" => self.get_image(filename),
                "DELETE" => self.delete_image(filename),
                _ => error_response(405, "Method not allowed"),
            };
        }

        error_response(404, "Not found")
    }

    fn list_images(&self) -> Response {
        match self.gallery.list_images() {
            Ok(images) => Response::json(&ImageList { images }),
            Err(e) => gallery_error_response(&e, "Failed to list images"),
        }
    }

    fn get_image(&self, filename: &str) -> Response {
        match self.gallery.read_image(filename) {
            Ok(data) => Response::from_data(content_type_for(filename), data),
            Err(e) => gallery_error_response(&e, "Failed to read image file"),
        }
    }

    fn upload_image(&self, request: &Request) -> Response {
        let (filename, data) = match read_upload(request) {
            Ok(upload) => upload,
            Err(resp) => return resp,
        };

        match self.gallery.save_image(&filename, &data) {
            Ok(path) => {
                log::info!("Uploaded {} ({} bytes)", path.display(), data.len());
                Response::json(&ApiResponse {
                    message: Some("Image uploaded successfully"),
                    filename: Some(filename.as_str()),
                    error: None,
                })
                .with_status_code(201)
            }
            Err(e) => gallery_error_response(&e, "Failed to save image file"),
        }
    }

    fn delete_image(&self, filename: &str) -> Response {
        match self.gallery.delete_image(filename) {
            Ok(()) => {
                log::info!("Deleted {}", filename);
                Response::json(&ApiResponse::ok_msg("Image deleted successfully"))
            }
            Err(e) => gallery_error_response(&e, "Failed to delete image file"),
        }
    }
}

/// Pull the `image` field out of a multipart body: (filename, bytes).
fn read_upload(request: &Request) -> Result<(String, Vec<u8>), Response> {
    let mut multipart = match rouille::input::multipart::get_multipart_input(request) {
        Ok(multipart) => multipart,
        Err(e) => {
            log::debug!("Upload without multipart body: {:?}", e);
            return Err(error_response(400, "No image file provided"));
        }
    };

    while let Some(mut field) = multipart.next() {
        if &*field.headers.name != UPLOAD_FIELD {
            continue;
        }

        // A part without a filename is a plain form value, not a file
        let Some(filename) = field.headers.filename.clone() else {
            continue;
        };
        if filename.is_empty() {
            return Err(error_response(400, "No selected file"));
        }

        let mut data = Vec::new();
        if let Err(e) = field.data.read_to_end(&mut data) {
            log::error!("Failed to read upload body for {}: {}", filename, e);
            return Err(error_response(400, "No image file provided"));
        }
        return Ok((filename, data));
    }

    Err(error_response(400, "No image file provided"))
}

/// HTTP server for a [`GalleryApi`]
pub struct GalleryServer {
    addr: String,
    api: Arc<GalleryApi>,
}

impl GalleryServer {
    pub fn new(addr: impl Into<String>, api: Arc<GalleryApi>) -> Self {
        Self { addr: addr.into(), api }
    }

    /// Serve forever on the calling thread.
    pub fn run(self) -> ! {
        log::info!("Gallery server starting on http://{}", self.addr);

        let api = self.api;
        rouille::start_server(self.addr.as_str(), move |request| api.handle_request(request))
    }
}
