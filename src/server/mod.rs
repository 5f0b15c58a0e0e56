//! REST API for managing the gallery folder.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Arc<GalleryApi>   ┌──────────────────────┐
//! │  main()      │ ──────────────────▶ │  GalleryServer       │
//! │  builds the  │                     │  (rouille HTTP,      │
//! │  router once │                     │   worker threads)    │
//! └──────────────┘                     └──────────┬───────────┘
//!                                                 │ per request
//!                                                 ▼
//!                                      Gallery ─▶ FolderResolver ─▶ filesystem
//! ```
//!
//! - **rouille** - sync HTTP server, one handler call per request
//! - **GalleryApi** - immutable router, no shared mutable state
//!
//! # Endpoints
//!
//! | Method | Path                        | Description                   |
//! |--------|-----------------------------|-------------------------------|
//! | GET    | `/gallery/image`            | `{"images": [...]}`           |
//! | GET    | `/gallery/image/{filename}` | Raw bytes                     |
//! | POST   | `/gallery/image`            | Multipart upload, field `image` |
//! | DELETE | `/gallery/image/{filename}` | Remove file                   |
//!
//! Errors are `{"error": "..."}` with 400 (folder missing, bad input),
//! 404 (file missing) or 500 (I/O failure).

mod api;

pub use api::{GalleryApi, GalleryServer, UPLOAD_FIELD};
