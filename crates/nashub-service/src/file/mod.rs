//! File browsing and transfer.

pub mod service;

pub use service::{DirectoryListing, Download, FileService, UploadedFile};
