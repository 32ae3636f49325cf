//! # nashub-service
//!
//! Business logic service layer for NasHub. Each service combines the
//! authorization policy with one of the stores to implement an
//! application-level use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod share;
pub mod user;

pub use context::RequestContext;
pub use file::FileService;
pub use share::ShareService;
pub use user::AdminUserService;
