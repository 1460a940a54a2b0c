//! Services layer - Business logic
//!
//! This module contains all business logic services for the Folio site.
//! Services are responsible for:
//! - Implementing business rules
//! - Coordinating between repositories and the upload directory
//! - Handling validation and error cases

pub mod blog;
pub mod content;
pub mod fragments;
pub mod gallery;
pub mod message;
pub mod password;
pub mod upload;
pub mod user;

pub use blog::BlogService;
pub use content::ContentError;
pub use fragments::FragmentRenderer;
pub use gallery::GalleryService;
pub use message::MessageService;
pub use password::{hash_password, hash_password_with_cost, verify_password};
pub use upload::{UploadStore, UploadedFile};
pub use user::{LoginInput, UserService, UserServiceError};
