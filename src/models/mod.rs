//! Data models
//!
//! This module contains all data structures used throughout the Folio site.
//! Models represent:
//! - Stored records (User, Session, BlogPost, GalleryImage, Message)
//! - Inputs accepted by the services

mod blog_post;
mod gallery_image;
mod message;
mod session;
mod user;

pub use blog_post::{BlogPost, CreateBlogPostInput, UpdateBlogPostInput};
pub use gallery_image::{CreateGalleryImageInput, GalleryImage};
pub use message::{CreateMessageInput, Message};
pub use session::Session;
pub use user::User;
