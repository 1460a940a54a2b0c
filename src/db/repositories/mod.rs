//! Repositories
//!
//! Repository traits and their in-memory implementations.
//! Each repository handles the operations for a specific record type; services
//! only ever see the traits, so a persistent backend can be swapped in.

pub mod blog_post;
pub mod gallery_image;
pub mod message;
pub mod session;
pub mod user;

pub use blog_post::{BlogPostRepository, MemoryBlogPostRepository};
pub use gallery_image::{GalleryImageRepository, MemoryGalleryImageRepository};
pub use message::{MemoryMessageRepository, MessageRepository};
pub use session::{MemorySessionRepository, SessionRepository};
pub use user::{MemoryUserRepository, UserRepository};
