//! Folio - backend of a personal portfolio site
//!
//! This library provides the blog, gallery and guestbook API, the admin
//! session handling, server-rendered HTML fragments and the particle text
//! effect used on the landing page.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod particles;
pub mod services;
