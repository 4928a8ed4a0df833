//! Maven repository protocol: repository layout, POM parsing, version
//! listings, blocking downloads, a project-local POM cache, and
//! authentication.

pub mod auth;
pub mod cache;
pub mod download;
pub mod metadata;
pub mod pom;
pub mod repository;

mod xml;
