//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the web
//! installer, following Domain-Driven Design principles for better
//! organization and scalability.

pub mod catalog;
pub mod templating;
pub mod tools;
