//! SeaORM entities for the blog schema plus connection helpers.
//!
//! Entities mirror the tables created by the `migration` crate:
//! `author`, `post`, `tag` and the `post_tag` join table.

pub mod errors;
pub mod db;
pub mod author;
pub mod post;
pub mod tag;
pub mod post_tag;

#[cfg(test)]
mod tests;
