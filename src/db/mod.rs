//! Principal storage.
//!
//! A thin libsql-backed store for registered users. Business entities
//! (products, shops, inventory) live in their own services and are not part
//! of this crate.

pub mod store;

pub use store::{User, UserStore};
