//! Base components for the EV rental client core
//!
//! Provides the id newtypes shared by every layer ([`generate_id_type!`]) and the
//! [`ObjectStore`] that flow definitions use to look their states and vars up by id or name.

mod errors;
pub use errors::IdError;

pub mod id;

mod object_store;
pub use object_store::{ ObjectStore, ObjectStoreContent };

#[cfg(test)]
mod test;
