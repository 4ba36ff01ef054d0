//! Companion characters (personas).

pub mod persona;

pub use persona::CharacterId;
