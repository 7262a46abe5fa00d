//! Implementation of the `#[derive(Record)]` and `#[derive(FieldEnum)]`
//! macros.
//!
//! `Record` generates a field registry, accessor functions and field name
//! constants from a struct; `FieldEnum` generates the name/code table of a
//! fieldless enum.

mod attrs;
mod case;
mod derive;
mod field_enum;

pub use derive::record_derive_impl;
pub use field_enum::field_enum_derive_impl;
