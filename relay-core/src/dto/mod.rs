//! Data Transfer Objects for the two upstream APIs
//!
//! Only the fields the relay reads or writes are modelled; everything else in
//! the upstream payloads is ignored during deserialization.

pub mod github;
pub mod telegram;
