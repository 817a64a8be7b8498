//! Relay Core
//!
//! Core types shared by the Telegram → GitHub Actions relay.
//!
//! This crate contains:
//! - Domain types: repository registry, workflow descriptors, callback payloads
//! - DTOs: wire shapes for the Telegram Bot API and the GitHub REST API

pub mod domain;
pub mod dto;
