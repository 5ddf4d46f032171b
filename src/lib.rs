//! Folio: Portfolio Contact Form Core
//!
//! The contact form of a single-page portfolio site: field validation, a small
//! submission state machine, and delivery through a transactional email service.

pub mod cli;
pub mod config;
pub mod contact;
pub mod delivery;
pub mod error;
pub mod logging;
