//! Webhook handling for GitHub push events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Typed parsing of push-event payloads

pub mod events;
pub mod signature;

pub use events::{PushCommit, PushEvent};
pub use signature::{
    compute_signature, format_signature_header, parse_signature_header, verify_signature,
};
