//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and backend access so route handlers can
//! stay focused on request decoding and response shape.

pub mod directory;
pub mod intake;
