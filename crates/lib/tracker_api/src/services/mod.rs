//! Service layer.

pub mod reply;
