// Pinmark shared type definitions
// Each submodule defines types used across the client.

pub mod api;
pub mod bookmark;
pub mod errors;
pub mod preferences;
pub mod session;
pub mod settings;
