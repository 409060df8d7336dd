// Pinmark services
// Stateless or storage-backed helpers: the HTTP client, form validation,
// rendering, stats, view preferences and client settings.

pub mod api_client;
pub mod auth_flows;
pub mod preferences;
pub mod renderer;
pub mod settings_engine;
pub mod stats;
