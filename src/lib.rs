//! Pinmark — client core for a personal bookmark manager.
//!
//! Holds the session, keeps the bookmark list in sync with the REST API,
//! renders it for a host view and drives the login, register and account
//! flows. The host talks to it through [`ui::Frontend`] and, out of process,
//! through the `pinmark-rpc` line protocol.

pub mod app;
pub mod database;
pub mod flow;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
pub mod ui;
