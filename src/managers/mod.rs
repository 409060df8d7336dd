// Pinmark state managers
// Managers own the client's mutable state: session, bookmark list, reorder gesture.

pub mod bookmark_list;
pub mod reorder_controller;
pub mod session_manager;
