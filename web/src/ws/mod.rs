//! WebSocket adapter for the broadcast hub.
//!
//! This module contains only the Axum handler for `/ws`. The hub itself
//! (clients, messages, the control loop) lives in the `hub` crate.

pub mod handler;
