//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Administrator endpoints (accounts, requests).
pub mod admin;
/// Authentication handlers (login, logout).
pub mod auth;
/// Bulletin board handlers.
pub mod bulletin;
/// Public certification catalog.
pub mod catalog;
/// Chat assistant handlers.
pub mod chat;
/// Liveness probe.
pub mod health;
/// Session and navigation handlers.
pub mod session;
/// Student endpoints.
pub mod student;
/// Teacher endpoints.
pub mod teacher;
/// Stateless view resolution.
pub mod views;
