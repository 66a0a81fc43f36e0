//! Gym House - gym membership administration backend.
//!
//! Members, membership plans, trainers, workout plans, payments, attendance,
//! fitness goals and public inquiries, served over an axum HTTP API with
//! PostgreSQL persistence.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod startup;
