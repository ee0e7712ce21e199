//! Freelance Rate Engine
//!
//! This crate derives a freelancer's hourly rate from living costs, savings and
//! tax margins and a work schedule, applies situational multipliers, and adjusts
//! the result for the location of a remote client.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
