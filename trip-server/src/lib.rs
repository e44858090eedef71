//! Electric vehicle trip planner server.
//!
//! Estimates how long an EV trip takes once charging stops are counted,
//! and finds charging stations near a point.

pub mod cache;
pub mod config;
pub mod domain;
pub mod opendata;
pub mod planner;
pub mod stations;
pub mod web;
