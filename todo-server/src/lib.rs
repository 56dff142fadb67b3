//! HTTP front end for the to-do tracker.
pub mod config;
pub mod todo;
pub mod web;
