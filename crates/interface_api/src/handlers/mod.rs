//! Request handlers

pub mod faraid;
pub mod health;
