//! Command-line interface for training and playing against TD agents

pub mod commands;
pub mod output;
