//! Configuration management for idealab.
//!
//! This crate handles loading and saving `.idealab/config.yaml`, layering
//! `IDEALAB_*` environment overrides on top, and discovering the `.idealab/`
//! directory in the filesystem.

pub mod config;
pub mod lab_dir;
