//! voxplay — core library for the voice-controllable music player.
//!
//! Catalog, playlist, and playback-control logic lives here.
//! The CLI and the Tauri GUI consume this crate.

pub mod app_core;
pub mod audio_thread;
pub mod catalog;
pub mod dispatch;
pub mod library;
pub mod notify;
pub mod player;
pub mod playlist;
pub mod track;
pub mod voice;
