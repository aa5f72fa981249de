#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod battlefield;
mod cell;
#[cfg(feature = "std")]
pub mod client;
mod common;
mod config;
pub mod domain;
mod flags;
mod game;
#[cfg(feature = "std")]
mod logging;
mod player;
#[cfg(feature = "std")]
pub mod protocol;
pub mod prelude;
mod ship;
#[cfg(feature = "std")]
pub mod stub;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;
mod validate;

pub use battlefield::*;
pub use cell::*;
#[cfg(feature = "std")]
pub use client::GameClient;
pub use common::*;
pub use config::*;
pub use flags::CellFlags;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
pub use player::*;
#[cfg(feature = "std")]
pub use protocol::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use stub::RemoteApi;
#[cfg(feature = "std")]
pub use ui::*;
pub use validate::*;
