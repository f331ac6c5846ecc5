//! Conway's Game of Life on an edge-bounded grid where every living cell remembers how
//! many generations it has been alive.
//!
//! The core is pure: [`proc::advance`] computes a generation, [`resize::resize`] maps a
//! grid to another size keeping it centred, and [`pattern`] reads and writes plaintext
//! pattern files. [`session::Session`] and [`draw`] are the terminal front end.

pub mod compat;
pub mod config;
pub mod draw;
pub mod error;
pub mod grid;
pub mod pattern;
pub mod proc;
pub mod resize;
pub mod session;

pub use compat::Compat;
pub use error::{Error, Result};
pub use grid::{Cell, Grid, Rect};
pub use proc::advance;
pub use resize::{embed, resize, resize_with};
