//! Level-based Snake on a fixed 20×20 grid.
//!
//! The game rules live in [`game`], driven by the timer-owning
//! [`controller::Controller`]. Drawing and input sit behind the
//! [`controller::Renderer`] and [`controller::InputSource`] traits, with
//! terminal implementations in [`renderer`] and [`input`].

pub mod config;
pub mod controller;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod rng;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod theme;
pub mod timer;
pub mod ui;
pub mod wall;
