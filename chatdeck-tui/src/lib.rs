#![allow(clippy::too_many_arguments, clippy::manual_clamp)]

pub mod app;
pub mod events;
pub mod theme;
pub mod ui;
