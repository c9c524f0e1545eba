pub mod combat;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod input;
pub mod movement;
pub mod render;
pub mod ship;
pub mod spawner;
