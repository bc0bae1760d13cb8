pub mod body;
pub mod config;
pub mod consts;
pub mod gui;
pub mod render;
pub mod simulation;
