#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

pub mod board;
pub mod catalog;
pub mod collision;
pub mod common;
pub mod digits;
pub mod frame;
pub mod game;
pub mod input;
pub mod log;
pub mod mask;
pub mod piece;
pub mod scoring;
pub mod shell;

pub use game::{Outcome, Phase, Stacker};
pub use input::Buttons;
