#![allow(dead_code)]

pub mod engine;
pub mod error;
pub mod games;

pub mod prelude {
    pub use super::engine::prelude::*;
    pub use super::error::{Error, Result};
}
