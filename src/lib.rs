#![doc = include_str!("../README.md")]

pub mod api;
pub mod cli;
pub mod error;
pub mod runtime;
pub mod services;
pub mod tools;
pub mod types;


pub use error::*;
pub use services::*;
pub use tools::compare::non_followers;
pub use tools::normalize::{normalize, NormalizationResult, NormalizeError};
pub use types::*;
