pub mod check;
pub mod classify;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod demo;
pub mod dimension;
pub mod utils;

pub use config::{DatasetLayout, Opts};
pub use dimension::Dimension;
