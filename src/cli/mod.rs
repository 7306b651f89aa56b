mod all;
mod demo;
mod mask;

pub use all::*;
pub use demo::*;
pub use mask::*;

use crate::config::Opts;

pub trait SubCommandExtend {
    fn run(&self, opts: &Opts) -> anyhow::Result<()>;
}
