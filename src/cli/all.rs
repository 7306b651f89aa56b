use anyhow::Result;
use clap::Parser;
use log::info;

use crate::check::{FullReport, render_full_summary, run_partitions};
use crate::cli::SubCommandExtend;
use crate::config::Opts;

#[derive(Parser, Debug, Clone)]
pub struct AllCommand {}

impl SubCommandExtend for AllCommand {
    fn run(&self, opts: &Opts) -> Result<()> {
        let layout = opts.layout();
        info!("检查原图、掩码、结果图三者尺寸");

        let reports =
            run_partitions(&layout, &opts.partitions, FullReport::build, FullReport::render)?;

        print!("{}", render_full_summary(&reports));
        Ok(())
    }
}
