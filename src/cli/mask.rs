use anyhow::Result;
use clap::Parser;
use log::info;

use crate::check::{MaskReport, render_mask_summary, run_partitions};
use crate::cli::SubCommandExtend;
use crate::config::{Opts, parse_size};
use crate::dimension::Dimension;

#[derive(Parser, Debug, Clone)]
pub struct MaskCommand {
    /// 原图与掩码都等于该尺寸时视为完美匹配
    #[arg(short, long, value_name = "WIDTHxHEIGHT", value_parser = parse_size, default_value = "512x512")]
    pub target: Dimension,
}

impl SubCommandExtend for MaskCommand {
    fn run(&self, opts: &Opts) -> Result<()> {
        let layout = opts.layout();
        info!("检查原图与掩码尺寸，目标尺寸 {}", self.target);

        let reports = run_partitions(
            &layout,
            &opts.partitions,
            |samples| MaskReport::build(samples, self.target),
            MaskReport::render,
        )?;

        print!("{}", render_mask_summary(&reports, self.target));
        Ok(())
    }
}
