use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use log::info;

use crate::cli::SubCommandExtend;
use crate::config::Opts;
use crate::demo::{DemoMode, find_pairs, render};
use crate::utils::pb_style;

#[derive(Parser, Debug, Clone)]
pub struct DemoCommand {
    /// 动画类型
    #[arg(short, long, value_enum, default_value_t = DemoMode::Comparison)]
    pub mode: DemoMode,
    /// 存放 img_<id>_original.png 与 img_<id>_result.png 的目录
    #[arg(short, long, value_name = "DIR", default_value = "public/results")]
    pub input: PathBuf,
    /// 输出文件，默认为 public/ 下的 demo_video.gif 或 demo_slideshow.gif
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// GIF 量化速度，1 最慢但质量最好，30 最快
    #[arg(long, value_name = "N", default_value_t = 10, value_parser = clap::value_parser!(i32).range(1..=30))]
    pub speed: i32,
}

impl SubCommandExtend for DemoCommand {
    fn run(&self, _opts: &Opts) -> Result<()> {
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from("public").join(self.mode.default_output()));
        let plan = self.mode.plan();

        let pairs = find_pairs(&self.input)?;
        println!("Found {} image pairs", pairs.len());
        info!("生成 {:?} 动画: {}", self.mode, output.display());

        let pb = ProgressBar::new(pairs.len() as u64).with_style(pb_style());
        let summary = render(&pairs, &plan, &output, self.speed, &pb)?;
        pb.finish_with_message("动画生成完成");

        let seconds = summary.written as f32 * plan.display_secs;
        println!("✅ Demo created successfully: {}", output.display());
        println!("Contains {} image pairs ({} skipped)", summary.written, summary.skipped);
        println!("Duration: {} seconds", seconds);
        Ok(())
    }
}
