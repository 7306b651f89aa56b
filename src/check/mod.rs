//! 分区统计与文本报告

use std::fmt::{self, Write};

use anyhow::{Result, bail};
use log::info;

use crate::classify::MissingList;
use crate::config::DatasetLayout;
use crate::dataset::{SampleDims, scan};
use crate::dimension::{Artifact, fmt_opt};
use crate::utils::percent;

mod full;
mod mask;

pub use full::*;
pub use mask::*;

const RULE_WIDTH: usize = 80;

/// 粗分隔线和标题
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{title}\n{rule}\n")
}

/// 小节标题和细分隔线
pub fn section(title: &str) -> String {
    format!("{}\n{}\n", title, "-".repeat(RULE_WIDTH))
}

/// 分区内各分类的数量
#[derive(Debug, Clone, PartialEq)]
pub struct Tally {
    pub total: usize,
    pub rows: Vec<(String, usize)>,
}

impl Tally {
    pub fn percent_of(&self, count: usize) -> f64 {
        percent(count, self.total)
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Total files: {}", self.total)?;
        for (label, count) in &self.rows {
            writeln!(f, "  {}: {} ({:.1}%)", label, count, self.percent_of(*count))?;
        }
        Ok(())
    }
}

/// 依次检查每个分区，目录缺失或为空的分区会被跳过
///
/// 每个分区的报告会在检查完后立即输出，返回值用于最后的汇总。
pub fn run_partitions<R>(
    layout: &DatasetLayout,
    partitions: &[String],
    build: impl Fn(Vec<SampleDims>) -> R,
    render: impl Fn(&R) -> String,
) -> Result<Vec<(String, R)>> {
    if !layout.base().exists() {
        bail!("Base directory not found: {}", layout.base().display());
    }

    let mut reports = vec![];
    for partition in partitions {
        println!();
        print!("{}", banner(&format!("DATASET TYPE: {}", partition.to_uppercase())));
        println!();

        let samples = match scan(layout, partition) {
            Ok(samples) => samples,
            Err(e) => {
                println!("❌ {}", e);
                continue;
            }
        };
        println!("Found {} images to check\n", samples.len());
        info!("分区 {} 检查完成", partition);

        let report = build(samples);
        print!("{}", render(&report));
        reports.push((partition.clone(), report));
    }
    Ok(reports)
}

/// 输出前 `limit` 行，剩余的以 `... and N more` 结尾
fn write_limited<T>(
    out: &mut String,
    items: &[T],
    limit: usize,
    mut line: impl FnMut(&mut String, &T) -> fmt::Result,
) -> fmt::Result {
    if items.is_empty() {
        return writeln!(out, "  None");
    }
    for item in items.iter().take(limit) {
        line(out, item)?;
    }
    if items.len() > limit {
        writeln!(out, "  ... and {} more", items.len() - limit)?;
    }
    Ok(())
}

fn write_missing(out: &mut String, missing: &[(SampleDims, Vec<Artifact>)]) -> fmt::Result {
    write_limited(out, missing, 10, |out, (sample, artifacts)| {
        writeln!(out, "  {:>3}: {}", sample.name, MissingList(artifacts))
    })
}

/// 三个尺寸一行，带上分类说明
fn write_triple(out: &mut String, sample: &SampleDims, qualifier: Option<&str>) -> fmt::Result {
    write!(
        out,
        "  {:>3}: Image={}, Mask={}, Result={}",
        sample.name,
        fmt_opt(sample.original),
        fmt_opt(sample.mask),
        fmt_opt(sample.result)
    )?;
    match qualifier {
        Some(q) => writeln!(out, " ({})", q),
        None => writeln!(out),
    }
}
