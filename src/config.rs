use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::cli::*;
use crate::dimension::Dimension;

#[derive(Parser, Debug, Clone)]
#[command(name = "datacheck", version)]
pub struct Opts {
    #[command(subcommand)]
    pub subcmd: SubCommand,
    /// 数据集根目录，包含 Dataset/ 与结果目录
    #[arg(short, long, global = true, value_name = "DIR", default_value = ".")]
    pub base_dir: PathBuf,
    /// 结果图所在目录名，位于根目录之下
    #[arg(long, global = true, value_name = "NAME", default_value = "PANDORA")]
    pub results_root: String,
    /// 需要检查的数据集分区，多个分区用逗号分隔
    #[arg(
        short,
        long = "partition",
        global = true,
        value_name = "NAME",
        value_delimiter = ',',
        default_value = "type1,type2,type3"
    )]
    pub partitions: Vec<String>,
}

impl Opts {
    pub fn layout(&self) -> DatasetLayout {
        DatasetLayout::new(self.base_dir.clone(), self.results_root.clone())
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubCommand {
    /// 检查原图与掩码尺寸是否一致，并找出目标尺寸的样本
    Mask(MaskCommand),
    /// 检查原图、掩码、结果图三者尺寸是否一致
    All(AllCommand),
    /// 将原图与结果图拼接成对比动画
    Demo(DemoCommand),
}

/// 数据集目录结构
///
/// ```text
/// <base>/Dataset/Dataset_<partition>/Images/<name>.jpg
/// <base>/Dataset/Dataset_<partition>/Masks/<name>.png
/// <base>/<results_root>/Dataset_<partition>/<name>.png
/// ```
#[derive(Debug, Clone)]
pub struct DatasetLayout {
    base: PathBuf,
    results_root: String,
}

impl DatasetLayout {
    pub fn new(base: PathBuf, results_root: String) -> Self {
        Self { base, results_root }
    }

    pub fn base(&self) -> &Path {
        self.base.as_path()
    }

    fn partition_dir(&self, partition: &str) -> PathBuf {
        self.base.join("Dataset").join(format!("Dataset_{}", partition))
    }

    /// 返回原图目录
    pub fn images_dir(&self, partition: &str) -> PathBuf {
        self.partition_dir(partition).join("Images")
    }

    /// 返回掩码目录
    pub fn masks_dir(&self, partition: &str) -> PathBuf {
        self.partition_dir(partition).join("Masks")
    }

    /// 返回结果图目录
    pub fn results_dir(&self, partition: &str) -> PathBuf {
        self.base.join(&self.results_root).join(format!("Dataset_{}", partition))
    }

    pub fn mask_file(&self, partition: &str, name: &str) -> PathBuf {
        self.masks_dir(partition).join(format!("{}.png", name))
    }

    pub fn result_file(&self, partition: &str, name: &str) -> PathBuf {
        self.results_dir(partition).join(format!("{}.png", name))
    }
}

pub fn parse_size(s: &str) -> anyhow::Result<Dimension> {
    let parts: Vec<&str> = s.split(['x', 'X']).collect();
    if parts.len() != 2 {
        return Err(anyhow::anyhow!("无效的尺寸: {}", s));
    }
    let dim = Dimension::new(parts[0].trim().parse()?, parts[1].trim().parse()?);
    if dim.width == 0 || dim.height == 0 {
        return Err(anyhow::anyhow!("尺寸必须为正数: {}", s));
    }
    Ok(dim)
}
