use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::DatasetLayout;
use crate::dimension::{Dimension, Probe, probe};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Images directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("No images found in {}", .0.display())]
    Empty(PathBuf),
    #[error("failed to list {}: {}", .0.display(), .1)]
    Walk(PathBuf, #[source] walkdir::Error),
}

/// 一个样本的三个尺寸
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleDims {
    pub name: String,
    pub original: Option<Dimension>,
    pub mask: Option<Dimension>,
    pub result: Option<Dimension>,
}

/// 列出分区内所有原图 (*.jpg)，按文件名排序，返回 (样本名, 路径)
pub fn list_samples(images_dir: &Path) -> Result<Vec<(String, PathBuf)>, DatasetError> {
    if !images_dir.is_dir() {
        return Err(DatasetError::MissingDirectory(images_dir.to_path_buf()));
    }

    let mut entries = vec![];
    for entry in WalkDir::new(images_dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| DatasetError::Walk(images_dir.to_path_buf(), e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        let is_jpg = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("jpg"))
            .unwrap_or(false);
        if !is_jpg {
            continue;
        }
        let Some(stem) = path.file_stem() else {
            continue;
        };
        entries.push((stem.to_string_lossy().to_string(), path));
    }

    if entries.is_empty() {
        return Err(DatasetError::Empty(images_dir.to_path_buf()));
    }
    Ok(entries)
}

/// 探测尺寸，无法读取的文件输出诊断信息后按缺失处理
pub fn probe_reported(path: &Path) -> Option<Dimension> {
    match probe(path) {
        Probe::Found(dim) => Some(dim),
        Probe::Absent => {
            debug!("文件不存在: {}", path.display());
            None
        }
        Probe::Unreadable(cause) => {
            eprintln!("Error reading {}: {}", path.display(), cause);
            None
        }
    }
}

/// 扫描一个分区，按原图文件名顺序返回每个样本的尺寸
pub fn scan(layout: &DatasetLayout, partition: &str) -> Result<Vec<SampleDims>, DatasetError> {
    let images_dir = layout.images_dir(partition);
    let samples = list_samples(&images_dir)?;
    debug!("分区 {} 共 {} 个样本", partition, samples.len());

    Ok(samples
        .into_iter()
        .map(|(name, image_path)| SampleDims {
            original: probe_reported(&image_path),
            mask: probe_reported(&layout.mask_file(partition, &name)),
            result: probe_reported(&layout.result_file(partition, &name)),
            name,
        })
        .collect())
}
