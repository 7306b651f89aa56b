//! 原图与结果图的左右对比动画
//!
//! 输出为循环播放的 GIF，由纯 Rust 编码，不依赖外部进程。

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use clap::ValueEnum;
use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::{self, FilterType};
use image::{Delay, DynamicImage, Frame, ImageError, RgbImage};
use indicatif::ProgressBar;
use log::{debug, warn};
use regex::Regex;
use thiserror::Error;
use walkdir::WalkDir;

use crate::dimension::Dimension;
use crate::utils::cmp_names;

static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^img_(?<id>.+)_(?<kind>original|result)\.png$").expect("failed to build regex")
});

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("results directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("No images found in results directory: {}", .0.display())]
    NoPairs(PathBuf),
    #[error("failed to list {}: {}", .0.display(), .1)]
    Walk(PathBuf, #[source] walkdir::Error),
    #[error("no frame was written, every pair failed to load")]
    NoFrames,
    #[error(transparent)]
    Encode(#[from] ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// 一组同编号的原图与结果图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub id: String,
    pub original: PathBuf,
    pub result: PathBuf,
}

/// 在目录中寻找 `img_<id>_original.png` 与 `img_<id>_result.png`，按编号配对排序
pub fn find_pairs(dir: &Path) -> Result<Vec<ImagePair>, DemoError> {
    if !dir.is_dir() {
        return Err(DemoError::MissingDirectory(dir.to_path_buf()));
    }

    let mut found: BTreeMap<String, (Option<PathBuf>, Option<PathBuf>)> = BTreeMap::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| DemoError::Walk(dir.to_path_buf(), e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();
        let Some(caps) = PAIR_RE.captures(&file_name) else {
            continue;
        };
        let slot = found.entry(caps["id"].to_string()).or_default();
        match &caps["kind"] {
            "original" => slot.0 = Some(entry.into_path()),
            _ => slot.1 = Some(entry.into_path()),
        }
    }

    let mut pairs = vec![];
    for (id, slot) in found {
        match slot {
            (Some(original), Some(result)) => pairs.push(ImagePair { id, original, result }),
            (Some(_), None) => warn!("缺少结果图: img_{}_result.png", id),
            (None, Some(_)) => warn!("缺少原图: img_{}_original.png", id),
            (None, None) => unreachable!(),
        }
    }
    if pairs.is_empty() {
        return Err(DemoError::NoPairs(dir.to_path_buf()));
    }

    pairs.sort_by(|a, b| cmp_names(&a.id, &b.id));
    Ok(pairs)
}

/// 左右拼接，两侧都缩放到 `size`
pub fn compose(original: &RgbImage, result: &RgbImage, size: Dimension) -> RgbImage {
    let fit = |img: &RgbImage| -> RgbImage {
        if img.dimensions() == (size.width, size.height) {
            img.clone()
        } else {
            imageops::resize(img, size.width, size.height, FilterType::Triangle)
        }
    };

    let mut canvas = RgbImage::new(size.width * 2, size.height);
    imageops::replace(&mut canvas, &fit(original), 0, 0);
    imageops::replace(&mut canvas, &fit(result), size.width as i64, 0);
    canvas
}

/// 按比例压暗到黑色
pub fn fade(frame: &RgbImage, alpha: f32) -> RgbImage {
    let alpha = alpha.clamp(0.0, 1.0);
    let mut out = frame.clone();
    for px in out.pixels_mut() {
        for c in px.0.iter_mut() {
            *c = (*c as f32 * alpha) as u8;
        }
    }
    out
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoMode {
    /// 每组图片静止展示 3 秒
    Comparison,
    /// 每组图片展示 3 秒，最后 0.5 秒淡出
    Slideshow,
}

impl DemoMode {
    pub fn plan(&self) -> FramePlan {
        match self {
            Self::Comparison => FramePlan { fps: 2, display_secs: 3.0, transition_secs: 0.0 },
            Self::Slideshow => FramePlan { fps: 30, display_secs: 3.0, transition_secs: 0.5 },
        }
    }

    pub fn default_output(&self) -> &'static str {
        match self {
            Self::Comparison => "demo_video.gif",
            Self::Slideshow => "demo_slideshow.gif",
        }
    }
}

/// 连续若干个相同的帧，GIF 中合并为一帧
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    pub alpha: f32,
    pub frames: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePlan {
    pub fps: u32,
    pub display_secs: f32,
    pub transition_secs: f32,
}

impl FramePlan {
    pub fn frames_per_pair(&self) -> u32 {
        (self.display_secs * self.fps as f32) as u32
    }

    pub fn steps(&self) -> Vec<FrameStep> {
        let total = self.frames_per_pair();
        let transition = ((self.transition_secs * self.fps as f32) as u32).min(total);

        let mut steps = vec![];
        if total > transition {
            steps.push(FrameStep { alpha: 1.0, frames: total - transition });
        }
        for k in 0..transition {
            steps.push(FrameStep { alpha: 1.0 - k as f32 / transition as f32, frames: 1 });
        }
        steps
    }

    /// 每一步及其 GIF 延迟
    ///
    /// GIF 延迟以厘秒为单位，舍入误差累积到下一步，保证每组总时长准确。
    pub fn timed_steps(&self) -> Vec<(FrameStep, Delay)> {
        let mut elapsed_frames = 0;
        let mut emitted_cs = 0;
        self.steps()
            .into_iter()
            .map(|step| {
                elapsed_frames += step.frames;
                let target_cs = (elapsed_frames * 100 + self.fps / 2) / self.fps;
                let cs = target_cs - emitted_cs;
                emitted_cs = target_cs;
                (step, Delay::from_numer_denom_ms(cs * 10, 1))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSummary {
    pub pairs: usize,
    pub written: usize,
    pub skipped: usize,
}

fn load_rgb(path: &Path) -> Result<RgbImage, ImageError> {
    Ok(image::open(path)?.into_rgb8())
}

/// 逐组拼接并写入 GIF
///
/// 帧尺寸取自第一张可读的原图，无法读取的图片组会被跳过。
pub fn render(
    pairs: &[ImagePair],
    plan: &FramePlan,
    output: &Path,
    speed: i32,
    pb: &ProgressBar,
) -> Result<DemoSummary, DemoError> {
    if pairs.is_empty() {
        return Err(DemoError::NoPairs(output.to_path_buf()));
    }

    let steps = plan.timed_steps();
    let mut size: Option<Dimension> = None;
    let mut summary = DemoSummary { pairs: pairs.len(), written: 0, skipped: 0 };

    {
        let file = BufWriter::new(File::create(output)?);
        let mut encoder = GifEncoder::new_with_speed(file, speed);
        encoder.set_repeat(Repeat::Infinite)?;

        for pair in pairs {
            pb.set_message(format!("img_{}", pair.id));
            let loaded = load_rgb(&pair.original).and_then(|original| {
                let frame_size = *size.get_or_insert_with(|| {
                    let first: Dimension = original.dimensions().into();
                    debug!("单侧帧尺寸: {}", first);
                    first
                });
                Ok((original, load_rgb(&pair.result)?, frame_size))
            });
            let (original, result, size) = match loaded {
                Ok(v) => v,
                Err(e) => {
                    pb.suspend(|| {
                        eprintln!(
                            "Error loading images: {}, {}: {}",
                            pair.original.display(),
                            pair.result.display(),
                            e
                        )
                    });
                    summary.skipped += 1;
                    pb.inc(1);
                    continue;
                }
            };

            let composite = compose(&original, &result, size);
            for (step, delay) in &steps {
                let frame = if step.alpha < 1.0 { fade(&composite, step.alpha) } else { composite.clone() };
                let rgba = DynamicImage::ImageRgb8(frame).into_rgba8();
                encoder.encode_frame(Frame::from_parts(rgba, 0, 0, *delay))?;
            }
            summary.written += 1;
            pb.inc(1);
        }
    }

    if summary.written == 0 {
        if let Err(e) = std::fs::remove_file(output) {
            warn!("无法删除空的输出文件 {}: {}", output.display(), e);
        }
        return Err(DemoError::NoFrames);
    }
    Ok(summary)
}
