use std::fmt;
use std::path::Path;

use image::ImageReader;

/// 图片尺寸，按 (宽, 高) 排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

impl Dimension {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Dimension {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.width, self.height)
    }
}

/// 样本关联的三种文件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Image,
    Mask,
    Result,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Image => "image",
            Self::Mask => "mask",
            Self::Result => "result",
        };
        f.write_str(s)
    }
}

/// 单个文件的尺寸探测结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Found(Dimension),
    Absent,
    /// 文件存在但无法解码，附带错误原因
    Unreadable(String),
}

/// 读取图片尺寸，只解析文件头，不解码像素
pub fn probe(path: &Path) -> Probe {
    if !path.exists() {
        return Probe::Absent;
    }
    let reader = match ImageReader::open(path).and_then(|r| r.with_guessed_format()) {
        Ok(reader) => reader,
        Err(e) => return Probe::Unreadable(e.to_string()),
    };
    match reader.into_dimensions() {
        Ok(dim) => Probe::Found(dim.into()),
        Err(e) => Probe::Unreadable(e.to_string()),
    }
}

/// 把一组可能缺失的尺寸格式化为 `(W, H)` 或 `None`
pub fn fmt_opt(dim: Option<Dimension>) -> String {
    match dim {
        Some(d) => format!("({}, {})", d.width, d.height),
        None => "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, RgbImage};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_dimension_order() {
        let mut dims = vec![Dimension::new(1024, 768), Dimension::new(512, 512), Dimension::new(512, 256)];
        dims.sort();
        assert_eq!(dims, vec![
            Dimension::new(512, 256),
            Dimension::new(512, 512),
            Dimension::new(1024, 768)
        ]);
        assert_eq!(Dimension::new(1024, 768).to_string(), "1024 × 768");
    }

    #[test]
    fn test_probe_found() {
        let dir = tempdir().unwrap();
        let jpg = dir.path().join("1.jpg");
        let png = dir.path().join("1.png");
        RgbImage::new(64, 32).save(&jpg).unwrap();
        GrayImage::new(16, 48).save(&png).unwrap();

        assert_eq!(probe(&jpg), Probe::Found(Dimension::new(64, 32)));
        assert_eq!(probe(&png), Probe::Found(Dimension::new(16, 48)));
    }

    #[test]
    fn test_probe_absent_and_unreadable() {
        let dir = tempdir().unwrap();
        assert_eq!(probe(&dir.path().join("nope.png")), Probe::Absent);

        let broken = dir.path().join("broken.png");
        std::fs::write(&broken, b"definitely not a png").unwrap();
        assert!(matches!(probe(&broken), Probe::Unreadable(_)));
    }

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(Dimension::new(3, 4))), "(3, 4)");
        assert_eq!(fmt_opt(None), "None");
    }
}
