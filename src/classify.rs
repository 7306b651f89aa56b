//! 根据原图、掩码、结果图的尺寸对样本分类
//!
//! 两种分类方式都是纯函数，同样的输入永远得到同样的结果。

use std::fmt;

use crate::dimension::{Artifact, Dimension};

/// 默认的目标尺寸
pub const DEFAULT_TARGET: Dimension = Dimension::new(512, 512);

/// 只比较原图和掩码，结果图的尺寸仅作参考
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskMatch {
    /// 原图或掩码缺失（或无法读取）
    Missing(Vec<Artifact>),
    /// 原图 = 掩码 = 目标尺寸
    Perfect,
    /// 原图 = 掩码，但不是目标尺寸
    Other(Dimension),
    NoMatch,
}

/// 要求原图、掩码、结果图三者尺寸一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FullMatch {
    Missing(Vec<Artifact>),
    All(Dimension),
    /// 仅原图和掩码一致
    Partial,
    NoMatch,
}

impl FullMatch {
    /// 分类附带的说明
    pub fn qualifier(&self) -> Option<&'static str> {
        match self {
            Self::Partial => Some("original-mask match"),
            Self::NoMatch => Some("all different"),
            _ => None,
        }
    }
}

/// 缺失文件列表，格式为 `Missing: image, mask`
pub struct MissingList<'a>(pub &'a [Artifact]);

impl fmt::Display for MissingList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Missing: ")?;
        for (i, artifact) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", artifact)?;
        }
        Ok(())
    }
}

fn missing_of(candidates: &[(Artifact, Option<Dimension>)]) -> Vec<Artifact> {
    candidates.iter().filter(|(_, dim)| dim.is_none()).map(|(a, _)| *a).collect()
}

pub fn classify_mask(
    original: Option<Dimension>,
    mask: Option<Dimension>,
    target: Dimension,
) -> MaskMatch {
    let (Some(original), Some(mask)) = (original, mask) else {
        return MaskMatch::Missing(missing_of(&[
            (Artifact::Image, original),
            (Artifact::Mask, mask),
        ]));
    };

    if original != mask {
        MaskMatch::NoMatch
    } else if original == target {
        MaskMatch::Perfect
    } else {
        MaskMatch::Other(original)
    }
}

pub fn classify_full(
    original: Option<Dimension>,
    mask: Option<Dimension>,
    result: Option<Dimension>,
) -> FullMatch {
    let (Some(original), Some(mask), Some(result)) = (original, mask, result) else {
        return FullMatch::Missing(missing_of(&[
            (Artifact::Image, original),
            (Artifact::Mask, mask),
            (Artifact::Result, result),
        ]));
    };

    if original == mask && mask == result {
        FullMatch::All(original)
    } else if original == mask {
        FullMatch::Partial
    } else {
        FullMatch::NoMatch
    }
}
