use std::collections::BTreeMap;
use std::fmt::Write;

use super::{Tally, banner, section, write_limited, write_missing};
use crate::classify::{MaskMatch, classify_mask};
use crate::dataset::SampleDims;
use crate::dimension::{Artifact, Dimension, fmt_opt};
use crate::utils::sort_names;

/// 原图-掩码检查的分区报告
#[derive(Debug, Clone)]
pub struct MaskReport {
    pub target: Dimension,
    pub perfect: Vec<SampleDims>,
    /// 尺寸 -> 已排序的样本名
    pub other: BTreeMap<Dimension, Vec<String>>,
    pub no_match: Vec<SampleDims>,
    pub missing: Vec<(SampleDims, Vec<Artifact>)>,
}

impl MaskReport {
    pub fn build(samples: Vec<SampleDims>, target: Dimension) -> Self {
        let mut report = Self {
            target,
            perfect: vec![],
            other: BTreeMap::new(),
            no_match: vec![],
            missing: vec![],
        };
        for sample in samples {
            match classify_mask(sample.original, sample.mask, target) {
                MaskMatch::Perfect => report.perfect.push(sample),
                MaskMatch::Other(dim) => report.other.entry(dim).or_default().push(sample.name),
                MaskMatch::NoMatch => report.no_match.push(sample),
                MaskMatch::Missing(artifacts) => report.missing.push((sample, artifacts)),
            }
        }
        for names in report.other.values_mut() {
            sort_names(names);
        }
        report
    }

    fn target_label(&self) -> String {
        target_label(self.target)
    }

    pub fn other_count(&self) -> usize {
        self.other.values().map(Vec::len).sum()
    }

    pub fn total(&self) -> usize {
        self.perfect.len() + self.other_count() + self.no_match.len() + self.missing.len()
    }

    /// 按名字排好序的完美匹配样本
    pub fn perfect_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.perfect.iter().map(|s| s.name.as_str()).collect();
        sort_names(&mut names);
        names
    }

    /// 完美匹配样本中出现过的结果图尺寸，缺失排在最前
    pub fn perfect_results(&self) -> Vec<Option<Dimension>> {
        let mut dims: Vec<Option<Dimension>> = self.perfect.iter().map(|s| s.result).collect();
        dims.sort();
        dims.dedup();
        dims
    }

    pub fn tally(&self) -> Tally {
        Tally {
            total: self.total(),
            rows: vec![
                (format!("🎯 {} matches", self.target_label()), self.perfect.len()),
                ("⚠️  Other matches".to_string(), self.other_count()),
                ("❌ No matches".to_string(), self.no_match.len()),
                ("❓ Missing".to_string(), self.missing.len()),
            ],
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out).expect("writing to a String cannot fail");
        out
    }

    fn write_to(&self, out: &mut String) -> std::fmt::Result {
        let label = self.target_label();
        let target = self.target;

        out.push_str(&section(&format!(
            "🎯 PERFECT {} ORIGINAL-MASK MATCHES ({} files):",
            label,
            self.perfect.len()
        )));
        if self.perfect.is_empty() {
            writeln!(out, "  None")?;
        } else {
            writeln!(out, "  Files: {}", self.perfect_names().join(", "))?;
            writeln!(out, "\n  All these files have:")?;
            writeln!(out, "    - Original: {}", target)?;
            writeln!(out, "    - Mask:     {}", target)?;
            let results: Vec<String> = self
                .perfect_results()
                .into_iter()
                .map(|d| d.map_or_else(|| "missing".to_string(), |d| d.to_string()))
                .collect();
            writeln!(out, "    - Result:   {}", results.join(", "))?;
        }

        out.push('\n');
        out.push_str(&section(&format!(
            "⚠️  OTHER ORIGINAL-MASK MATCHES ({} files):",
            self.other_count()
        )));
        if self.other.is_empty() {
            writeln!(out, "  None")?;
        }
        for (dim, names) in &self.other {
            writeln!(out, "  Dimension {} ({} files):", dim, names.len())?;
            let shown: Vec<&str> = names.iter().take(20).map(String::as_str).collect();
            writeln!(out, "    {}", shown.join(", "))?;
            if names.len() > 20 {
                writeln!(out, "    ... and {} more", names.len() - 20)?;
            }
        }

        out.push('\n');
        out.push_str(&section(&format!(
            "❌ NO ORIGINAL-MASK MATCHES ({} files):",
            self.no_match.len()
        )));
        write_limited(out, &self.no_match, 10, |out, sample| {
            writeln!(
                out,
                "  {:>3}: Original={}, Mask={}, Result={}",
                sample.name,
                fmt_opt(sample.original),
                fmt_opt(sample.mask),
                fmt_opt(sample.result)
            )
        })?;

        out.push('\n');
        out.push_str(&section(&format!("❓ MISSING FILES ({} files):", self.missing.len())));
        write_missing(out, &self.missing)
    }
}

fn target_label(target: Dimension) -> String {
    format!("{}×{}", target.width, target.height)
}

/// 所有分区的汇总，以及跨分区的完美匹配列表
pub fn render_mask_summary(reports: &[(String, MaskReport)], target: Dimension) -> String {
    let label = target_label(target);
    let mut out = String::new();

    out.push_str("\n\n");
    out.push_str(&banner(&format!("OVERALL SUMMARY - {} ORIGINAL-MASK MATCHES", label)));
    out.push('\n');

    let mut total = 0;
    for (partition, report) in reports {
        out.push_str(&format!("{}:\n", partition.to_uppercase()));
        out.push_str(&report.tally().to_string());
        if !report.perfect.is_empty() {
            out.push_str(&format!("  {} files: {}\n", label, report.perfect_names().join(", ")));
        }
        out.push('\n');
        total += report.perfect.len();
    }

    out.push('\n');
    out.push_str(&banner(&format!(
        "PERFECT {} MATCHES - ORIGINAL = MASK = {}",
        label, label
    )));
    out.push('\n');

    if total == 0 {
        out.push_str(&format!("❌ No files found with {} original-mask matches!\n", label));
        return out;
    }

    out.push_str(&format!("Total: {} files\n\n", total));
    for (partition, report) in reports.iter().filter(|(_, r)| !r.perfect.is_empty()) {
        out.push_str(&format!("{} ({} files):\n", partition.to_uppercase(), report.perfect.len()));
        for name in report.perfect_names() {
            out.push_str(&format!("  {}\n", name));
        }
    }
    out
}
