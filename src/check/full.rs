use std::collections::BTreeMap;
use std::fmt::Write;

use super::{Tally, banner, section, write_limited, write_missing, write_triple};
use crate::classify::{FullMatch, classify_full};
use crate::dataset::SampleDims;
use crate::dimension::{Artifact, Dimension};
use crate::utils::{cmp_names, sort_names};

/// 三方尺寸检查的分区报告
#[derive(Debug, Clone, Default)]
pub struct FullReport {
    /// 尺寸 -> 已排序的样本名
    pub all: BTreeMap<Dimension, Vec<String>>,
    pub partial: Vec<SampleDims>,
    pub no_match: Vec<SampleDims>,
    pub missing: Vec<(SampleDims, Vec<Artifact>)>,
}

impl FullReport {
    pub fn build(samples: Vec<SampleDims>) -> Self {
        let mut report = Self::default();
        for sample in samples {
            match classify_full(sample.original, sample.mask, sample.result) {
                FullMatch::All(dim) => report.all.entry(dim).or_default().push(sample.name),
                FullMatch::Partial => report.partial.push(sample),
                FullMatch::NoMatch => report.no_match.push(sample),
                FullMatch::Missing(artifacts) => report.missing.push((sample, artifacts)),
            }
        }
        for names in report.all.values_mut() {
            sort_names(names);
        }
        report
    }

    pub fn all_count(&self) -> usize {
        self.all.values().map(Vec::len).sum()
    }

    pub fn total(&self) -> usize {
        self.all_count() + self.partial.len() + self.no_match.len() + self.missing.len()
    }

    /// 全部匹配的样本及其尺寸，按名字排序
    pub fn all_matches(&self) -> Vec<(&str, Dimension)> {
        let mut items: Vec<(&str, Dimension)> = self
            .all
            .iter()
            .flat_map(|(dim, names)| names.iter().map(move |n| (n.as_str(), *dim)))
            .collect();
        items.sort_by(|a, b| cmp_names(a.0, b.0));
        items
    }

    pub fn tally(&self) -> Tally {
        Tally {
            total: self.total(),
            rows: vec![
                ("✅ All match".to_string(), self.all_count()),
                ("⚠️  Partial".to_string(), self.partial.len()),
                ("❌ No match".to_string(), self.no_match.len()),
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
        out.push_str(&section(&format!("✅ ALL THREE MATCHING ({} files):", self.all_count())));
        if self.all.is_empty() {
            writeln!(out, "  None")?;
        }
        for (dim, names) in &self.all {
            writeln!(out, "\n  Dimension {} ({} files):", dim, names.len())?;
            writeln!(out, "    {}", names.join(", "))?;
        }

        out.push('\n');
        out.push_str(&section(&format!(
            "⚠️  PARTIAL MATCHING - Original & Mask only ({} files):",
            self.partial.len()
        )));
        let qualifier = FullMatch::Partial.qualifier();
        write_limited(out, &self.partial, 10, |out, s| write_triple(out, s, qualifier))?;

        out.push('\n');
        out.push_str(&section(&format!("❌ NO MATCHING ({} files):", self.no_match.len())));
        let qualifier = FullMatch::NoMatch.qualifier();
        write_limited(out, &self.no_match, 10, |out, s| write_triple(out, s, qualifier))?;

        out.push('\n');
        out.push_str(&section(&format!("❓ MISSING FILES ({} files):", self.missing.len())));
        write_missing(out, &self.missing)
    }
}

pub fn render_full_summary(reports: &[(String, FullReport)]) -> String {
    let mut out = String::new();

    out.push_str("\n\n");
    out.push_str(&banner("OVERALL SUMMARY - ALL THREE DIMENSIONS MATCHING"));
    out.push('\n');

    let mut total = 0;
    for (partition, report) in reports {
        out.push_str(&format!("{}:\n", partition.to_uppercase()));
        out.push_str(&report.tally().to_string());
        if !report.all.is_empty() {
            let names: Vec<&str> = report.all_matches().into_iter().map(|(n, _)| n).collect();
            out.push_str(&format!("  Files: {}\n", names.join(", ")));
        }
        out.push('\n');
        total += report.all_count();
    }

    out.push('\n');
    out.push_str(&banner("PERFECT MATCHES - ALL THREE DIMENSIONS IDENTICAL"));
    out.push('\n');

    if total == 0 {
        out.push_str("❌ No files found with all three dimensions matching!\n");
        return out;
    }

    out.push_str(&format!("Total: {} files\n\n", total));
    for (partition, report) in reports.iter().filter(|(_, r)| !r.all.is_empty()) {
        out.push_str(&format!("{} ({} files):\n", partition.to_uppercase(), report.all_count()));
        for (name, dim) in report.all_matches() {
            out.push_str(&format!("  {:>3}: {}\n", name, dim));
        }
    }
    out
}
