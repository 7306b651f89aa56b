use std::cmp::Ordering;

use indicatif::ProgressStyle;

pub fn pb_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} {msg}")
        .expect("invalid progress bar template")
        .progress_chars("##-")
}

/// 样本名排序键：纯数字的名字按数值升序，其余排在所有数字之后
///
/// 超出 u64 范围的数字按 u64::MAX 处理，最后用原字符串打破平局，保证全序。
pub fn name_key(name: &str) -> (bool, u64, &str) {
    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
        let value = name.parse::<u64>().unwrap_or(u64::MAX);
        (false, value, name)
    } else {
        (true, 0, name)
    }
}

pub fn cmp_names(a: &str, b: &str) -> Ordering {
    name_key(a).cmp(&name_key(b))
}

pub fn sort_names<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by(|a, b| cmp_names(a.as_ref(), b.as_ref()));
}

/// 百分比，总数为 0 时返回 0
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}
