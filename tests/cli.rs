use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::Result;
use assert_cmd::prelude::*;
use assert_fs::TempDir;
use image::{GrayImage, RgbImage};
use predicates::prelude::*;
use rstest::*;

macro_rules! cargo_run {
    ($cmd:expr, $($args:expr),*) => {
        {
            let mut cmd = Command::cargo_bin($cmd)?;
            $(cmd.arg($args);)*
            cmd.assert()
        }
    };
}

/// 写入一个样本，尺寸为 None 时不创建对应文件
fn write_sample(
    base: &Path,
    partition: &str,
    name: &str,
    original: Option<(u32, u32)>,
    mask: Option<(u32, u32)>,
    result: Option<(u32, u32)>,
) -> Result<()> {
    let images = base.join("Dataset").join(format!("Dataset_{}", partition)).join("Images");
    let masks = base.join("Dataset").join(format!("Dataset_{}", partition)).join("Masks");
    let results = base.join("PANDORA").join(format!("Dataset_{}", partition));
    for dir in [&images, &masks, &results] {
        fs::create_dir_all(dir)?;
    }

    if let Some((w, h)) = original {
        RgbImage::new(w, h).save(images.join(format!("{}.jpg", name)))?;
    }
    if let Some((w, h)) = mask {
        GrayImage::new(w, h).save(masks.join(format!("{}.png", name)))?;
    }
    if let Some((w, h)) = result {
        RgbImage::new(w, h).save(results.join(format!("{}.png", name)))?;
    }
    Ok(())
}

#[fixture]
fn dataset() -> TempDir {
    let dir = TempDir::new().unwrap();
    let base = dir.path();
    write_sample(base, "type1", "10", Some((64, 64)), Some((64, 64)), Some((64, 64))).unwrap();
    write_sample(base, "type1", "2", Some((64, 64)), Some((64, 64)), Some((32, 32))).unwrap();
    write_sample(base, "type1", "1", Some((48, 32)), Some((48, 32)), Some((48, 32))).unwrap();
    write_sample(base, "type1", "3", Some((64, 64)), Some((16, 16)), Some((64, 64))).unwrap();
    write_sample(base, "type1", "4", Some((64, 64)), None, Some((64, 64))).unwrap();
    write_sample(base, "type2", "abc", Some((64, 64)), Some((64, 64)), Some((64, 64))).unwrap();
    dir
}

#[rstest]
fn mask_report(dataset: TempDir) -> Result<()> {
    cargo_run!("datacheck", "-b", dataset.path(), "-p", "type1,type2,type3", "mask", "-t", "64x64")
        .success()
        .stdout(predicate::str::contains("DATASET TYPE: TYPE1"))
        .stdout(predicate::str::contains("PERFECT 64×64 ORIGINAL-MASK MATCHES (2 files)"))
        .stdout(predicate::str::contains("  Files: 2, 10"))
        .stdout(predicate::str::contains("Dimension 48 × 32 (1 files)"))
        .stdout(predicate::str::contains("    4: Missing: mask"))
        .stdout(predicate::str::contains("    3: Original=(64, 64), Mask=(16, 16), Result=(64, 64)"))
        .stdout(predicate::str::contains("❌ Images directory not found"))
        .stdout(predicate::str::contains("TYPE1 (2 files):\n  2\n  10\n"))
        .stdout(predicate::str::contains("TYPE2 (1 files):\n  abc\n"))
        .stdout(predicate::str::contains("Total: 3 files"));
    Ok(())
}

#[rstest]
fn all_report(dataset: TempDir) -> Result<()> {
    cargo_run!("datacheck", "-b", dataset.path(), "-p", "type1", "all")
        .success()
        .stdout(predicate::str::contains("ALL THREE MATCHING (2 files)"))
        .stdout(predicate::str::contains(
            "    2: Image=(64, 64), Mask=(64, 64), Result=(32, 32) (original-mask match)",
        ))
        .stdout(predicate::str::contains("    3: Image=(64, 64), Mask=(16, 16), Result=(64, 64) (all different)"))
        .stdout(predicate::str::contains("✅ All match: 2 (40.0%)"))
        .stdout(predicate::str::contains("    1: 48 × 32\n   10: 64 × 64\n"));
    Ok(())
}

#[rstest]
fn unreadable_file_is_missing(dataset: TempDir) -> Result<()> {
    let mask = dataset.path().join("Dataset/Dataset_type2/Masks/abc.png");
    fs::write(&mask, b"not an image")?;

    cargo_run!("datacheck", "-b", dataset.path(), "-p", "type2", "all")
        .success()
        .stderr(predicate::str::contains("Error reading"))
        .stdout(predicate::str::contains("  abc: Missing: mask"))
        .stdout(predicate::str::contains("No files found with all three dimensions matching"));
    Ok(())
}

#[rstest]
#[case::mask("mask")]
#[case::all("all")]
fn missing_base_dir(#[case] subcmd: &str) -> Result<()> {
    let dir = TempDir::new()?;
    cargo_run!("datacheck", "-b", dir.path().join("nope"), subcmd)
        .failure()
        .stderr(predicate::str::contains("Base directory not found"));
    Ok(())
}

#[rstest]
fn idempotent_runs(dataset: TempDir) -> Result<()> {
    let first = Command::cargo_bin("datacheck")?.arg("-b").arg(dataset.path()).arg("all").output()?;
    let second = Command::cargo_bin("datacheck")?.arg("-b").arg(dataset.path()).arg("all").output()?;
    assert_eq!(first.stdout, second.stdout);
    Ok(())
}

#[rstest]
#[case::comparison("comparison")]
#[case::slideshow("slideshow")]
fn demo_gif(#[case] mode: &str) -> Result<()> {
    let dir = TempDir::new()?;
    let input = dir.path().join("results");
    fs::create_dir_all(&input)?;
    for i in 1..=2 {
        RgbImage::new(8, 6).save(input.join(format!("img_{}_original.png", i)))?;
        RgbImage::new(4, 3).save(input.join(format!("img_{}_result.png", i)))?;
    }
    let output = dir.path().join("demo.gif");

    cargo_run!("datacheck", "demo", "-m", mode, "-i", &input, "-o", &output, "--speed", "30")
        .success()
        .stdout(predicate::str::contains("Found 2 image pairs"))
        .stdout(predicate::str::contains("Duration: 6 seconds"));

    assert_eq!(image::image_dimensions(&output)?, (16, 6));
    Ok(())
}

#[test]
fn demo_without_pairs() -> Result<()> {
    let dir = TempDir::new()?;
    cargo_run!("datacheck", "demo", "-i", dir.path(), "-o", dir.path().join("x.gif"))
        .failure()
        .stderr(predicate::str::contains("No images found"));
    Ok(())
}
