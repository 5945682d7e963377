//! 判別フローのテスト
//!
//! ローカル画像の読み込みから模擬判別、プレビュー解放までを検証

use monkey_lab::classifier::{classify_file, simulated};
use monkey_lab::error::LabError;
use monkey_lab::preview::TempPreviews;
use monkey_lab_common::{Error, SPECIES};
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

fn write_png(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    image::RgbImage::new(2, 2).save(&path).expect("PNG作成失敗");
    path
}

fn preview_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

/// 画像を判別すると固定5種のどれかと範囲内の信頼度が返る
#[tokio::test]
async fn test_classify_png() {
    let dir = tempdir().expect("Failed to create temp dir");
    let image = write_png(dir.path(), "monkey.png");
    let previews = TempPreviews::new(dir.path().join("previews"));
    let classifier = simulated(None, Duration::ZERO, false);

    let result = classify_file(&image, &previews, &classifier).await.expect("判別失敗");

    assert!(SPECIES.contains(&result.label.as_str()));
    let confidence: f64 = result.confidence.parse().expect("数値でない");
    assert!((0.70..=0.95).contains(&confidence));
    assert_eq!(result.confidence.split('.').nth(1).map(str::len), Some(2));
}

/// 同じシードなら同じ結果
#[tokio::test]
async fn test_classify_seed_reproducible() {
    let dir = tempdir().expect("Failed to create temp dir");
    let image = write_png(dir.path(), "monkey.png");
    let previews = TempPreviews::new(dir.path().join("previews"));

    let a = classify_file(&image, &previews, &simulated(Some(11), Duration::ZERO, false))
        .await
        .unwrap();
    let b = classify_file(&image, &previews, &simulated(Some(11), Duration::ZERO, false))
        .await
        .unwrap();

    assert_eq!(a, b);
}

/// 判別後はプレビュー用一時ファイルが残らない
#[tokio::test]
async fn test_classify_releases_preview() {
    let dir = tempdir().expect("Failed to create temp dir");
    let image = write_png(dir.path(), "monkey.png");
    let preview_dir = dir.path().join("previews");
    let previews = TempPreviews::new(&preview_dir);

    classify_file(&image, &previews, &simulated(Some(1), Duration::ZERO, false))
        .await
        .unwrap();

    assert_eq!(preview_count(&preview_dir), 0);
}

/// 画像以外は拒否され、プレビューも作られない
#[tokio::test]
async fn test_classify_rejects_text_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let text = dir.path().join("notes.txt");
    std::fs::write(&text, "hello").unwrap();
    let preview_dir = dir.path().join("previews");
    let previews = TempPreviews::new(&preview_dir);

    let err = classify_file(&text, &previews, &simulated(None, Duration::ZERO, false))
        .await
        .unwrap_err();

    assert!(matches!(err, LabError::Screen(Error::NotAnImage(_))));
    assert_eq!(err.to_string(), "이미지 파일만 업로드해주세요.");
    assert_eq!(preview_count(&preview_dir), 0);
}

/// 存在しないファイル
#[tokio::test]
async fn test_classify_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let previews = TempPreviews::new(dir.path());

    let err = classify_file(
        &dir.path().join("nothing.png"),
        &previews,
        &simulated(None, Duration::ZERO, false),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, LabError::FileNotFound(_)));
}
