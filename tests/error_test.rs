//! エラー表示のテスト

use monkey_lab::error::LabError;
use monkey_lab::scanner;
use std::path::Path;

/// 存在しないファイルを読み込んだ場合
#[test]
fn test_load_nonexistent_file() {
    let err = scanner::load_image(Path::new("/nonexistent/path/12345.png")).unwrap_err();
    assert!(matches!(err, LabError::FileNotFound(_)));
    assert!(err.to_string().contains("12345.png"));
}

/// 画面エラーはそのままの文言で出る
#[test]
fn test_screen_error_passthrough() {
    let err: LabError = monkey_lab_common::Error::NoImageSelected.into();
    assert_eq!(err.to_string(), "먼저 원숭이 사진을 업로드해주세요.");
}

#[test]
fn test_error_from_io() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
    let err: LabError = io_error.into();
    assert!(matches!(err, LabError::Io(_)));
    assert!(err.to_string().contains("access denied"));
}

#[test]
fn test_error_from_json() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: LabError = json_error.into();
    assert!(matches!(err, LabError::JsonParse(_)));
}
