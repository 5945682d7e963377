//! エラー型定義

use std::fmt;
use thiserror::Error;

/// 保存時に必須となる入力項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Image,
    Species,
    ObservedAt,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Image => "사진",
            Field::Species => "종 이름",
            Field::ObservedAt => "관찰 날짜",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 共通エラー型
///
/// Display はそのまま画面のエラー欄に出す文言
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("사진을 선택해주세요.")]
    NoFileChosen,

    #[error("이미지 파일만 업로드해주세요.")]
    NotAnImage(String),

    #[error("먼저 원숭이 사진을 업로드해주세요.")]
    NoImageSelected,

    /// 欠けている項目が複数でも文言は一つにまとめる
    #[error("사진, 종 이름, 관찰 날짜를 모두 입력해주세요.")]
    MissingFields(Vec<Field>),

    #[error("미리보기를 만들 수 없어요: {0}")]
    Preview(String),

    #[error("이미지를 읽을 수 없어요: {0}")]
    ImageRead(String),

    #[error("판별에 실패했어요: {0}")]
    Classification(String),

    #[error("이미 처리 중이에요.")]
    Busy,
}

impl Error {
    /// 入力の修正で回復できるバリデーションエラーか
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::NoFileChosen
                | Error::NotAnImage(_)
                | Error::NoImageSelected
                | Error::MissingFields(_)
        )
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_an_image() {
        let error = Error::NotAnImage("text/plain".to_string());
        assert_eq!(format!("{}", error), "이미지 파일만 업로드해주세요.");
    }

    #[test]
    fn test_error_display_upload_first() {
        let display = format!("{}", Error::NoImageSelected);
        assert_eq!(display, "먼저 원숭이 사진을 업로드해주세요.");
    }

    #[test]
    fn test_missing_fields_single_message() {
        let one = Error::MissingFields(vec![Field::Species]);
        let all = Error::MissingFields(vec![Field::Image, Field::Species, Field::ObservedAt]);
        assert_eq!(one.to_string(), all.to_string());
    }

    #[test]
    fn test_error_display_wrapped_detail() {
        let error = Error::Classification("timeout".to_string());
        let display = format!("{}", error);
        assert!(display.contains("timeout"));
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::NoFileChosen.is_validation());
        assert!(Error::MissingFields(vec![Field::Image]).is_validation());
        assert!(!Error::ImageRead("eof".into()).is_validation());
        assert!(!Error::Busy.is_validation());
    }

    #[test]
    fn test_field_labels() {
        assert_eq!(Field::Image.to_string(), "사진");
        assert_eq!(Field::ObservedAt.as_str(), "관찰 날짜");
    }
}
