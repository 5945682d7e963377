use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("파일을 찾을 수 없어요: {0}")]
    FileNotFound(String),

    /// 画面のエラー欄に出るものと同じ文言
    #[error("{0}")]
    Screen(#[from] monkey_lab_common::Error),

    #[error("입력 오류: {0}")]
    Prompt(String),

    #[error("로그 초기화 오류: {0}")]
    Logging(String),

    #[error("JSON 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LabError>;
