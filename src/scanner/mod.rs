//! ローカル画像ファイルの読み込み
//!
//! ブラウザのファイル選択の代わりに、パスからファイルを読み
//! 拡張子（なければ中身）からメディアタイプを決める。

mod exif;

use crate::error::{LabError, Result};
use monkey_lab_common::{encode_data_uri, DataUriReader, ImageSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct LocalImage {
    pub path: PathBuf,
    pub file_name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
    /// EXIF撮影日（YYYY-MM-DD）
    pub date: Option<String>,
}

impl ImageSource for LocalImage {
    fn name(&self) -> String {
        self.file_name.clone()
    }

    fn media_type(&self) -> String {
        self.media_type.clone()
    }
}

pub fn load_image(path: &Path) -> Result<LocalImage> {
    if !path.is_file() {
        return Err(LabError::FileNotFound(path.display().to_string()));
    }

    let bytes: Arc<[u8]> = std::fs::read(path)?.into();
    let media_type = detect_media_type(path, &bytes);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let date = exif::extract_date(&bytes).ok();

    tracing::debug!(%file_name, %media_type, size = bytes.len(), "ファイル読み込み");

    Ok(LocalImage {
        path: path.to_path_buf(),
        file_name,
        media_type,
        bytes,
        date,
    })
}

/// 拡張子を優先し、判定できなければ先頭バイトから推定
pub fn detect_media_type(path: &Path, bytes: &[u8]) -> String {
    image::ImageFormat::from_path(path)
        .or_else(|_| image::guess_format(bytes))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| FALLBACK_MEDIA_TYPE.to_string())
}

/// 読み込み済みのバイト列をデータURIにする
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDataUri;

impl DataUriReader<LocalImage> for LocalDataUri {
    async fn read_data_uri(&self, file: &LocalImage) -> monkey_lab_common::Result<String> {
        let bytes = Arc::clone(&file.bytes);
        let media_type = file.media_type.clone();
        tokio::task::spawn_blocking(move || encode_data_uri(&media_type, &bytes))
            .await
            .map_err(|e| monkey_lab_common::Error::ImageRead(e.to_string()))
    }
}
