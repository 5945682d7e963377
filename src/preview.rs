//! 一時ファイルによるプレビュー
//!
//! オブジェクトURLの代わりに、画像を一時ファイルへ書き出して `file://` で参照する。
//! ハンドルを drop するとファイルも消える。

use crate::scanner::LocalImage;
use monkey_lab_common::{Error, PreviewHandle, PreviewSource};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug)]
pub struct TempPreview {
    url: String,
    file: NamedTempFile,
}

impl TempPreview {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl PreviewHandle for TempPreview {
    fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for TempPreview {
    fn drop(&mut self) {
        tracing::debug!(url = %self.url, "プレビュー解放");
    }
}

#[derive(Debug, Clone)]
pub struct TempPreviews {
    dir: PathBuf,
}

impl TempPreviews {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PreviewSource<LocalImage> for TempPreviews {
    type Handle = TempPreview;

    fn open(&self, image: &LocalImage) -> monkey_lab_common::Result<TempPreview> {
        let suffix = image
            .path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let create = || -> std::io::Result<NamedTempFile> {
            std::fs::create_dir_all(&self.dir)?;
            let mut file = tempfile::Builder::new()
                .prefix("preview-")
                .suffix(&suffix)
                .tempfile_in(&self.dir)?;
            file.write_all(&image.bytes)?;
            file.flush()?;
            Ok(file)
        };
        let file = create().map_err(|e| Error::Preview(e.to_string()))?;

        let url = format!("file://{}", file.path().display());
        Ok(TempPreview { url, file })
    }
}
