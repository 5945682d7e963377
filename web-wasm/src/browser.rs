//! ブラウザ側の外部依存（ファイル・オブジェクトURL・FileReader・タイマー）

use gloo::file::{Blob, File, ObjectUrl};
use monkey_lab_common::{DataUriReader, Delay, Error, ImageSource, PreviewHandle, PreviewSource, Result};
use std::time::Duration;

/// `<input type="file">` で選ばれたファイル
#[derive(Debug, Clone)]
pub struct BrowserFile(File);

impl From<web_sys::File> for BrowserFile {
    fn from(file: web_sys::File) -> Self {
        Self(File::from(file))
    }
}

impl BrowserFile {
    fn blob(&self) -> Blob {
        Blob::clone(&self.0)
    }
}

impl ImageSource for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn media_type(&self) -> String {
        self.0.raw_mime_type()
    }
}

/// オブジェクトURL。drop で revoke される
pub struct PreviewUrl(ObjectUrl);

impl PreviewHandle for PreviewUrl {
    fn url(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUrls;

impl PreviewSource<BrowserFile> for ObjectUrls {
    type Handle = PreviewUrl;

    fn open(&self, file: &BrowserFile) -> Result<PreviewUrl> {
        Ok(PreviewUrl(ObjectUrl::from(file.blob())))
    }
}

/// FileReader でデータURIを読む
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReaderDataUri;

impl DataUriReader<BrowserFile> for FileReaderDataUri {
    async fn read_data_uri(&self, file: &BrowserFile) -> Result<String> {
        gloo::file::futures::read_as_data_url(&file.blob())
            .await
            .map_err(|e| Error::ImageRead(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooDelay;

impl Delay for GlooDelay {
    async fn wait(&self, duration: Duration) {
        gloo::timers::future::sleep(duration).await;
    }
}
