//! テスト用のフェイク実装

use crate::classify::{Delay, RandomSource};
use crate::error::{Error, Result};
use crate::logbook::{encode_data_uri, DataUriReader};
use crate::upload::{ImageSource, PreviewHandle, PreviewSource};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FakeFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl FakeFile {
    pub fn new(name: &str, media_type: &str) -> Self {
        Self {
            name: name.to_string(),
            media_type: media_type.to_string(),
            bytes: b"fake".to_vec(),
        }
    }

    pub fn png(name: &str) -> Self {
        Self::new(name, "image/png")
    }
}

impl ImageSource for FakeFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn media_type(&self) -> String {
        self.media_type.clone()
    }
}

#[derive(Debug, Default)]
struct Registry {
    opened: usize,
    live: HashSet<String>,
    released: Vec<String>,
}

#[derive(Debug)]
pub struct FakeHandle {
    url: String,
    registry: Rc<RefCell<Registry>>,
}

impl PreviewHandle for FakeHandle {
    fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        let mut registry = self.registry.borrow_mut();
        registry.live.remove(&self.url);
        registry.released.push(self.url.clone());
    }
}

/// 開いたハンドルと解放済みハンドルを記録する
#[derive(Debug, Default)]
pub struct FakePreviews {
    registry: Rc<RefCell<Registry>>,
    fail_next: Cell<bool>,
}

impl FakePreviews {
    pub fn live(&self) -> usize {
        self.registry.borrow().live.len()
    }

    pub fn opened(&self) -> usize {
        self.registry.borrow().opened
    }

    pub fn was_released(&self, url: &str) -> bool {
        self.registry.borrow().released.iter().any(|u| u == url)
    }

    pub fn fail_next(&self) {
        self.fail_next.set(true);
    }
}

impl PreviewSource<FakeFile> for FakePreviews {
    type Handle = FakeHandle;

    fn open(&self, file: &FakeFile) -> Result<FakeHandle> {
        if self.fail_next.replace(false) {
            return Err(Error::Preview("out of handles".to_string()));
        }
        let mut registry = self.registry.borrow_mut();
        registry.opened += 1;
        let url = format!("blob:{}#{}", file.name, registry.opened);
        registry.live.insert(url.clone());
        Ok(FakeHandle {
            url,
            registry: Rc::clone(&self.registry),
        })
    }
}

/// 待たずに待機時間だけ記録する
#[derive(Debug, Default)]
pub struct InstantDelay {
    pub waits: RefCell<Vec<Duration>>,
}

impl Delay for InstantDelay {
    async fn wait(&self, duration: Duration) {
        self.waits.borrow_mut().push(duration);
    }
}

/// 常に同じ値を返す乱数源
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    pub index: usize,
    pub unit: f64,
}

impl RandomSource for FixedRandom {
    fn draw(&mut self, _label_count: usize) -> (usize, f64) {
        (self.index, self.unit)
    }
}

/// メモリ上のバイト列からデータURIを作る
#[derive(Debug, Default)]
pub struct MemoryReader {
    pub fail: bool,
}

impl DataUriReader<FakeFile> for MemoryReader {
    async fn read_data_uri(&self, file: &FakeFile) -> Result<String> {
        if self.fail {
            return Err(Error::ImageRead("unexpected end of file".to_string()));
        }
        Ok(encode_data_uri(&file.media_type, &file.bytes))
    }
}
