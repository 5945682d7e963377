//! 観察記録帳（デモ2）
//!
//! 画像・種名・観察日・メモを1件の記録としてセッション内のリストに積む。
//! 永続化はしない。

use crate::error::{Error, Field, Result};
use crate::upload::{ImageSource, PreviewHandle, PreviewSource, UploadState};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// 観察記録（作成後は変更しない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRecord {
    id: u64,
    species: String,
    #[serde(default)]
    memo: String,
    observed_at: String,
    image_url: String,
}

impl ObservationRecord {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn observed_at(&self) -> &str {
        &self.observed_at
    }

    /// 画像のデータURI
    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}

/// 詳細表示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationDetail<'a> {
    pub image_url: &'a str,
    pub species: &'a str,
    pub observed_at: &'a str,
    /// 空のメモは `None`
    pub memo: Option<&'a str>,
}

impl<'a> From<&'a ObservationRecord> for ObservationDetail<'a> {
    fn from(record: &'a ObservationRecord) -> Self {
        Self {
            image_url: &record.image_url,
            species: &record.species,
            observed_at: &record.observed_at,
            memo: (!record.memo.is_empty()).then_some(record.memo.as_str()),
        }
    }
}

/// ファイル全体をデータURIとして読み出す
#[allow(async_fn_in_trait)]
pub trait DataUriReader<F> {
    async fn read_data_uri(&self, file: &F) -> Result<String>;
}

/// バイト列を base64 のデータURIにする
pub fn encode_data_uri(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}

/// 保存処理中のフォーム内容
#[derive(Debug)]
pub struct SaveTicket<F> {
    image: F,
    species: String,
    memo: String,
    observed_at: String,
}

impl<F> SaveTicket<F> {
    pub fn image(&self) -> &F {
        &self.image
    }
}

/// 記録帳画面の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogbookPhase {
    Idle,
    FileSelected,
    /// 必須項目が揃っている
    Ready,
    Saving,
}

/// 記録帳画面
#[derive(Debug)]
pub struct Logbook<F, H> {
    upload: UploadState<F, H>,
    species: String,
    memo: String,
    observed_at: String,
    records: Vec<ObservationRecord>,
    selected: Option<u64>,
    next_id: u64,
    saving: bool,
}

impl<F, H> Default for Logbook<F, H> {
    fn default() -> Self {
        Self {
            upload: UploadState::default(),
            species: String::new(),
            memo: String::new(),
            observed_at: String::new(),
            records: Vec::new(),
            selected: None,
            next_id: 1,
            saving: false,
        }
    }
}

impl<F: ImageSource + Clone, H: PreviewHandle> Logbook<F, H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file<P>(&mut self, picked: Option<F>, previews: &P) -> Result<()>
    where
        P: PreviewSource<F, Handle = H>,
    {
        if self.saving {
            return Err(Error::Busy);
        }
        self.upload.select(picked, previews)
    }

    /// 選択中の画像とプレビューを手放す
    pub fn clear_file(&mut self) {
        self.upload.release();
    }

    pub fn set_species(&mut self, species: impl Into<String>) {
        self.species = species.into();
    }

    pub fn set_memo(&mut self, memo: impl Into<String>) {
        self.memo = memo.into();
    }

    pub fn set_observed_at(&mut self, observed_at: impl Into<String>) {
        self.observed_at = observed_at.into();
    }

    /// 未入力の必須項目
    pub fn missing_fields(&self) -> Vec<Field> {
        let mut missing = Vec::new();
        if !self.upload.has_file() {
            missing.push(Field::Image);
        }
        if self.species.trim().is_empty() {
            missing.push(Field::Species);
        }
        if self.observed_at.trim().is_empty() {
            missing.push(Field::ObservedAt);
        }
        missing
    }

    /// 保存開始
    ///
    /// 必須項目が1つでも欠けていれば記録は作らない。
    pub fn begin_save(&mut self) -> Result<SaveTicket<F>> {
        if self.saving {
            return Err(Error::Busy);
        }

        let missing = self.missing_fields();
        let image = match self.upload.file() {
            Some(file) if missing.is_empty() => file.clone(),
            _ => {
                let err = Error::MissingFields(missing);
                self.upload.set_error(err.clone());
                return Err(err);
            }
        };

        self.saving = true;
        Ok(SaveTicket {
            image,
            species: self.species.trim().to_string(),
            memo: self.memo.trim().to_string(),
            observed_at: self.observed_at.trim().to_string(),
        })
    }

    /// 画像の読み出し結果を反映し、成功なら新しい記録のIDを返す
    pub fn finish_save(&mut self, ticket: SaveTicket<F>, data_uri: Result<String>) -> Result<u64> {
        self.saving = false;

        let image_url = match data_uri {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(name = %ticket.image.name(), error = %err, "画像の読み出しに失敗");
                self.upload.set_error(err.clone());
                return Err(err);
            }
        };

        let id = self.next_id;
        self.next_id += 1;
        self.records.insert(
            0,
            ObservationRecord {
                id,
                species: ticket.species,
                memo: ticket.memo,
                observed_at: ticket.observed_at,
                image_url,
            },
        );
        tracing::debug!(id, total = self.records.len(), "観察記録を追加");

        self.reset_form();
        Ok(id)
    }

    /// 開始から反映までをまとめて行う
    pub async fn save<R: DataUriReader<F>>(&mut self, reader: &R) -> Result<u64> {
        let ticket = self.begin_save()?;
        let data_uri = reader.read_data_uri(ticket.image()).await;
        self.finish_save(ticket, data_uri)
    }

    fn reset_form(&mut self) {
        self.upload.clear();
        self.species.clear();
        self.memo.clear();
        self.observed_at.clear();
    }

    /// 画面破棄時の後始末
    pub fn teardown(&mut self) {
        self.upload.release();
    }
}

impl<F, H: PreviewHandle> Logbook<F, H> {
    /// 記録の選択。リスト自体は変えない
    pub fn select(&mut self, id: u64) -> bool {
        if self.records.iter().any(|r| r.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&ObservationRecord> {
        let id = self.selected?;
        self.records.iter().find(|r| r.id == id)
    }

    pub fn detail(&self) -> Option<ObservationDetail<'_>> {
        self.selected().map(ObservationDetail::from)
    }

    /// 新しい順
    pub fn records(&self) -> &[ObservationRecord] {
        &self.records
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn observed_at(&self) -> &str {
        &self.observed_at
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.upload.preview_url()
    }

    pub fn error(&self) -> Option<&Error> {
        self.upload.error()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn phase(&self) -> LogbookPhase {
        if self.saving {
            LogbookPhase::Saving
        } else if !self.upload.has_file() {
            LogbookPhase::Idle
        } else if self.species.trim().is_empty() || self.observed_at.trim().is_empty() {
            LogbookPhase::FileSelected
        } else {
            LogbookPhase::Ready
        }
    }
}
