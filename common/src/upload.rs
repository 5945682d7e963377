//! 画像ファイルの受け付けとプレビュー管理
//!
//! ファイル選択ダイアログやオブジェクトURLはフロント側の実装に任せ、
//! ここではメディアタイプの検査と「生きているプレビューは常に1つ」の管理だけを行う。

use crate::error::{Error, Result};

/// ユーザーが選んだファイル
pub trait ImageSource {
    fn name(&self) -> String;

    /// 申告されたメディアタイプ（例: `image/png`）
    fn media_type(&self) -> String;
}

/// 表示用のプレビュー参照
///
/// drop 時に参照を解放すること
pub trait PreviewHandle {
    fn url(&self) -> &str;
}

/// ファイルからプレビュー参照を作る
pub trait PreviewSource<F> {
    type Handle: PreviewHandle;

    fn open(&self, file: &F) -> Result<Self::Handle>;
}

/// メディアタイプが画像を示すか
pub fn is_image_type(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

/// アップロード中のファイル・プレビュー・エラー
#[derive(Debug)]
pub struct UploadState<F, H> {
    file: Option<F>,
    preview: Option<H>,
    error: Option<Error>,
}

impl<F, H> Default for UploadState<F, H> {
    fn default() -> Self {
        Self {
            file: None,
            preview: None,
            error: None,
        }
    }
}

impl<F: ImageSource, H: PreviewHandle> UploadState<F, H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイル選択
    ///
    /// 拒否した場合はエラー欄だけを書き換え、ファイルとプレビューはそのまま残す。
    pub fn select<P>(&mut self, picked: Option<F>, previews: &P) -> Result<()>
    where
        P: PreviewSource<F, Handle = H>,
    {
        let Some(file) = picked else {
            return Err(self.fail(Error::NoFileChosen));
        };

        let media_type = file.media_type();
        if !is_image_type(&media_type) {
            tracing::debug!(name = %file.name(), %media_type, "画像以外のファイルを拒否");
            return Err(self.fail(Error::NotAnImage(media_type)));
        }

        let handle = match previews.open(&file) {
            Ok(handle) => handle,
            Err(err) => return Err(self.fail(err)),
        };

        tracing::debug!(name = %file.name(), url = handle.url(), "プレビュー作成");
        self.error = None;
        self.file = Some(file);
        // 代入で旧ハンドルが drop され解放される
        self.preview = Some(handle);
        Ok(())
    }

    /// ファイルとプレビューを手放す（エラー欄は残す）
    pub fn release(&mut self) {
        self.preview = None;
        self.file = None;
    }

    /// 全項目を空に戻す
    pub fn clear(&mut self) {
        self.release();
        self.error = None;
    }
}

impl<F, H: PreviewHandle> UploadState<F, H> {
    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(|h| h.url())
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub(crate) fn set_error(&mut self, err: Error) {
        self.error = Some(err);
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    fn fail(&mut self, err: Error) -> Error {
        self.error = Some(err.clone());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeFile, FakePreviews};

    type State = UploadState<FakeFile, crate::testing::FakeHandle>;

    #[test]
    fn test_is_image_type() {
        assert!(is_image_type("image/png"));
        assert!(is_image_type("image/jpeg"));
        assert!(!is_image_type("text/plain"));
        assert!(!is_image_type(""));
        assert!(!is_image_type("application/image"));
    }

    #[test]
    fn test_select_image_sets_file_and_preview() {
        let previews = FakePreviews::default();
        let mut state = State::new();

        state.select(Some(FakeFile::png("a.png")), &previews).unwrap();

        assert_eq!(state.file().map(|f| f.name.as_str()), Some("a.png"));
        assert!(state.preview_url().is_some());
        assert!(state.error().is_none());
        assert_eq!(previews.live(), 1);
    }

    #[test]
    fn test_select_non_image_keeps_state() {
        let previews = FakePreviews::default();
        let mut state = State::new();
        state.select(Some(FakeFile::png("a.png")), &previews).unwrap();
        let url = state.preview_url().map(str::to_owned);

        let err = state
            .select(Some(FakeFile::new("notes.txt", "text/plain")), &previews)
            .unwrap_err();

        assert!(matches!(err, Error::NotAnImage(_)));
        assert_eq!(state.error(), Some(&err));
        assert_eq!(state.file().map(|f| f.name.as_str()), Some("a.png"));
        assert_eq!(state.preview_url().map(str::to_owned), url);
        assert_eq!(previews.live(), 1);
        assert_eq!(previews.opened(), 1);
    }

    #[test]
    fn test_select_nothing_is_rejected() {
        let previews = FakePreviews::default();
        let mut state = State::new();

        let err = state.select(None, &previews).unwrap_err();

        assert_eq!(err, Error::NoFileChosen);
        assert!(!state.has_file());
        assert_eq!(previews.opened(), 0);
    }

    #[test]
    fn test_replacing_file_releases_previous_preview() {
        let previews = FakePreviews::default();
        let mut state = State::new();

        state.select(Some(FakeFile::png("a.png")), &previews).unwrap();
        let first = state.preview_url().unwrap().to_string();
        state.select(Some(FakeFile::png("b.png")), &previews).unwrap();

        assert_eq!(previews.live(), 1);
        assert!(previews.was_released(&first));
        assert_ne!(state.preview_url(), Some(first.as_str()));
    }

    #[test]
    fn test_same_file_twice_gets_new_handle() {
        let previews = FakePreviews::default();
        let mut state = State::new();

        state.select(Some(FakeFile::png("a.png")), &previews).unwrap();
        let first = state.preview_url().unwrap().to_string();
        state.select(Some(FakeFile::png("a.png")), &previews).unwrap();

        assert_ne!(state.preview_url(), Some(first.as_str()));
        assert_eq!(previews.opened(), 2);
        assert_eq!(previews.live(), 1);
    }

    #[test]
    fn test_error_cleared_on_accept() {
        let previews = FakePreviews::default();
        let mut state = State::new();
        let _ = state.select(Some(FakeFile::new("a.gif.txt", "text/plain")), &previews);
        assert!(state.error().is_some());

        state.select(Some(FakeFile::png("a.png")), &previews).unwrap();
        assert!(state.error().is_none());
    }

    #[test]
    fn test_preview_failure_leaves_state_untouched() {
        let previews = FakePreviews::default();
        let mut state = State::new();
        state.select(Some(FakeFile::png("a.png")), &previews).unwrap();

        previews.fail_next();
        let err = state.select(Some(FakeFile::png("b.png")), &previews).unwrap_err();

        assert!(matches!(err, Error::Preview(_)));
        assert_eq!(state.file().map(|f| f.name.as_str()), Some("a.png"));
        assert_eq!(previews.live(), 1);
    }

    #[test]
    fn test_drop_releases_live_preview() {
        let previews = FakePreviews::default();
        {
            let mut state = State::new();
            state.select(Some(FakeFile::png("a.png")), &previews).unwrap();
            assert_eq!(previews.live(), 1);
        }
        assert_eq!(previews.live(), 0);
    }

    #[test]
    fn test_clear_empties_everything() {
        let previews = FakePreviews::default();
        let mut state = State::new();
        state.select(Some(FakeFile::png("a.png")), &previews).unwrap();
        state.set_error(Error::NoImageSelected);

        state.clear();

        assert!(!state.has_file());
        assert!(state.preview_url().is_none());
        assert!(state.error().is_none());
        assert_eq!(previews.live(), 0);
    }
}
