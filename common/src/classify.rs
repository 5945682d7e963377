//! 種判別（模擬推論）
//!
//! 実モデルが用意できるまでの仮実装。`Classifier` のシグネチャ
//! （画像を受け取り、非同期にラベルと信頼度を返す・失敗し得る）は
//! 実バックエンドに差し替えても変えないこと。

use crate::error::{Error, Result};
use crate::species::SPECIES;
use crate::upload::{ImageSource, PreviewHandle, PreviewSource, UploadState};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::time::Duration;

/// 模擬推論の待ち時間
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(900);

const CONFIDENCE_MIN: f64 = 0.70;
const CONFIDENCE_SPAN: f64 = 0.25;

/// バックエンドが返す判別結果（信頼度は 0〜1）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f64,
}

/// 画面表示用の判別結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: String,
    /// 小数2桁の文字列
    pub confidence: String,
}

impl From<Prediction> for ClassificationResult {
    fn from(prediction: Prediction) -> Self {
        Self {
            label: prediction.label,
            confidence: format!("{:.2}", prediction.confidence),
        }
    }
}

/// 乱数源
pub trait RandomSource {
    /// `0..label_count` のラベル番号と `[0, 1)` の一様値を返す
    fn draw(&mut self, label_count: usize) -> (usize, f64);
}

/// `rand` の RNG を乱数源として使うアダプタ
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

/// シード指定可能な乱数源
pub type StdRandom = RngSource<StdRng>;

impl RngSource<ThreadRng> {
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn draw(&mut self, label_count: usize) -> (usize, f64) {
        let index = self.0.gen_range(0..label_count.max(1));
        (index, self.0.gen::<f64>())
    }
}

/// タイマー
#[allow(async_fn_in_trait)]
pub trait Delay {
    async fn wait(&self, duration: Duration);
}

/// 画像判別バックエンド
#[allow(async_fn_in_trait)]
pub trait Classifier<F> {
    async fn classify(&self, image: &F) -> Result<Prediction>;
}

/// 乱数からラベルと信頼度を1つ作る
pub fn simulate_prediction<R: RandomSource + ?Sized>(rng: &mut R) -> Prediction {
    let (index, unit) = rng.draw(SPECIES.len());
    let label = SPECIES[index.min(SPECIES.len() - 1)];
    let raw = CONFIDENCE_MIN + unit.clamp(0.0, 1.0) * CONFIDENCE_SPAN;
    Prediction {
        label: label.to_string(),
        confidence: (raw * 100.0).round() / 100.0,
    }
}

/// 一定時間待ってからランダムな結果を返す模擬判別器
#[derive(Debug)]
pub struct SimulatedClassifier<R, D> {
    rng: RefCell<R>,
    delay: D,
    latency: Duration,
}

impl<R: RandomSource, D: Delay> SimulatedClassifier<R, D> {
    pub fn new(rng: R, delay: D) -> Self {
        Self {
            rng: RefCell::new(rng),
            delay,
            latency: SIMULATED_LATENCY,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl<F, R: RandomSource, D: Delay> Classifier<F> for SimulatedClassifier<R, D> {
    async fn classify(&self, _image: &F) -> Result<Prediction> {
        self.delay.wait(self.latency).await;
        let prediction = simulate_prediction(&mut *self.rng.borrow_mut());
        tracing::debug!(label = %prediction.label, confidence = prediction.confidence, "模擬判別");
        Ok(prediction)
    }
}

/// 判別画面の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyPhase {
    Idle,
    FileSelected,
    Loading,
    ResultReady,
}

/// 実行中の判別リクエスト
///
/// 世代番号が古いものは `finish_classify` で捨てられる
#[derive(Debug)]
pub struct ClassifyTicket<F> {
    generation: u64,
    image: F,
}

impl<F> ClassifyTicket<F> {
    pub fn image(&self) -> &F {
        &self.image
    }
}

/// 判別画面（デモ1）
#[derive(Debug)]
pub struct ClassifierView<F, H> {
    upload: UploadState<F, H>,
    result: Option<ClassificationResult>,
    loading: bool,
    generation: u64,
}

impl<F, H> Default for ClassifierView<F, H> {
    fn default() -> Self {
        Self {
            upload: UploadState::default(),
            result: None,
            loading: false,
            generation: 0,
        }
    }
}

impl<F: ImageSource + Clone, H: PreviewHandle> ClassifierView<F, H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイル選択
    ///
    /// 受け付けたら前回の結果を消し、実行中の判別は結果を捨てる扱いにする。
    pub fn select_file<P>(&mut self, picked: Option<F>, previews: &P) -> Result<()>
    where
        P: PreviewSource<F, Handle = H>,
    {
        self.upload.select(picked, previews)?;
        self.result = None;
        self.loading = false;
        self.generation += 1;
        Ok(())
    }

    /// 判別開始
    pub fn begin_classify(&mut self) -> Result<ClassifyTicket<F>> {
        if self.loading {
            return Err(Error::Busy);
        }
        let Some(image) = self.upload.file().cloned() else {
            self.upload.set_error(Error::NoImageSelected);
            return Err(Error::NoImageSelected);
        };

        self.upload.clear_error();
        self.result = None;
        self.loading = true;
        self.generation += 1;
        tracing::debug!(generation = self.generation, name = %image.name(), "判別開始");
        Ok(ClassifyTicket {
            generation: self.generation,
            image,
        })
    }

    /// 判別結果の反映。古いリクエストなら何もせず `false`
    pub fn finish_classify(&mut self, ticket: ClassifyTicket<F>, outcome: Result<Prediction>) -> bool {
        if ticket.generation != self.generation || !self.loading {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "古い判別結果を破棄"
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(prediction) => self.result = Some(prediction.into()),
            Err(err) => self.upload.set_error(err),
        }
        true
    }

    /// 開始から反映までをまとめて行う
    pub async fn classify<C: Classifier<F>>(&mut self, classifier: &C) -> Result<()> {
        let ticket = self.begin_classify()?;
        let outcome = classifier.classify(ticket.image()).await;
        let failure = outcome.as_ref().err().cloned();
        self.finish_classify(ticket, outcome);
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// 画面破棄時の後始末
    pub fn teardown(&mut self) {
        self.upload.release();
        self.loading = false;
        self.generation += 1;
    }
}

impl<F, H: PreviewHandle> ClassifierView<F, H> {
    pub fn preview_url(&self) -> Option<&str> {
        self.upload.preview_url()
    }

    pub fn error(&self) -> Option<&Error> {
        self.upload.error()
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> ClassifyPhase {
        if self.loading {
            ClassifyPhase::Loading
        } else if self.result.is_some() {
            ClassifyPhase::ResultReady
        } else if self.upload.has_file() {
            ClassifyPhase::FileSelected
        } else {
            ClassifyPhase::Idle
        }
    }
}
