//! CLI用の模擬判別器

use crate::error::Result;
use crate::preview::{TempPreview, TempPreviews};
use crate::scanner::{self, LocalImage};
use monkey_lab_common::{
    ClassificationResult, Classifier, ClassifierView, Delay, SimulatedClassifier, StdRandom,
};
use std::path::Path;
use std::time::Duration;

/// tokio のタイマーで待つ。待っている間はスピナーを出す
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay {
    pub spinner: bool,
}

impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        let bar = self.spinner.then(|| {
            let bar = indicatif::ProgressBar::new_spinner();
            bar.set_message("판별 중...");
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });

        tokio::time::sleep(duration).await;

        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
    }
}

pub type LocalClassifier = SimulatedClassifier<StdRandom, TokioDelay>;

/// シード指定があれば再現可能な乱数を使う
pub fn simulated(seed: Option<u64>, latency: Duration, spinner: bool) -> LocalClassifier {
    let rng = match seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::from_entropy(),
    };
    SimulatedClassifier::new(rng, TokioDelay { spinner }).with_latency(latency)
}

pub type LocalClassifierView = ClassifierView<LocalImage, TempPreview>;

/// 画像を読み込み、プレビューを作ってから判別する
///
/// 戻る時点で画面状態は破棄され、プレビューも解放される。
pub async fn classify_file<C>(
    path: &Path,
    previews: &TempPreviews,
    classifier: &C,
) -> Result<ClassificationResult>
where
    C: Classifier<LocalImage>,
{
    let mut view = LocalClassifierView::new();

    let picked = scanner::load_image(path)?;
    view.select_file(Some(picked), previews)?;
    if let Some(url) = view.preview_url() {
        tracing::debug!(%url, "プレビュー");
    }

    view.classify(classifier).await?;
    let result = view.result().cloned().ok_or_else(|| {
        monkey_lab_common::Error::Classification("결과가 없어요".to_string())
    })?;
    Ok(result)
}
