//! 種判別デモ（デモ1）

use crate::browser::{BrowserFile, GlooDelay, ObjectUrls, PreviewUrl};
use crate::components::upload_area::UploadArea;
use leptos::prelude::*;
use leptos::task::spawn_local;
use monkey_lab_common::{Classifier, ClassifierView, RngSource, SimulatedClassifier, GUIDANCE};

type View = ClassifierView<BrowserFile, PreviewUrl>;

#[component]
pub fn ClassifierDemo() -> impl IntoView {
    let state = RwSignal::new_local(View::new());

    // 画面を閉じたらプレビューを解放
    on_cleanup(move || {
        state.try_update(|s| s.teardown());
    });

    let preview_url = Signal::derive(move || state.with(|s| s.preview_url().map(str::to_owned)));
    let loading = move || state.with(|s| s.is_loading());
    let error = move || state.with(|s| s.error().map(|e| e.to_string()));
    let result = move || state.with(|s| s.result().cloned());

    let on_file = move |picked: Option<web_sys::File>| {
        state.update(|s| {
            let _ = s.select_file(picked.map(BrowserFile::from), &ObjectUrls);
        });
    };

    let on_predict = move |_| {
        let Some(Ok(ticket)) = state.try_update(|s| s.begin_classify()) else {
            return;
        };
        // TODO: 推論APIができたら SimulatedClassifier を差し替える
        spawn_local(async move {
            let classifier = SimulatedClassifier::new(RngSource::thread(), GlooDelay);
            let outcome = classifier.classify(ticket.image()).await;
            state.try_update(|s| s.finish_classify(ticket, outcome));
        });
    };

    view! {
        <main class="grid">
            <section class="card upload-card">
                <h2>"1) 사진 올리기"</h2>
                <UploadArea
                    preview_url=preview_url
                    prompt="클릭해서 원숭이 사진을 선택하세요"
                    disabled=Signal::derive(|| false)
                    on_file=on_file
                />
                <button class="primary" on:click=on_predict disabled=loading>
                    {move || if loading() { "판별 중..." } else { "종 판별하기" }}
                </button>
                {move || error().map(|message| view! { <p class="error">{message}</p> })}
            </section>

            <section class="card result-card">
                <h2>"2) 결과"</h2>
                {move || match result() {
                    Some(result) => view! {
                        <div class="result">
                            <p class="tag">"예측"</p>
                            <p class="label">{result.label}</p>
                            <p class="confidence">{format!("신뢰도: {}", result.confidence)}</p>
                        </div>
                    }
                    .into_any(),
                    None => view! {
                        <p class="muted">"아직 결과가 없어요. 사진을 올려주세요."</p>
                    }
                    .into_any(),
                }}
                <div class="hint">
                    <p>"사용 가이드"</p>
                    <ul>
                        {GUIDANCE.iter().map(|item| view! { <li>{*item}</li> }).collect_view()}
                    </ul>
                </div>
            </section>
        </main>
    }
}
