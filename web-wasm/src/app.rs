//! メインアプリケーションコンポーネント

use crate::components::{
    classifier_demo::ClassifierDemo, header::Header, logbook_demo::LogbookDemo,
};
use leptos::prelude::*;

/// 表示中のデモ
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Classify,
    Logbook,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Classify => "종 판별",
            Tab::Logbook => "관찰 기록장",
        }
    }
}

/// メインアプリケーションコンポーネント
///
/// タブを切り替えると前のデモは破棄され、状態もプレビューも解放される。
#[component]
pub fn App() -> impl IntoView {
    let (tab, set_tab) = signal(Tab::default());

    let tab_button = move |target: Tab| {
        view! {
            <button
                class="tab"
                class:active=move || tab.get() == target
                on:click=move |_| set_tab.set(target)
            >
                {target.as_str()}
            </button>
        }
    };

    view! {
        <div class="page">
            <Header />

            <nav class="tabs">
                {tab_button(Tab::Classify)}
                {tab_button(Tab::Logbook)}
            </nav>

            {move || match tab.get() {
                Tab::Classify => view! { <ClassifierDemo /> }.into_any(),
                Tab::Logbook => view! { <LogbookDemo /> }.into_any(),
            }}

            <footer class="footnote">
                <p>
                    "실제 추론 모델이 준비되면 API 엔드포인트를 연결해 정확한 판별을 "
                    "수행할 수 있습니다."
                </p>
            </footer>
        </div>
    }
}
