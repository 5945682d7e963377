//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="hero">
            <p class="eyebrow">"Monkey Species Classifier"</p>
            <h1>"원숭이 종 판별 데모"</h1>
            <p class="sub">
                "사진을 업로드하면 예측 결과를 보여드려요. 모델이 준비되지 않았다면 "
                "우선은 샘플(모의) 결과로 동작합니다."
            </p>
        </header>
    }
}
