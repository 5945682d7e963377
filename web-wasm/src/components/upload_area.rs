//! アップロードエリアコンポーネント

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

#[component]
pub fn UploadArea<F>(
    preview_url: Signal<Option<String>>,
    prompt: &'static str,
    /// 処理中はファイルを選ばせない
    disabled: Signal<bool>,
    on_file: F,
) -> impl IntoView
where
    F: Fn(Option<web_sys::File>) + 'static,
{
    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        on_file(input.files().and_then(|files| files.get(0)));
        // 同じファイルを選び直しても change が飛ぶように空に戻す
        input.set_value("");
    };

    view! {
        <label class="dropzone" class:disabled=move || disabled.get()>
            <input
                type="file"
                accept="image/*"
                hidden=true
                disabled=move || disabled.get()
                on:change=on_change
            />
            {move || match preview_url.get() {
                Some(url) => view! { <img src=url alt="preview" class="preview" /> }.into_any(),
                None => view! {
                    <div class="placeholder">
                        <span role="img" aria-label="camera">"📷"</span>
                        <p>{prompt}</p>
                        <small>"JPG, PNG 권장"</small>
                    </div>
                }
                .into_any(),
            }}
        </label>
    }
}
