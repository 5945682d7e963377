//! 観察記録帳デモ（デモ2）

use crate::browser::{BrowserFile, FileReaderDataUri, ObjectUrls, PreviewUrl};
use crate::components::upload_area::UploadArea;
use leptos::prelude::*;
use leptos::task::spawn_local;
use monkey_lab_common::{DataUriReader, Logbook, ObservationRecord};

type Book = Logbook<BrowserFile, PreviewUrl>;

#[component]
pub fn LogbookDemo() -> impl IntoView {
    let state = RwSignal::new_local(Book::new());

    on_cleanup(move || {
        state.try_update(|s| s.teardown());
    });

    let preview_url = Signal::derive(move || state.with(|s| s.preview_url().map(str::to_owned)));
    let saving = move || state.with(|s| s.is_saving());
    let error = move || state.with(|s| s.error().map(|e| e.to_string()));

    let on_file = move |picked: Option<web_sys::File>| {
        state.update(|s| {
            let _ = s.select_file(picked.map(BrowserFile::from), &ObjectUrls);
        });
    };

    let on_save = move |_| {
        let Some(Ok(ticket)) = state.try_update(|s| s.begin_save()) else {
            return;
        };
        spawn_local(async move {
            let data_uri = FileReaderDataUri.read_data_uri(ticket.image()).await;
            state.try_update(|s| {
                let _ = s.finish_save(ticket, data_uri);
            });
        });
    };

    view! {
        <main class="grid">
            <section class="card upload-card">
                <h2>"관찰 기록하기"</h2>
                <UploadArea
                    preview_url=preview_url
                    prompt="클릭해서 관찰한 사진을 선택하세요"
                    disabled=Signal::derive(saving)
                    on_file=on_file
                />
                <div class="form-group">
                    <label for="species">"종 이름"</label>
                    <input
                        type="text"
                        id="species"
                        placeholder="예: 고릴라"
                        prop:value=move || state.with(|s| s.species().to_string())
                        disabled=saving
                        on:input=move |ev| state.update(|s| s.set_species(event_target_value(&ev)))
                    />
                </div>
                <div class="form-group">
                    <label for="observed-at">"관찰 날짜"</label>
                    <input
                        type="date"
                        id="observed-at"
                        prop:value=move || state.with(|s| s.observed_at().to_string())
                        disabled=saving
                        on:input=move |ev| state.update(|s| s.set_observed_at(event_target_value(&ev)))
                    />
                </div>
                <div class="form-group">
                    <label for="memo">"메모"</label>
                    <textarea
                        id="memo"
                        prop:value=move || state.with(|s| s.memo().to_string())
                        disabled=saving
                        on:input=move |ev| state.update(|s| s.set_memo(event_target_value(&ev)))
                    />
                </div>
                <button class="primary" on:click=on_save disabled=saving>
                    {move || if saving() { "저장 중..." } else { "기록 저장" }}
                </button>
                {move || error().map(|message| view! { <p class="error">{message}</p> })}
            </section>

            <section class="card result-card">
                <h2>"기록 목록"</h2>
                <Show
                    when=move || state.with(|s| !s.records().is_empty())
                    fallback=|| view! { <p class="muted">"아직 기록이 없어요."</p> }
                >
                    <ul class="records">
                        <For
                            each=move || state.with(|s| s.records().to_vec())
                            key=|record| record.id()
                            children=move |record| view! { <RecordItem record=record state=state /> }
                        />
                    </ul>
                </Show>
                <ObservationDetailCard state=state />
            </section>
        </main>
    }
}

#[component]
fn RecordItem(record: ObservationRecord, state: RwSignal<Book, LocalStorage>) -> impl IntoView {
    let id = record.id();
    let is_selected = move || state.with(|s| s.selected().map(|r| r.id()) == Some(id));

    view! {
        <li class="record" class:selected=is_selected>
            <button
                class="record-button"
                on:click=move |_| {
                    state.update(|s| {
                        s.select(id);
                    });
                }
            >
                <span class="record-species">{record.species().to_string()}</span>
                <span class="record-date">{record.observed_at().to_string()}</span>
            </button>
        </li>
    }
}

/// 選択中の記録の詳細。未選択なら何も出さない
#[component]
fn ObservationDetailCard(state: RwSignal<Book, LocalStorage>) -> impl IntoView {
    move || {
        state.with(|s| {
            s.detail().map(|detail| {
                let memo = detail
                    .memo
                    .map(|memo| view! { <p class="memo">{memo.to_string()}</p> });
                view! {
                    <div class="detail">
                        <img src=detail.image_url.to_string() alt=detail.species.to_string() />
                        <p class="label">{detail.species.to_string()}</p>
                        <p class="date">{format!("관찰 날짜: {}", detail.observed_at)}</p>
                        {memo}
                    </div>
                }
            })
        })
    }
}
