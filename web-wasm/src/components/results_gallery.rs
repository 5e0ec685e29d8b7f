//! 結果ギャラリーコンポーネント
//!
//! 珍藏／舍弃の2タブでサムネイルを一覧し、アクティブなタブの
//! ファイル名一覧をテキストとしてダウンロードできる。

use leptos::prelude::*;
use moyun_common::{filename_manifest, manifest_file_name, ResultTab, Session};
use web_sys::File;

/// 一覧描画用のビューモデル。FileやObject URL以外の生資源をビューに持ち込まない
#[derive(Clone, PartialEq)]
struct ThumbItem {
    id: String,
    file_name: String,
    display_handle: String,
    description: Option<String>,
}

#[component]
pub fn ResultsGallery(session: RwSignal<Session<File>, LocalStorage>) -> impl IntoView {
    let (active_tab, set_active_tab) = signal(ResultTab::Kept);

    let items = move || {
        let tab = active_tab.get();
        session.with(|s| {
            s.records(tab)
                .map(|r| ThumbItem {
                    id: r.id.clone(),
                    file_name: r.file_name.clone(),
                    display_handle: r.display_handle.clone(),
                    description: r.description.clone(),
                })
                .collect::<Vec<_>>()
        })
    };
    let is_empty = move || items().is_empty();
    let kept_count = move || session.with(|s| s.count(ResultTab::Kept));
    let discarded_count = move || session.with(|s| s.count(ResultTab::Discarded));

    let on_download = move |_| {
        let tab = active_tab.get_untracked();
        let names = session.with_untracked(|s| {
            s.records(tab)
                .map(|r| r.file_name.clone())
                .collect::<Vec<_>>()
        });
        // 空リストはボタン側で無効化済み。Noneならここで終わり（成果物なし）
        if let Some(manifest) = filename_manifest(names.iter().map(String::as_str)) {
            if let Err(e) = crate::download::download_text(manifest_file_name(tab), &manifest) {
                web_sys::console::error_1(&e);
            }
        }
    };

    view! {
        <div class="results-panel">
            <div class="tabs">
                <button
                    class="tab tab-keep"
                    class:active=move || active_tab.get() == ResultTab::Kept
                    on:click=move |_| set_active_tab.set(ResultTab::Kept)
                >
                    {move || format!("珍藏 ({})", kept_count())}
                </button>
                <button
                    class="tab tab-discard"
                    class:active=move || active_tab.get() == ResultTab::Discarded
                    on:click=move |_| set_active_tab.set(ResultTab::Discarded)
                >
                    {move || format!("舍弃 ({})", discarded_count())}
                </button>
            </div>

            <div class="results-body">
                <Show
                    when=move || !is_empty()
                    fallback=|| {
                        view! {
                            <div class="results-empty">
                                <p>"暂无图片"</p>
                            </div>
                        }
                    }
                >
                    <div class="results-grid">
                        <For
                            each=items
                            key=|item| item.id.clone()
                            children=move |item: ThumbItem| {
                                view! {
                                    <div
                                        class="result-thumb"
                                        title=item.description.clone().unwrap_or_default()
                                    >
                                        <img
                                            src=item.display_handle
                                            alt=item.file_name
                                            loading="lazy"
                                        />
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </div>

            <div class="results-footer">
                <p class="footer-hint">
                    {move || {
                        if active_tab.get() == ResultTab::Kept {
                            "提示：左滑保留的图片"
                        } else {
                            "提示：右滑舍弃的图片"
                        }
                    }}
                </p>
                <button class="btn btn-primary" disabled=is_empty on:click=on_download>
                    "下载清单"
                </button>
            </div>
        </div>
    }
}
