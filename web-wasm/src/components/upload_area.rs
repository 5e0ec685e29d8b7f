//! アップロードエリアコンポーネント
//!
//! フォルダ選択（webkitdirectory付きinput）だけを受け付ける。
//! 画像の絞り込みと空選択の扱いはセッション側。

use leptos::html;
use leptos::prelude::*;
use web_sys::FileList;

#[component]
pub fn UploadArea<F>(on_select: F) -> impl IntoView
where
    F: Fn(FileList) + 'static + Clone + Send,
{
    let input_ref = NodeRef::<html::Input>::new();

    // webkitdirectoryはビューマクロの属性では付かないため実ノードに足す
    Effect::new(move |_| {
        if let Some(input) = input_ref.get() {
            let _ = input.set_attribute("webkitdirectory", "");
            let _ = input.set_attribute("directory", "");
        }
    });

    let on_change = move |_| {
        if let Some(input) = input_ref.get_untracked() {
            if let Some(files) = input.files() {
                on_select(files);
            }
            // 同じフォルダを選び直してもchangeが発火するように
            input.set_value("");
        }
    };

    view! {
        <div class="upload-stage">
            <div class="upload-orb">"📂"</div>
            <h2>"选择图集"</h2>
            <p class="upload-hint">"上传文件夹，体验水墨般流畅的整理过程。"</p>
            <label class="upload-button">
                <span>"上传文件夹"</span>
                <input
                    node_ref=input_ref
                    type="file"
                    class="hidden-input"
                    multiple=true
                    accept="image/*"
                    on:change=on_change
                />
            </label>
        </div>
    }
}
