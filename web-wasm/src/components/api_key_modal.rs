//! APIキー設定モーダル
//!
//! 環境キーがない場合のみ開ける。入力値はセッション限りで、
//! どこにも永続化しない。

use leptos::prelude::*;

#[component]
pub fn ApiKeyModal<F>(
    api_key: ReadSignal<String>,
    set_api_key: WriteSignal<String>,
    on_close: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    let close = on_close.clone();
    view! {
        <div class="modal-backdrop">
            <div class="modal">
                <h3>"设置 Gemini API Key"</h3>
                <p class="modal-note">
                    "为了开启 AI 智能赏析功能，请输入您的 API Key。"
                    <br />
                    "如果不输入，仅能使用基本的整理功能。"
                </p>
                <input
                    type="password"
                    placeholder="AIza..."
                    prop:value=move || api_key.get()
                    on:input=move |ev| {
                        set_api_key.set(event_target_value(&ev));
                    }
                />
                <div class="modal-actions">
                    <button
                        class="btn btn-secondary"
                        on:click={
                            let on_close = on_close.clone();
                            move |_| on_close(())
                        }
                    >
                        "关闭"
                    </button>
                    <button class="btn btn-primary" on:click=move |_| close(())>
                        "保存"
                    </button>
                </div>
            </div>
        </div>
    }
}
