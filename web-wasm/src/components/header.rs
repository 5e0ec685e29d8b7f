//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header<FS, FR>(
    /// 環境キーが設定済みなら設定UI自体を描画しない
    show_settings: bool,
    #[prop(into)] can_reset: Signal<bool>,
    on_settings: FS,
    on_reset: FR,
) -> impl IntoView
where
    FS: Fn(()) + 'static + Clone + Send,
    FR: Fn(()) + 'static + Clone + Send,
{
    view! {
        <header class="header">
            <div class="brand">
                <div class="brand-mark">"墨"</div>
                <h1>"墨韵图集"</h1>
            </div>
            <div class="header-actions">
                {show_settings
                    .then(|| {
                        let on_settings = on_settings.clone();
                        view! {
                            <button
                                class="icon-btn"
                                title="设置 API Key"
                                on:click=move |_| on_settings(())
                            >
                                "⚙"
                            </button>
                        }
                    })}
                <button
                    class="btn btn-ghost"
                    style:display=move || if can_reset.get() { "" } else { "none" }
                    on:click={
                        let on_reset = on_reset.clone();
                        move |_| on_reset(())
                    }
                >
                    "重置"
                </button>
            </div>
        </header>
    }
}
