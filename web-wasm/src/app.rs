//! メインアプリケーションコンポーネント
//!
//! フェーズ（Idle/Sorting/Reviewing）で画面を切り替える。セッションは
//! 注入可能な単一のシグナルとして持ち、変更はこのモジュールの
//! コールバック経由でのみ行う。

use leptos::prelude::*;
use moyun_common::{Decision, Error, Phase, Session};
use web_sys::File;

use crate::components::{
    api_key_modal::ApiKeyModal, header::Header, progress_bar::ProgressBar,
    results_gallery::ResultsGallery, swipe_card::SwipeCard, upload_area::UploadArea,
};
use crate::files::{selected_files, ObjectUrlAllocator};

/// ビルド時に注入されるデプロイ用APIキー。設定済みなら手動入力UIは一切出さない
const ENV_API_KEY: Option<&str> = option_env!("GEMINI_API_KEY");

pub(crate) fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[component]
pub fn App() -> impl IntoView {
    let session: RwSignal<Session<File>, LocalStorage> = RwSignal::new_local(Session::new());
    let (manual_key, set_manual_key) = signal(String::new());
    let (show_key_modal, set_show_key_modal) = signal(false);

    // 環境キー優先。手動入力はフォールバック
    let effective_key = Signal::derive(move || {
        ENV_API_KEY
            .map(str::to_string)
            .unwrap_or_else(|| manual_key.get())
    });

    let phase = move || session.with(|s| s.phase());

    let on_select = move |files: web_sys::FileList| {
        let selected = selected_files(&files);
        session.update(|s| match s.load_folder(selected, &ObjectUrlAllocator) {
            Ok(()) => {}
            Err(Error::EmptySelection) => alert("在此文件夹中未发现图片。"),
            Err(e) => leptos::logging::warn!("load_folder rejected: {e}"),
        });
    };

    let on_decide = move |decision: Decision| {
        session.update(|s| {
            if let Err(e) = s.decide(decision) {
                leptos::logging::warn!("decide rejected: {e}");
            }
        });
    };

    let on_described = move |id: String, text: String| {
        session.update(|s| s.attach_description(&id, text));
    };

    let on_reset = move |_: ()| {
        session.update(|s| s.reset(&ObjectUrlAllocator));
    };

    view! {
        <div class="app-shell">
            <Header
                show_settings=ENV_API_KEY.is_none()
                can_reset=Signal::derive(move || phase() != Phase::Idle)
                on_settings=move |_: ()| set_show_key_modal.update(|v| *v = !*v)
                on_reset=on_reset
            />

            {move || {
                show_key_modal
                    .get()
                    .then(|| {
                        view! {
                            <ApiKeyModal
                                api_key=manual_key
                                set_api_key=set_manual_key
                                on_close=move |_: ()| set_show_key_modal.set(false)
                            />
                        }
                    })
            }}

            <main class="stage">
                {move || match phase() {
                    Phase::Idle => view! { <UploadArea on_select=on_select /> }.into_any(),
                    Phase::Sorting => {
                        view! {
                            <SortingStage
                                session=session
                                api_key=effective_key
                                on_decide=on_decide
                                on_described=on_described
                            />
                        }
                            .into_any()
                    }
                    Phase::Reviewing => view! { <ResultsGallery session=session /> }.into_any(),
                }}
            </main>
        </div>
    }
}

/// 仕分けステージ: 進捗・カードスタック・操作凡例
#[component]
fn SortingStage<FD, FN>(
    session: RwSignal<Session<File>, LocalStorage>,
    #[prop(into)] api_key: Signal<String>,
    on_decide: FD,
    on_described: FN,
) -> impl IntoView
where
    FD: Fn(Decision) + 'static + Clone + Send,
    FN: Fn(String, String) + 'static + Clone + Send,
{
    // 位置が進んだ時だけカードを組み直す（説明の付与だけでは組み直さない。
    // 組み直すと解析中カードのビジー状態が飛ぶ）
    let current_id = Memo::new(move |_| session.with(|s| s.current().map(|r| r.id.clone())));
    let position = Signal::derive(move || session.with(|s| s.position()));
    let total = Signal::derive(move || session.with(|s| s.queue_len()));

    view! {
        <div class="sorting-stage">
            <ProgressBar position=position total=total />

            <div class="card-stack">
                {move || {
                    current_id.track();
                    let (behind, front) = session
                        .with_untracked(|s| (s.next_up().cloned(), s.current().cloned()));
                    let on_decide_behind = on_decide.clone();
                    let on_described_behind = on_described.clone();
                    let on_decide_front = on_decide.clone();
                    let on_described_front = on_described.clone();
                    (
                        behind
                            .map(|record| {
                                view! {
                                    <div class="card-layer card-behind">
                                        <SwipeCard
                                            record=record
                                            active=false
                                            api_key=api_key
                                            on_decide=on_decide_behind
                                            on_described=on_described_behind
                                        />
                                    </div>
                                }
                            }),
                        front
                            .map(|record| {
                                view! {
                                    <div class="card-layer card-front">
                                        <SwipeCard
                                            record=record
                                            active=true
                                            api_key=api_key
                                            on_decide=on_decide_front
                                            on_described=on_described_front
                                        />
                                    </div>
                                }
                            }),
                    )
                }}
            </div>

            <div class="legend">
                <div class="legend-side legend-keep">
                    <span class="legend-orb">"留"</span>
                    <span class="legend-label">"左滑 · 珍藏"</span>
                </div>
                <div class="legend-side legend-discard">
                    <span class="legend-label">"右滑 · 舍弃"</span>
                    <span class="legend-orb">"舍"</span>
                </div>
            </div>

            <p class="key-hint">"亦可使用左右方向键操作"</p>
        </div>
    }
}
