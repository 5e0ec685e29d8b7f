//! スワイプカードコンポーネント
//!
//! 1枚のカードを表示し、ドラッグ／左右矢印キーを決定に変換する。
//! 方向は固定: 左 = 珍藏、右 = 舍弃。閾値未満は中央へ戻す。
//! AI賞析ボタンはカードごとに同時1リクエストまで。

use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use moyun_common::gesture::{
    decision_for_key, discard_overlay_opacity, keep_overlay_opacity, release_outcome,
    rotation_deg, GestureConfig, GestureOutcome, EXIT_DISTANCE,
};
use moyun_common::{require_credential, Decision, ImageRecord};

use crate::app::alert;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, MouseEvent, PointerEvent};

/// 退場アニメーションの長さ（CSS transitionと揃える）
const EXIT_MS: u32 = 400;

#[component]
pub fn SwipeCard<FD, FN>(
    record: ImageRecord<File>,
    /// 前面のカードだけが入力を受け付ける
    active: bool,
    #[prop(into)] api_key: Signal<String>,
    on_decide: FD,
    on_described: FN,
) -> impl IntoView
where
    FD: Fn(Decision) + 'static + Clone + Send,
    FN: Fn(String, String) + 'static + Clone + Send,
{
    let ImageRecord {
        id,
        file_name,
        byte_size,
        display_handle,
        description,
        source,
        ..
    } = record;

    let config = GestureConfig::default();
    let (dx, set_dx) = signal(0.0f64);
    let (drag_origin, set_drag_origin) = signal(None::<f64>);
    let (exiting, set_exiting) = signal(None::<Decision>);
    let (springing, set_springing) = signal(false);
    let (busy, set_busy) = signal(false);
    let (note, set_note) = signal(description);

    // FileはSendでないのでビューに持ち込まず、ローカル保管で渡す
    let source = StoredValue::new_local(source);

    let commit = {
        let on_decide = on_decide.clone();
        move |decision: Decision| {
            if exiting.get_untracked().is_some() {
                return;
            }
            set_exiting.set(Some(decision));
            set_drag_origin.set(None);
            set_dx.set(match decision {
                Decision::Keep => -EXIT_DISTANCE,
                Decision::Discard => EXIT_DISTANCE,
            });
            let on_decide = on_decide.clone();
            Timeout::new(EXIT_MS, move || on_decide(decision)).forget();
        }
    };

    // キーボード操作は前面カードのみ。ドラッグ中・退場中は無視して二重発火を防ぐ
    if active {
        let commit = commit.clone();
        let handle = window_event_listener(leptos::ev::keydown, move |ev| {
            if drag_origin.get_untracked().is_some() || exiting.get_untracked().is_some() {
                return;
            }
            if let Some(decision) = decision_for_key(&ev.key()) {
                commit(decision);
            }
        });
        on_cleanup(move || handle.remove());
    }

    let on_pointer_down = move |ev: PointerEvent| {
        if !active || exiting.get_untracked().is_some() {
            return;
        }
        if let Some(target) = ev
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        {
            let _ = target.set_pointer_capture(ev.pointer_id());
        }
        set_springing.set(false);
        set_drag_origin.set(Some(ev.client_x() as f64));
    };

    let on_pointer_move = move |ev: PointerEvent| {
        if let Some(origin) = drag_origin.get_untracked() {
            set_dx.set(ev.client_x() as f64 - origin);
        }
    };

    let on_pointer_up = {
        let commit = commit.clone();
        move |ev: PointerEvent| {
            let Some(origin) = drag_origin.get_untracked() else {
                return;
            };
            set_drag_origin.set(None);
            match release_outcome(ev.client_x() as f64 - origin, &config) {
                GestureOutcome::Commit(decision) => commit(decision),
                GestureOutcome::Revert => {
                    set_springing.set(true);
                    set_dx.set(0.0);
                }
            }
        }
    };

    let on_pointer_cancel = move |_: PointerEvent| {
        if drag_origin.get_untracked().is_some() {
            set_drag_origin.set(None);
            set_springing.set(true);
            set_dx.set(0.0);
        }
    };

    let analyze = {
        let on_described = on_described.clone();
        let id = id.clone();
        move |ev: MouseEvent| {
            ev.stop_propagation();
            if busy.get_untracked() {
                return;
            }
            let key = match require_credential(&api_key.get_untracked()) {
                Ok(key) => key.to_string(),
                Err(_) => {
                    alert("请先在设置中配置 API Key 以使用 AI 功能。");
                    return;
                }
            };
            set_busy.set(true);
            let file = source.get_value();
            let id = id.clone();
            let on_described = on_described.clone();
            spawn_local(async move {
                let text = crate::api::gemini::describe_file(&key, &file).await;
                // 完了前にカードが外れていても書けるようtry系で流す
                set_busy.try_set(false);
                set_note.try_set(Some(text.clone()));
                on_described(id, text);
            });
        }
    };

    let card_style = move || {
        let x = dx.get();
        let transition = if exiting.get().is_some() {
            "transform 0.4s ease-in-out, opacity 0.4s ease-in-out"
        } else if springing.get() {
            "transform 0.25s cubic-bezier(0.175, 0.885, 0.32, 1.275)"
        } else {
            "none"
        };
        let opacity = if exiting.get().is_some() { 0.0 } else { 1.0 };
        format!(
            "transform: translateX({x}px) rotate({}deg); opacity: {opacity}; transition: {transition};",
            rotation_deg(x)
        )
    };

    let keep_stamp_style = move || format!("opacity: {}", keep_overlay_opacity(dx.get()));
    let discard_stamp_style = move || format!("opacity: {}", discard_overlay_opacity(dx.get()));
    let size_text = format!("{:.2} MB", byte_size / 1024.0 / 1024.0);

    view! {
        <div
            class="swipe-card"
            class:grabbing=move || drag_origin.get().is_some()
            style=card_style
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointercancel=on_pointer_cancel
        >
            <img class="card-image" src=display_handle alt=file_name.clone() draggable="false" />
            <div class="card-shade"></div>
            <div class="stamp stamp-keep" style=keep_stamp_style>
                <span>"留"</span>
            </div>
            <div class="stamp stamp-discard" style=discard_stamp_style>
                <span>"舍"</span>
            </div>
            <div class="card-info">
                <div class="card-meta">
                    <div>
                        <h3 class="card-title">{file_name}</h3>
                        <p class="card-size">{size_text}</p>
                    </div>
                    {active
                        .then(|| {
                            view! {
                                <button
                                    class="analyze-btn"
                                    title="AI 赏析"
                                    on:pointerdown=|ev: PointerEvent| ev.stop_propagation()
                                    on:click=analyze
                                >
                                    {move || if busy.get() { "…" } else { "✦" }}
                                </button>
                            }
                        })}
                </div>
                {move || {
                    note.get()
                        .map(|text| {
                            view! {
                                <div class="analysis-note">
                                    <p>{text}</p>
                                </div>
                            }
                        })
                }}
            </div>
        </div>
    }
}
