//! プログレスバーコンポーネント

use leptos::prelude::*;

#[component]
pub fn ProgressBar(
    #[prop(into)] position: Signal<usize>,
    #[prop(into)] total: Signal<usize>,
) -> impl IntoView {
    let percent = move || {
        let total = total.get();
        if total == 0 {
            0.0
        } else {
            position.get() as f64 / total as f64 * 100.0
        }
    };

    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div class="progress-fill" style=move || format!("width: {}%", percent())></div>
            </div>
            <p class="progress-text">
                {move || format!("第 {} 张 / 共 {} 张", position.get() + 1, total.get())}
            </p>
        </div>
    }
}
