//! ファイルアクセスとObject URL管理
//!
//! ブラウザ側のケーパビリティ実装:
//! - ObjectUrlAllocator: 表示ハンドル = Object URLの割当・解放
//! - selected_files: FileList → SelectedFile（絞り込みはセッション側）
//! - read_as_data_url: FileReaderコールバックのasync化

use futures::channel::oneshot;
use moyun_common::session::DisplayHandleAllocator;
use moyun_common::types::SelectedFile;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileList, FileReader, Url};

/// Object URLを表示ハンドルとして扱うアロケータ
///
/// 割当と解放はセッションコントローラだけが呼ぶ。
pub struct ObjectUrlAllocator;

impl DisplayHandleAllocator<File> for ObjectUrlAllocator {
    fn allocate(&self, source: &File) -> String {
        Url::create_object_url_with_blob(source).unwrap_or_default()
    }

    fn revoke(&self, handle: &str) {
        let _ = Url::revoke_object_url(handle);
    }
}

/// FileListを選択順のままSelectedFileに変換する
pub fn selected_files(files: &FileList) -> Vec<SelectedFile<File>> {
    let mut out = Vec::with_capacity(files.length() as usize);
    for i in 0..files.length() {
        if let Some(file) = files.get(i) {
            out.push(SelectedFile {
                file_name: file.name(),
                mime_type: file.type_(),
                byte_size: file.size(),
                source: file,
            });
        }
    }
    out
}

/// FileをData URL（"data:image/jpeg;base64,..."）として読み込む
pub async fn read_as_data_url(file: &File) -> Result<String, JsValue> {
    let reader = FileReader::new()?;
    let (tx, rx) = oneshot::channel::<Result<String, JsValue>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let reader_for_load = reader.clone();
    let tx_load = tx.clone();
    let onload = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Some(tx) = tx_load.borrow_mut().take() {
            let result = reader_for_load.result().and_then(|value| {
                value
                    .as_string()
                    .ok_or_else(|| JsValue::from_str("FileReader result is not a string"))
            });
            let _ = tx.send(result);
        }
    }) as Box<dyn FnMut(_)>);

    let tx_error = tx.clone();
    let onerror = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Some(tx) = tx_error.borrow_mut().take() {
            let _ = tx.send(Err(JsValue::from_str("FileReader error")));
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    reader.read_as_data_url(file)?;

    let result = rx
        .await
        .map_err(|_| JsValue::from_str("FileReader canceled"))?;
    drop(onload);
    drop(onerror);
    result
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use moyun_common::session::DisplayHandleAllocator;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_object_url_allocator_round_trip() {
        let parts = js_sys::Array::new();
        parts.push(&JsValue::from_str("dummy"));
        let file = File::new_with_str_sequence(&parts, "dummy.jpg").expect("File生成失敗");

        let handle = ObjectUrlAllocator.allocate(&file);
        assert!(handle.starts_with("blob:"));
        ObjectUrlAllocator.revoke(&handle);
    }

    #[wasm_bindgen_test]
    async fn wasm_read_as_data_url_yields_data_url() {
        let parts = js_sys::Array::new();
        parts.push(&JsValue::from_str("dummy"));
        let file = File::new_with_str_sequence(&parts, "dummy.txt").expect("File生成失敗");

        let data_url = read_as_data_url(&file).await.expect("読み込み失敗");
        assert!(data_url.starts_with("data:"));
    }
}
