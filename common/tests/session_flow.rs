//! セッション通しテスト
//!
//! フォルダ読込からエクスポートまでの一連の流れを検証

use moyun_common::{
    filename_manifest, manifest_file_name, Decision, DisplayHandleAllocator, Phase, ResultTab,
    SelectedFile, Session,
};
use std::cell::RefCell;

#[derive(Default)]
struct RecordingAllocator {
    allocated: RefCell<u32>,
    revoked: RefCell<Vec<String>>,
}

impl DisplayHandleAllocator<()> for RecordingAllocator {
    fn allocate(&self, _source: &()) -> String {
        let mut n = self.allocated.borrow_mut();
        *n += 1;
        format!("blob:{}", n)
    }

    fn revoke(&self, handle: &str) {
        self.revoked.borrow_mut().push(handle.to_string());
    }
}

fn selected(name: &str, mime: &str) -> SelectedFile<()> {
    SelectedFile {
        file_name: name.to_string(),
        mime_type: mime.to_string(),
        byte_size: 2048.0,
        source: (),
    }
}

/// 混在フォルダの読込 → 全カード仕分け → 結果確認 → エクスポート → リセット
#[test]
fn test_full_triage_run() {
    let mut session = Session::new();
    let allocator = RecordingAllocator::default();

    let files = vec![
        selected("spring.jpg", "image/jpeg"),
        selected("readme.md", "text/markdown"),
        selected("summer.png", "image/png"),
        selected("autumn.webp", "image/webp"),
    ];
    session.load_folder(files, &allocator).expect("読込失敗");

    assert_eq!(session.phase(), Phase::Sorting);
    assert_eq!(session.queue_len(), 3);

    // spring → 珍藏、summer → 舍弃、autumn → 珍藏
    session.decide(Decision::Keep).unwrap();
    session.decide(Decision::Discard).unwrap();
    session.decide(Decision::Keep).unwrap();

    assert_eq!(session.phase(), Phase::Reviewing);

    let kept: Vec<String> = session
        .records(ResultTab::Kept)
        .map(|r| r.file_name.clone())
        .collect();
    let discarded: Vec<String> = session
        .records(ResultTab::Discarded)
        .map(|r| r.file_name.clone())
        .collect();
    assert_eq!(kept, vec!["spring.jpg", "autumn.webp"]);
    assert_eq!(discarded, vec!["summer.png"]);

    let manifest = filename_manifest(kept.iter().map(String::as_str)).expect("マニフェスト生成失敗");
    assert_eq!(manifest, "spring.jpg\nautumn.webp\n");
    assert_eq!(manifest_file_name(ResultTab::Kept), "珍藏清单.txt");

    session.reset(&allocator);
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.queue_len(), 0);
    // 読込で割り当てた3ハンドルがすべて解放されている
    assert_eq!(allocator.revoked.borrow().len(), 3);
}

/// 解析の遅延完了はスワイプ後もID一致のレコードにだけ付く
#[test]
fn test_late_analysis_completion_never_misattributes() {
    let mut session = Session::new();
    let allocator = RecordingAllocator::default();
    session
        .load_folder(
            vec![
                selected("first.jpg", "image/jpeg"),
                selected("second.jpg", "image/jpeg"),
            ],
            &allocator,
        )
        .expect("読込失敗");

    // first表示中に解析を要求し、完了前にスワイプして先へ進む
    let first_id = session.current().unwrap().id.clone();
    session.decide(Decision::Discard).unwrap();
    assert_eq!(session.current().unwrap().file_name, "second.jpg");

    // 遅れて届いた結果はfirstに付き、secondには決して付かない
    session.attach_description(&first_id, "寒江独钓".to_string());
    assert!(session.current().unwrap().description.is_none());
    let discarded: Vec<_> = session.records(ResultTab::Discarded).collect();
    assert_eq!(discarded[0].description.as_deref(), Some("寒江独钓"));
}

/// リセット後に届いた完了は黙って捨てられる
#[test]
fn test_completion_after_reset_is_dropped() {
    let mut session = Session::new();
    let allocator = RecordingAllocator::default();
    session
        .load_folder(vec![selected("only.jpg", "image/jpeg")], &allocator)
        .expect("読込失敗");
    let id = session.current().unwrap().id.clone();

    session.reset(&allocator);
    session.attach_description(&id, "遅延結果".to_string());

    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.queue_len(), 0);
}
