//! セッション状態機械
//!
//! 1回の仕分け（フォルダ読込 → スワイプ → 結果確認）の全状態を保持する。
//! キュー・位置・振り分けリストを変更するのはこのモジュールだけで、
//! 変更はすべてユーザーイベントに同期して行われる。
//!
//! 不変条件:
//! - `kept.len() + discarded.len() == position`
//! - `kept`と`discarded`は`queue[0..position]`を決定順に重複なく分割する
//! - `position`は決定1回につきちょうど1だけ単調増加
//! - Sorting→Reviewingは`position == queue.len()`になった瞬間のみ

use crate::error::{Error, Result};
use crate::types::{Decision, ImageRecord, Phase, ResultTab, SelectedFile};

/// 表示ハンドル（Object URL等）の割当・解放を担うプラットフォーム境界
///
/// ブラウザ実装は`URL.createObjectURL`/`revokeObjectURL`を包む。
/// 割当はフォルダ読込時にセッションが行い、解放責任もセッションが持つ。
pub trait DisplayHandleAllocator<S> {
    /// ソースから描画可能なハンドルを割り当てる
    fn allocate(&self, source: &S) -> String;

    /// ハンドルを解放する（以後そのハンドルでは描画できない）
    fn revoke(&self, handle: &str);
}

/// 仕分けセッション
///
/// `kept`/`discarded`はキューへの添字で持つ。同じレコードが両リストに
/// 入り込む余地を構造的に無くすため。
#[derive(Clone)]
pub struct Session<S> {
    phase: Phase,
    queue: Vec<ImageRecord<S>>,
    position: usize,
    kept: Vec<usize>,
    discarded: Vec<usize>,
    /// ID生成用の読込世代。load_folderごとに進む
    generation: u64,
}

impl<S> Session<S> {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            queue: Vec::new(),
            position: 0,
            kept: Vec::new(),
            discarded: Vec::new(),
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// 仕分け済み割合（0.0〜1.0）
    pub fn progress(&self) -> f64 {
        if self.queue.is_empty() {
            0.0
        } else {
            self.position as f64 / self.queue.len() as f64
        }
    }

    /// 現在表示中のカード（Sorting中のみ）
    pub fn current(&self) -> Option<&ImageRecord<S>> {
        if self.phase == Phase::Sorting {
            self.queue.get(self.position)
        } else {
            None
        }
    }

    /// 次に控えているカード（背面に薄く描画する分）
    pub fn next_up(&self) -> Option<&ImageRecord<S>> {
        if self.phase == Phase::Sorting {
            self.queue.get(self.position + 1)
        } else {
            None
        }
    }

    /// フォルダ選択を受け取り、画像だけを選択順のままキューにする
    ///
    /// 1枚も画像がなければ`EmptySelection`で、状態には一切触れない
    /// （旧キューのハンドルも解放しない）。成功時は旧キューのハンドルを
    /// すべて解放してから置き換える。
    pub fn load_folder(
        &mut self,
        files: Vec<SelectedFile<S>>,
        allocator: &impl DisplayHandleAllocator<S>,
    ) -> Result<()> {
        let images: Vec<SelectedFile<S>> = files
            .into_iter()
            .filter(|f| crate::types::is_image_media_type(&f.mime_type))
            .collect();
        if images.is_empty() {
            return Err(Error::EmptySelection);
        }

        self.release_handles(allocator);
        self.generation += 1;

        self.queue = images
            .into_iter()
            .enumerate()
            .map(|(index, file)| {
                let display_handle = allocator.allocate(&file.source);
                ImageRecord {
                    id: format!("{}-{}-{}", self.generation, index, file.file_name),
                    file_name: file.file_name,
                    mime_type: file.mime_type,
                    byte_size: file.byte_size,
                    display_handle,
                    description: None,
                    source: file.source,
                }
            })
            .collect();
        self.position = 0;
        self.kept.clear();
        self.discarded.clear();
        self.phase = Phase::Sorting;
        Ok(())
    }

    /// 現在のカードに決定を下し、1枚進める
    ///
    /// Sorting外・キュー末尾超過はプログラミングエラーとして弾き、
    /// 状態は壊さない。最後の1枚を処理したらReviewingへ。
    pub fn decide(&mut self, decision: Decision) -> Result<()> {
        if self.phase != Phase::Sorting {
            return Err(Error::InvalidTransition("decide outside Sorting"));
        }
        if self.position >= self.queue.len() {
            return Err(Error::InvalidTransition("decide past queue end"));
        }

        match decision {
            Decision::Keep => self.kept.push(self.position),
            Decision::Discard => self.discarded.push(self.position),
        }
        self.position += 1;
        if self.position == self.queue.len() {
            self.phase = Phase::Reviewing;
        }
        Ok(())
    }

    /// どのフェーズからでも初期状態へ戻す
    ///
    /// 保持していた表示ハンドルはすべて解放する。
    pub fn reset(&mut self, allocator: &impl DisplayHandleAllocator<S>) {
        self.release_handles(allocator);
        self.queue.clear();
        self.kept.clear();
        self.discarded.clear();
        self.position = 0;
        self.phase = Phase::Idle;
    }

    /// 解析結果をID一致のレコードに取り付ける
    ///
    /// 遅延完了ポリシー: ユーザーが既にスワイプして先へ進んでいても、
    /// IDが一致するレコードにはそのまま取り付ける（レコードはID不変なので
    /// 無害）。IDが見つからない（リセット・再読込済み）場合と、既に
    /// 説明が付いている場合は黙って捨てる。別のレコードに付くことはない。
    pub fn attach_description(&mut self, id: &str, text: String) {
        if let Some(record) = self.queue.iter_mut().find(|r| r.id == id) {
            if record.description.is_none() {
                record.description = Some(text);
            }
        }
    }

    /// タブに対応する結果リスト（決定順）
    pub fn records(&self, tab: ResultTab) -> impl Iterator<Item = &ImageRecord<S>> {
        let indices = match tab {
            ResultTab::Kept => &self.kept,
            ResultTab::Discarded => &self.discarded,
        };
        indices.iter().map(move |&i| &self.queue[i])
    }

    pub fn count(&self, tab: ResultTab) -> usize {
        match tab {
            ResultTab::Kept => self.kept.len(),
            ResultTab::Discarded => self.discarded.len(),
        }
    }

    fn release_handles(&self, allocator: &impl DisplayHandleAllocator<S>) {
        for record in &self.queue {
            allocator.revoke(&record.display_handle);
        }
    }
}

impl<S> Default for Session<S> {
    fn default() -> Self {
        Self::new()
    }
}
