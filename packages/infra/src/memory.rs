//! インメモリストアの共通部品

use std::sync::{
   Arc,
   Mutex,
   MutexGuard,
   PoisonError,
   atomic::{AtomicU64, Ordering},
};

/// 採番付きの行コレクション
///
/// クローンは同じ行と採番カウンタを共有する。
pub(crate) struct MemoryTable<T> {
   rows:     Arc<Mutex<Vec<T>>>,
   sequence: Arc<AtomicU64>,
}

impl<T> MemoryTable<T> {
   pub(crate) fn new() -> Self {
      Self {
         rows:     Arc::new(Mutex::new(Vec::new())),
         sequence: Arc::new(AtomicU64::new(1)),
      }
   }

   /// 次の ID を払い出す（1 始まり、払い出した値は再利用しない）
   pub(crate) fn next_id(&self) -> u64 {
      self.sequence.fetch_add(1, Ordering::SeqCst)
   }

   /// 行コレクションをロックする
   ///
   /// 他のスレッドがロック中に panic していても、中身はそのまま使う。
   pub(crate) fn rows(&self) -> MutexGuard<'_, Vec<T>> {
      self.rows.lock().unwrap_or_else(PoisonError::into_inner)
   }

   /// `is_same` に一致する行を置き換え、なければ末尾に追加する
   pub(crate) fn upsert(&self, row: T, is_same: impl Fn(&T) -> bool) {
      let mut rows = self.rows();
      match rows.iter_mut().find(|existing| is_same(existing)) {
         Some(existing) => *existing = row,
         None => rows.push(row),
      }
   }

   /// `is_target` に一致する行を削除し、削除したかどうかを返す
   pub(crate) fn remove(&self, is_target: impl Fn(&T) -> bool) -> bool {
      let mut rows = self.rows();
      let before = rows.len();
      rows.retain(|row| !is_target(row));
      rows.len() != before
   }
}

impl<T: Clone> MemoryTable<T> {
   pub(crate) fn all(&self) -> Vec<T> {
      self.rows().clone()
   }

   pub(crate) fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
      self.rows().iter().find(|row| predicate(row)).cloned()
   }

   pub(crate) fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
      self.rows().iter().filter(|row| predicate(row)).cloned().collect()
   }
}

impl<T> Clone for MemoryTable<T> {
   fn clone(&self) -> Self {
      Self {
         rows:     Arc::clone(&self.rows),
         sequence: Arc::clone(&self.sequence),
      }
   }
}

impl<T> Default for MemoryTable<T> {
   fn default() -> Self {
      Self::new()
   }
}
