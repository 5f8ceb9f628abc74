//! テスト用にスパンへ後から記録されたフィールドを集める

use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;

#[derive(Clone, Default)]
pub(crate) struct SpanFieldCapture {
   fields: Arc<Mutex<Vec<(String, String)>>>,
}

impl SpanFieldCapture {
   /// 記録された順の `(フィールド名, 値)`
   pub(crate) fn fields(&self) -> Vec<(String, String)> {
      self.fields.lock().unwrap().clone()
   }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for SpanFieldCapture {
   fn on_record(
      &self,
      _id: &tracing::span::Id,
      values: &tracing::span::Record<'_>,
      _ctx: tracing_subscriber::layer::Context<'_, S>,
   ) {
      let mut visitor = FieldVisitor::default();
      values.record(&mut visitor);
      self.fields.lock().unwrap().extend(visitor.fields);
   }
}

#[derive(Default)]
struct FieldVisitor {
   fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
   fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
      self.fields.push((field.name().to_string(), format!("{value:?}")));
   }

   fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
      self.fields.push((field.name().to_string(), value.to_string()));
   }
}

/// キャプチャ subscriber をスレッドの既定にする
///
/// 返り値の `DefaultGuard` はスコープに保持すること（ドロップでリセット）。
pub(crate) fn setup_capture() -> (tracing::subscriber::DefaultGuard, SpanFieldCapture) {
   let capture = SpanFieldCapture::default();
   let subscriber = tracing_subscriber::registry().with(capture.clone());
   (tracing::subscriber::set_default(subscriber), capture)
}
