//! Result-stream interception.
//!
//! A pipeline can be consumed through up to eight invocation shapes:
//! single-shot, batch, chunk stream, and event stream, each in a sync and
//! an async flavour. [`Capabilities`] records which shapes a given pipeline
//! actually exposes, one optional boxed callable per shape.
//!
//! [`intercept`] rewraps a `Capabilities` so that every emitted chunk that
//! looks like a pipeline result (a JSON object carrying a `messages` array)
//! passes through a transform on its way out. Progress chunks, token
//! deltas, and anything else pass through untouched. Shapes the pipeline
//! does not expose stay absent.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::{FutureExt, StreamExt};
use serde_json::Value;

/// A chunk-level rewrite applied to pipeline results. Must not fail;
/// chunks it cannot improve should be returned unchanged.
pub type Transform = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

pub type InvokeFn = Box<dyn Fn(Value) -> Value + Send + Sync>;
pub type InvokeAsyncFn = Box<dyn Fn(Value) -> BoxFuture<'static, Value> + Send + Sync>;
pub type BatchFn = Box<dyn Fn(Vec<Value>) -> Vec<Value> + Send + Sync>;
pub type BatchAsyncFn = Box<dyn Fn(Vec<Value>) -> BoxFuture<'static, Vec<Value>> + Send + Sync>;
pub type StreamFn = Box<dyn Fn(Value) -> Box<dyn Iterator<Item = Value> + Send> + Send + Sync>;
pub type StreamAsyncFn = Box<dyn Fn(Value) -> BoxStream<'static, Value> + Send + Sync>;

/// The invocation shapes a pipeline exposes. Absent entries mean the
/// pipeline does not support that shape.
#[derive(Default)]
pub struct Capabilities {
    pub invoke: Option<InvokeFn>,
    pub invoke_async: Option<InvokeAsyncFn>,
    pub batch: Option<BatchFn>,
    pub batch_async: Option<BatchAsyncFn>,
    pub stream: Option<StreamFn>,
    pub stream_async: Option<StreamAsyncFn>,
    pub stream_events: Option<StreamFn>,
    pub stream_events_async: Option<StreamAsyncFn>,
}

/// True when a chunk is a pipeline result rather than an intermediate
/// event: a JSON object carrying a `messages` array.
fn is_result_chunk(chunk: &Value) -> bool {
    chunk
        .as_object()
        .and_then(|fields| fields.get("messages"))
        .map(Value::is_array)
        .unwrap_or(false)
}

fn process_chunk(chunk: Value, transform: &Transform) -> Value {
    if is_result_chunk(&chunk) {
        transform(&chunk)
    } else {
        chunk
    }
}

/// Rewrap every present capability so emitted result chunks pass through
/// `transform`.
///
/// Stream shapes transform one chunk at a time with no internal buffering:
/// the wrapped stream does not pull the next upstream chunk until the
/// current one has been delivered downstream, so upstream backpressure and
/// suspension behavior are preserved.
pub fn intercept(caps: Capabilities, transform: Transform) -> Capabilities {
    Capabilities {
        invoke: caps.invoke.map(|inner| wrap_invoke(inner, transform.clone())),
        invoke_async: caps
            .invoke_async
            .map(|inner| wrap_invoke_async(inner, transform.clone())),
        batch: caps.batch.map(|inner| wrap_batch(inner, transform.clone())),
        batch_async: caps
            .batch_async
            .map(|inner| wrap_batch_async(inner, transform.clone())),
        stream: caps.stream.map(|inner| wrap_stream(inner, transform.clone())),
        stream_async: caps
            .stream_async
            .map(|inner| wrap_stream_async(inner, transform.clone())),
        stream_events: caps
            .stream_events
            .map(|inner| wrap_stream(inner, transform.clone())),
        stream_events_async: caps
            .stream_events_async
            .map(|inner| wrap_stream_async(inner, transform)),
    }
}

fn wrap_invoke(inner: InvokeFn, transform: Transform) -> InvokeFn {
    Box::new(move |input| process_chunk(inner(input), &transform))
}

fn wrap_invoke_async(inner: InvokeAsyncFn, transform: Transform) -> InvokeAsyncFn {
    Box::new(move |input| {
        let transform = transform.clone();
        let fut = inner(input);
        async move { process_chunk(fut.await, &transform) }.boxed()
    })
}

fn wrap_batch(inner: BatchFn, transform: Transform) -> BatchFn {
    Box::new(move |inputs| {
        inner(inputs)
            .into_iter()
            .map(|result| process_chunk(result, &transform))
            .collect()
    })
}

fn wrap_batch_async(inner: BatchAsyncFn, transform: Transform) -> BatchAsyncFn {
    Box::new(move |inputs| {
        let transform = transform.clone();
        let fut = inner(inputs);
        async move {
            fut.await
                .into_iter()
                .map(|result| process_chunk(result, &transform))
                .collect()
        }
        .boxed()
    })
}

fn wrap_stream(inner: StreamFn, transform: Transform) -> StreamFn {
    Box::new(move |input| {
        let transform = transform.clone();
        Box::new(
            inner(input).map(move |chunk| process_chunk(chunk, &transform)),
        )
    })
}

fn wrap_stream_async(inner: StreamAsyncFn, transform: Transform) -> StreamAsyncFn {
    Box::new(move |input| {
        let transform = transform.clone();
        inner(input)
            .map(move |chunk| process_chunk(chunk, &transform))
            .boxed()
    })
}
