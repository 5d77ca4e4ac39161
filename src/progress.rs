//! Progress-callback trait for per-item pipeline events.
//!
//! Inject an [`Arc<dyn OperationProgressCallback>`] via
//! [`crate::config::ToolsConfigBuilder::progress_callback`] to be told as the
//! merge pipeline loads each image and as the extract pipeline writes each
//! page. The CLI uses it to drive a terminal progress bar; the library itself
//! never prints.
//!
//! # Example
//!
//! ```rust
//! use pdftools::{OperationProgressCallback, ToolsConfig};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     written: AtomicUsize,
//! }
//!
//! impl OperationProgressCallback for CountingCallback {
//!     fn on_item_complete(&self, index: usize, total: usize, path: &Path) {
//!         self.written.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{index}/{total}: {}", path.display());
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { written: AtomicUsize::new(0) });
//!
//! let config = ToolsConfig::builder()
//!     .progress_callback(counter as Arc<dyn OperationProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the merge and extract pipelines as they process each item.
///
/// Items are processed one at a time, in order. All methods have default
/// no-op implementations so callers only override what they care about.
pub trait OperationProgressCallback: Send + Sync {
    /// Called once before the first item.
    ///
    /// # Arguments
    /// * `label`       — short operation name, e.g. `"Merging"`
    /// * `total_items` — number of images (merge) or pages (extract)
    fn on_operation_start(&self, label: &str, total_items: usize) {
        let _ = (label, total_items);
    }

    /// Called after an item has been handled.
    ///
    /// # Arguments
    /// * `index` — 1-indexed position of the item
    /// * `total` — total items
    /// * `path`  — the image that was loaded (merge) or written (extract)
    fn on_item_complete(&self, index: usize, total: usize, path: &Path) {
        let _ = (index, total, path);
    }

    /// Called once after the last item, only when the operation succeeded.
    fn on_operation_complete(&self, total_items: usize) {
        let _ = total_items;
    }

    /// Called instead of [`Self::on_operation_complete`] when the operation
    /// fails after [`Self::on_operation_start`].
    ///
    /// # Arguments
    /// * `completed_items` — items handled before the failure
    fn on_operation_failed(&self, completed_items: usize) {
        let _ = completed_items;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl OperationProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ToolsConfig`].
pub type ProgressCallback = Arc<dyn OperationProgressCallback>;

/// Fan an event out to the configured callback, if any.
pub(crate) fn notify(cb: &Option<ProgressCallback>, f: impl FnOnce(&dyn OperationProgressCallback)) {
    if let Some(cb) = cb {
        f(cb.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct TrackingCallback {
        started: AtomicUsize,
        items: Mutex<Vec<usize>>,
        completed: AtomicUsize,
    }

    impl OperationProgressCallback for TrackingCallback {
        fn on_operation_start(&self, _label: &str, total_items: usize) {
            self.started.store(total_items, Ordering::SeqCst);
        }

        fn on_item_complete(&self, index: usize, _total: usize, _path: &Path) {
            self.items.lock().unwrap().push(index);
        }

        fn on_operation_complete(&self, total_items: usize) {
            self.completed.store(total_items, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_operation_start("Merging", 3);
        cb.on_item_complete(1, 3, Path::new("a.png"));
        cb.on_operation_complete(3);
        cb.on_operation_failed(1);
    }

    #[test]
    fn notify_forwards_to_configured_callback() {
        let tracker = Arc::new(TrackingCallback::default());
        let cb: Option<ProgressCallback> = Some(tracker.clone());

        notify(&cb, |c| c.on_operation_start("Extracting", 2));
        notify(&cb, |c| c.on_item_complete(1, 2, Path::new("page_001.png")));
        notify(&cb, |c| c.on_item_complete(2, 2, Path::new("page_002.png")));
        notify(&cb, |c| c.on_operation_complete(2));

        assert_eq!(tracker.started.load(Ordering::SeqCst), 2);
        assert_eq!(*tracker.items.lock().unwrap(), vec![1, 2]);
        assert_eq!(tracker.completed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn notify_without_callback_is_silent() {
        notify(&None, |_| panic!("must not be called"));
    }
}
