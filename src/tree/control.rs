//! Caller hooks threaded through a walk: cancellation and progress

/// Number of processed entries between two progress reports.
pub const PROGRESS_INTERVAL: usize = 10;

/// Cancellation predicate and optional progress sink for one walk.
///
/// The predicate is polled at every cancellation checkpoint: before the
/// root, before listing each directory, and before each entry. The
/// progress sink receives `"<count> processed"` every
/// [`PROGRESS_INTERVAL`] entries and has no influence on the result.
pub struct WalkControl<'a> {
    should_cancel: Box<dyn Fn() -> bool + 'a>,
    on_progress: Option<Box<dyn Fn(&str) + 'a>>,
}

impl<'a> WalkControl<'a> {
    /// A control that never cancels and reports nothing.
    pub fn new() -> Self {
        Self {
            should_cancel: Box::new(|| false),
            on_progress: None,
        }
    }

    pub fn with_cancel(mut self, should_cancel: impl Fn() -> bool + 'a) -> Self {
        self.should_cancel = Box::new(should_cancel);
        self
    }

    pub fn with_progress(mut self, on_progress: impl Fn(&str) + 'a) -> Self {
        self.on_progress = Some(Box::new(on_progress));
        self
    }

    pub fn is_cancelled(&self) -> bool {
        (self.should_cancel)()
    }

    pub(crate) fn report_processed(&self, processed: usize) {
        if let Some(sink) = &self.on_progress {
            sink(&format!("{processed} processed"));
        }
    }
}

impl Default for WalkControl<'_> {
    fn default() -> Self {
        Self::new()
    }
}
