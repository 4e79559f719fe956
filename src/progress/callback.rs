//! Closure-backed progress handler.
//!
//! The command-line front end prints its `→` lines through this, so the
//! batch layer never writes to stdout itself.

use std::path::Path;

use crate::error::ResizeError;
use crate::pipeline::BatchStats;

use super::handler::{ProgressEvent, ProgressHandler};

type ErrorHook = Box<dyn Fn(&ResizeError, Option<&Path>)>;
type CompleteHook = Box<dyn Fn(&BatchStats)>;

/// Forwards every [`ProgressEvent`] to a closure.
///
/// Failure and completion hooks are optional and default to doing nothing.
///
/// ```rust,ignore
/// let progress = CallbackProgress::new(|event: &ProgressEvent| log::debug!("{}", event))
///     .on_complete(|stats| log::info!("{} written", stats.converted));
/// ```
pub struct CallbackProgress<F>
where
    F: Fn(&ProgressEvent),
{
    on_event: F,
    on_failure: Option<ErrorHook>,
    on_finish: Option<CompleteHook>,
}

impl<F> CallbackProgress<F>
where
    F: Fn(&ProgressEvent),
{
    /// Wrap `on_event`, which sees every event in emission order.
    pub fn new(on_event: F) -> Self {
        Self {
            on_event,
            on_failure: None,
            on_finish: None,
        }
    }

    /// Run `hook` with the error and file that aborted the batch.
    pub fn on_error(mut self, hook: impl Fn(&ResizeError, Option<&Path>) + 'static) -> Self {
        self.on_failure = Some(Box::new(hook));
        self
    }

    /// Run `hook` with the final statistics of a successful batch.
    pub fn on_complete(mut self, hook: impl Fn(&BatchStats) + 'static) -> Self {
        self.on_finish = Some(Box::new(hook));
        self
    }
}

impl<F> ProgressHandler for CallbackProgress<F>
where
    F: Fn(&ProgressEvent),
{
    fn on_progress(&self, event: &ProgressEvent) {
        (self.on_event)(event);
    }

    fn on_error(&self, error: &ResizeError, file: Option<&Path>) {
        if let Some(hook) = &self.on_failure {
            hook(error, file);
        }
    }

    fn on_complete(&self, stats: &BatchStats) {
        if let Some(hook) = &self.on_finish {
            hook(stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressPhase;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_events_reach_closure_in_order() {
        let phases = Rc::new(RefCell::new(Vec::new()));
        let sink = phases.clone();

        let progress =
            CallbackProgress::new(move |event: &ProgressEvent| sink.borrow_mut().push(event.phase));

        progress.on_progress(&ProgressEvent::converting(Path::new("a.jpg")));
        progress.on_progress(&ProgressEvent::complete(1));
        assert_eq!(
            *phases.borrow(),
            vec![ProgressPhase::Converting, ProgressPhase::Complete]
        );
    }

    #[test]
    fn test_error_hook_sees_file() {
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();

        let progress = CallbackProgress::new(|_: &ProgressEvent| {})
            .on_error(move |_, file| *sink.borrow_mut() = file.map(Path::to_path_buf));

        let error = ResizeError::Validation("test".into());
        ProgressHandler::on_error(&progress, &error, Some(Path::new("b.png")));
        assert_eq!(seen.borrow().as_deref(), Some(Path::new("b.png")));
    }

    #[test]
    fn test_complete_hook_sees_stats() {
        let seen = Rc::new(Cell::new(0));
        let sink = seen.clone();

        let progress = CallbackProgress::new(|_: &ProgressEvent| {})
            .on_complete(move |stats| sink.set(stats.total_files));

        let stats = BatchStats {
            total_files: 3,
            ..Default::default()
        };
        ProgressHandler::on_complete(&progress, &stats);
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn test_hooks_are_optional() {
        let progress = CallbackProgress::new(|_: &ProgressEvent| {});
        ProgressHandler::on_error(&progress, &ResizeError::Validation("x".into()), None);
        ProgressHandler::on_complete(&progress, &BatchStats::default());
    }
}
