//! Host event routing.
//!
//! Host events reach the controller through one [`RateLimiter`]:
//!
//! | event                         | route                              |
//! |-------------------------------|------------------------------------|
//! | active editor changed         | trailing (tab switches fire twice) |
//! | selection changed, with kind  | leading                            |
//! | selection changed, no kind    | ignored (caused by a tab switch)   |
//! | visible ranges changed        | trailing                           |
//! | configuration changed (ours)  | reconfigure, not rate limited      |

use crate::config::affects_configuration;
use crate::error::RateLimitError;
use crate::rate_limit::RateLimiter;
use std::time::Instant;

/// What caused a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChangeKind {
    /// Keyboard navigation or typing.
    Keyboard,
    /// Mouse click or drag.
    Mouse,
    /// A command moved the selection.
    Command,
}

/// Events the host forwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The focused editor changed; `has_editor` is false when focus left all editors.
    ActiveEditorChanged {
        /// An editor is focused.
        has_editor: bool,
    },
    /// The selection changed.
    SelectionChanged {
        /// Absent when the change came from switching tabs.
        kind: Option<SelectionChangeKind>,
    },
    /// The editor scrolled or resized.
    VisibleRangesChanged,
    /// Settings changed.
    ConfigurationChanged {
        /// Changed sections, e.g. `inlineInjectorIdFold.regex`.
        sections: Vec<String>,
    },
}

impl EditorEvent {
    /// Returns `true` for a configuration change touching the fold settings.
    pub fn affects_fold_configuration(&self) -> bool {
        match self {
            Self::ConfigurationChanged { sections } => sections
                .iter()
                .any(|section| affects_configuration(section)),
            _ => false,
        }
    }
}

/// What [`EventRouter::route`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Dropped.
    Ignored,
    /// Leading fire ran the refresh.
    Fired,
    /// Leading fire suppressed by the cooldown.
    Suppressed,
    /// A trailing refresh is scheduled.
    Deferred,
    /// The caller must re-read configuration and call `update_configs`.
    Reconfigure,
}

/// Maps [`EditorEvent`]s onto a [`RateLimiter`].
#[derive(Debug)]
pub struct EventRouter {
    limiter: RateLimiter<()>,
}

impl EventRouter {
    /// Route through `limiter`.
    pub fn new(limiter: RateLimiter<()>) -> Self {
        Self { limiter }
    }

    /// Route through a limiter with default windows.
    pub fn with_defaults() -> Self {
        Self::new(RateLimiter::with_defaults())
    }

    /// Bind the refresh callback.
    pub fn register<F>(&mut self, refresh: F)
    where
        F: FnMut(()) + 'static,
    {
        self.limiter.register(refresh);
    }

    /// Initial refresh at session start.
    pub fn activate(&mut self, now: Instant) -> Result<Route, RateLimitError> {
        self.lead(now)
    }

    /// Route one event.
    pub fn route(&mut self, event: &EditorEvent, now: Instant) -> Result<Route, RateLimitError> {
        match event {
            EditorEvent::ActiveEditorChanged { has_editor: false } => Ok(Route::Ignored),
            EditorEvent::ActiveEditorChanged { has_editor: true }
            | EditorEvent::VisibleRangesChanged => {
                self.limiter.tail((), now)?;
                Ok(Route::Deferred)
            }
            EditorEvent::SelectionChanged { kind: None } => Ok(Route::Ignored),
            EditorEvent::SelectionChanged { kind: Some(_) } => self.lead(now),
            EditorEvent::ConfigurationChanged { .. } => {
                if event.affects_fold_configuration() {
                    Ok(Route::Reconfigure)
                } else {
                    Ok(Route::Ignored)
                }
            }
        }
    }

    /// Run a due trailing refresh.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.limiter.poll(now)
    }

    /// When [`poll`](Self::poll) should next be called.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.limiter.next_deadline()
    }

    fn lead(&mut self, now: Instant) -> Result<Route, RateLimitError> {
        if self.limiter.lead((), now)? {
            Ok(Route::Fired)
        } else {
            Ok(Route::Suppressed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    fn counting_router() -> (EventRouter, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        let mut router = EventRouter::with_defaults();
        router.register(move |()| sink.set(sink.get() + 1));
        (router, count)
    }

    #[test]
    fn test_selection_without_kind_is_ignored() {
        let (mut router, count) = counting_router();
        let now = Instant::now();

        let route = router
            .route(&EditorEvent::SelectionChanged { kind: None }, now)
            .unwrap();
        assert_eq!(route, Route::Ignored);
        assert_eq!(count.get(), 0);

        let route = router
            .route(
                &EditorEvent::SelectionChanged {
                    kind: Some(SelectionChangeKind::Mouse),
                },
                now,
            )
            .unwrap();
        assert_eq!(route, Route::Fired);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_scroll_burst_is_debounced() {
        let (mut router, count) = counting_router();
        let t0 = Instant::now();

        for i in 0..10 {
            let route = router
                .route(
                    &EditorEvent::VisibleRangesChanged,
                    t0 + Duration::from_millis(i * 5),
                )
                .unwrap();
            assert_eq!(route, Route::Deferred);
        }
        assert_eq!(count.get(), 0);

        let deadline = router.next_deadline().unwrap();
        assert!(router.poll(deadline));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_configuration_changes_are_filtered_by_namespace() {
        let (mut router, _count) = counting_router();
        let now = Instant::now();

        let ours = EditorEvent::ConfigurationChanged {
            sections: vec!["inlineInjectorIdFold.maskChar".to_string()],
        };
        let theirs = EditorEvent::ConfigurationChanged {
            sections: vec!["editor.tabSize".to_string()],
        };
        assert_eq!(router.route(&ours, now).unwrap(), Route::Reconfigure);
        assert_eq!(router.route(&theirs, now).unwrap(), Route::Ignored);
        assert_eq!(
            router
                .route(&EditorEvent::ActiveEditorChanged { has_editor: false }, now)
                .unwrap(),
            Route::Ignored
        );
    }

    #[test]
    fn test_unregistered_router_fails_fast() {
        let mut router = EventRouter::with_defaults();
        assert_eq!(
            router.route(&EditorEvent::VisibleRangesChanged, Instant::now()),
            Err(RateLimitError::Unregistered)
        );
    }
}
