//! Per-editor session wiring.
//!
//! A [`FoldSession`] owns the controller and the event router of one editor and shares the
//! editor handle with the host. Everything runs on the host's event thread, so shared state is
//! `Rc<RefCell<_>>`; the rate limiter's callback borrows the controller and editor only for the
//! duration of a refresh.

use crate::config::FoldConfig;
use crate::controller::{FoldController, RefreshOutcome};
use crate::error::{PatternConfigError, RateLimitError};
use crate::events::{EditorEvent, EventRouter, Route};
use crate::host::{DecorationFactory, TextEditor};
use crate::rate_limit::RateLimiter;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

/// Controller + router for one editor.
pub struct FoldSession<E> {
    controller: Rc<RefCell<FoldController>>,
    editor: Rc<RefCell<E>>,
    router: EventRouter,
    config_error: Option<PatternConfigError>,
}

impl<E> FoldSession<E>
where
    E: TextEditor + DecorationFactory + 'static,
{
    /// Configure a controller for `editor` and run the initial refresh.
    ///
    /// A rejected fold pattern leaves the session unconfigured and is kept in
    /// [`config_error`](Self::config_error); the session is still created so that a later
    /// configuration change can recover.
    pub fn activate(
        editor: Rc<RefCell<E>>,
        config: &FoldConfig,
        limiter: RateLimiter<()>,
        now: Instant,
    ) -> Result<Self, RateLimitError> {
        let controller = Rc::new(RefCell::new(FoldController::new()));
        let config_error = controller
            .borrow_mut()
            .update_configs(&mut *editor.borrow_mut(), config)
            .err();

        let mut router = EventRouter::new(limiter);
        let refresh_controller = Rc::clone(&controller);
        let refresh_editor = Rc::clone(&editor);
        router.register(move |()| {
            refresh_controller
                .borrow_mut()
                .active_editor(&mut *refresh_editor.borrow_mut());
        });
        router.activate(now)?;

        Ok(Self {
            controller,
            editor,
            router,
            config_error,
        })
    }

    /// Route a host event. A [`Route::Reconfigure`] result asks the caller to read the settings
    /// again and pass them to [`reconfigure`](Self::reconfigure).
    pub fn handle(&mut self, event: &EditorEvent, now: Instant) -> Result<Route, RateLimitError> {
        self.router.route(event, now)
    }

    /// Run a due trailing refresh.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.router.poll(now)
    }

    /// When [`poll`](Self::poll) should next be called.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.router.next_deadline()
    }

    /// Apply new settings. The next rate-limited event repaints.
    pub fn reconfigure(&mut self, config: &FoldConfig) -> Result<(), PatternConfigError> {
        let result = self
            .controller
            .borrow_mut()
            .update_configs(&mut *self.editor.borrow_mut(), config);
        self.config_error = result.as_ref().err().cloned();
        result
    }

    /// Returns `true` if the last configuration produced a usable fold pattern.
    pub fn is_configured(&self) -> bool {
        self.controller.borrow().is_configured()
    }

    /// Why the last configuration was rejected, if it was.
    pub fn config_error(&self) -> Option<&PatternConfigError> {
        self.config_error.as_ref()
    }

    /// The toggle command.
    pub fn toggle(&mut self) -> RefreshOutcome {
        self.controller
            .borrow_mut()
            .toggle(&mut *self.editor.borrow_mut())
    }

    /// The controller, for inspection.
    pub fn controller(&self) -> &Rc<RefCell<FoldController>> {
        &self.controller
    }

    /// The shared editor.
    pub fn editor(&self) -> &Rc<RefCell<E>> {
        &self.editor
    }

    /// Release the controller's decoration types.
    pub fn dispose(self) {
        self.controller
            .borrow_mut()
            .dispose(&mut *self.editor.borrow_mut());
    }
}
