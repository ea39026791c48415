#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for hostsetup
//!
//! All user-visible output of the setup components goes through events.
//! Library crates never print or log directly; the CLI drains the channel,
//! renders events to the console and mirrors them into `tracing`.
//!
//! ## Architecture
//!
//! - **Domain-driven events**: grouped by functional domain (General, Setup, Download, Runtime)
//! - **Unified `EventEmitter` trait**: one API for every emission site
//! - **Tracing integration**: each event knows its log level and target

pub mod events;
pub use events::{AppEvent, DownloadEvent, FailureContext, GeneralEvent, RuntimeEvent, SetupEvent};

use tokio::sync::mpsc::UnboundedSender;

/// Type alias for the event sender
pub type EventSender = UnboundedSender<AppEvent>;

/// Type alias for the event receiver
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout hostsetup
///
/// Implemented for the raw `EventSender` and for any context struct that
/// carries one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(event);
        }
    }

    /// Emit a debug log event
    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::debug(message)));
    }

    /// Emit an informational message shown to the operator
    fn emit_info(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::info(message)));
    }

    /// Emit a warning event
    fn emit_warning(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning(message)));
    }

    /// Emit a warning event with context
    fn emit_warning_with_context(&self, message: impl Into<String>, context: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning_with_context(
            message, context,
        )));
    }

    /// Emit an error event
    fn emit_error(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::error(message)));
    }

    /// Emit an error event with details
    fn emit_error_with_details(&self, message: impl Into<String>, details: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::error_with_details(
            message, details,
        )));
    }

    /// Emit a setup step started event
    fn emit_step_started(&self, step: impl Into<String>) {
        self.emit(AppEvent::Setup(SetupEvent::StepStarted { step: step.into() }));
    }

    /// Emit a setup step completed event
    fn emit_step_completed(&self, step: impl Into<String>) {
        self.emit(AppEvent::Setup(SetupEvent::StepCompleted { step: step.into() }));
    }

    /// Emit a setup step skipped event
    fn emit_step_skipped(&self, step: impl Into<String>, reason: impl Into<String>) {
        self.emit(AppEvent::Setup(SetupEvent::StepSkipped {
            step: step.into(),
            reason: reason.into(),
        }));
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}
