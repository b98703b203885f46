//! Formatted-logger side of the bridge.
//!
//! Libraries that log through a narrow five-method interface get a
//! `ForwardingLogger`, either injected directly or through the global slot.

pub mod forwarding;
pub mod global;

use std::fmt;

pub use forwarding::ForwardingLogger;
pub use global::{logger, reset_logger, set_logger};

/// Minimal formatted logger: one method per severity, trace to error.
///
/// Callers pass `format_args!`, so formatting happens on the caller's side.
pub trait FormatLogger: Send + Sync {
    fn tracef(&self, args: fmt::Arguments<'_>);
    fn debugf(&self, args: fmt::Arguments<'_>);
    fn infof(&self, args: fmt::Arguments<'_>);
    fn warnf(&self, args: fmt::Arguments<'_>);
    fn errorf(&self, args: fmt::Arguments<'_>);
}

/// Logger that discards everything; the global slot's value until one is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl FormatLogger for NoopLogger {
    fn tracef(&self, _args: fmt::Arguments<'_>) {}
    fn debugf(&self, _args: fmt::Arguments<'_>) {}
    fn infof(&self, _args: fmt::Arguments<'_>) {}
    fn warnf(&self, _args: fmt::Arguments<'_>) {}
    fn errorf(&self, _args: fmt::Arguments<'_>) {}
}
