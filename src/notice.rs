//!# Structured notices
//! A caller-supplied parameter that the chosen addressing format does not use is not an error,
//! but the caller probably wants to know about it. This mirrors the source library's use of
//! Python warnings, realized here as a small sink the caller passes in (default: discard).
use core::fmt;

/// Describes one unused-argument notice: which setter produced it and which fields were ignored.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UnusedArgumentNotice {
    /// Name of the setter that received the extraneous arguments.
    pub setter: &'static str,
    /// Names of the fields that had no effect for the chosen addressing format.
    pub fields: &'static [&'static str],
}

impl fmt::Display for UnusedArgumentNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: unused arguments {:?} had no effect", self.setter, self.fields)
    }
}

/// Sink for structured notices emitted by the codec.
///
/// Implement this to observe [UnusedArgumentNotice]s; the default [DiscardNotices] drops them.
pub trait NoticeSink {
    /// Called whenever a setter receives a parameter its addressing format does not use.
    fn unused_argument(&self, notice: UnusedArgumentNotice);
}

/// Default sink: drops every notice.
#[derive(Debug, Default, Copy, Clone)]
pub struct DiscardNotices;

impl NoticeSink for DiscardNotices {
    fn unused_argument(&self, _notice: UnusedArgumentNotice) {}
}

/// Sink that forwards notices to the `log` crate at `warn` level.
#[derive(Debug, Default, Copy, Clone)]
pub struct LoggingNoticeSink;

impl NoticeSink for LoggingNoticeSink {
    fn unused_argument(&self, notice: UnusedArgumentNotice) {
        log::warn!("{notice}");
    }
}
