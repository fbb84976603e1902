//! Diagnostic tracing for declaration loading and ownership resolution.
//!
//! Every function compiles to an empty inline body unless the `tracing`
//! feature is enabled, so the resolver can call them unconditionally.

use crate::SectionKind;

#[cfg(feature = "tracing")]
const LOAD_TARGET: &str = "owners::load";

#[cfg(feature = "tracing")]
const RESOLVE_TARGET: &str = "owners::resolve";

/// Traces a declaration file that was found and parsed.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_declaration_loaded(dir: &str, sections: usize, rules: usize) {
    tracing::debug!(
        target: LOAD_TARGET,
        dir = %dir,
        sections = sections,
        rules = rules,
        "declaration_loaded"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_declaration_loaded(_dir: &str, _sections: usize, _rules: usize) {}

/// Traces a directory without a declaration file.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_declaration_absent(dir: &str) {
    tracing::trace!(target: LOAD_TARGET, dir = %dir, "declaration_absent");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_declaration_absent(_dir: &str) {}

/// Traces the rule that decided one section kind for a query.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_rule_matched(dir: &str, kind: SectionKind, pattern: &str, relative_path: &str) {
    tracing::debug!(
        target: RESOLVE_TARGET,
        dir = %dir,
        kind = %kind,
        pattern = %pattern,
        relative_path = %relative_path,
        "rule_matched"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_rule_matched(_dir: &str, _kind: SectionKind, _pattern: &str, _relative_path: &str) {}

/// Traces the outcome of a resolution.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_resolved(path: &str, required: usize, optional: usize) {
    tracing::debug!(
        target: RESOLVE_TARGET,
        path = %path,
        required = required,
        optional = optional,
        "resolved"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_resolved(_path: &str, _required: usize, _optional: usize) {}

/// Traces a query skipped because it names the root or lies outside the tree.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_query_skipped(path: &str) {
    tracing::trace!(target: RESOLVE_TARGET, path = %path, "query_skipped");
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_query_skipped(_path: &str) {}
