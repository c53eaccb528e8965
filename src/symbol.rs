//! Symbol snapshot of the selected execution point.
//!
//! The debugger models lexical scopes as a chain of blocks: from the innermost block of the
//! current statement through function and file blocks to the global one. This module flattens
//! that chain into a list of classified records.

use crate::config::SymbolErrorPolicy;
use crate::debugger::{Block, Symbol};
use crate::error::Result;
use crate::gdbjs_warn;
use serde::Serialize;
use std::collections::HashSet;

/// Sentinel for a value that the debugger failed to evaluate.
fn error_sentinel(e: impl std::fmt::Display) -> String {
    format!("<error: {e}>")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Global,
    Static,
    Argument,
    Local,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SymbolRecord {
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub scope: Scope,
}

/// Snapshot options.
#[derive(Clone, Copy, Debug)]
pub struct BuildOptions {
    /// Consider functions and constants too, not only arguments and variables.
    pub include_functions_and_constants: bool,
    /// Keep only the first (innermost) symbol of each name.
    pub dedupe_by_name: bool,
    pub on_error: SymbolErrorPolicy,
}

/// Classify a symbol by its owning block first, by symbol itself second.
fn scope_of<B: Block>(block: &B, symbol: &B::Symbol) -> Scope {
    if block.is_global() {
        Scope::Global
    } else if block.is_static() {
        Scope::Static
    } else if symbol.is_argument() {
        Scope::Argument
    } else {
        Scope::Local
    }
}

fn is_considered(symbol: &impl Symbol, include_functions_and_constants: bool) -> bool {
    symbol.is_argument()
        || symbol.is_variable()
        || (include_functions_and_constants && (symbol.is_function() || symbol.is_constant()))
}

/// Apply an error policy to a rendered value or type, `None` if a symbol must be dropped.
fn rendered(name: &str, result: Result<String>, policy: SymbolErrorPolicy) -> Option<String> {
    match result {
        Ok(text) => Some(text),
        Err(e) => {
            gdbjs_warn!(target: "gdbjs", "evaluate symbol `{name}`: {e:#}");
            match policy {
                SymbolErrorPolicy::Skip => None,
                SymbolErrorPolicy::Sentinel => Some(error_sentinel(e)),
            }
        }
    }
}

/// Walk a scope chain starting from `block` (innermost) and collect symbol records.
///
/// # Arguments
///
/// * `frame`: selected frame, values are evaluated against it
/// * `block`: innermost block of the frame
/// * `options`: snapshot options
pub fn build<B: Block>(
    frame: &<B::Symbol as Symbol>::Frame,
    block: B,
    options: BuildOptions,
) -> Vec<SymbolRecord> {
    let mut seen = HashSet::new();
    let mut records = vec![];

    let mut current = Some(block);
    while let Some(block) = current {
        for symbol in block.symbols() {
            if !is_considered(symbol, options.include_functions_and_constants) {
                continue;
            }
            if options.dedupe_by_name && !seen.insert(symbol.name().to_string()) {
                continue;
            }

            let Some(value) = rendered(symbol.name(), symbol.value(frame), options.on_error) else {
                continue;
            };
            let Some(type_name) = rendered(symbol.name(), symbol.type_name(), options.on_error)
            else {
                continue;
            };

            records.push(SymbolRecord {
                name: symbol.name().to_string(),
                value,
                type_name,
                scope: scope_of(&block, symbol),
            });
        }
        current = block.superblock();
    }

    records
}
