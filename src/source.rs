//! Registry of source files known to the debugger.

use crate::debugger::Debugger;
use crate::error::Result;
use crate::gdbjs_debug;
use itertools::Itertools;
use once_cell::sync;
use regex::Regex;
use std::cell::{Cell, RefCell};

const INFO_SOURCES_COMMAND: &str = "info sources";

/// Parse paths out of a human-readable `info sources` report.
///
/// Report looks like:
/// "Source files for which symbols have been read in:\n\n/src/main.c, /usr/include/stdio.h\n"
/// and may be prefixed with symbol loading messages. Newer debugger versions also put
/// object file headers (lines ending with `:`) before each list, those are skipped.
pub fn parse_info_sources(report: &str) -> Vec<String> {
    static PREAMBLE_RE: sync::Lazy<Regex> = sync::Lazy::new(|| {
        Regex::new(r"Reading symbols .*?\.{3}done\.").expect("must compile")
    });
    static PATH_RE: sync::Lazy<Regex> =
        sync::Lazy::new(|| Regex::new(r"([/\\].*?)[,\n]").expect("must compile"));

    let mut report = PREAMBLE_RE.replace_all(report, "").into_owned();
    // last path in a report may be not terminated
    report.push('\n');

    PATH_RE
        .captures_iter(&report)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .filter(|path| !path.ends_with(':'))
        .unique()
        .map(ToString::to_string)
        .collect()
}

/// Ask the debugger for known source files. Structured query is preferred, report parsing
/// is a fallback.
fn query(debugger: &impl Debugger) -> Result<Vec<String>> {
    if let Some(files) = debugger.source_files() {
        return files;
    }
    let report = debugger.execute(INFO_SOURCES_COMMAND, false)?;
    Ok(parse_info_sources(&report))
}

/// Source file list, built once and re-read only after invalidation.
pub struct SourceRegistry {
    files: RefCell<Vec<String>>,
    stale: Cell<bool>,
}

impl SourceRegistry {
    pub fn new(files: Vec<String>) -> Self {
        Self {
            files: RefCell::new(files),
            stale: Cell::new(false),
        }
    }

    /// Build registry from debugger known sources.
    pub fn load(debugger: &impl Debugger) -> Result<Self> {
        Ok(Self::new(query(debugger)?))
    }

    /// Mark registry as outdated, next search will re-read sources from the debugger.
    pub fn invalidate(&self) {
        self.stale.set(true);
    }

    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    pub fn files(&self) -> Vec<String> {
        self.files.borrow().clone()
    }

    fn refresh(&self, debugger: &impl Debugger) -> Result<()> {
        if self.stale.get() {
            let files = query(debugger)?;
            gdbjs_debug!(target: "gdbjs", "source registry refreshed: {} files", files.len());
            *self.files.borrow_mut() = files;
            self.stale.set(false);
        }
        Ok(())
    }

    /// Return all files matching a regular expression, in registry order.
    pub fn search(&self, debugger: &impl Debugger, pattern: &str) -> Result<Vec<String>> {
        let regex = Regex::new(pattern)?;
        self.refresh(debugger)?;

        Ok(self
            .files
            .borrow()
            .iter()
            .filter(|file| regex.is_match(file))
            .cloned()
            .collect())
    }
}
