use strum_macros::{Display, EnumString};

/// What to do with a symbol whose value the debugger fails to evaluate.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, EnumString, Display)]
pub enum SymbolErrorPolicy {
    /// Render `<error: MESSAGE>` instead of a value.
    #[default]
    #[strum(serialize = "sentinel")]
    Sentinel,
    /// Drop a symbol from a snapshot.
    #[strum(serialize = "skip")]
    Skip,
}

/// Bridge configuration (set only once, at session start).
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    pub symbol_errors: SymbolErrorPolicy,
    /// Re-read the source list after object files are loaded or unloaded.
    pub refresh_sources: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            symbol_errors: SymbolErrorPolicy::Sentinel,
            refresh_sources: true,
        }
    }
}
