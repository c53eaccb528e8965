use crate::command::{Command, Context};
use crate::debugger::Debugger;
use crate::symbol::{self, BuildOptions, SymbolRecord};
use serde_json::Value;

/// List symbols visible at the selected frame.
///
/// Functions and constants are included, a name shadowed by an inner scope is reported once
/// (the binding actually in effect).
pub struct ContextCommand;

pub struct Handler<'a, D: Debugger> {
    ctx: &'a Context<'a, D>,
}

impl<'a, D: Debugger> Handler<'a, D> {
    pub fn new(ctx: &'a Context<'a, D>) -> Self {
        Self { ctx }
    }

    /// Build a fresh snapshot, scope chain may change between calls.
    pub fn handle(
        &self,
        include_functions_and_constants: bool,
        dedupe_by_name: bool,
    ) -> anyhow::Result<Vec<SymbolRecord>> {
        let debugger = self.ctx.debugger;
        let frame = debugger.selected_frame()?;
        let block = debugger.frame_block(&frame)?;

        Ok(symbol::build(
            &frame,
            block,
            BuildOptions {
                include_functions_and_constants,
                dedupe_by_name,
                on_error: self.ctx.config.symbol_errors,
            },
        ))
    }
}

impl<D: Debugger> Command<D> for ContextCommand {
    fn name(&self) -> &'static str {
        "context"
    }

    fn action(&self, ctx: &Context<'_, D>, _: &str, _: bool) -> anyhow::Result<Value> {
        let records = Handler::new(ctx).handle(true, true)?;
        Ok(serde_json::to_value(records)?)
    }
}
