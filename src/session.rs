//! Bridge session: wires a host debugger, the shared output, event hooks and command units.

use crate::command::{Context, Registry};
use crate::config::BridgeConfig;
use crate::debugger::Debugger;
use crate::error::Result;
use crate::event::EventMux;
use crate::output::Output;
use crate::source::SourceRegistry;
use crate::{gdbjs_debug, gdbjs_info, weak_error};
use std::io::BufRead;
use std::rc::Rc;

pub struct Session<D: Debugger> {
    debugger: D,
    output: Output,
    sources: Rc<SourceRegistry>,
    registry: Registry<D>,
    config: BridgeConfig,
}

impl<D: Debugger> Session<D> {
    /// Build a source registry, subscribe event frames to the debugger and register all
    /// builtin units. If the debugger can't list sources yet, the registry starts empty and
    /// stale.
    pub fn new(debugger: D, output: Output, config: BridgeConfig) -> Self {
        let sources = weak_error!(SourceRegistry::load(&debugger), "source registry:")
            .unwrap_or_else(|| {
                let sources = SourceRegistry::new(vec![]);
                sources.invalidate();
                sources
            });
        let sources = Rc::new(sources);

        let mut mux = EventMux::new(output.clone());
        if config.refresh_sources {
            let sources = sources.clone();
            mux = mux.with_objfiles_hook(move || sources.invalidate());
        }
        debugger.connect(Rc::new(mux));

        let registry = Registry::with_builtins();
        gdbjs_info!(
            target: "gdbjs",
            "session started, units: [{}], known sources: {}",
            registry.names().join(", "),
            sources.files().len()
        );

        Self {
            debugger,
            output,
            sources,
            registry,
            config,
        }
    }

    pub fn debugger(&self) -> &D {
        &self.debugger
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    pub fn registry_mut(&mut self) -> &mut Registry<D> {
        &mut self.registry
    }

    /// Dispatch a `<name> <argument>` line. Argument is everything after the first space,
    /// passed as is.
    pub fn handle_line(&self, line: &str) -> Result<()> {
        let (name, arg) = line.split_once(' ').unwrap_or((line, ""));
        let ctx = Context {
            debugger: &self.debugger,
            output: &self.output,
            sources: &self.sources,
            config: &self.config,
        };
        self.registry.invoke(&ctx, name, arg, true)
    }

    /// Serve lines until EOF. Non-fatal errors are written to the stream as plain text.
    /// Bytes that are not valid UTF-8 are replaced, a client typo never ends a session.
    pub fn run(&self, input: impl BufRead) -> Result<()> {
        for line in input.split(b'\n') {
            let line = line?;
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            if let Err(e) = self.handle_line(line) {
                if e.is_fatal() {
                    return Err(e);
                }
                gdbjs_debug!(target: "gdbjs", "line {line:?} failed: {e}");
                self.output.write(&format!("error: {e}\n"))?;
            }
        }
        Ok(())
    }
}
