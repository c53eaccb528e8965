//! Asynchronous debugger events.
//!
//! [`EventMux`] turns every lifecycle signal into an event frame written straight into the
//! shared output. Signals may fire in the middle of a command that runs "to string", in which
//! case the frame lands in the captured command output, [`rescue`] brings it back.

use crate::debugger::{EventHook, Stop};
use crate::error::Result;
use crate::output::Output;
use crate::protocol::{self, Kind, Segment};
use crate::{gdbjs_debug, gdbjs_error, weak_error};
use serde::Serialize;

pub const NEW_OBJFILE: &str = "new-objfile";
pub const CLEAR_OBJFILES: &str = "clear-objfiles";
pub const STOP: &str = "stop";
pub const CONTINUE: &str = "cont";
pub const EXITED: &str = "exited";
pub const NEW_THREAD: &str = "new-thread";
pub const NEW_INFERIOR: &str = "new-inferior";
pub const INFERIOR_DELETED: &str = "inferior-deleted";

#[derive(Serialize)]
struct ThreadPayload {
    thread: Option<u64>,
}

#[derive(Serialize)]
struct ExitPayload {
    exit_code: Option<i64>,
}

#[derive(Serialize)]
struct IdPayload {
    id: u64,
}

/// Event hook that writes an event frame for each debugger signal.
pub struct EventMux {
    output: Output,
    on_objfiles_change: Option<Box<dyn Fn()>>,
}

impl EventMux {
    pub fn new(output: Output) -> Self {
        Self {
            output,
            on_objfiles_change: None,
        }
    }

    /// Set a callback called after object files are loaded or unloaded.
    pub fn with_objfiles_hook(self, f: impl Fn() + 'static) -> Self {
        Self {
            on_objfiles_change: Some(Box::new(f)),
            ..self
        }
    }

    fn emit<T: Serialize + ?Sized>(&self, signal: &str, payload: &T) {
        let Some(frame) = weak_error!(protocol::encode(Kind::Event, signal, payload), "event:")
        else {
            return;
        };

        gdbjs_debug!(target: "gdbjs", "emit `{signal}` event, captured: {}", self.output.is_capturing());
        if let Err(e) = self.output.write(&frame) {
            gdbjs_error!(target: "gdbjs", "write `{signal}` event: {e}");
        }
    }

    fn objfiles_changed(&self) {
        if let Some(ref f) = self.on_objfiles_change {
            f()
        }
    }
}

impl EventHook for EventMux {
    fn on_new_objfile(&self, filename: &str) {
        self.emit(NEW_OBJFILE, filename);
        self.objfiles_changed();
    }

    fn on_clear_objfiles(&self, progspace: Option<&str>) {
        self.emit(CLEAR_OBJFILES, &progspace);
        self.objfiles_changed();
    }

    fn on_stop(&self, stop: &Stop) {
        self.emit(STOP, stop);
    }

    fn on_continue(&self, thread: Option<u64>) {
        self.emit(CONTINUE, &ThreadPayload { thread });
    }

    fn on_exit(&self, exit_code: Option<i64>) {
        self.emit(EXITED, &ExitPayload { exit_code });
    }

    fn on_new_thread(&self, thread: u64) {
        self.emit(NEW_THREAD, &IdPayload { id: thread });
    }

    fn on_new_inferior(&self, inferior: u64) {
        self.emit(NEW_INFERIOR, &IdPayload { id: inferior });
    }

    fn on_inferior_deleted(&self, inferior: u64) {
        self.emit(INFERIOR_DELETED, &IdPayload { id: inferior });
    }
}

/// Forward captured command output into the real stream.
///
/// Event frames found in captured text are written as standalone frames at the place where they
/// occurred, everything else (including command frames) is written as is. Return the raw text
/// with event frames cut out.
pub fn rescue(output: &Output, captured: &str) -> Result<String> {
    let mut raw = String::with_capacity(captured.len());

    for segment in protocol::segments(captured) {
        match segment {
            Segment::Frame(frame) if frame.kind == Kind::Event => {
                gdbjs_debug!(target: "gdbjs", "rescue `{}` event", frame.tag);
                output.write(&frame.to_wire())?;
            }
            Segment::Frame(frame) => {
                let text = frame.to_wire();
                output.write(&text)?;
                raw.push_str(&text);
            }
            Segment::Text(text) => {
                output.write(text)?;
                raw.push_str(text);
            }
        }
    }

    Ok(raw)
}
