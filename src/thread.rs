use crate::debugger::{Debugger, Inferior, Thread};
use serde::Serialize;

/// Thread number fields in order of preference. Stable (global) number first, per-inferior
/// number of older debugger versions second.
const THREAD_ID_FIELDS: &[&str] = &["global_num", "num"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GroupIdentity {
    pub id: u64,
    pub pid: u64,
}

impl From<Inferior> for GroupIdentity {
    fn from(inferior: Inferior) -> Self {
        Self {
            id: inferior.num,
            pid: inferior.pid,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ThreadIdentity {
    /// `None` if no thread selected.
    pub id: Option<u64>,
    pub group: GroupIdentity,
}

/// Return the first supported non-zero thread number.
pub fn thread_id(thread: &impl Thread) -> Option<u64> {
    THREAD_ID_FIELDS
        .iter()
        .find_map(|field| thread.field(field).filter(|&num| num != 0))
}

pub fn resolve_group(debugger: &impl Debugger) -> GroupIdentity {
    debugger.selected_inferior().into()
}

pub fn resolve(debugger: &impl Debugger) -> ThreadIdentity {
    ThreadIdentity {
        id: debugger.selected_thread().as_ref().and_then(thread_id),
        group: resolve_group(debugger),
    }
}
