//! Per-thread, one-shot overrides for the next terminal log call.
//!
//! Each printer gets its own slot in a thread-local map, keyed by the
//! printer's id, so two printers on the same thread never see each other's
//! overrides. Nothing here is shared between threads, so no locking is
//! needed.
//!
//! Overrides set without a following terminal call stay pending until the
//! thread logs again through the same printer.

use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static CONTEXTS: RefCell<HashMap<u64, CallContext>> = RefCell::new(HashMap::new());

    /// Printers this thread is currently dispatching through.
    static DISPATCHING: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
}

/// Overrides and queued appends for one printer on one thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    pub tag: Option<String>,
    pub method_count: Option<i32>,
    pub print_to_file: Option<bool>,
    pub appends: Vec<String>,
}

#[cfg(test)]
impl CallContext {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.method_count.is_none()
            && self.print_to_file.is_none()
            && self.appends.is_empty()
    }
}

/// Mutate the calling thread's context for `printer_id`.
pub fn update<F>(printer_id: u64, f: F)
where
    F: FnOnce(&mut CallContext),
{
    CONTEXTS.with(|contexts| {
        f(contexts.borrow_mut().entry(printer_id).or_default());
    });
}

/// Consume and clear the calling thread's context for `printer_id`.
pub fn take(printer_id: u64) -> CallContext {
    CONTEXTS.with(|contexts| contexts.borrow_mut().remove(&printer_id).unwrap_or_default())
}

/// Look at the pending context without consuming it.
#[cfg(test)]
fn peek(printer_id: u64) -> CallContext {
    CONTEXTS.with(|contexts| {
        contexts
            .borrow()
            .get(&printer_id)
            .cloned()
            .unwrap_or_default()
    })
}

/// Marks the calling thread as dispatching through one printer until dropped.
pub struct DispatchScope {
    printer_id: u64,
}

impl Drop for DispatchScope {
    fn drop(&mut self) {
        DISPATCHING.with(|active| active.borrow_mut().retain(|id| *id != self.printer_id));
    }
}

/// Enter dispatch for `printer_id`, or `None` if this thread is already
/// inside that printer's dispatch (a sink logging back into its printer).
pub fn enter_dispatch(printer_id: u64) -> Option<DispatchScope> {
    DISPATCHING.with(|active| {
        let mut active = active.borrow_mut();
        if active.contains(&printer_id) {
            return None;
        }
        active.push(printer_id);
        Some(DispatchScope { printer_id })
    })
}
