//! Reactive state store
//!
//! A flat slot table indexed by call order within one render pass:
//! the cursor is reset to zero at the start of every pass, and each
//! `use_state` call claims the next position. The order of calls must
//! therefore be identical on every pass. Key-indexed slots live in
//! their own map, so mixing keyed and positional state cannot shift
//! positional indices.

use std::any::Any;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;

use tracing::trace;

use crate::app::App;
use crate::UiResult;

/// Where a piece of state lives in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SlotIndex {
    Position(usize),
    Key(String),
}

#[derive(Default)]
pub(crate) struct StateStore {
    slots: Vec<Rc<dyn Any>>,
    keyed: HashMap<String, Rc<dyn Any>>,
    cursor: usize,
}

impl StateStore {
    /// Rewind the call-order cursor for a new render pass
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Claim the next call-order position, storing `initial` only the
    /// first time this position is ever visited
    pub fn next_position<T: 'static>(&mut self, initial: T) -> SlotIndex {
        let index = self.cursor;
        if index >= self.slots.len() {
            self.slots.push(Rc::new(initial));
        }
        self.cursor += 1;
        SlotIndex::Position(index)
    }

    /// Claim the slot for `key`, storing `initial` only on first use
    pub fn keyed_slot<T: 'static>(&mut self, key: &str, initial: T) -> SlotIndex {
        self.keyed
            .entry(key.to_string())
            .or_insert_with(|| Rc::new(initial));
        SlotIndex::Key(key.to_string())
    }

    /// Current value of a slot.
    ///
    /// Panics when the slot is missing or holds another type: both
    /// mean `use_state` was called in a different order than on the
    /// pass that created the slot, which is a programmer error the
    /// store cannot recover from.
    pub fn read<T: Clone + 'static>(&self, index: &SlotIndex) -> T {
        let slot = match index {
            SlotIndex::Position(i) => self.slots.get(*i),
            SlotIndex::Key(k) => self.keyed.get(k),
        };
        let Some(slot) = slot else {
            panic!("state slot {index:?} does not exist; use_state must be called in the same order on every render");
        };
        match slot.downcast_ref::<T>() {
            Some(value) => value.clone(),
            None => panic!(
                "state slot {index:?} holds a different type; use_state call order changed between renders"
            ),
        }
    }

    /// Overwrite a slot, unconditionally
    pub fn write(&mut self, index: &SlotIndex, value: Rc<dyn Any>) {
        match index {
            SlotIndex::Position(i) => {
                let Some(slot) = self.slots.get_mut(*i) else {
                    panic!("state slot {index:?} does not exist; use_state must be called in the same order on every render");
                };
                *slot = value;
            }
            SlotIndex::Key(k) => {
                self.keyed.insert(k.clone(), value);
            }
        }
    }
}

/// Read half of a state slot
pub struct StateHandle<T> {
    app: App,
    index: SlotIndex,
    _marker: PhantomData<T>,
}

impl<T> Clone for StateHandle<T> {
    fn clone(&self) -> Self {
        Self {
            app: self.app.clone(),
            index: self.index.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Clone + 'static> StateHandle<T> {
    /// Current value of the slot (no side effect)
    pub fn get(&self) -> T {
        self.app.inner.borrow().state.read(&self.index)
    }
}

/// Write half of a state slot
pub struct StateSetter<T> {
    app: App,
    index: SlotIndex,
    _marker: PhantomData<T>,
}

impl<T> Clone for StateSetter<T> {
    fn clone(&self) -> Self {
        Self {
            app: self.app.clone(),
            index: self.index.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Clone + 'static> StateSetter<T> {
    /// Overwrite the slot and re-render before returning.
    ///
    /// There is no equality short-circuit: setting the current value
    /// again still produces one full render pass.
    pub fn set(&self, value: T) -> UiResult<()> {
        {
            let mut inner = self.app.inner.borrow_mut();
            inner.state.write(&self.index, Rc::new(value));
        }
        trace!(index = ?self.index, "state written");
        self.app.rerender()
    }
}

impl App {
    /// Claim the next call-order state slot.
    ///
    /// Must be called in a stable, repeatable order across renders:
    /// slots have no identity other than their position in the call
    /// sequence, so a conditional or reordered call silently rebinds
    /// which logical state a position means (or panics on a type
    /// change). All invocations at the same position share one slot,
    /// even across multiple calls of the same component function in
    /// one pass.
    pub fn use_state<T: Clone + 'static>(&self, initial: T) -> (StateHandle<T>, StateSetter<T>) {
        let index = self.inner.borrow_mut().state.next_position(initial);
        trace!(?index, "use_state");
        self.state_pair(index)
    }

    /// Claim the state slot named by `key`, independent of call
    /// order. The order-insensitive alternative to [`App::use_state`]
    /// for components instantiated a variable number of times.
    pub fn use_keyed_state<T: Clone + 'static>(
        &self,
        key: &str,
        initial: T,
    ) -> (StateHandle<T>, StateSetter<T>) {
        let index = self.inner.borrow_mut().state.keyed_slot(key, initial);
        trace!(?index, "use_keyed_state");
        self.state_pair(index)
    }

    fn state_pair<T>(&self, index: SlotIndex) -> (StateHandle<T>, StateSetter<T>) {
        (
            StateHandle {
                app: self.clone(),
                index: index.clone(),
                _marker: PhantomData,
            },
            StateSetter {
                app: self.clone(),
                index,
                _marker: PhantomData,
            },
        )
    }
}
