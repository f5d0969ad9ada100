//! # Term
//!
//! The term arena backing the front-end. Stands in for the foreign unification engine's
//! `term_t` handles and foreign-frame discipline (see `SPEC_FULL.md` §3, §4.4, §9): a
//! [`TermArena`] owns a flat table of [`TermData`] and a LIFO stack of [`Frame`]s. Allocating a
//! term always allocates into the topmost frame; discarding a frame releases everything
//! allocated inside it, unless the value was [`TermArena::promote`]d into an outer frame first.

use std::fmt::{self, Display};

/// An opaque handle into a [`TermArena`]. Cheap to copy, meaningless outside the arena that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermHandle(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum TermData {
    Nil,
    Atom(String),
    /// An unbound variable, or one bound to another handle (union-find style).
    Var(Option<TermHandle>),
    Cons(TermHandle, TermHandle),
}

/// A scoped allocation region. Every handle allocated while a frame is on top of the stack
/// belongs to that frame.
#[derive(Debug, Default)]
struct Frame {
    handles: Vec<TermHandle>,
}

#[derive(Debug)]
pub struct TermArena {
    slots: Vec<Option<TermData>>,
    frames: Vec<Frame>,
}

impl Default for TermArena {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            frames: vec![Frame::default()],
        }
    }
}

impl TermArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new frame on top of the stack. Returns its index, for use with [`Self::promote`].
    pub fn open_frame(&mut self) -> usize {
        self.frames.push(Frame::default());
        self.frames.len() - 1
    }

    /// Discard the topmost frame, freeing every handle allocated inside it that was not
    /// promoted out first.
    ///
    /// # Panics
    ///
    /// Panics if called with only the root frame remaining; callers must pair every
    /// [`Self::open_frame`] with exactly one `close_frame`.
    pub fn close_frame(&mut self) {
        let frame = self
            .frames
            .pop()
            .expect("close_frame called with no frame open");
        for TermHandle(idx) in frame.handles {
            self.slots[idx] = None;
        }
    }

    fn alloc(&mut self, data: TermData) -> TermHandle {
        let idx = self.slots.len();
        self.slots.push(Some(data));
        self.frames
            .last_mut()
            .expect("arena always has a root frame")
            .handles
            .push(TermHandle(idx));
        TermHandle(idx)
    }

    /// Re-root `handle` into the frame at `outer_frame_index`, so it survives the discard of any
    /// frame currently above that one. Does not move the underlying data, only the bookkeeping
    /// that decides when it is freed.
    pub fn promote(&mut self, handle: TermHandle, outer_frame_index: usize) {
        for frame in &mut self.frames {
            frame.handles.retain(|h| *h != handle);
        }
        self.frames[outer_frame_index].handles.push(handle);
    }

    pub fn nil(&mut self) -> TermHandle {
        self.alloc(TermData::Nil)
    }

    pub fn atom(&mut self, text: impl Into<String>) -> TermHandle {
        self.alloc(TermData::Atom(text.into()))
    }

    pub fn cons(&mut self, head: TermHandle, tail: TermHandle) -> TermHandle {
        self.alloc(TermData::Cons(head, tail))
    }

    pub fn fresh_variable(&mut self) -> TermHandle {
        self.alloc(TermData::Var(None))
    }

    /// Follow variable bindings until reaching an unbound variable or a non-variable term.
    pub(crate) fn resolve(&self, handle: TermHandle) -> TermHandle {
        let mut current = handle;
        while let TermData::Var(Some(bound)) = &self.slots[current.0]
            .as_ref()
            .expect("dangling term handle")
        {
            current = *bound;
        }
        current
    }

    /// Unify two handles: if either resolves to an unbound variable, bind it to the other.
    /// Returns `false` if both are bound to incompatible non-variable shapes.
    pub fn unify(&mut self, a: TermHandle, b: TermHandle) -> bool {
        let ra = self.resolve(a);
        let rb = self.resolve(b);
        if ra == rb {
            return true;
        }
        match (
            self.slots[ra.0].clone().expect("dangling term handle"),
            self.slots[rb.0].clone().expect("dangling term handle"),
        ) {
            (TermData::Var(None), _) => {
                self.slots[ra.0] = Some(TermData::Var(Some(rb)));
                true
            }
            (_, TermData::Var(None)) => {
                self.slots[rb.0] = Some(TermData::Var(Some(ra)));
                true
            }
            (TermData::Nil, TermData::Nil) => true,
            (TermData::Atom(x), TermData::Atom(y)) => x == y,
            (TermData::Cons(h1, t1), TermData::Cons(h2, t2)) => {
                self.unify(h1, h2) && self.unify(t1, t2)
            }
            _ => false,
        }
    }

    /// Bind the unbound variable that `handle` resolves to, to `value`. Used by
    /// [`crate::equivalence::equal_forms`], which must later [`Self::unbind`] the same handle
    /// before the disposable frame holding `value` is closed, so no slot is left pointing at
    /// freed data.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not resolve to an unbound variable.
    pub(crate) fn bind_unbound(&mut self, handle: TermHandle, value: TermHandle) -> TermHandle {
        let resolved = self.resolve(handle);
        assert!(
            matches!(self.slots[resolved.0], Some(TermData::Var(None))),
            "bind_unbound called on a non-variable or already-bound handle"
        );
        self.slots[resolved.0] = Some(TermData::Var(Some(value)));
        resolved
    }

    /// Revert a handle previously bound with [`Self::bind_unbound`] back to an unbound variable.
    pub(crate) fn unbind(&mut self, handle: TermHandle) {
        self.slots[handle.0] = Some(TermData::Var(None));
    }

    pub fn is_nil(&self, handle: TermHandle) -> bool {
        matches!(
            self.slots[self.resolve(handle).0].as_ref().unwrap(),
            TermData::Nil
        )
    }

    pub fn is_variable(&self, handle: TermHandle) -> bool {
        matches!(
            self.slots[self.resolve(handle).0].as_ref().unwrap(),
            TermData::Var(None)
        )
    }

    pub fn as_atom_text(&self, handle: TermHandle) -> Option<&str> {
        match self.slots[self.resolve(handle).0].as_ref().unwrap() {
            TermData::Atom(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_cons(&self, handle: TermHandle) -> Option<(TermHandle, TermHandle)> {
        match self.slots[self.resolve(handle).0].as_ref().unwrap() {
            TermData::Cons(head, tail) => Some((*head, *tail)),
            _ => None,
        }
    }

    /// Render a term in the surface syntax the parser accepts, used for debugging, the
    /// canonicalized fact-store keys, and the `parse(print(t))` round-trip property.
    pub fn render(&self, handle: TermHandle) -> String {
        let mut out = String::new();
        self.render_into(handle, &mut out);
        out
    }

    fn render_into(&self, handle: TermHandle, out: &mut String) {
        let resolved = self.resolve(handle);
        match self.slots[resolved.0].as_ref().unwrap() {
            TermData::Nil => out.push_str("[]"),
            TermData::Atom(text) => out.push_str(text),
            TermData::Var(None) => out.push_str(&format!("_V{}", resolved.0)),
            TermData::Var(Some(_)) => unreachable!("resolve() follows bound variables"),
            TermData::Cons(head, tail) => {
                out.push('[');
                self.render_into(*head, out);
                let mut tail = *tail;
                loop {
                    let rt = self.resolve(tail);
                    match self.slots[rt.0].as_ref().unwrap() {
                        TermData::Nil => break,
                        TermData::Cons(h, t) => {
                            out.push(' ');
                            self.render_into(*h, out);
                            tail = *t;
                        }
                        _ => {
                            out.push_str(" | ");
                            self.render_into(rt, out);
                            break;
                        }
                    }
                }
                out.push(']');
            }
        }
    }
}

impl Display for TermArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TermArena({} slots)", self.slots.len())
    }
}
