use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;

use crate::view::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    /// The button that drives clicks, drags and slider input.
    pub const PRIMARY: Self = Self::Left;
}

/// Edge of a press/release pair, as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Pressed,
    Released,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub target: ElementId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleEvent {
    pub target: ElementId,
    pub checked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChangeEvent {
    pub target: ElementId,
    pub value: f32,
}

#[derive(Clone)]
pub struct ClickHandlerProp {
    id: u64,
    handler: Rc<RefCell<dyn FnMut(&mut ClickEvent)>>,
}

#[derive(Clone)]
pub struct ToggleHandlerProp {
    id: u64,
    handler: Rc<RefCell<dyn FnMut(&mut ToggleEvent)>>,
}

#[derive(Clone)]
pub struct ValueChangeHandlerProp {
    id: u64,
    handler: Rc<RefCell<dyn FnMut(&mut ValueChangeEvent)>>,
}

fn next_handler_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

macro_rules! impl_handler_prop {
    ($ty:ident, $event_ty:ty) => {
        impl $ty {
            pub fn new<F>(handler: F) -> Self
            where
                F: for<'a> FnMut(&'a mut $event_ty) + 'static,
            {
                Self {
                    id: next_handler_id(),
                    handler: Rc::new(RefCell::new(handler)),
                }
            }

            pub fn id(&self) -> u64 {
                self.id
            }

            pub fn call(&self, event: &mut $event_ty) {
                (&mut *self.handler.borrow_mut())(event);
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($ty))
                    .field("id", &self.id)
                    .finish()
            }
        }

        impl<F> From<F> for $ty
        where
            F: for<'a> FnMut(&'a mut $event_ty) + 'static,
        {
            fn from(handler: F) -> Self {
                $ty::new(handler)
            }
        }
    };
}

impl_handler_prop!(ClickHandlerProp, ClickEvent);
impl_handler_prop!(ToggleHandlerProp, ToggleEvent);
impl_handler_prop!(ValueChangeHandlerProp, ValueChangeEvent);

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use slotmap::KeyData;

    use super::*;

    #[test]
    fn handler_props_compare_by_identity() {
        let a = ClickHandlerProp::new(|_| {});
        let b = a.clone();
        let c = ClickHandlerProp::new(|_| {});
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn handler_prop_forwards_the_event() {
        let seen = Rc::new(Cell::new(0.0));
        let sink = seen.clone();
        let prop: ValueChangeHandlerProp =
            (move |event: &mut ValueChangeEvent| sink.set(event.value)).into();
        prop.call(&mut ValueChangeEvent {
            target: ElementId::from(KeyData::from_ffi(1)),
            value: 0.75,
        });
        assert_eq!(seen.get(), 0.75);
    }

    #[test]
    fn modifiers_combine() {
        let modifiers = KeyModifiers::SHIFT | KeyModifiers::CTRL;
        assert!(modifiers.contains(KeyModifiers::SHIFT));
        assert!(!modifiers.contains(KeyModifiers::ALT));
    }
}
