use std::{collections::HashMap, fmt, ptr::NonNull};

use crate::{
    internal::trace_trait::{Trace, TraceTrait},
    visitor::Visitor,
};

/// Traced, non-owning reference from one managed object to another.
///
/// May point at a plain object or at a mixin sub-object; the visitor resolves
/// the canonical allocation either way.
#[repr(transparent)]
pub struct Member<T> {
    raw: Option<NonNull<T>>,
}

impl<T> Member<T> {
    pub const fn null() -> Self {
        Self { raw: None }
    }

    pub fn new(object: &T) -> Self {
        Self {
            raw: Some(NonNull::from(object)),
        }
    }

    /// # Safety
    ///
    /// `ptr` must be null or point to an object that stays alive while the member is traced.
    pub unsafe fn from_raw(ptr: *const T) -> Self {
        Self {
            raw: NonNull::new(ptr as *mut T),
        }
    }

    pub fn get(&self) -> *const T {
        match self.raw {
            Some(ptr) => ptr.as_ptr(),
            None => std::ptr::null(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.raw.is_none()
    }

    /// # Safety
    ///
    /// The referenced object must still be alive.
    pub unsafe fn as_ref<'a>(&self) -> Option<&'a T> {
        self.raw.map(|ptr| &*ptr.as_ptr())
    }
}

impl<T> Copy for Member<T> {}

impl<T> Clone for Member<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Default for Member<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> PartialEq for Member<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Member<T> {}

impl<T> fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Member({:p})", self.get())
    }
}

impl<T> fmt::Pointer for Member<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", self.get())
    }
}

impl<T: TraceTrait> Trace for Member<T> {
    fn trace(&self, vis: &mut Visitor<'_>) {
        vis.trace_member(self);
    }
}

macro_rules! impl_prim {
    ($($t:ty),* $(,)?) => {
        $(
            impl Trace for $t {
                fn trace(&self, _vis: &mut Visitor<'_>) {}
            }
        )*
    };
}

impl_prim!(
    (), bool, char, f32, f64,
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    String, str,
    std::path::PathBuf,
);

impl<T: Trace> Trace for Option<T> {
    fn trace(&self, vis: &mut Visitor<'_>) {
        if let Some(elem) = self {
            elem.trace(vis);
        }
    }
}

impl<T: Trace, E: Trace> Trace for Result<T, E> {
    fn trace(&self, vis: &mut Visitor<'_>) {
        match self {
            Ok(x) => x.trace(vis),
            Err(x) => x.trace(vis),
        }
    }
}

impl<T: Trace> Trace for [T] {
    fn trace(&self, vis: &mut Visitor<'_>) {
        for elem in self.iter() {
            vis.trace_ref(elem);
        }
    }
}

impl<T: Trace, const N: usize> Trace for [T; N] {
    fn trace(&self, vis: &mut Visitor<'_>) {
        self[..].trace(vis);
    }
}

impl<T: Trace> Trace for Vec<T> {
    fn trace(&self, vis: &mut Visitor<'_>) {
        self[..].trace(vis);
    }
}

impl<T: Trace + ?Sized> Trace for Box<T> {
    fn trace(&self, vis: &mut Visitor<'_>) {
        (**self).trace(vis);
    }
}

impl<K: Trace, V: Trace, S> Trace for HashMap<K, V, S> {
    fn trace(&self, vis: &mut Visitor<'_>) {
        for (k, v) in self.iter() {
            k.trace(vis);
            v.trace(vis);
        }
    }
}
