use core::fmt::{Debug, Formatter};

#[cfg(all(debug_assertions, feature = "debug"))]
use alloc::vec::Vec;

/// The type paths of the values currently being processed, outermost first.
///
/// Entries are popped only when a value completes, so after a failure the
/// stack still shows where the failing value sits in the graph.
///
/// Without the `debug` feature (or debug assertions) it records nothing.
#[derive(Default, Clone)]
pub(crate) struct TypeStack<'a> {
    #[cfg(all(debug_assertions, feature = "debug"))]
    stack: Vec<&'a str>,
    #[cfg(not(all(debug_assertions, feature = "debug")))]
    stack: core::marker::PhantomData<&'a str>,
}

#[cfg(all(debug_assertions, feature = "debug"))]
impl<'a> TypeStack<'a> {
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, type_path: &'a str) {
        self.stack.push(type_path);
    }

    #[inline]
    pub fn pop(&mut self) {
        self.stack.pop();
    }

    #[inline]
    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

#[cfg(not(all(debug_assertions, feature = "debug")))]
impl<'a> TypeStack<'a> {
    pub const fn new() -> Self {
        Self {
            stack: core::marker::PhantomData,
        }
    }

    #[inline(always)]
    pub fn push(&mut self, _: &'a str) {}

    #[inline(always)]
    pub fn pop(&mut self) {}

    #[inline(always)]
    pub fn clear(&mut self) {}
}

impl Debug for TypeStack<'_> {
    #[cfg(all(debug_assertions, feature = "debug"))]
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let mut iter = self.stack.iter();

        if let Some(first) = iter.next() {
            write!(f, "`{first}`")?;
        }

        for type_path in iter {
            write!(f, " -> `{type_path}`")?;
        }

        Ok(())
    }

    #[cfg(not(all(debug_assertions, feature = "debug")))]
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("<type stack disabled>")
    }
}

#[cfg(all(test, debug_assertions, feature = "debug"))]
mod tests {
    use super::TypeStack;
    use alloc::format;

    #[test]
    fn formats_outermost_first() {
        let mut stack = TypeStack::new();
        stack.push("app::Graph");
        stack.push("alloc::vec::Vec<app::Node>");
        stack.push("app::Node");
        stack.pop();
        assert_eq!(
            format!("{stack:?}"),
            "`app::Graph` -> `alloc::vec::Vec<app::Node>`"
        );
    }
}
