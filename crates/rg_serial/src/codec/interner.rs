use alloc::vec::Vec;

use rg_utils::hash::{FixedHashState, HashMap};

/// The result of [`TypeInterner::intern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interned {
    /// The name was seen before and is written as this token.
    Existing(u32),
    /// The name is new; it is written in full and takes this token from now on.
    New(u32),
}

impl Interned {
    /// The token, whether new or existing.
    #[inline]
    pub const fn token(self) -> u32 {
        match self {
            Self::Existing(token) | Self::New(token) => token,
        }
    }
}

/// A bidirectional table between type names and compact tokens.
///
/// Tokens are dense and assigned in first-seen order starting at 0. The writer
/// and the reader build identical tables by seeing names in the same order:
/// the writer through [`intern`](Self::intern), the reader through
/// [`declare`](Self::declare) whenever a full name appears in the text.
///
/// # Examples
///
/// ```
/// use rg_serial::codec::{Interned, TypeInterner};
///
/// let mut writer = TypeInterner::new();
/// assert_eq!(writer.intern("app::Node"), Interned::New(0));
/// assert_eq!(writer.intern("app::Edge"), Interned::New(1));
/// assert_eq!(writer.intern("app::Node"), Interned::Existing(0));
///
/// let mut reader = TypeInterner::new();
/// reader.declare("app::Node");
/// reader.declare("app::Edge");
/// assert_eq!(reader.resolve(1), Some("app::Edge"));
/// assert_eq!(reader.resolve(2), None);
/// ```
#[derive(Debug, Default)]
pub struct TypeInterner<'a> {
    tokens: HashMap<&'a str, u32, FixedHashState>,
    names: Vec<&'a str>,
}

impl<'a> TypeInterner<'a> {
    /// Creates an empty table.
    #[inline]
    pub const fn new() -> Self {
        Self {
            tokens: HashMap::with_hasher(FixedHashState),
            names: Vec::new(),
        }
    }

    /// Returns the token of `name`, assigning the next one if it is new.
    pub fn intern(&mut self, name: &'a str) -> Interned {
        if let Some(&token) = self.tokens.get(name) {
            return Interned::Existing(token);
        }
        let token = self.names.len() as u32;
        self.tokens.insert(name, token);
        self.names.push(name);
        Interned::New(token)
    }

    /// Records a name read from text and returns its token.
    ///
    /// Declaring a known name again keeps its original token.
    #[inline]
    pub fn declare(&mut self, name: &'a str) -> u32 {
        self.intern(name).token()
    }

    /// The token of `name`, if it has one.
    #[inline]
    pub fn token_of(&self, name: &str) -> Option<u32> {
        self.tokens.get(name).copied()
    }

    /// The name behind `token`, if it was assigned.
    #[inline]
    pub fn resolve(&self, token: u32) -> Option<&'a str> {
        self.names.get(token as usize).copied()
    }

    /// Number of distinct names.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no name was interned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Forgets every name, keeping the allocations.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.names.clear();
    }
}
