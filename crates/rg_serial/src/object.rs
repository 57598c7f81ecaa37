use alloc::rc::Rc;
use core::any::Any;
use core::cell::RefCell;
use core::fmt;

use crate::info::{TypeInfo, Typed};
use crate::{DecodeError, Decoder, EncodeError, Encoder};

// -----------------------------------------------------------------------------
// Shared

/// A shared, mutable instance with reference identity.
///
/// Two `Shared` handles to the same allocation are the same object: it is
/// written once and every further occurrence becomes a back-reference.
pub type Shared<T> = Rc<RefCell<T>>;

/// A shared instance whose concrete type is resolved from the encoded type name.
///
/// The type must be registered in the [`TypeRegistry`](crate::registry::TypeRegistry)
/// used for decoding, either by hand or with `#[serializable(auto_register)]`.
pub type ObjectRef = Rc<RefCell<dyn Object>>;

/// Wraps `value` into a new [`Shared`] instance.
#[inline]
pub fn share<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

// -----------------------------------------------------------------------------
// Object

/// A type whose instances carry identity when held through [`Shared`].
///
/// Records implement this with [`#[derive(Serializable)]`](crate::derive::Serializable).
/// `Vec<T>`, `HashMap<K, V>` and `BTreeMap<K, V>` implement it as well.
///
/// The body of an object is the ordered sequence of its serializable values:
/// the members of a record, the elements of a list, the entries of a map.
pub trait Object: Any {
    /// The static info of the concrete type.
    fn object_type_info(&self) -> &'static TypeInfo;

    /// The number of body entries, written in the object header.
    fn body_len(&self) -> usize;

    /// Writes the body entries in order.
    fn encode_body(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError>;

    /// Reads `len` body entries into `self`, which starts out as a default instance.
    ///
    /// `self` is already registered when this runs, so entries that refer back
    /// to it resolve to the same allocation.
    fn decode_body(&mut self, len: usize, decoder: &mut Decoder<'_>) -> Result<(), DecodeError>;

    /// Casts to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Casts to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Object {
    /// The type path of the concrete type.
    #[inline]
    pub fn object_type_path(&self) -> &'static str {
        self.object_type_info().type_path()
    }

    /// Returns `true` if the concrete type is `T`.
    #[inline]
    pub fn is<T: Object>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcasts to the concrete type.
    ///
    /// # Examples
    ///
    /// ```
    /// use rg_serial::{Object, ObjectRef, Serializable, share};
    ///
    /// #[derive(Serializable, Default)]
    /// struct Cat {
    ///     lives: u8,
    /// }
    ///
    /// let pet: ObjectRef = share(Cat { lives: 9 });
    /// let pet = pet.borrow();
    /// assert_eq!(pet.downcast_ref::<Cat>().map(|c| c.lives), Some(9));
    /// assert!(pet.downcast_ref::<Vec<u8>>().is_none());
    /// ```
    #[inline]
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Downcasts to the concrete type.
    #[inline]
    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

impl fmt::Debug for dyn Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Object<{}>", self.object_type_path())
    }
}

// -----------------------------------------------------------------------------
// Tracked

/// A decoded shared instance, viewable both as its concrete type and as `dyn Object`.
///
/// Both views are clones of the same [`Rc`], so whichever a slot asks for,
/// it ends up pointing at the one allocation the id stands for.
#[derive(Clone)]
pub struct Tracked {
    type_path: &'static str,
    any: Rc<dyn Any>,
    object: ObjectRef,
}

impl Tracked {
    /// Captures both views of `shared`.
    pub fn new<T: Object + Typed>(shared: &Shared<T>) -> Self {
        let any: Rc<dyn Any> = shared.clone();
        let object: ObjectRef = shared.clone();
        Self {
            type_path: T::type_path(),
            any,
            object,
        }
    }

    /// The type path of the instance.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The instance as a `dyn Object`.
    #[inline]
    pub fn object(&self) -> &ObjectRef {
        &self.object
    }

    /// The instance as its concrete type, if it is a `T`.
    pub fn downcast<T: Object>(&self) -> Option<Shared<T>> {
        Rc::downcast::<RefCell<T>>(self.any.clone()).ok()
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracked")
            .field("type_path", &self.type_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{Object, ObjectRef, Tracked, share};
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn tracked_views_share_allocation() {
        let list = share(vec![1_i32, 2]);
        let tracked = Tracked::new(&list);

        let typed = tracked.downcast::<Vec<i32>>().unwrap();
        assert!(Rc::ptr_eq(&typed, &list));
        assert!(tracked.downcast::<Vec<u8>>().is_none());

        tracked.object().borrow_mut().downcast_mut::<Vec<i32>>().unwrap().push(3);
        assert_eq!(list.borrow().len(), 3);
        assert_eq!(tracked.type_path(), "alloc::vec::Vec<i32>");
    }

    #[test]
    fn dyn_object_downcast() {
        let object: ObjectRef = share(Vec::<u8>::new());
        let object = object.borrow();
        let object: &dyn Object = &*object;
        assert!(object.is::<Vec<u8>>());
        assert_eq!(object.object_type_path(), "alloc::vec::Vec<u8>");
    }
}
