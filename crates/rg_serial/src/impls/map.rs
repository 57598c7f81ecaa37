use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::any::Any;
use core::hash::Hash;
use std::collections::HashMap;

use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{FieldKind, TypeInfo, TypePath, Typed};
use crate::{DecodeError, Decoder, EncodeError, Encoder, Field, Object};

fn encode_entries<'m, K: Field + 'm, V: Field + 'm>(
    entries: impl Iterator<Item = (&'m K, &'m V)>,
    encoder: &mut Encoder<'_>,
) -> Result<(), EncodeError> {
    for (key, value) in entries {
        key.encode(encoder)?;
        value.encode(encoder)?;
    }
    Ok(())
}

// Later duplicates of a key replace earlier ones.
fn decode_entries<K: Field, V: Field>(
    len: usize,
    decoder: &mut Decoder<'_>,
    mut insert: impl FnMut(K, V),
) -> Result<(), DecodeError> {
    for _ in 0..len {
        let key = K::decode(decoder)?;
        let value = V::decode(decoder)?;
        insert(key, value);
    }
    Ok(())
}

/// Implements `TypePath`, `Field`, `Typed` and `Object` for a map type.
///
/// As an object, the body length counts entries, each written as key then value.
macro_rules! impl_map {
    (
        $map:ident < K: $($key_bound:ident)+, V >,
        $path:literal,
        $module:literal,
        |$len:ident, $decoder:ident| $with_capacity:expr
    ) => {
        impl<K: TypePath, V: TypePath> TypePath for $map<K, V> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[$path, "<", K::type_path(), ", ", V::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[stringify!($map), "<", K::type_name(), ", ", V::type_name(), ">"])
                })
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($map)
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }

        impl<K: Field $(+ $key_bound)+, V: Field> Field for $map<K, V> {
            #[inline]
            fn kind() -> FieldKind {
                FieldKind::Map(Box::new(K::kind()), Box::new(V::kind()))
            }

            fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
                encoder.write_map(self.len(), |encoder| encode_entries(self.iter(), encoder))
            }

            fn decode(decoder: &mut Decoder<'_>) -> Result<Self, DecodeError> {
                decoder.read_map(|$decoder, $len| {
                    let mut map = $with_capacity;
                    decode_entries($len, $decoder, |key, value| {
                        map.insert(key, value);
                    })?;
                    Ok(map)
                })
            }
        }

        impl<K: Field $(+ $key_bound)+, V: Field> Typed for $map<K, V> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(TypeInfo::map::<Self>)
            }
        }

        impl<K: Field $(+ $key_bound)+, V: Field> Object for $map<K, V> {
            #[inline]
            fn object_type_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn body_len(&self) -> usize {
                self.len()
            }

            fn encode_body(&self, encoder: &mut Encoder<'_>) -> Result<(), EncodeError> {
                encode_entries(self.iter(), encoder)
            }

            fn decode_body(
                &mut self,
                len: usize,
                decoder: &mut Decoder<'_>,
            ) -> Result<(), DecodeError> {
                self.clear();
                decode_entries(len, decoder, |key, value| {
                    self.insert(key, value);
                })
            }

            #[inline]
            fn as_any(&self) -> &dyn Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }
    };
}

impl_map!(
    HashMap<K: Eq Hash, V>,
    "std::collections::hash::map::HashMap",
    "std::collections::hash::map",
    |len, decoder| HashMap::with_capacity(len.min(decoder.remaining()))
);

impl_map!(
    BTreeMap<K: Ord, V>,
    "alloc::collections::btree::map::BTreeMap",
    "alloc::collections::btree::map",
    |len, decoder| BTreeMap::new()
);

#[cfg(test)]
mod tests {
    use crate::registry::{TypeRegistry, TypeRegistryArc};
    use crate::{Decoder, Encoder, Field};
    use crate::codec::References;
    use crate::info::TypePath;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use std::collections::HashMap;

    #[test]
    fn btree_map_is_ordered() {
        let registry = TypeRegistryArc::new(TypeRegistry::empty());
        let map = BTreeMap::from([(2_u8, true), (1_u8, false)]);

        let mut encoder = Encoder::new(&registry, References::Track, 8);
        encoder.encode(&map).unwrap();
        let text = encoder.finish();
        assert_eq!(text, "~m2;1;0;2;1;");

        let back: BTreeMap<u8, bool> = Decoder::new(&text, &registry, 8).decode().unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn hash_map_round_trip() {
        let registry = TypeRegistryArc::new(TypeRegistry::empty());
        let map = HashMap::from([(String::from("a"), -1_i32), (String::from("b;~n"), 2)]);

        let mut encoder = Encoder::new(&registry, References::Track, 8);
        map.encode(&mut encoder).unwrap();
        let text = encoder.finish();

        let back: HashMap<String, i32> = Decoder::new(&text, &registry, 8).decode().unwrap();
        assert_eq!(back, map);
        assert_eq!(
            <HashMap<String, i32>>::type_path(),
            "std::collections::hash::map::HashMap<alloc::string::String, i32>"
        );
    }
}
