use core::hash::{BuildHasher, Hash};
use std::collections::BTreeMap;

use crate::Reflect;
use crate::info::{MAP, RawType, Type, TypeCell, TypeKind, TypeOps, Typed};
use crate::ops::Map;
use crate::reflection::impl_reflect_cast_fn;

fn map_of_kv() -> Vec<Type> {
    vec![Type::generic(&MAP, [Type::var("K"), Type::var("V")])]
}

static BTREE_MAP: RawType = RawType::new("alloc::collections::BTreeMap", "BTreeMap", TypeKind::Class)
    .with_params(&["K", "V"])
    .with_supertypes(map_of_kv);

static HASH_MAP: RawType = RawType::new("std::collections::HashMap", "HashMap", TypeKind::Class)
    .with_params(&["K", "V"])
    .with_supertypes(map_of_kv);

static HASHBROWN_MAP: RawType = RawType::new("hashbrown::HashMap", "HashMap", TypeKind::Class)
    .with_params(&["K", "V"])
    .with_supertypes(map_of_kv);

type Entry = (Box<dyn Reflect>, Box<dyn Reflect>);

/// Unboxes a key-value pair, handing both back unless both types match.
fn take_entry<K: Reflect, V: Reflect>(key: Box<dyn Reflect>, value: Box<dyn Reflect>) -> Result<(K, V), Entry> {
    if !key.is::<K>() || !value.is::<V>() {
        return Err((key, value));
    }
    match (key.take::<K>(), value.take::<V>()) {
        (Ok(key), Ok(value)) => Ok((key, value)),
        _ => unreachable!("types are already checked"),
    }
}

fn box_entry<K: Reflect, V: Reflect>((key, value): (K, V)) -> Entry {
    (Box::new(key), Box::new(value))
}

// -----------------------------------------------------------------------------
// BTreeMap

impl<K: Reflect + Typed + Ord, V: Reflect + Typed> Typed for BTreeMap<K, V> {
    fn ty() -> Type {
        static CELL: TypeCell = TypeCell::new();
        CELL.get_or_insert::<Self>(|| {
            Type::generic(&BTREE_MAP, [K::ty(), V::ty()])
                .with_ops(TypeOps::of::<Self>().with_default::<Self>())
        })
    }
}

impl<K: Reflect + Ord, V: Reflect> Reflect for BTreeMap<K, V> {
    impl_reflect_cast_fn!(Map);
}

impl<K: Reflect + Ord, V: Reflect> Map for BTreeMap<K, V> {
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
        Box::new(BTreeMap::iter(self).map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)))
    }

    #[inline]
    fn clear(&mut self) {
        BTreeMap::clear(self);
    }

    fn insert(&mut self, key: Box<dyn Reflect>, value: Box<dyn Reflect>) -> Result<(), Entry> {
        let (key, value) = take_entry::<K, V>(key, value)?;
        BTreeMap::insert(self, key, value);
        Ok(())
    }

    fn drain(&mut self) -> Vec<Entry> {
        core::mem::take(self).into_iter().map(box_entry).collect()
    }
}

// -----------------------------------------------------------------------------
// Hash maps

macro_rules! impl_hash_map {
    ($($path:ident)::+, $raw:ident) => {
        impl<K, V, S> Typed for $($path)::+<K, V, S>
        where
            K: Reflect + Typed + Eq + Hash,
            V: Reflect + Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            fn ty() -> Type {
                static CELL: TypeCell = TypeCell::new();
                CELL.get_or_insert::<Self>(|| {
                    Type::generic(&$raw, [K::ty(), V::ty()])
                        .with_ops(TypeOps::of::<Self>().with_default::<Self>())
                })
            }
        }

        impl<K, V, S> Reflect for $($path)::+<K, V, S>
        where
            K: Reflect + Eq + Hash,
            V: Reflect,
            S: BuildHasher + Send + Sync + 'static,
        {
            impl_reflect_cast_fn!(Map);
        }

        impl<K, V, S> Map for $($path)::+<K, V, S>
        where
            K: Reflect + Eq + Hash,
            V: Reflect,
            S: BuildHasher + Send + Sync + 'static,
        {
            #[inline]
            fn len(&self) -> usize {
                $($path)::+::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                Box::new(
                    $($path)::+::iter(self).map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)),
                )
            }

            #[inline]
            fn clear(&mut self) {
                $($path)::+::clear(self);
            }

            fn insert(&mut self, key: Box<dyn Reflect>, value: Box<dyn Reflect>) -> Result<(), Entry> {
                let (key, value) = take_entry::<K, V>(key, value)?;
                $($path)::+::insert(self, key, value);
                Ok(())
            }

            fn drain(&mut self) -> Vec<Entry> {
                $($path)::+::drain(self).map(box_entry).collect()
            }
        }
    };
}

impl_hash_map!(std::collections::HashMap, HASH_MAP);
impl_hash_map!(st_utils::hash::hashbrown::HashMap, HASHBROWN_MAP);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use crate::Reflect;
    use crate::info::{MAP, Typed};
    use crate::ops::{Map, ReflectRef};

    #[test]
    fn map_descriptors() {
        let ty = <HashMap<String, Vec<i32>>>::ty();
        assert_eq!(ty.to_string(), "HashMap<String, Vec<i32>>");
        assert!(ty.raw().unwrap().extends(&MAP));
        assert_eq!(<st_utils::hash::HashMap<u8, u8>>::ty().args().len(), 2);
    }

    #[test]
    fn insert_checks_both_halves() {
        let mut map: BTreeMap<String, u8> = BTreeMap::new();
        Map::insert(&mut map, Box::new("a".to_string()), Box::new(1_u8)).unwrap();
        let (key, value) = Map::insert(&mut map, Box::new("b".to_string()), Box::new(2_i32)).unwrap_err();
        assert!(key.is::<String>());
        assert!(value.is::<i32>());
        assert_eq!(map.len(), 1);

        let value: Box<dyn Reflect> = Box::new(map);
        let ReflectRef::Map(view) = value.reflect_ref() else {
            panic!("expected a map");
        };
        let (k, v) = view.iter().next().unwrap();
        assert_eq!(k.downcast_ref::<String>().unwrap(), "a");
        assert_eq!(v.downcast_ref::<u8>(), Some(&1));
    }
}
