use std::collections::{BTreeSet, LinkedList, VecDeque};
use core::hash::{BuildHasher, Hash};

use crate::Reflect;
use crate::info::{LIST, QUEUE, RawType, SET, Type, TypeCell, TypeKind, TypeOps, Typed};
use crate::ops::List;
use crate::reflection::impl_reflect_cast_fn;

fn list_of_t() -> Vec<Type> {
    vec![Type::generic(&LIST, [Type::var("T")])]
}

fn queue_of_t() -> Vec<Type> {
    vec![Type::generic(&QUEUE, [Type::var("T")])]
}

fn set_of_t() -> Vec<Type> {
    vec![Type::generic(&SET, [Type::var("T")])]
}

static VEC: RawType = RawType::new("alloc::vec::Vec", "Vec", TypeKind::Class)
    .with_params(&["T"])
    .with_supertypes(list_of_t);

static VEC_DEQUE: RawType = RawType::new("alloc::collections::VecDeque", "VecDeque", TypeKind::Class)
    .with_params(&["T"])
    .with_supertypes(queue_of_t);

static LINKED_LIST: RawType =
    RawType::new("alloc::collections::LinkedList", "LinkedList", TypeKind::Class)
        .with_params(&["T"])
        .with_supertypes(queue_of_t);

static BTREE_SET: RawType = RawType::new("alloc::collections::BTreeSet", "BTreeSet", TypeKind::Class)
    .with_params(&["T"])
    .with_supertypes(set_of_t);

static HASH_SET: RawType = RawType::new("std::collections::HashSet", "HashSet", TypeKind::Class)
    .with_params(&["T"])
    .with_supertypes(set_of_t);

static HASHBROWN_SET: RawType = RawType::new("hashbrown::HashSet", "HashSet", TypeKind::Class)
    .with_params(&["T"])
    .with_supertypes(set_of_t);

// -----------------------------------------------------------------------------
// Sequences

macro_rules! impl_sequence {
    ($ty:ident, $raw:ident, $push:ident) => {
        impl<T: Reflect + Typed> Typed for $ty<T> {
            fn ty() -> Type {
                static CELL: TypeCell = TypeCell::new();
                CELL.get_or_insert::<Self>(|| {
                    Type::generic(&$raw, [T::ty()])
                        .with_ops(TypeOps::of::<Self>().with_default::<Self>())
                })
            }
        }

        impl<T: Reflect> Reflect for $ty<T> {
            impl_reflect_cast_fn!(List);
        }

        impl<T: Reflect> List for $ty<T> {
            #[inline]
            fn len(&self) -> usize {
                $ty::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new(<&Self as IntoIterator>::into_iter(self).map(|item| item as &dyn Reflect))
            }

            #[inline]
            fn clear(&mut self) {
                $ty::clear(self);
            }

            fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                $ty::$push(self, value.take::<T>()?);
                Ok(())
            }

            fn drain(&mut self) -> Vec<Box<dyn Reflect>> {
                core::mem::take(self)
                    .into_iter()
                    .map(|item| Box::new(item) as Box<dyn Reflect>)
                    .collect()
            }
        }
    };
}

impl_sequence!(Vec, VEC, push);
impl_sequence!(VecDeque, VEC_DEQUE, push_back);
impl_sequence!(LinkedList, LINKED_LIST, push_back);

// -----------------------------------------------------------------------------
// Sets

impl<T: Reflect + Typed + Ord> Typed for BTreeSet<T> {
    fn ty() -> Type {
        static CELL: TypeCell = TypeCell::new();
        CELL.get_or_insert::<Self>(|| {
            Type::generic(&BTREE_SET, [T::ty()]).with_ops(TypeOps::of::<Self>().with_default::<Self>())
        })
    }
}

impl<T: Reflect + Ord> Reflect for BTreeSet<T> {
    impl_reflect_cast_fn!(List);
}

impl<T: Reflect + Ord> List for BTreeSet<T> {
    #[inline]
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(BTreeSet::iter(self).map(|item| item as &dyn Reflect))
    }

    #[inline]
    fn clear(&mut self) {
        BTreeSet::clear(self);
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        self.insert(value.take::<T>()?);
        Ok(())
    }

    fn drain(&mut self) -> Vec<Box<dyn Reflect>> {
        core::mem::take(self)
            .into_iter()
            .map(|item| Box::new(item) as Box<dyn Reflect>)
            .collect()
    }
}

macro_rules! impl_hash_set {
    ($($path:ident)::+, $raw:ident) => {
        impl<T, S> Typed for $($path)::+<T, S>
        where
            T: Reflect + Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            fn ty() -> Type {
                static CELL: TypeCell = TypeCell::new();
                CELL.get_or_insert::<Self>(|| {
                    Type::generic(&$raw, [T::ty()])
                        .with_ops(TypeOps::of::<Self>().with_default::<Self>())
                })
            }
        }

        impl<T, S> Reflect for $($path)::+<T, S>
        where
            T: Reflect + Eq + Hash,
            S: BuildHasher + Send + Sync + 'static,
        {
            impl_reflect_cast_fn!(List);
        }

        impl<T, S> List for $($path)::+<T, S>
        where
            T: Reflect + Eq + Hash,
            S: BuildHasher + Send + Sync + 'static,
        {
            #[inline]
            fn len(&self) -> usize {
                $($path)::+::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new($($path)::+::iter(self).map(|item| item as &dyn Reflect))
            }

            #[inline]
            fn clear(&mut self) {
                $($path)::+::clear(self);
            }

            fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                self.insert(value.take::<T>()?);
                Ok(())
            }

            fn drain(&mut self) -> Vec<Box<dyn Reflect>> {
                $($path)::+::drain(self)
                    .map(|item| Box::new(item) as Box<dyn Reflect>)
                    .collect()
            }
        }
    };
}

impl_hash_set!(std::collections::HashSet, HASH_SET);
impl_hash_set!(st_utils::hash::hashbrown::HashSet, HASHBROWN_SET);

// -----------------------------------------------------------------------------
// Tests
