use core::any::TypeId;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use st_utils::sync::{CowVec, InsertOnceMap};

use crate::info::Type;
use crate::registry::{TypePredicate, TypeSerializer};
use crate::variance::VarianceChecker;

#[derive(Clone)]
struct Entry {
    predicate: TypePredicate,
    serializer: Arc<dyn TypeSerializer>,
}

/// Descriptor identity ignores [`TypeOps`](crate::info::TypeOps), but closure
/// predicates inspect them: a hand-built descriptor and the one from
/// `Typed::ty` are cached apart.
#[derive(Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    ty: Type,
    type_id: Option<TypeId>,
    has_enum: bool,
    has_schema: bool,
}

impl CacheKey {
    fn new(ty: Type) -> Self {
        let ops = ty.ops();
        Self {
            type_id: ops.type_id(),
            has_enum: ops.enum_ops().is_some(),
            has_schema: ops.schema().is_some(),
            ty,
        }
    }
}

// -----------------------------------------------------------------------------
// SerializerRegistry

/// An ordered list of `(predicate, serializer)` entries with memoized
/// resolution.
///
/// # Resolution
///
/// Primitive descriptors are replaced by their boxed counterparts, then the
/// entries are scanned in registration order. When several entries match, the
/// one whose predicate is strictly narrower wins; between unrelated matches
/// the first registered is kept. Predicates that cannot be checked against a
/// type (such as a parameterized predicate against an erased generic) do not
/// match it.
///
/// Results of the local scan are cached per descriptor until the next
/// [`register`](Self::register). A scan that overlaps a registration is
/// returned but not cached. If nothing matches locally the parent resolves,
/// and its answer is not cached here.
///
/// ```
/// use std::sync::Arc;
/// use st_reflect::info::Typed;
/// use st_reflect::registry::SerializerRegistry;
///
/// let global = SerializerRegistry::global();
/// assert!(global.resolve(&<Vec<String>>::ty()).is_some());
///
/// let child = Arc::new(global.child());
/// assert!(child.is_empty());
/// assert!(child.resolve(&u8::ty()).is_some());
/// ```
pub struct SerializerRegistry {
    entries: CowVec<Entry>,
    cache: InsertOnceMap<CacheKey, Option<Arc<dyn TypeSerializer>>>,
    /// Bumped by every registration, between the push and the cache clear.
    generation: AtomicU64,
    parent: Option<Arc<SerializerRegistry>>,
    checker: Arc<VarianceChecker>,
}

impl SerializerRegistry {
    /// An empty registry using the global variance checker.
    pub fn new() -> Self {
        Self::with_checker(Arc::clone(VarianceChecker::global()))
    }

    /// An empty registry using `checker` for predicate checks.
    pub fn with_checker(checker: Arc<VarianceChecker>) -> Self {
        Self {
            entries: CowVec::new(),
            cache: InsertOnceMap::new(),
            generation: AtomicU64::new(0),
            parent: None,
            checker,
        }
    }

    /// A registry holding the built-in serializers.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        crate::serializers::register_builtins(&registry);
        registry
    }

    /// The process-wide registry of built-in serializers.
    pub fn global() -> &'static Arc<SerializerRegistry> {
        static GLOBAL: OnceLock<Arc<SerializerRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(SerializerRegistry::with_builtins()))
    }

    /// An empty registry that falls back to `self`.
    ///
    /// Entries registered on the child shadow the parent's without changing
    /// it.
    pub fn child(self: &Arc<Self>) -> Self {
        Self {
            entries: CowVec::new(),
            cache: InsertOnceMap::new(),
            generation: AtomicU64::new(0),
            parent: Some(Arc::clone(self)),
            checker: Arc::clone(&self.checker),
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<&Arc<SerializerRegistry>> {
        self.parent.as_ref()
    }

    #[inline]
    pub fn checker(&self) -> &Arc<VarianceChecker> {
        &self.checker
    }

    /// Number of local entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry and clears the resolution cache.
    ///
    /// A bare [`Type`] registers a [`TypePredicate::Supertype`] entry.
    pub fn register(&self, predicate: impl Into<TypePredicate>, serializer: impl TypeSerializer) {
        self.register_arc(predicate, Arc::new(serializer));
    }

    pub fn register_arc(&self, predicate: impl Into<TypePredicate>, serializer: Arc<dyn TypeSerializer>) {
        let predicate = predicate.into().normalized();
        log::trace!("registering serializer for {predicate:?}");
        self.entries.push(Entry {
            predicate,
            serializer,
        });
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cache.clear();
    }

    /// Finds the serializer of `ty` here or in an ancestor.
    pub fn resolve(&self, ty: &Type) -> Option<Arc<dyn TypeSerializer>> {
        let key = CacheKey::new(ty.boxed());
        let local = match self.cache.get(&key) {
            Some(local) => local,
            None => self.scan_and_cache(key),
        };
        match local {
            Some(serializer) => Some(serializer),
            None => self.parent.as_ref().and_then(|parent| parent.resolve(ty)),
        }
    }

    /// Drops memoized resolutions.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn scan_and_cache(&self, key: CacheKey) -> Option<Arc<dyn TypeSerializer>> {
        let generation = self.generation.load(Ordering::SeqCst);
        let local = self.scan(&key.ty);
        self.cache.insert_if_absent(key.clone(), local.clone());
        // A registration that started after `generation` was read may have
        // cleared the cache before the insert above.
        if self.generation.load(Ordering::SeqCst) != generation {
            self.cache.remove(&key);
        }
        local
    }

    fn scan(&self, ty: &Type) -> Option<Arc<dyn TypeSerializer>> {
        let entries = self.entries.snapshot();
        let mut best: Option<&Entry> = None;
        for entry in entries.iter() {
            match entry.predicate.matches(ty, &self.checker) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(error) => {
                    log::trace!("{:?} skipped for `{ty}`: {error}", entry.predicate);
                    continue;
                }
            }
            best = match best {
                Some(current)
                    if !entry
                        .predicate
                        .is_narrower_than(&current.predicate, &self.checker) =>
                {
                    Some(current)
                }
                _ => Some(entry),
            };
        }
        match best {
            Some(entry) => log::trace!("`{ty}` resolved by {:?}", entry.predicate),
            None => log::trace!("`{ty}` has no local serializer"),
        }
        best.map(|entry| Arc::clone(&entry.serializer))
    }
}

impl Default for SerializerRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.snapshot();
        f.debug_struct("SerializerRegistry")
            .field(
                "entries",
                &entries.iter().map(|e| &e.predicate).collect::<Vec<_>>(),
            )
            .field("cached", &self.cache.len())
            .field("parent", &self.parent.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Barrier};

    use st_node::{Node, NodeOptions};

    use super::SerializerRegistry;
    use crate::derive::Config;
    use crate::info::{COLLECTION, LIST, NUMBER, Type, Typed};
    use crate::mapper::Introspector;
    use crate::registry::{Context, TypePredicate, TypeSerializer};
    use crate::{Reflect, SerializerError};

    /// Serializes everything to its own name.
    struct Named(&'static str);

    impl TypeSerializer for Named {
        fn serialize(&self, _: Option<&dyn Reflect>, _: &Type, _: &Context<'_>) -> Result<Node, SerializerError> {
            Ok(self.0.into())
        }

        fn deserialize(&self, _: &Node, _: &Type, _: &Context<'_>) -> Result<Box<dyn Reflect>, SerializerError> {
            Err(SerializerError::NullValue)
        }
    }

    fn resolved(registry: &SerializerRegistry, ty: &Type) -> Option<String> {
        let introspector = Introspector::new();
        let options = NodeOptions::shared();
        let cx = Context::new(registry, &introspector, &options);
        let serializer = registry.resolve(ty)?;
        let node = serializer.serialize(None, ty, &cx).unwrap();
        Some(node.as_scalar()?.as_str()?.to_owned())
    }

    fn number() -> Type {
        Type::class(&NUMBER)
    }

    #[test]
    fn narrower_entry_wins_in_any_order() {
        let forward = SerializerRegistry::new();
        forward.register(number(), Named("number"));
        forward.register(i32::ty(), Named("int"));

        let backward = SerializerRegistry::new();
        backward.register(i32::ty(), Named("int"));
        backward.register(number(), Named("number"));

        for registry in [&forward, &backward] {
            assert_eq!(resolved(registry, &i32::ty()).as_deref(), Some("int"));
            assert_eq!(resolved(registry, &<Box<i32>>::ty()).as_deref(), Some("int"));
            assert_eq!(resolved(registry, &u8::ty()).as_deref(), Some("number"));
            assert_eq!(resolved(registry, &String::ty()), None);
        }
    }

    #[test]
    fn unrelated_matches_keep_first_registered() {
        let lists = Type::generic(&LIST, [Type::wildcard()]);
        let numbers = Type::generic(&COLLECTION, [number()]);

        let registry = SerializerRegistry::new();
        registry.register(lists.clone(), Named("lists"));
        registry.register(numbers.clone(), Named("numbers"));
        assert_eq!(resolved(&registry, &<Vec<i32>>::ty()).as_deref(), Some("lists"));

        let registry = SerializerRegistry::new();
        registry.register(numbers, Named("numbers"));
        registry.register(lists, Named("lists"));
        assert_eq!(resolved(&registry, &<Vec<i32>>::ty()).as_deref(), Some("numbers"));

        let registry = SerializerRegistry::new();
        registry.register(TypePredicate::custom(|_| true), Named("custom"));
        registry.register(String::ty(), Named("string"));
        assert_eq!(resolved(&registry, &String::ty()).as_deref(), Some("custom"));
    }

    #[test]
    fn raw_predicates_match_erased_generics() {
        let registry = SerializerRegistry::new();
        registry.register(TypePredicate::Raw(&COLLECTION), Named("raw"));
        registry.register(Type::generic(&LIST, [Type::wildcard()]), Named("list"));

        let vec = <Vec<u8>>::ty();
        assert_eq!(resolved(&registry, &vec).as_deref(), Some("list"));
        assert_eq!(
            resolved(&registry, &<std::collections::VecDeque<u8>>::ty()).as_deref(),
            Some("raw")
        );

        let erased = Type::class(vec.raw().unwrap());
        assert!(erased.is_erased());
        assert_eq!(resolved(&registry, &erased).as_deref(), Some("raw"));
    }

    #[test]
    fn exact_predicates_use_boxed_targets() {
        let registry = SerializerRegistry::new();
        registry.register(TypePredicate::Exact(i16::ty()), Named("short"));
        assert_eq!(resolved(&registry, &<Box<i16>>::ty()).as_deref(), Some("short"));
        assert_eq!(resolved(&registry, &i16::ty()).as_deref(), Some("short"));
        assert_eq!(resolved(&registry, &i32::ty()), None);
    }

    #[test]
    fn register_clears_cache() {
        let registry = SerializerRegistry::new();
        assert_eq!(resolved(&registry, &String::ty()), None);
        registry.register(String::ty(), Named("string"));
        assert_eq!(resolved(&registry, &String::ty()).as_deref(), Some("string"));
    }

    #[test]
    fn registration_during_a_scan_is_not_lost() {
        let entered = Arc::new(Barrier::new(2));
        let proceed = Arc::new(Barrier::new(2));
        let armed = Arc::new(AtomicBool::new(true));

        let registry = SerializerRegistry::new();
        registry.register(number(), Named("number"));
        registry.register(
            TypePredicate::custom({
                let (entered, proceed) = (Arc::clone(&entered), Arc::clone(&proceed));
                let armed = Arc::clone(&armed);
                move |_: &Type| {
                    if armed.swap(false, Ordering::SeqCst) {
                        entered.wait();
                        proceed.wait();
                    }
                    false
                }
            }),
            Named("never"),
        );

        std::thread::scope(|s| {
            let scan = s.spawn(|| resolved(&registry, &i32::ty()));
            entered.wait();
            registry.register(i32::ty(), Named("int"));
            proceed.wait();
            // The overlapping scan saw the old entries.
            assert_eq!(scan.join().unwrap().as_deref(), Some("number"));
        });

        assert_eq!(resolved(&registry, &i32::ty()).as_deref(), Some("int"));
        assert_eq!(resolved(&registry, &i32::ty()).as_deref(), Some("int"));
    }

    #[test]
    fn descriptors_without_ops_are_cached_apart() {
        #[derive(Config, Default)]
        struct Settings {
            port: u16,
        }

        let registry = SerializerRegistry::new();
        registry.register(
            TypePredicate::custom(|ty| ty.ops().schema().is_some()),
            Named("object"),
        );

        let bare = Type::class(Settings::ty().raw().unwrap());
        assert_eq!(bare, Settings::ty());
        assert_eq!(resolved(&registry, &bare), None);
        assert_eq!(resolved(&registry, &Settings::ty()).as_deref(), Some("object"));
        assert_eq!(resolved(&registry, &bare), None);
    }

    #[test]
    fn child_shadows_and_falls_back() {
        let parent = Arc::new(SerializerRegistry::new());
        parent.register(number(), Named("number"));

        let child = parent.child();
        child.register(i32::ty(), Named("int"));

        assert_eq!(resolved(&child, &i32::ty()).as_deref(), Some("int"));
        assert_eq!(resolved(&child, &u8::ty()).as_deref(), Some("number"));
        assert_eq!(resolved(&parent, &i32::ty()).as_deref(), Some("number"));

        // Parent results are not cached in the child.
        assert_eq!(resolved(&child, &String::ty()), None);
        parent.register(String::ty(), Named("string"));
        assert_eq!(resolved(&child, &String::ty()).as_deref(), Some("string"));
    }

    #[test]
    fn builtins_cover_std_types() {
        let registry = SerializerRegistry::global();
        for ty in [
            i8::ty(),
            f64::ty(),
            bool::ty(),
            char::ty(),
            String::ty(),
            <Vec<String>>::ty(),
            <std::collections::BTreeMap<String, u32>>::ty(),
            <std::path::PathBuf>::ty(),
        ] {
            assert!(registry.resolve(&ty).is_some(), "{ty}");
        }
    }
}
