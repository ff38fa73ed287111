use core::any::TypeId;
use std::sync::{Arc, OnceLock};

use st_node::NodePath;
use st_utils::sync::InsertOnceMap;

use crate::mapper::{Configurable, FieldInfo, Schema};
use crate::{Reflect, SerializerError};

// -----------------------------------------------------------------------------
// BoundField

/// A field reachable from the root object, possibly through embedded bases.
#[derive(Debug, Clone)]
pub struct BoundField {
    /// Base links first, the field itself last.
    chain: Box<[&'static FieldInfo]>,
    path: NodePath,
}

impl BoundField {
    fn new(chain: Vec<&'static FieldInfo>, path: NodePath) -> Self {
        Self {
            chain: chain.into_boxed_slice(),
            path,
        }
    }

    /// The field itself.
    #[inline]
    pub fn info(&self) -> &'static FieldInfo {
        self.chain[self.chain.len() - 1]
    }

    #[inline]
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// Number of base links between the root object and the field.
    #[inline]
    pub fn depth(&self) -> usize {
        self.chain.len() - 1
    }

    fn links(&self) -> &[&'static FieldInfo] {
        &self.chain[..self.chain.len() - 1]
    }

    pub fn get<'a>(&self, root: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        let mut owner = root;
        for link in self.links() {
            owner = link.get(owner)?;
        }
        self.info().get(owner)
    }

    pub fn get_mut<'a>(&self, root: &'a mut dyn Reflect) -> Result<Option<&'a mut dyn Reflect>, SerializerError> {
        let owner = self.owner_mut(root)?;
        Ok(self.info().get_mut(owner))
    }

    pub fn set(&self, root: &mut dyn Reflect, value: Option<Box<dyn Reflect>>) -> Result<(), SerializerError> {
        let owner = self.owner_mut(root)?;
        self.info().set(owner, value)
    }

    fn owner_mut<'a>(&self, root: &'a mut dyn Reflect) -> Result<&'a mut dyn Reflect, SerializerError> {
        let mut owner = root;
        for link in self.links() {
            owner = link.get_mut(owner).ok_or(SerializerError::NotBase)?;
        }
        Ok(owner)
    }
}

// -----------------------------------------------------------------------------
// Introspector

/// Flattens schemas into [`BoundField`] lists, cached per type.
///
/// Fields of an embedded base come before the fields of the type that embeds
/// it, the outermost base first.
///
/// ```
/// use st_reflect::derive::Config;
/// use st_reflect::mapper::Introspector;
///
/// #[derive(Config, Default)]
/// struct Base {
///     id: u32,
/// }
///
/// #[derive(Config, Default)]
/// struct User {
///     name: String,
///     #[config(base)]
///     base: Base,
/// }
///
/// let introspector = Introspector::new();
/// let fields = introspector.fields(&User::default()).unwrap();
/// let names: Vec<_> = fields.iter().map(|field| field.path().to_string()).collect();
/// assert_eq!(names, ["id", "name"]);
/// ```
#[derive(Debug, Default)]
pub struct Introspector {
    bound: InsertOnceMap<TypeId, Arc<[BoundField]>>,
}

impl Introspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide introspector.
    pub fn global() -> &'static Arc<Introspector> {
        static GLOBAL: OnceLock<Arc<Introspector>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(Introspector::new()))
    }

    /// The bound fields of `value`'s type.
    pub fn fields(&self, value: &dyn Configurable) -> Result<Arc<[BoundField]>, SerializerError> {
        self.bound.try_get_or_insert_with(value.ty_id(), || {
            let mut fields = Vec::new();
            bind(value.schema(), &mut Vec::new(), &mut fields)?;
            Ok(fields.into())
        })
    }

    /// Number of cached types.
    #[inline]
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    pub fn clear(&self) {
        self.bound.clear();
    }
}

fn bind(
    schema: &'static Schema,
    links: &mut Vec<&'static FieldInfo>,
    out: &mut Vec<BoundField>,
) -> Result<(), SerializerError> {
    for base in schema.fields().iter().filter(|field| field.is_base()) {
        let base_schema = base.ty().ops().schema().ok_or(SerializerError::NotBase)?;
        links.push(base);
        bind(base_schema, links, out)?;
        links.pop();
    }
    for field in schema.fields().iter().filter(|field| !field.is_base()) {
        let path = field.path();
        if path.is_root() {
            return Err(SerializerError::general(format!(
                "field `{}` of `{}` maps to an empty path",
                field.name(),
                schema.type_path(),
            )));
        }
        let mut chain = links.clone();
        chain.push(field);
        out.push(BoundField::new(chain, path));
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Introspector;
    use crate::derive::Config;
    use crate::mapper::Configurable;

    #[derive(Config, Default)]
    struct Root {
        id: u64,
    }

    #[derive(Config, Default)]
    struct Middle {
        #[config(base)]
        root: Root,
        #[config(path = "meta.kind")]
        kind: String,
    }

    #[derive(Config, Default)]
    struct Leaf {
        name: String,
        #[config(base)]
        middle: Middle,
    }

    #[test]
    fn nested_bases_flatten_outermost_first() {
        let introspector = Introspector::new();
        let fields = introspector.fields(&Leaf::default()).unwrap();

        let paths: Vec<_> = fields.iter().map(|field| field.path().to_string()).collect();
        assert_eq!(paths, ["id", "meta.kind", "name"]);
        let depths: Vec<_> = fields.iter().map(|field| field.depth()).collect();
        assert_eq!(depths, [2, 1, 0]);
    }

    #[test]
    fn bound_fields_reach_through_bases() {
        let introspector = Introspector::new();
        let mut leaf = Leaf::default();
        let fields = introspector.fields(&leaf).unwrap();

        fields[0].set(&mut leaf, Some(Box::new(42_u64))).unwrap();
        assert_eq!(leaf.middle.root.id, 42);

        let id = fields[0].get(&leaf).unwrap();
        assert_eq!(id.downcast_ref::<u64>(), Some(&42));
    }

    #[test]
    fn fields_are_cached_per_type() {
        let introspector = Introspector::new();
        let first = introspector.fields(&Middle::default()).unwrap();
        let second = introspector.fields(&Middle::default()).unwrap();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert_eq!(introspector.len(), 1);

        introspector.clear();
        assert!(introspector.is_empty());
    }

    #[test]
    fn base_is_the_declared_supertype() {
        use crate::info::Typed;
        use crate::variance::VarianceChecker;

        let checker = VarianceChecker::new();
        assert!(checker.is_supertype_of(&Root::ty(), &Leaf::ty()).unwrap());
        assert!(!checker.is_supertype_of(&Leaf::ty(), &Root::ty()).unwrap());
        assert_eq!(Leaf::type_schema().base().map(|field| field.name()), Some("middle"));
    }
}
