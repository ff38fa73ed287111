use std::sync::Arc;

use st_node::{MapNode, Node, NodeOptions};

use crate::info::Type;
use crate::mapper::{BoundField, Configurable, Introspector};
use crate::ops::ReflectMut;
use crate::registry::{Context, SerializerRegistry};
use crate::{Reflect, SerializerError};

// -----------------------------------------------------------------------------
// ObjectMapper

/// Moves values between a [`Configurable`] object and a [`MapNode`].
///
/// A mapper combines the serializer registry used to resolve field codecs,
/// the introspector that caches bound fields, and the node options of the
/// document the nodes belong to.
///
/// ```
/// use st_reflect::derive::Config;
/// use st_reflect::mapper::ObjectMapper;
///
/// #[derive(Config, Default, Debug, PartialEq)]
/// struct Limits {
///     #[config(comment = "requests per second")]
///     rate: u32,
///     #[config(path = "burst.size")]
///     burst: u32,
/// }
///
/// let mapper = ObjectMapper::default();
/// let node = mapper.extract(&Limits { rate: 10, burst: 4 }).unwrap();
/// assert_eq!(node.to_string(), "# requests per second\nrate = 10\nburst {\n  size = 4\n}");
///
/// let mut limits = Limits::default();
/// mapper.modify(&mut limits, &node).unwrap();
/// assert_eq!(limits, Limits { rate: 10, burst: 4 });
/// ```
#[derive(Debug, Clone)]
pub struct ObjectMapper {
    registry: Arc<SerializerRegistry>,
    introspector: Arc<Introspector>,
    options: Arc<NodeOptions>,
}

impl ObjectMapper {
    /// A mapper resolving through `registry`, with the global introspector
    /// and fresh node options.
    pub fn new(registry: Arc<SerializerRegistry>) -> Self {
        Self {
            registry,
            introspector: Arc::clone(Introspector::global()),
            options: NodeOptions::shared(),
        }
    }

    pub fn with_introspector(mut self, introspector: Arc<Introspector>) -> Self {
        self.introspector = introspector;
        self
    }

    /// Uses the options of an existing document for extracted nodes.
    pub fn with_options(mut self, options: Arc<NodeOptions>) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn registry(&self) -> &Arc<SerializerRegistry> {
        &self.registry
    }

    #[inline]
    pub fn introspector(&self) -> &Arc<Introspector> {
        &self.introspector
    }

    #[inline]
    pub fn options(&self) -> &Arc<NodeOptions> {
        &self.options
    }

    /// The serialization context of this mapper.
    pub fn context(&self) -> Context<'_> {
        Context::new(&self.registry, &self.introspector, &self.options)
    }

    /// Serializes every bound field of `source` into a new map.
    ///
    /// # Errors
    ///
    /// The first field that fails, wrapped in [`SerializerError::Field`].
    pub fn extract(&self, source: &dyn Configurable) -> Result<MapNode, SerializerError> {
        let mut root = MapNode::with_options(self.options.clone());
        extract_into(&self.context(), source, &mut root)?;
        Ok(root)
    }

    /// Serializes every bound field of `source` into `root`.
    ///
    /// Paths already present in `root` are rejected with
    /// [`NodeError::DuplicatePath`](st_node::NodeError::DuplicatePath).
    pub fn extract_into(&self, source: &dyn Configurable, root: &mut MapNode) -> Result<(), SerializerError> {
        extract_into(&self.context(), source, root)
    }

    /// Assigns every bound field of `target` from `root`.
    ///
    /// Fields are processed in order and the first failing field aborts;
    /// fields before it keep their new values.
    pub fn modify(&self, target: &mut dyn Configurable, root: &MapNode) -> Result<(), SerializerError> {
        modify_object(&self.context(), target, root)
    }
}

impl Default for ObjectMapper {
    fn default() -> Self {
        Self::new(Arc::clone(SerializerRegistry::global()))
    }
}

// -----------------------------------------------------------------------------
// Extract

pub(crate) fn extract_into(
    cx: &Context<'_>,
    source: &dyn Configurable,
    root: &mut MapNode,
) -> Result<(), SerializerError> {
    let fields = cx.introspector().fields(source)?;
    for field in fields.iter() {
        extract_field(cx, source.as_reflect(), field, root).map_err(|e| e.at(field.path()))?;
    }
    Ok(())
}

fn extract_field(
    cx: &Context<'_>,
    source: &dyn Reflect,
    field: &BoundField,
    root: &mut MapNode,
) -> Result<(), SerializerError> {
    let info = field.info();
    let ty = info.ty();
    let codec = cx.require(&ty)?;
    let mut node = codec.serialize(field.get(source), &ty, cx)?;
    node.comments_mut()
        .extend(info.comments().iter().map(|line| cx.options().translate(line)));

    let path = field.path();
    let parent = root.ensure_map(&path.parent().unwrap_or_default())?;
    let key = path.last().unwrap_or_default();
    parent.add(key, node)?;
    Ok(())
}

// -----------------------------------------------------------------------------
// Modify

pub(crate) fn modify_object(
    cx: &Context<'_>,
    target: &mut dyn Configurable,
    root: &MapNode,
) -> Result<(), SerializerError> {
    let fields = cx.introspector().fields(target)?;
    for field in fields.iter() {
        modify_field(cx, target.as_reflect_mut(), field, root).map_err(|e| e.at(field.path()))?;
    }
    Ok(())
}

fn modify_field(
    cx: &Context<'_>,
    target: &mut dyn Reflect,
    field: &BoundField,
    root: &MapNode,
) -> Result<(), SerializerError> {
    let info = field.info();
    let ty = info.ty();
    let codec = cx.require(&ty)?;

    let node = match root.get_path(field.path()) {
        Some(node) if !(node.is_null() && info.is_nullable()) => node,
        Some(_) => return field.set(target, None),
        None if info.is_nullable() => return field.set(target, None),
        None => {
            return Err(SerializerError::NullNode {
                path: field.path().clone(),
            });
        }
    };

    if let Some(live) = field.get_mut(target)? {
        match live.reflect_mut() {
            ReflectMut::Object(object) => {
                let map = node.as_map().ok_or_else(|| not_map(node))?;
                return modify_object(cx, object, map);
            }
            ReflectMut::List(list) => {
                let mut fresh = codec.deserialize(node, &ty, cx)?;
                let ReflectMut::List(fresh) = fresh.reflect_mut() else {
                    return Err(mismatch(&ty, "list"));
                };
                list.clear();
                for item in fresh.drain() {
                    list.push(item).map_err(|_| mismatch(&ty, "element"))?;
                }
                return Ok(());
            }
            ReflectMut::Map(map) => {
                let mut fresh = codec.deserialize(node, &ty, cx)?;
                let ReflectMut::Map(fresh) = fresh.reflect_mut() else {
                    return Err(mismatch(&ty, "map"));
                };
                map.clear();
                for (key, value) in fresh.drain() {
                    map.insert(key, value).map_err(|_| mismatch(&ty, "entry"))?;
                }
                return Ok(());
            }
            ReflectMut::Scalar(_) | ReflectMut::Enum(_) => {}
        }
    }

    let value = codec.deserialize(node, &ty, cx)?;
    field.set(target, Some(value))
}

fn not_map(node: &Node) -> SerializerError {
    SerializerError::NotMatch {
        expected: "map",
        found: node.kind_name(),
    }
}

fn mismatch(ty: &Type, what: &str) -> SerializerError {
    SerializerError::general(format!("deserialized {what} does not fit `{ty}`"))
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use st_node::{MapNode, NodeError, NodeOptions, ScalarNode};

    use super::ObjectMapper;
    use crate::SerializerError;
    use crate::derive::Config;

    #[derive(Config, Default, Debug, PartialEq)]
    struct Sample {
        count: i32,
        label: String,
    }

    #[derive(Config, Default, Debug, PartialEq)]
    struct Inner {
        size: u32,
        #[config(skip)]
        hits: u32,
    }

    #[derive(Config, Debug, PartialEq)]
    struct Outer {
        name: String,
        inner: Inner,
        tags: Vec<String>,
        alias: Option<String>,
        #[config(nullable)]
        retries: u8,
    }

    impl Default for Outer {
        fn default() -> Self {
            Self {
                name: String::new(),
                inner: Inner::default(),
                tags: Vec::new(),
                alias: Some("old".into()),
                retries: 5,
            }
        }
    }

    fn outer_node() -> MapNode {
        let mut root = MapNode::new();
        root.add("name", "web").unwrap();
        root.new_map("inner").unwrap().add("size", "4").unwrap();
        let tags = root.new_list("tags").unwrap();
        tags.push("a");
        tags.push("b c");
        root.add("alias", ScalarNode::null()).unwrap();
        root
    }

    #[test]
    fn scalar_fields_round_trip() {
        let mapper = ObjectMapper::default();
        let source = Sample {
            count: 3,
            label: "a b".into(),
        };

        let node = mapper.extract(&source).unwrap();
        assert_eq!(node.to_string(), "count = 3\nlabel = a b");

        let mut target = Sample::default();
        mapper.modify(&mut target, &node).unwrap();
        assert_eq!(target, source);
    }

    #[test]
    fn modify_updates_in_place() {
        let mapper = ObjectMapper::default();
        let mut target = Outer {
            inner: Inner { size: 1, hits: 7 },
            tags: vec!["old".into()],
            ..Outer::default()
        };

        mapper.modify(&mut target, &outer_node()).unwrap();

        assert_eq!(target.name, "web");
        // The nested object is modified, not replaced: unmapped state survives.
        assert_eq!(target.inner, Inner { size: 4, hits: 7 });
        assert_eq!(target.tags, ["a", "b c"]);
        assert_eq!(target.alias, None);
        // An absent nullable field keeps its value.
        assert_eq!(target.retries, 5);
    }

    #[test]
    fn absent_option_is_cleared() {
        let mapper = ObjectMapper::default();
        let mut root = outer_node();
        root.remove("alias");

        let mut target = Outer::default();
        mapper.modify(&mut target, &root).unwrap();
        assert_eq!(target.alias, None);
    }

    #[test]
    fn none_extracts_as_null() {
        let mapper = ObjectMapper::default();
        let source = Outer {
            alias: None,
            ..Outer::default()
        };

        let node = mapper.extract(&source).unwrap();
        assert!(node.get("alias").unwrap().is_null());
        assert_eq!(node.get("retries").unwrap().as_scalar().unwrap().as_str(), Some("5"));
        assert!(node.get("inner").unwrap().as_map().unwrap().contains("size"));
        assert!(!node.get("inner").unwrap().as_map().unwrap().contains("hits"));
    }

    #[test]
    fn missing_node_names_the_field() {
        let mapper = ObjectMapper::default();
        let mut root = outer_node();
        root.remove("name");

        let err = mapper.modify(&mut Outer::default(), &root).unwrap_err();
        let SerializerError::Field { path, source } = &err else {
            panic!("unexpected {err:?}");
        };
        assert_eq!(path.to_string(), "name");
        assert!(matches!(**source, SerializerError::NullNode { .. }));
    }

    #[test]
    fn nested_failures_keep_the_whole_path() {
        let mapper = ObjectMapper::default();
        let mut root = outer_node();
        root.remove("inner");
        root.new_map("inner").unwrap().add("size", "many").unwrap();

        let err = mapper.modify(&mut Outer::default(), &root).unwrap_err();
        assert_eq!(err.to_string().split(':').next(), Some("field `inner`"));
        assert!(matches!(err.root_cause(), SerializerError::Deserialize { .. }));
    }

    #[test]
    fn first_failure_aborts() {
        let mapper = ObjectMapper::default();
        let mut root = MapNode::new();
        root.add("count", "x").unwrap();
        root.add("label", "kept out").unwrap();

        let mut target = Sample::default();
        assert!(mapper.modify(&mut target, &root).is_err());
        assert_eq!(target, Sample::default());
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let mapper = ObjectMapper::default();
        let source = Sample::default();

        let mut root = mapper.extract(&source).unwrap();
        let err = mapper.extract_into(&source, &mut root).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            SerializerError::Node(NodeError::DuplicatePath { path }) if path == "count"
        ));
    }

    #[test]
    fn comments_pass_through_the_translator() {
        #[derive(Config, Default)]
        struct Commented {
            #[config(comment = "greeting", comment = "second line")]
            hello: bool,
        }

        let options = NodeOptions::shared();
        options.set_translator(|text| text.to_uppercase());
        let mapper = ObjectMapper::default().with_options(options);

        let node = mapper.extract(&Commented::default()).unwrap();
        assert_eq!(node.get("hello").unwrap().comments(), ["GREETING", "SECOND LINE"]);
        assert_eq!(node.to_string(), "# GREETING\n# SECOND LINE\nhello = false");
    }

    #[test]
    fn base_fields_come_first() {
        #[derive(Config, Default, Debug, PartialEq)]
        struct Common {
            id: u32,
        }

        #[derive(Config, Default, Debug, PartialEq)]
        struct Service {
            name: String,
            #[config(base)]
            common: Common,
        }

        let mapper = ObjectMapper::default();
        let source = Service {
            name: "api".into(),
            common: Common { id: 9 },
        };

        let node = mapper.extract(&source).unwrap();
        assert_eq!(node.to_string(), "id = 9\nname = api");

        let mut target = Service::default();
        mapper.modify(&mut target, &node).unwrap();
        assert_eq!(target, source);
    }
}
