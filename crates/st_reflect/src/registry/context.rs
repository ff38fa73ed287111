use std::sync::Arc;

use st_node::{MapNode, Node, NodeOptions};

use crate::info::Type;
use crate::mapper::{self, Configurable, Introspector};
use crate::registry::{SerializerRegistry, TypeSerializer};
use crate::{Reflect, SerializerError};

// -----------------------------------------------------------------------------
// Context

/// What a [`TypeSerializer`] needs to recurse into nested values.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    registry: &'a SerializerRegistry,
    introspector: &'a Introspector,
    options: &'a Arc<NodeOptions>,
}

impl<'a> Context<'a> {
    #[inline]
    pub fn new(
        registry: &'a SerializerRegistry,
        introspector: &'a Introspector,
        options: &'a Arc<NodeOptions>,
    ) -> Self {
        Self {
            registry,
            introspector,
            options,
        }
    }

    #[inline]
    pub fn registry(&self) -> &'a SerializerRegistry {
        self.registry
    }

    #[inline]
    pub fn introspector(&self) -> &'a Introspector {
        self.introspector
    }

    /// The options given to every container node created while serializing.
    #[inline]
    pub fn options(&self) -> &'a Arc<NodeOptions> {
        self.options
    }

    /// Resolves the serializer of `ty`.
    ///
    /// # Errors
    ///
    /// [`SerializerError::Serializer`] if nothing in the registry chain
    /// handles `ty`.
    pub fn require(&self, ty: &Type) -> Result<Arc<dyn TypeSerializer>, SerializerError> {
        self.registry
            .resolve(ty)
            .ok_or_else(|| SerializerError::general(format!("no serializer for `{ty}`")))
    }

    pub fn serialize(&self, value: Option<&dyn Reflect>, ty: &Type) -> Result<Node, SerializerError> {
        self.require(ty)?.serialize(value, ty, self)
    }

    pub fn deserialize(&self, node: &Node, ty: &Type) -> Result<Box<dyn Reflect>, SerializerError> {
        self.require(ty)?.deserialize(node, ty, self)
    }

    /// Extracts a nested object into a new map.
    pub fn extract(&self, source: &dyn Configurable) -> Result<MapNode, SerializerError> {
        let mut map = MapNode::with_options(self.options.clone());
        mapper::extract_into(self, source, &mut map)?;
        Ok(map)
    }

    /// Modifies a nested object in place.
    pub fn modify(&self, target: &mut dyn Configurable, map: &MapNode) -> Result<(), SerializerError> {
        mapper::modify_object(self, target, map)
    }
}
