use st_node::Node;

use crate::info::Type;
use crate::registry::Context;
use crate::{Reflect, SerializerError};

/// A codec between values of some types and nodes.
///
/// `ty` is the descriptor the value is read or written as; generic codecs take
/// element types from its arguments. A `None` value serializes to a null
/// scalar.
///
/// ```
/// use st_node::{Node, ScalarNode};
/// use st_reflect::info::{Type, Typed};
/// use st_reflect::registry::{Context, TypeSerializer};
/// use st_reflect::{Reflect, SerializerError};
///
/// /// Writes booleans as `yes` / `no`.
/// struct YesNo;
///
/// impl TypeSerializer for YesNo {
///     fn serialize(&self, value: Option<&dyn Reflect>, _: &Type, _: &Context<'_>) -> Result<Node, SerializerError> {
///         Ok(match value.and_then(|v| v.downcast_ref::<bool>()) {
///             Some(true) => "yes".into(),
///             Some(false) => "no".into(),
///             None => Node::null(),
///         })
///     }
///
///     fn deserialize(&self, node: &Node, _: &Type, _: &Context<'_>) -> Result<Box<dyn Reflect>, SerializerError> {
///         let text = node.as_scalar().map(ScalarNode::require).transpose()?;
///         Ok(Box::new(text == Some("yes")))
///     }
/// }
/// ```
pub trait TypeSerializer: Send + Sync + 'static {
    fn serialize(
        &self,
        value: Option<&dyn Reflect>,
        ty: &Type,
        cx: &Context<'_>,
    ) -> Result<Node, SerializerError>;

    fn deserialize(
        &self,
        node: &Node,
        ty: &Type,
        cx: &Context<'_>,
    ) -> Result<Box<dyn Reflect>, SerializerError>;
}
