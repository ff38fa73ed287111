use core::any::{Any, TypeId};
use core::fmt;

use crate::Reflect;
use crate::mapper::Schema;

// -----------------------------------------------------------------------------
// EnumOps

/// The variant table of a field-less enum.
#[derive(Clone, Copy)]
pub struct EnumOps {
    variants: &'static [&'static str],
    from_variant: fn(&str) -> Option<Box<dyn Reflect>>,
}

impl EnumOps {
    pub const fn new(
        variants: &'static [&'static str],
        from_variant: fn(&str) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            variants,
            from_variant,
        }
    }

    #[inline]
    pub const fn variants(&self) -> &'static [&'static str] {
        self.variants
    }

    /// Builds the variant named `name`; the name must match exactly.
    #[inline]
    pub fn from_variant(&self, name: &str) -> Option<Box<dyn Reflect>> {
        (self.from_variant)(name)
    }
}

impl fmt::Debug for EnumOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EnumOps").field(&self.variants).finish()
    }
}

// -----------------------------------------------------------------------------
// TypeOps

/// Operations attached to a [`Type`](crate::info::Type).
///
/// None of these take part in descriptor identity.
#[derive(Clone, Copy, Default)]
pub struct TypeOps {
    type_id: Option<TypeId>,
    construct: Option<fn() -> Box<dyn Reflect>>,
    enum_ops: Option<EnumOps>,
    schema: Option<fn() -> &'static Schema>,
}

fn construct_default<T: Default + Reflect>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

impl TypeOps {
    /// Operations that know nothing about the described type.
    pub const fn new() -> Self {
        Self {
            type_id: None,
            construct: None,
            enum_ops: None,
            schema: None,
        }
    }

    /// Records the [`TypeId`] of `T`.
    #[inline]
    pub fn of<T: Any>() -> Self {
        Self {
            type_id: Some(TypeId::of::<T>()),
            ..Self::new()
        }
    }

    /// Uses [`Default`] as the parameterless constructor.
    #[inline]
    pub fn with_default<T: Default + Reflect>(self) -> Self {
        self.with_constructor(construct_default::<T>)
    }

    pub const fn with_constructor(mut self, construct: fn() -> Box<dyn Reflect>) -> Self {
        self.construct = Some(construct);
        self
    }

    pub const fn with_enum(mut self, enum_ops: EnumOps) -> Self {
        self.enum_ops = Some(enum_ops);
        self
    }

    pub const fn with_schema(mut self, schema: fn() -> &'static Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    #[inline]
    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    #[inline]
    pub fn has_constructor(&self) -> bool {
        self.construct.is_some()
    }

    /// Creates a new value through the parameterless constructor.
    #[inline]
    pub fn construct(&self) -> Option<Box<dyn Reflect>> {
        self.construct.map(|construct| construct())
    }

    #[inline]
    pub fn enum_ops(&self) -> Option<&EnumOps> {
        self.enum_ops.as_ref()
    }

    /// The object schema of a configurable type.
    #[inline]
    pub fn schema(&self) -> Option<&'static Schema> {
        self.schema.map(|schema| schema())
    }
}

impl fmt::Debug for TypeOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeOps")
            .field("type_id", &self.type_id)
            .field("construct", &self.construct.is_some())
            .field("enum_ops", &self.enum_ops)
            .field("schema", &self.schema.is_some())
            .finish()
    }
}
