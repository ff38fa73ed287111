//! Kind-specific views of a [`Reflect`] value.

use crate::Reflect;
use crate::mapper::Configurable;

// -----------------------------------------------------------------------------
// ReflectRef / ReflectMut

/// An immutable view of a value by kind.
pub enum ReflectRef<'a> {
    /// A value written as a single scalar.
    Scalar(&'a dyn Reflect),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Enum(&'a dyn Enum),
    Object(&'a dyn Configurable),
}

/// A mutable view of a value by kind.
pub enum ReflectMut<'a> {
    Scalar(&'a mut dyn Reflect),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Enum(&'a mut dyn Enum),
    Object(&'a mut dyn Configurable),
}

impl ReflectRef<'_> {
    /// `"scalar"`, `"list"`, `"map"`, `"enum"` or `"object"`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Enum(_) => "enum",
            Self::Object(_) => "object",
        }
    }
}

// -----------------------------------------------------------------------------
// List

/// A homogeneous collection: list, set or queue.
///
/// Sets insert on [`push`](List::push); element order is the collection's
/// own iteration order.
pub trait List: Reflect {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;

    fn clear(&mut self);

    /// Appends `value`, handing it back if it is not an element of this list.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Removes and returns every element.
    fn drain(&mut self) -> Vec<Box<dyn Reflect>>;
}

// -----------------------------------------------------------------------------
// Map

/// A key-value collection.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    fn clear(&mut self);

    /// Inserts an entry, handing both halves back on a type mismatch.
    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), (Box<dyn Reflect>, Box<dyn Reflect>)>;

    /// Removes and returns every entry.
    fn drain(&mut self) -> Vec<(Box<dyn Reflect>, Box<dyn Reflect>)>;
}

// -----------------------------------------------------------------------------
// Enum

/// A field-less enum, identified by its variant name.
pub trait Enum: Reflect {
    fn variant_name(&self) -> &'static str;
}
