use core::fmt;

use st_node::NodePath;

use crate::info::Type;
use crate::{Reflect, SerializerError};

// -----------------------------------------------------------------------------
// FieldInfo

/// Reads a field out of its owner. `None` means the field holds no value.
pub type FieldGetter = fn(&dyn Reflect) -> Option<&dyn Reflect>;

pub type FieldGetterMut = fn(&mut dyn Reflect) -> Option<&mut dyn Reflect>;

/// Assigns a field of its owner. `None` clears a nullable field and leaves any
/// other field untouched.
pub type FieldSetter = fn(&mut dyn Reflect, Option<Box<dyn Reflect>>) -> Result<(), SerializerError>;

/// The static description of one mapped field.
///
/// Generated by [`#[derive(Config)]`](crate::derive::Config).
#[derive(Clone, Copy)]
pub struct FieldInfo {
    name: &'static str,
    path: Option<&'static str>,
    comments: &'static [&'static str],
    nullable: bool,
    base: bool,
    ty: fn() -> Type,
    get: FieldGetter,
    get_mut: FieldGetterMut,
    set: FieldSetter,
}

impl FieldInfo {
    pub const fn new(
        name: &'static str,
        ty: fn() -> Type,
        get: FieldGetter,
        get_mut: FieldGetterMut,
        set: FieldSetter,
    ) -> Self {
        Self {
            name,
            path: None,
            comments: &[],
            nullable: false,
            base: false,
            ty,
            get,
            get_mut,
            set,
        }
    }

    /// Maps the field under a dotted path instead of its name.
    pub const fn with_path(mut self, path: &'static str) -> Self {
        self.path = Some(path);
        self
    }

    /// One comment line per element.
    pub const fn with_comments(mut self, comments: &'static [&'static str]) -> Self {
        self.comments = comments;
        self
    }

    /// Allows the node to be absent or null.
    pub const fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Marks the field as the embedded base whose fields are mapped first,
    /// at the level of the owner.
    pub const fn with_base(mut self, base: bool) -> Self {
        self.base = base;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The node path of the field: the declared path, or the name as a
    /// single segment.
    pub fn path(&self) -> NodePath {
        match self.path {
            Some(path) => NodePath::parse(path),
            None => NodePath::segment(self.name),
        }
    }

    #[inline]
    pub const fn comments(&self) -> &'static [&'static str] {
        self.comments
    }

    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub const fn is_base(&self) -> bool {
        self.base
    }

    /// The descriptor of the field type; `Option<T>` fields report `T`.
    #[inline]
    pub fn ty(&self) -> Type {
        (self.ty)()
    }

    #[inline]
    pub fn get<'a>(&self, owner: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        (self.get)(owner)
    }

    #[inline]
    pub fn get_mut<'a>(&self, owner: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect> {
        (self.get_mut)(owner)
    }

    #[inline]
    pub fn set(&self, owner: &mut dyn Reflect, value: Option<Box<dyn Reflect>>) -> Result<(), SerializerError> {
        (self.set)(owner, value)
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("comments", &self.comments)
            .field("nullable", &self.nullable)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Schema

/// The ordered fields of a configurable type.
#[derive(Debug)]
pub struct Schema {
    type_path: &'static str,
    fields: Vec<FieldInfo>,
}

impl Schema {
    pub fn new(type_path: &'static str, fields: Vec<FieldInfo>) -> Self {
        Self { type_path, fields }
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The embedded base field, if any.
    pub fn base(&self) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.base)
    }
}

// -----------------------------------------------------------------------------
// Configurable

/// A struct mapped field by field to a [`MapNode`](st_node::MapNode).
///
/// Use [`#[derive(Config)]`](crate::derive::Config); the derive builds the
/// [`Schema`] once and keeps it in a static.
pub trait Configurable: Reflect {
    fn schema(&self) -> &'static Schema;

    fn type_schema() -> &'static Schema
    where
        Self: Sized;
}
