//! Support for the code generated by `#[derive(Config)]` and
//! `#[derive(ConfigEnum)]`. Not a stable API.

pub use std::sync::OnceLock;
pub use std::vec::Vec;

use crate::{Reflect, SerializerError};

/// Reads a plain field.
#[inline]
pub fn get<S: Reflect, F: Reflect>(owner: &dyn Reflect, field: fn(&S) -> &F) -> Option<&dyn Reflect> {
    owner.downcast_ref::<S>().map(|owner| field(owner).as_reflect())
}

/// Reads an `Option` field; `None` reads as absent.
#[inline]
pub fn get_option<S: Reflect, F: Reflect>(
    owner: &dyn Reflect,
    field: fn(&S) -> &Option<F>,
) -> Option<&dyn Reflect> {
    owner
        .downcast_ref::<S>()
        .and_then(|owner| field(owner).as_ref())
        .map(|value| value.as_reflect())
}

#[inline]
pub fn get_mut<S: Reflect, F: Reflect>(
    owner: &mut dyn Reflect,
    field: fn(&mut S) -> &mut F,
) -> Option<&mut dyn Reflect> {
    owner
        .downcast_mut::<S>()
        .map(|owner| field(owner).as_reflect_mut())
}

#[inline]
pub fn get_mut_option<S: Reflect, F: Reflect>(
    owner: &mut dyn Reflect,
    field: fn(&mut S) -> &mut Option<F>,
) -> Option<&mut dyn Reflect> {
    owner
        .downcast_mut::<S>()
        .and_then(|owner| field(owner).as_mut())
        .map(|value| value.as_reflect_mut())
}

/// Assigns a plain field. `None` leaves it unchanged.
pub fn set<S: Reflect, F: Reflect>(
    owner: &mut dyn Reflect,
    value: Option<Box<dyn Reflect>>,
    field: fn(&mut S) -> &mut F,
) -> Result<(), SerializerError> {
    let owner = owner_mut::<S>(owner)?;
    if let Some(value) = value {
        *field(owner) = take::<F>(value)?;
    }
    Ok(())
}

/// Assigns an `Option` field. `None` clears it.
pub fn set_option<S: Reflect, F: Reflect>(
    owner: &mut dyn Reflect,
    value: Option<Box<dyn Reflect>>,
    field: fn(&mut S) -> &mut Option<F>,
) -> Result<(), SerializerError> {
    let owner = owner_mut::<S>(owner)?;
    *field(owner) = value.map(take::<F>).transpose()?;
    Ok(())
}

fn owner_mut<S: Reflect>(owner: &mut dyn Reflect) -> Result<&mut S, SerializerError> {
    let found = owner.reflect_type_name();
    owner.downcast_mut::<S>().ok_or_else(|| {
        SerializerError::general(format!(
            "expected `{}`, found `{found}`",
            core::any::type_name::<S>()
        ))
    })
}

fn take<F: Reflect>(value: Box<dyn Reflect>) -> Result<F, SerializerError> {
    value.take::<F>().map_err(|value| {
        SerializerError::general(format!(
            "expected `{}`, found `{}`",
            core::any::type_name::<F>(),
            value.reflect_type_name()
        ))
    })
}

/// Boxes a variant for [`EnumOps`](crate::info::EnumOps).
#[inline]
pub fn boxed<T: Reflect>(value: T) -> Box<dyn Reflect> {
    Box::new(value)
}
