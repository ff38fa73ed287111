//! Abstract raw types that only appear as supertypes.

use crate::info::{RawType, Type, TypeKind};

/// The universal supertype of every descriptor.
pub static ANY: RawType = RawType::new("st_reflect::Any", "Any", TypeKind::Top);

/// Supertype of every boxed numeric type.
pub static NUMBER: RawType = RawType::new("st_reflect::Number", "Number", TypeKind::Interface);

pub static COLLECTION: RawType =
    RawType::new("st_reflect::Collection", "Collection", TypeKind::Interface).with_params(&["E"]);

/// Ordered sequences: `Vec`.
pub static LIST: RawType = RawType::new("st_reflect::List", "List", TypeKind::Interface)
    .with_params(&["E"])
    .with_supertypes(collection_of_e);

/// Unique elements: `HashSet`, `BTreeSet`.
pub static SET: RawType = RawType::new("st_reflect::Set", "Set", TypeKind::Interface)
    .with_params(&["E"])
    .with_supertypes(collection_of_e);

/// Double-ended sequences: `VecDeque`, `LinkedList`.
pub static QUEUE: RawType = RawType::new("st_reflect::Queue", "Queue", TypeKind::Interface)
    .with_params(&["E"])
    .with_supertypes(collection_of_e);

pub static MAP: RawType =
    RawType::new("st_reflect::Map", "Map", TypeKind::Interface).with_params(&["K", "V"]);

fn collection_of_e() -> Vec<Type> {
    vec![Type::generic(&COLLECTION, [Type::var("E")])]
}
