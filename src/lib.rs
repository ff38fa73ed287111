#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use st_document as document;
pub use st_node as node;
pub use st_reflect as reflect;
pub use st_utils as utils;

pub use st_document::{Document, DocumentError, FileDocument, LoadFlags, LoadOutcome};
pub use st_reflect::derive::{Config, ConfigEnum};

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::node::{Node, NodeError};
    use crate::reflect::info::{Type, Typed};
    use crate::reflect::mapper::ObjectMapper;
    use crate::reflect::ops::Enum;
    use crate::reflect::registry::{Context, SerializerRegistry, TypePredicate, TypeSerializer};
    use crate::reflect::{Reflect, SerializerError};
    use crate::{Config, ConfigEnum, Document, FileDocument, LoadFlags, LoadOutcome};

    #[derive(Config, Default, Debug, PartialEq)]
    struct Counter {
        count: i32,
        label: String,
    }

    #[derive(ConfigEnum, Default, Debug, Clone, Copy, PartialEq)]
    enum Level {
        #[default]
        Info,
        Warn,
    }

    #[derive(Config, Default, Debug, PartialEq)]
    struct Endpoint {
        host: String,
        port: u16,
    }

    #[derive(Config, Default, Debug, PartialEq)]
    #[config(type_path = "demo::Service")]
    struct Service {
        #[config(comment = "display name")]
        name: String,
        level: Level,
        endpoints: Vec<Endpoint>,
        weights: HashMap<String, f64>,
        #[config(path = "storage.dir")]
        dir: PathBuf,
        fallback: Option<Endpoint>,
        #[config(skip)]
        runtime_only: u64,
    }

    fn service() -> Service {
        Service {
            name: "edge proxy".into(),
            level: Level::Warn,
            endpoints: vec![
                Endpoint {
                    host: "a.local".into(),
                    port: 80,
                },
                Endpoint {
                    host: "b.local".into(),
                    port: 8080,
                },
            ],
            weights: HashMap::from([("a".to_owned(), 0.25)]),
            dir: PathBuf::from("/var/lib/edge"),
            fallback: None,
            runtime_only: 0,
        }
    }

    #[test]
    fn counter_round_trip() {
        let mut document = Document::new();
        document
            .extract(&Counter {
                count: 3,
                label: "a b".into(),
            })
            .unwrap();
        assert_eq!(document.to_string(), "count = 3\nlabel = a b\n");

        let back: Document = document.to_string().parse().unwrap();
        let mut counter = Counter::default();
        back.modify(&mut counter).unwrap();
        assert_eq!(
            counter,
            Counter {
                count: 3,
                label: "a b".into()
            }
        );
    }

    #[test]
    fn nested_structure_round_trip() {
        let source = service();
        let mut document = Document::new();
        document.extract(&source).unwrap();

        let text = document.to_string();
        assert_eq!(
            text,
            "# display name\n\
             name = edge proxy\n\
             level = Warn\n\
             endpoints [\n  {\n    host = a.local\n    port = 80\n  }\n  {\n    host = b.local\n    port = 8080\n  }\n]\n\
             weights {\n  a = 0.25\n}\n\
             storage {\n  dir = /var/lib/edge\n}\n\
             fallback = null\n"
        );

        let back: Document = text.parse().unwrap();
        let mut target = Service {
            fallback: Some(Endpoint::default()),
            runtime_only: 7,
            ..Service::default()
        };
        back.modify(&mut target).unwrap();
        assert_eq!(
            target,
            Service {
                runtime_only: 7,
                ..source
            }
        );
    }

    #[test]
    fn enum_and_type_path() {
        assert_eq!(Service::ty().to_string(), "Service");
        assert_eq!(Service::ty().raw().map(|raw| raw.path()), Some("demo::Service"));
        assert_eq!(Level::Warn.variant_name(), "Warn");

        let mapper = ObjectMapper::default();
        let level = mapper.context().deserialize(&Node::from("warn"), &Level::ty()).unwrap();
        assert_eq!(level.take::<Level>().ok(), Some(Level::Warn));
    }

    #[test]
    fn duplicate_path_is_rejected() {
        let mapper = ObjectMapper::default();
        let source = Counter::default();
        let mut root = mapper.extract(&source).unwrap();

        let err = mapper.extract_into(&source, &mut root).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            SerializerError::Node(NodeError::DuplicatePath { .. })
        ));
        let err = root.add("label", "again").unwrap_err();
        assert!(matches!(err, NodeError::DuplicatePath { .. }));
    }

    #[test]
    fn backup_recovery() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.conf");
        std::fs::write(&path, "x = 1\n").unwrap();

        let mut document = FileDocument::new(&path);
        assert_eq!(document.load(LoadFlags::new()).unwrap(), LoadOutcome::Loaded);

        std::fs::write(&path, "x = 2\nbroken [\n  1\n").unwrap();
        let outcome = document.load(LoadFlags::new().backup(true)).unwrap();
        assert_eq!(outcome, LoadOutcome::Recovered);
        assert_eq!(document.document().to_string(), "x = 1\n");
    }

    // -------------------------------------------------------------------------
    // Registry

    struct Marker(&'static str);

    impl TypeSerializer for Marker {
        fn serialize(&self, _: Option<&dyn Reflect>, _: &Type, _: &Context<'_>) -> Result<Node, SerializerError> {
            Ok(Node::from(self.0))
        }

        fn deserialize(&self, _: &Node, ty: &Type, _: &Context<'_>) -> Result<Box<dyn Reflect>, SerializerError> {
            ty.ops()
                .construct()
                .ok_or_else(|| SerializerError::Serializer(format!("cannot build `{ty}`").into()))
        }
    }

    #[derive(Config, Default)]
    struct Base {
        id: u32,
    }

    #[derive(Config, Default)]
    struct Derived {
        #[config(base)]
        base: Base,
        extra: u32,
    }

    fn marker_of(registry: &SerializerRegistry, ty: &Type) -> Node {
        let serializer = registry.resolve(ty).unwrap();
        let registry = Arc::new(SerializerRegistry::new());
        let mapper = ObjectMapper::new(registry);
        serializer.serialize(None, ty, &mapper.context()).unwrap()
    }

    #[test]
    fn derived_codec_wins_in_any_order() {
        for derived_first in [false, true] {
            let registry = SerializerRegistry::new();
            let entries = [
                (TypePredicate::from(Base::ty()), Marker("base")),
                (TypePredicate::from(Derived::ty()), Marker("derived")),
            ];
            let entries: Vec<_> = if derived_first {
                entries.into_iter().rev().collect()
            } else {
                entries.into_iter().collect()
            };
            for (predicate, marker) in entries {
                registry.register(predicate, marker);
            }

            assert_eq!(marker_of(&registry, &Derived::ty()), Node::from("derived"));
            assert_eq!(marker_of(&registry, &Base::ty()), Node::from("base"));
        }
    }

    #[test]
    fn child_registry_shadows_the_global_one() {
        #[derive(Config, Default, Debug, PartialEq)]
        struct Flags {
            verbose: bool,
        }

        let child = Arc::new(SerializerRegistry::global().child());
        child.register(TypePredicate::Exact(bool::ty()), Marker("custom"));

        let mut document = Document::new().with_registry(child);
        document.extract(&Flags { verbose: true }).unwrap();
        assert_eq!(document.to_string(), "verbose = custom\n");

        let mut plain = Document::new();
        plain.extract(&Flags { verbose: true }).unwrap();
        assert_eq!(plain.to_string(), "verbose = true\n");
    }
}
