// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Interface description resolution.
//!
//! Parses a WIT document once and turns every callable function into a
//! [`FunctionSignature`] made of [`TypeDescriptor`]s. The orchestrator consults
//! the resulting [`SchemaTable`] instead of inspecting bindings on each call.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use wit_parser::{
    Function, FunctionKind, InterfaceId, Resolve, Type, TypeDefKind, TypeId, WorldItem, WorldKey,
};

use crate::errors::{ObjectKind, WritError, WritResult};
use crate::schema::descriptor::{FunctionSignature, RecordType, ScalarType, TypeDescriptor};

/// Functions reachable through one world or interface.
#[derive(Debug, Clone, Default)]
pub struct InterfaceSchema {
    pub name: String,
    functions: BTreeMap<String, FunctionSignature>,
    /// Functions whose signature uses a type the marshaler cannot handle,
    /// mapped to that type's description.
    unsupported: BTreeMap<String, String>,
}

impl InterfaceSchema {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Look up a function by name, accepting `snake_case` for `kebab-case`.
    pub fn function(&self, name: &str) -> WritResult<&FunctionSignature> {
        if let Some(key) = find_key(self.functions.keys(), name) {
            return Ok(&self.functions[key]);
        }
        if let Some(key) = find_key(self.unsupported.keys(), name) {
            return Err(WritError::TypeNotImplemented(format!(
                "function '{}' uses {}",
                key, self.unsupported[key]
            )));
        }
        tracing::debug!(
            "Functions available in '{}': {:?}",
            self.name,
            self.functions.keys().collect::<Vec<_>>()
        );
        Err(WritError::ObjectNotFound {
            kind: ObjectKind::Function,
            name: name.to_string(),
        })
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    fn insert(&mut self, name: &str, signature: Result<FunctionSignature, String>) {
        match signature {
            Ok(signature) => {
                self.functions.insert(name.to_string(), signature);
            }
            Err(reason) => {
                self.unsupported.insert(name.to_string(), reason);
            }
        }
    }
}

/// Every world and interface of a parsed interface description, by name.
#[derive(Debug, Clone, Default)]
pub struct SchemaTable {
    interfaces: BTreeMap<String, InterfaceSchema>,
}

impl SchemaTable {
    /// Read and parse the interface description at `path`.
    pub fn load(path: &Path) -> WritResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| WritError::InterfaceParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(path, &source)
    }

    /// Parse interface description text. `path` is used for diagnostics only.
    pub fn parse(path: &Path, source: &str) -> WritResult<Self> {
        let mut resolve = Resolve::default();
        let package_id =
            resolve
                .push_str(path, source)
                .map_err(|e| WritError::InterfaceParse {
                    path: path.to_path_buf(),
                    reason: format!("{e:#}"),
                })?;

        let mut types = TypeResolver::new(&resolve);
        let mut interfaces = BTreeMap::new();
        let package = &resolve.packages[package_id];

        for (name, id) in &package.interfaces {
            let qualified = resolve.id_of(*id).unwrap_or_else(|| name.clone());
            let schema = types.interface(name, &qualified, *id);
            interfaces.insert(name.clone(), schema);
        }

        for (name, world_id) in &package.worlds {
            let world = &resolve.worlds[*world_id];
            let mut schema = InterfaceSchema::new(name);
            for (key, item) in &world.exports {
                match item {
                    WorldItem::Function(func) if is_callable(func) => {
                        let signature = types.signature(func, vec![func.name.clone()]);
                        schema.insert(&func.name, signature);
                    }
                    // Inline `export name: interface { .. }` items are only
                    // reachable through the world that declares them.
                    WorldItem::Interface { id, .. } => {
                        if let WorldKey::Name(export_name) = key {
                            let inline = types.interface(export_name, export_name, *id);
                            interfaces.entry(export_name.clone()).or_insert(inline);
                        }
                    }
                    _ => {}
                }
            }
            interfaces.insert(name.clone(), schema);
        }

        Ok(Self { interfaces })
    }

    /// Look up a world or interface by name, accepting `snake_case` for `kebab-case`.
    pub fn interface(&self, name: &str) -> WritResult<&InterfaceSchema> {
        find_key(self.interfaces.keys(), name)
            .map(|key| &self.interfaces[key])
            .ok_or_else(|| WritError::ObjectNotFound {
                kind: ObjectKind::Interface,
                name: name.to_string(),
            })
    }

    pub fn interface_names(&self) -> impl Iterator<Item = &str> {
        self.interfaces.keys().map(String::as_str)
    }
}

fn is_callable(func: &Function) -> bool {
    matches!(func.kind, FunctionKind::Freestanding)
}

fn find_key<'a>(mut keys: impl Iterator<Item = &'a String>, wanted: &str) -> Option<&'a String> {
    let normalized = wanted.replace('_', "-");
    keys.find(|key| key.as_str() == wanted || key.replace('_', "-") == normalized)
}

/// Converts WIT types into descriptors, sharing one `RecordType` per definition.
struct TypeResolver<'a> {
    resolve: &'a Resolve,
    records: HashMap<TypeId, Arc<RecordType>>,
}

impl<'a> TypeResolver<'a> {
    fn new(resolve: &'a Resolve) -> Self {
        Self {
            resolve,
            records: HashMap::new(),
        }
    }

    fn interface(&mut self, name: &str, export_name: &str, id: InterfaceId) -> InterfaceSchema {
        let mut schema = InterfaceSchema::new(name);
        let interface = &self.resolve.interfaces[id];
        for (func_name, func) in &interface.functions {
            if !is_callable(func) {
                continue;
            }
            let path = vec![export_name.to_string(), func_name.clone()];
            let signature = self.signature(func, path);
            schema.insert(func_name, signature);
        }
        schema
    }

    fn signature(
        &mut self,
        func: &Function,
        export_path: Vec<String>,
    ) -> Result<FunctionSignature, String> {
        let mut params = Vec::with_capacity(func.params.len());
        for (name, ty) in &func.params {
            params.push((name.clone(), self.descriptor(ty)?));
        }
        let result = match &func.result {
            Some(ty) => Some(self.descriptor(ty)?),
            None => None,
        };
        Ok(FunctionSignature {
            name: func.name.clone(),
            export_path,
            params,
            result,
        })
    }

    fn descriptor(&mut self, ty: &Type) -> Result<TypeDescriptor, String> {
        let scalar = match ty {
            Type::Bool => ScalarType::Bool,
            Type::S8 => ScalarType::S8,
            Type::S16 => ScalarType::S16,
            Type::S32 => ScalarType::S32,
            Type::S64 => ScalarType::S64,
            Type::U8 => ScalarType::U8,
            Type::U16 => ScalarType::U16,
            Type::U32 => ScalarType::U32,
            Type::U64 => ScalarType::U64,
            Type::F32 => ScalarType::F32,
            Type::F64 => ScalarType::F64,
            Type::Char => ScalarType::Char,
            Type::String => ScalarType::String,
            Type::Id(id) => return self.defined(*id),
            other => return Err(format!("{other:?}")),
        };
        Ok(TypeDescriptor::Atomic(scalar))
    }

    fn defined(&mut self, id: TypeId) -> Result<TypeDescriptor, String> {
        if let Some(record) = self.records.get(&id) {
            return Ok(TypeDescriptor::Record(Arc::clone(record)));
        }
        let def = &self.resolve.types[id];
        match &def.kind {
            TypeDefKind::Type(inner) => self.descriptor(inner),
            TypeDefKind::List(Type::U8) => Ok(TypeDescriptor::Bytes),
            TypeDefKind::List(element) => Ok(TypeDescriptor::list(self.descriptor(element)?)),
            TypeDefKind::Record(record) => {
                let mut fields = Vec::with_capacity(record.fields.len());
                for field in &record.fields {
                    fields.push((field.name.clone(), self.descriptor(&field.ty)?));
                }
                let name = def.name.clone().unwrap_or_else(|| "record".to_string());
                let record = Arc::new(RecordType::new(name, fields));
                self.records.insert(id, Arc::clone(&record));
                Ok(TypeDescriptor::Record(record))
            }
            other => Err(format!(
                "{} {}",
                other.as_str(),
                def.name.as_deref().unwrap_or("<anonymous>")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::descriptor::AtomicKind;

    const RECORDS_WIT: &str = r#"
package writ:tests;

world records {
    record bar {
        name: string,
        age: s32,
    }

    record foo {
        id: s32,
        x: bar,
    }

    type blob = list<u8>;

    export construct-bar: func(name: string, age: s32) -> bar;
    export wrap: func(inner: foo) -> foo;
    export power-of: func(a: s32, b: s32) -> s32;
    export checksum: func(data: blob) -> u32;
    export sum: func(values: list<s64>) -> s64;
    export maybe: func(x: option<s32>) -> s32;
    export reset: func();
}
"#;

    const SHAPES_WIT: &str = r#"
package writ:tests;

interface shapes {
    record point {
        x: f64,
        y: f64,
    }

    scale: func(p: point, factor: f64) -> point;
}

world geometry {
    export shapes;
    export area: interface {
        square: func(side: f64) -> f64;
    }
}
"#;

    fn parse(source: &str) -> SchemaTable {
        SchemaTable::parse(Path::new("test.wit"), source).unwrap()
    }

    #[test]
    fn test_world_exports_are_indexed() {
        let table = parse(RECORDS_WIT);
        let world = table.interface("records").unwrap();

        let power = world.function("power-of").unwrap();
        assert_eq!(power.export_path, vec!["power-of".to_string()]);
        assert_eq!(power.params.len(), 2);
        assert_eq!(power.params[0].0, "a");
        assert_eq!(power.result, Some(TypeDescriptor::Atomic(ScalarType::S32)));

        let reset = world.function("reset").unwrap();
        assert!(reset.params.is_empty());
        assert!(reset.result.is_none());
    }

    #[test]
    fn test_record_fields_keep_declared_order() {
        let table = parse(RECORDS_WIT);
        let construct = table
            .interface("records")
            .unwrap()
            .function("construct-bar")
            .unwrap();

        let result = construct.result.as_ref().unwrap();
        let fields = result.fields().unwrap();
        assert_eq!(fields[0].0, "name");
        assert_eq!(fields[0].1, TypeDescriptor::Atomic(ScalarType::String));
        assert_eq!(fields[1].0, "age");
    }

    #[test]
    fn test_nested_records_share_definitions() {
        let table = parse(RECORDS_WIT);
        let wrap = table.interface("records").unwrap().function("wrap").unwrap();
        let (_, param) = &wrap.params[0];
        let fields = param.fields().unwrap();
        assert_eq!(fields[1].0, "x");
        match (&fields[1].1, wrap.result.as_ref().unwrap()) {
            (TypeDescriptor::Record(inner), TypeDescriptor::Record(outer)) => {
                assert_eq!(inner.name, "bar");
                assert_eq!(outer.name, "foo");
            }
            other => panic!("expected records, got {:?}", other),
        }
    }

    #[test]
    fn test_byte_lists_and_aliases() {
        let table = parse(RECORDS_WIT);
        let world = table.interface("records").unwrap();
        let checksum = world.function("checksum").unwrap();
        assert_eq!(checksum.params[0].1, TypeDescriptor::Bytes);

        let sum = world.function("sum").unwrap();
        let element = sum.params[0].1.element_type().unwrap();
        match element {
            TypeDescriptor::Atomic(scalar) => assert_eq!(scalar.kind(), AtomicKind::Int),
            other => panic!("expected atomic, got {:?}", other),
        }
    }

    #[test]
    fn test_snake_case_lookup() {
        let table = parse(RECORDS_WIT);
        let world = table.interface("records").unwrap();
        assert_eq!(world.function("power_of").unwrap().name, "power-of");
    }

    #[test]
    fn test_unsupported_types_are_reported_on_lookup() {
        let table = parse(RECORDS_WIT);
        let world = table.interface("records").unwrap();
        match world.function("maybe") {
            Err(WritError::TypeNotImplemented(msg)) => assert!(msg.contains("maybe")),
            other => panic!("expected TypeNotImplemented, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_objects() {
        let table = parse(RECORDS_WIT);
        match table.interface("nothing") {
            Err(WritError::ObjectNotFound { kind, name }) => {
                assert_eq!(kind, ObjectKind::Interface);
                assert_eq!(name, "nothing");
            }
            other => panic!("expected ObjectNotFound, got {:?}", other),
        }

        let world = table.interface("records").unwrap();
        match world.function("power-off") {
            Err(WritError::ObjectNotFound { kind, .. }) => assert_eq!(kind, ObjectKind::Function),
            other => panic!("expected ObjectNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_interface_exports_carry_qualified_paths() {
        let table = parse(SHAPES_WIT);
        let scale = table.interface("shapes").unwrap().function("scale").unwrap();
        assert_eq!(
            scale.export_path,
            vec!["writ:tests/shapes".to_string(), "scale".to_string()]
        );

        let square = table.interface("area").unwrap().function("square").unwrap();
        assert_eq!(square.export_path, vec!["area".to_string(), "square".to_string()]);

        let names: Vec<_> = table.interface_names().collect();
        assert!(names.contains(&"geometry"));
    }

    #[test]
    fn test_invalid_source() {
        let result = SchemaTable::parse(Path::new("broken.wit"), "world {");
        match result {
            Err(WritError::InterfaceParse { path, .. }) => assert_eq!(path, Path::new("broken.wit")),
            other => panic!("expected InterfaceParse, got {:?}", other),
        }
    }
}
