use std::collections::BTreeMap;

use indexmap::IndexMap;

use super::{
    graph::SchemaGraph,
    types::{
        RawClient, RawClientParameter, RawObject, RawOperation, RawOperationGroup, RawParameter,
        RawProperty, RawResponse, RawSchema, RawSchemaKind, SchemaId,
    },
};
use crate::{
    error::GenerateError,
    parse::{ClientDef, Document, Info, RefOrSchema, Reference, SchemaDef},
};

/// An API description with every schema reference resolved.
///
/// Schemas live in an arena, indexed by [`SchemaId`]. Named schemas
/// come first, in document order, followed by inline schemas.
#[derive(Debug)]
pub struct ApiSpec<'a> {
    pub info: &'a Info,
    schemas: Vec<RawSchema<'a>>,
    named: IndexMap<&'a str, SchemaId>,
    pub clients: Vec<RawClient<'a>>,
    graph: SchemaGraph,
}

impl<'a> ApiSpec<'a> {
    /// Resolves all the references in a document.
    pub fn from_doc(doc: &'a Document) -> Result<Self, GenerateError> {
        let named: IndexMap<&'a str, SchemaId> = doc
            .schemas
            .keys()
            .enumerate()
            .map(|(index, name)| (name.as_str(), SchemaId(index)))
            .collect();

        let mut linker = Linker {
            named: &named,
            slots: BTreeMap::new(),
            next: named.len(),
        };
        for (index, (name, def)) in doc.schemas.iter().enumerate() {
            linker.link(
                SchemaId(index),
                Some(def.info().name.as_deref().unwrap_or(name.as_str())),
                format!("schemas.{name}"),
                def,
            )?;
        }
        let clients = doc
            .clients
            .iter()
            .map(|client| linker.client(client))
            .collect::<Result<Vec<_>, _>>()?;

        let schemas: Vec<_> = linker.slots.into_values().collect();
        let graph = SchemaGraph::new(&schemas)?;

        Ok(Self {
            info: &doc.info,
            schemas,
            named,
            clients,
            graph,
        })
    }

    /// Returns the schema with the given ID.
    #[inline]
    pub fn schema(&self, id: SchemaId) -> &RawSchema<'a> {
        &self.schemas[id.0]
    }

    /// Returns all schemas, ordered by ID.
    #[inline]
    pub fn schemas(&self) -> impl Iterator<Item = &RawSchema<'a>> {
        self.schemas.iter()
    }

    /// Looks up a named schema by its key in the document.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<SchemaId> {
        self.named.get(name).copied()
    }

    #[inline]
    pub fn graph(&self) -> &SchemaGraph {
        &self.graph
    }

    /// Returns the ancestors of a schema, starting with the schema itself
    /// and ending with its root.
    pub fn ancestors(&self, id: SchemaId) -> impl Iterator<Item = SchemaId> {
        // The graph rejects cyclic parents, so this always terminates.
        std::iter::successors(Some(id), |&id| self.schema(id).parent())
    }
}

struct Linker<'a, 'n> {
    named: &'n IndexMap<&'a str, SchemaId>,
    slots: BTreeMap<SchemaId, RawSchema<'a>>,
    next: usize,
}

impl<'a> Linker<'a, '_> {
    fn link(
        &mut self,
        id: SchemaId,
        name: Option<&'a str>,
        path: String,
        def: &'a SchemaDef,
    ) -> Result<(), GenerateError> {
        let kind = match def {
            SchemaDef::Primitive(primitive) => RawSchemaKind::Primitive(primitive.format),
            SchemaDef::Array(array) => RawSchemaKind::Array {
                items: self.resolve(format!("{path}.items"), &array.items)?,
                xml_wrapped: array.xml_wrapped,
            },
            SchemaDef::Dictionary(dictionary) => RawSchemaKind::Dictionary {
                values: self.resolve(format!("{path}.values"), &dictionary.values)?,
            },
            SchemaDef::Choice(choice) => RawSchemaKind::Choice(choice),
            SchemaDef::Object(object) => {
                let parent = object
                    .parent
                    .as_ref()
                    .map(|parent| self.reference(format!("{path}.parent"), parent))
                    .transpose()?;
                let properties = object
                    .properties
                    .iter()
                    .map(|property| {
                        let schema = self.resolve(
                            format!("{path}.properties.{}", property.name),
                            &property.schema,
                        )?;
                        Ok(RawProperty {
                            def: property,
                            schema,
                        })
                    })
                    .collect::<Result<_, GenerateError>>()?;
                RawSchemaKind::Object(RawObject {
                    def: object,
                    parent,
                    properties,
                })
            }
            SchemaDef::Union(def) => RawSchemaKind::Union {
                variants: def
                    .variants
                    .iter()
                    .enumerate()
                    .map(|(index, variant)| {
                        self.resolve(format!("{path}.variants[{index}]"), variant)
                    })
                    .collect::<Result<_, _>>()?,
            },
        };
        let info = def.info();
        self.slots.insert(
            id,
            RawSchema {
                id,
                path,
                name: name.or(info.name.as_deref()),
                info,
                kind,
            },
        );
        Ok(())
    }

    fn resolve(&mut self, path: String, schema: &'a RefOrSchema) -> Result<SchemaId, GenerateError> {
        match schema {
            RefOrSchema::Ref(reference) => self.reference(path, reference),
            RefOrSchema::Other(def) => {
                let id = SchemaId(self.next);
                self.next += 1;
                self.link(id, None, path, def)?;
                Ok(id)
            }
        }
    }

    fn reference(&self, path: String, reference: &Reference) -> Result<SchemaId, GenerateError> {
        self.named.get(reference.name.as_str()).copied().ok_or_else(|| {
            GenerateError::UnresolvableTypeReference {
                path,
                reference: reference.name.clone(),
            }
        })
    }

    fn client(&mut self, def: &'a ClientDef) -> Result<RawClient<'a>, GenerateError> {
        let path = format!("clients.{}", def.name);
        let parameters = def
            .parameters
            .iter()
            .map(|parameter| {
                let schema = self.resolve(
                    format!("{path}.parameters.{}", parameter.name),
                    &parameter.schema,
                )?;
                Ok(RawClientParameter {
                    def: parameter,
                    schema,
                })
            })
            .collect::<Result<_, GenerateError>>()?;

        let mut groups = Vec::with_capacity(def.operation_groups.len());
        for group in &def.operation_groups {
            let group_path = match group.name.as_str() {
                "" => path.clone(),
                name => format!("{path}.operationGroups.{name}"),
            };
            let mut operations = Vec::with_capacity(group.operations.len());
            for operation in &group.operations {
                let operation_path = format!("{group_path}.operations.{}", operation.name);
                let parameters = operation
                    .parameters
                    .iter()
                    .map(|parameter| {
                        let schema = parameter
                            .schema
                            .as_ref()
                            .map(|schema| {
                                self.resolve(
                                    format!("{operation_path}.parameters.{}", parameter.name),
                                    schema,
                                )
                            })
                            .transpose()?;
                        Ok(RawParameter {
                            def: parameter,
                            schema,
                        })
                    })
                    .collect::<Result<_, GenerateError>>()?;
                let responses = operation
                    .responses
                    .iter()
                    .enumerate()
                    .map(|(index, response)| {
                        let schema = response
                            .schema
                            .as_ref()
                            .map(|schema| {
                                self.resolve(format!("{operation_path}.responses[{index}]"), schema)
                            })
                            .transpose()?;
                        Ok(RawResponse {
                            def: response,
                            schema,
                        })
                    })
                    .collect::<Result<_, GenerateError>>()?;
                operations.push(RawOperation {
                    def: operation,
                    parameters,
                    responses,
                });
            }
            groups.push(RawOperationGroup {
                def: group,
                operations,
            });
        }

        Ok(RawClient {
            def,
            parameters,
            groups,
        })
    }
}
