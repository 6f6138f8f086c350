use petgraph::{
    Direction,
    algo::toposort,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use super::types::{RawSchema, RawSchemaKind, SchemaId};
use crate::error::GenerateError;

/// A graph of the structural dependencies between schemas.
///
/// An arc from `A` to `B` means that `B` can't be mapped until `A` is:
/// `A` is the element type of array `B`, the value type of dictionary `B`,
/// a variant of union `B`, or the parent of object `B`. Object properties
/// aren't structural, so objects can refer to each other, and to
/// themselves, through their properties.
#[derive(Debug)]
pub struct SchemaGraph {
    graph: DiGraph<SchemaId, Dependency>,
    order: Vec<SchemaId>,
}

/// How one schema depends on another.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dependency {
    Items,
    Values,
    Variant,
    Parent,
}

impl SchemaGraph {
    /// Builds the dependency graph for an arena of schemas, where each
    /// schema's ID is its index in the arena.
    ///
    /// Fails if any schema depends on itself.
    pub fn new(schemas: &[RawSchema<'_>]) -> Result<Self, GenerateError> {
        let mut graph = DiGraph::with_capacity(schemas.len(), schemas.len());
        for schema in schemas {
            graph.add_node(schema.id);
        }
        for schema in schemas {
            let dependent = NodeIndex::new(schema.id.index());
            for (dependency, kind) in dependencies(schema) {
                graph.add_edge(NodeIndex::new(dependency.index()), dependent, kind);
            }
        }

        let order = toposort(&graph, None)
            .map_err(|cycle| GenerateError::CyclicTypeReference {
                path: schemas[cycle.node_id().index()].path.clone(),
            })?
            .into_iter()
            .map(|node| graph[node])
            .collect();

        Ok(Self { graph, order })
    }

    /// Returns every schema, ordered so that each schema comes after
    /// all the schemas that it depends on.
    #[inline]
    pub fn resolution_order(&self) -> &[SchemaId] {
        &self.order
    }

    /// Returns the schemas that `id` directly depends on.
    pub fn dependencies(&self, id: SchemaId) -> impl Iterator<Item = (SchemaId, Dependency)> {
        self.graph
            .edges_directed(NodeIndex::new(id.index()), Direction::Incoming)
            .map(|edge| (self.graph[edge.source()], *edge.weight()))
    }

    /// Returns the schemas that directly depend on `id`.
    pub fn dependents(&self, id: SchemaId) -> impl Iterator<Item = (SchemaId, Dependency)> {
        self.graph
            .edges_directed(NodeIndex::new(id.index()), Direction::Outgoing)
            .map(|edge| (self.graph[edge.target()], *edge.weight()))
    }
}

fn dependencies(schema: &RawSchema<'_>) -> Vec<(SchemaId, Dependency)> {
    match &schema.kind {
        RawSchemaKind::Array { items, .. } => vec![(*items, Dependency::Items)],
        RawSchemaKind::Dictionary { values } => vec![(*values, Dependency::Values)],
        RawSchemaKind::Union { variants } => variants
            .iter()
            .map(|&variant| (variant, Dependency::Variant))
            .collect(),
        RawSchemaKind::Object(object) => object
            .parent
            .map(|parent| (parent, Dependency::Parent))
            .into_iter()
            .collect(),
        RawSchemaKind::Primitive(_) | RawSchemaKind::Choice(_) => vec![],
    }
}
