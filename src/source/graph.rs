//! Name index and supertype hierarchies of a source model
//!
//! Supertype relations are kept in a directed graph (subtype -> supertype).
//! Cycles are rejected when the graph is built, so every walk terminates and
//! every type has at least one topmost ancestor.

use super::{Datatype, ObjectType, SourceModel};
use crate::mapping::{MappingError, MappingResult};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, warn};

/// Directed supertype hierarchy keyed by type name
#[derive(Debug, Default)]
pub struct SupertypeGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl SupertypeGraph {
    /// Build a hierarchy from `(type name, direct supertype names)` pairs
    ///
    /// Supertype names that are never declared themselves become leaf nodes.
    pub fn new<'a, I>(declarations: I) -> MappingResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let mut hierarchy = Self::default();

        for (name, supertypes) in declarations {
            let sub = hierarchy.node(name);
            for supertype in supertypes {
                let sup = hierarchy.node(supertype);
                hierarchy.graph.add_edge(sub, sup, ());
            }
        }

        petgraph::algo::toposort(&hierarchy.graph, None).map_err(|cycle| {
            MappingError::SupertypeCycle {
                type_name: hierarchy.graph[cycle.node_id()].clone(),
            }
        })?;

        Ok(hierarchy)
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_map.insert(name.to_string(), idx);
        idx
    }

    /// Direct supertypes in declaration order
    fn direct(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        // petgraph yields the most recently added edge first
        let mut supertypes: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        supertypes.reverse();
        supertypes
    }

    /// Supertype names of `name`, nearest first
    ///
    /// With `transitive` the whole ancestry is walked breadth-first; each
    /// ancestor is reported once.
    pub fn supertypes(&self, name: &str, transitive: bool) -> Vec<&str> {
        let Some(&start) = self.node_map.get(name) else {
            return Vec::new();
        };

        if !transitive {
            return self
                .direct(start)
                .into_iter()
                .map(|idx| self.graph[idx].as_str())
                .collect();
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        let mut ancestors = Vec::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            for supertype in self.direct(node) {
                if visited.insert(supertype) {
                    ancestors.push(self.graph[supertype].as_str());
                    queue.push_back(supertype);
                }
            }
        }

        ancestors
    }

    pub fn has_supertypes(&self, name: &str) -> bool {
        self.node_map.get(name).is_some_and(|&idx| {
            self.graph
                .neighbors_directed(idx, Direction::Outgoing)
                .next()
                .is_some()
        })
    }

    /// Whether `name` transitively derives from `ancestor`
    pub fn is_subtype_of(&self, name: &str, ancestor: &str) -> bool {
        self.supertypes(name, true).contains(&ancestor)
    }

    /// Canonical base name: the first ancestor without supertypes of its own
    ///
    /// A type without supertypes is its own base.
    pub fn root<'s>(&'s self, name: &'s str) -> &'s str {
        self.supertypes(name, true)
            .into_iter()
            .find(|supertype| !self.has_supertypes(supertype))
            .unwrap_or(name)
    }
}

/// Lookup tables over a source model
///
/// Built once per mapping pass. Names are expected to be unique per kind;
/// when a name is declared twice the first declaration wins.
#[derive(Debug)]
pub struct SourceIndex<'a> {
    datatypes: HashMap<&'a str, &'a Datatype>,
    object_types: HashMap<&'a str, &'a ObjectType>,
    datatype_hierarchy: SupertypeGraph,
    object_type_hierarchy: SupertypeGraph,
}

impl<'a> SourceIndex<'a> {
    pub fn new(model: &'a SourceModel) -> MappingResult<Self> {
        let mut datatypes: HashMap<&'a str, &'a Datatype> = HashMap::new();
        let mut datatype_order = Vec::new();
        for datatype in model.datatypes() {
            if datatypes.contains_key(datatype.name()) {
                warn!("Datatype '{}' is declared more than once, keeping the first", datatype.name());
                continue;
            }
            datatypes.insert(datatype.name(), datatype);
            datatype_order.push(datatype);
        }

        let mut object_types: HashMap<&'a str, &'a ObjectType> = HashMap::new();
        let mut object_type_order = Vec::new();
        for object_type in model.object_types() {
            if object_types.contains_key(object_type.name.as_str()) {
                warn!("Object type '{}' is declared more than once, keeping the first", object_type.name);
                continue;
            }
            object_types.insert(object_type.name.as_str(), object_type);
            object_type_order.push(object_type);
        }

        let datatype_hierarchy = SupertypeGraph::new(
            datatype_order
                .iter()
                .map(|dt| (dt.name(), dt.supertypes())),
        )?;
        let object_type_hierarchy = SupertypeGraph::new(
            object_type_order
                .iter()
                .map(|ot| (ot.name.as_str(), ot.supertypes.as_slice())),
        )?;

        debug!(
            "Indexed {} datatypes and {} object types of model '{}'",
            datatypes.len(),
            object_types.len(),
            model.name
        );

        Ok(Self {
            datatypes,
            object_types,
            datatype_hierarchy,
            object_type_hierarchy,
        })
    }

    /// Declared datatype by name; `None` for implicit primitives
    pub fn datatype(&self, name: &str) -> Option<&'a Datatype> {
        self.datatypes.get(name).copied()
    }

    pub fn object_type(&self, name: &str) -> Option<&'a ObjectType> {
        self.object_types.get(name).copied()
    }

    pub fn datatype_hierarchy(&self) -> &SupertypeGraph {
        &self.datatype_hierarchy
    }

    pub fn object_type_hierarchy(&self) -> &SupertypeGraph {
        &self.object_type_hierarchy
    }

    /// The object type followed by its supertypes, nearest first
    ///
    /// Without `include_inherited` only the object type itself is returned.
    /// Supertype names that do not resolve to an object type are skipped.
    pub fn lineage(&self, object_type: &'a ObjectType, include_inherited: bool) -> Vec<&'a ObjectType> {
        let mut lineage = vec![object_type];
        if !include_inherited {
            return lineage;
        }

        for name in self
            .object_type_hierarchy
            .supertypes(&object_type.name, true)
        {
            match self.object_type(name) {
                Some(supertype) => lineage.push(supertype),
                None => warn!(
                    "Supertype '{}' of object type '{}' is not declared",
                    name, object_type.name
                ),
            }
        }

        lineage
    }
}
