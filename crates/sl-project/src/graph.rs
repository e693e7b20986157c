//! DAG ordering over the project's nodes and links.

use crate::error::ProjectError;
use crate::schema::{LinkDef, NodeDef};
use std::collections::{HashMap, HashSet, VecDeque};

/// Map from a node id to the ids of its upstream neighbours (one entry per
/// incoming link, in link declaration order).
pub fn incoming_map<'a>(links: &'a [LinkDef]) -> HashMap<&'a str, Vec<&'a str>> {
    let mut incoming: HashMap<&str, Vec<&str>> = HashMap::new();
    for link in links {
        incoming.entry(link.to.as_str()).or_default().push(link.from.as_str());
    }
    incoming
}

/// Topological order of the node ids by Kahn's algorithm.
///
/// Deterministic: ties resolve in node declaration order. Fails on duplicate
/// node ids, links to unknown nodes, and cycles.
pub fn topological_sort(
    nodes: &[NodeDef],
    links: &[LinkDef],
) -> Result<Vec<String>, ProjectError> {
    let mut in_degree: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        if in_degree.insert(node.id.as_str(), 0).is_some() {
            return Err(ProjectError::DuplicateNodeId {
                id: node.id.clone(),
            });
        }
    }

    let mut downstream: HashMap<&str, Vec<&str>> = HashMap::new();
    for link in links {
        for endpoint in [link.from.as_str(), link.to.as_str()] {
            if !in_degree.contains_key(endpoint) {
                return Err(ProjectError::UnresolvedEndpoint {
                    link_id: link.id.clone(),
                    node_id: endpoint.to_string(),
                });
            }
        }
        downstream
            .entry(link.from.as_str())
            .or_default()
            .push(link.to.as_str());
        *in_degree.get_mut(link.to.as_str()).expect("endpoint checked") += 1;
    }

    let mut queue: VecDeque<&str> = nodes
        .iter()
        .map(|n| n.id.as_str())
        .filter(|id| in_degree[id] == 0)
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some(id) = queue.pop_front() {
        order.push(id.to_string());
        if let Some(next) = downstream.get(id) {
            for &succ in next {
                let degree = in_degree.get_mut(succ).expect("endpoint checked");
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(succ);
                }
            }
        }
    }

    if order.len() != nodes.len() {
        let emitted: HashSet<&str> = order.iter().map(String::as_str).collect();
        let stuck = nodes
            .iter()
            .map(|n| n.id.clone())
            .filter(|id| !emitted.contains(id.as_str()))
            .collect();
        return Err(ProjectError::Cycle { nodes: stuck });
    }
    Ok(order)
}
