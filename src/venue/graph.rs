use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::types::identifiers::TheaterId;

/// Undirected, unweighted adjacency between theaters.
///
/// Neighbor lists keep insertion order, which fixes the BFS tie-break:
/// among equally short paths the one reached through earlier-listed
/// neighbors wins.
#[derive(Debug, Clone, Default)]
pub struct VenueGraph {
    adjacency: BTreeMap<TheaterId, Vec<TheaterId>>,
}

impl VenueGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a theater with no links. Re-adding is a no-op.
    pub fn add_theater(&mut self, id: TheaterId) {
        self.adjacency.entry(id).or_default();
    }

    /// Link two theaters in both directions. Repeated links are ignored.
    pub fn connect(&mut self, a: &TheaterId, b: &TheaterId) {
        push_unique(self.adjacency.entry(a.clone()).or_default(), b);
        push_unique(self.adjacency.entry(b.clone()).or_default(), a);
    }

    pub fn contains(&self, id: &TheaterId) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Neighbors in link order, or `None` for an unknown theater.
    pub fn neighbors(&self, id: &TheaterId) -> Option<&[TheaterId]> {
        self.adjacency.get(id).map(Vec::as_slice)
    }

    /// Fewest-hop route from `from` to `to`, both ends included.
    ///
    /// `None` when either end is unknown or the two are disconnected.
    pub fn shortest_path(&self, from: &TheaterId, to: &TheaterId) -> Option<Vec<TheaterId>> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        if from == to {
            return Some(vec![from.clone()]);
        }

        // Parent links instead of whole paths on the frontier.
        let mut parent: BTreeMap<&TheaterId, &TheaterId> = BTreeMap::new();
        let mut visited: HashSet<&TheaterId> = HashSet::from([from]);
        let mut frontier: VecDeque<&TheaterId> = VecDeque::from([from]);

        while let Some(node) = frontier.pop_front() {
            if node == to {
                return Some(unwind(&parent, from, to));
            }
            for next in self.adjacency.get(node).into_iter().flatten() {
                if visited.insert(next) {
                    parent.insert(next, node);
                    frontier.push_back(next);
                }
            }
        }

        None
    }
}

fn push_unique(list: &mut Vec<TheaterId>, id: &TheaterId) {
    if !list.contains(id) {
        list.push(id.clone());
    }
}

fn unwind(
    parent: &BTreeMap<&TheaterId, &TheaterId>,
    from: &TheaterId,
    to: &TheaterId,
) -> Vec<TheaterId> {
    let mut path = vec![to.clone()];
    let mut cursor = to;
    while cursor != from {
        match parent.get(cursor) {
            Some(prev) => {
                path.push((*prev).clone());
                cursor = *prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
