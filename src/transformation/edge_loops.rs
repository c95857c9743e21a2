//! Sorting of directed edges into closed loops.

use crate::utils::hashmap::HashMap;
use smallvec::SmallVec;

/// Directed edges sorted into closed loops.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeLoops {
    /// The closed loops, each given as the ordered list of the indices of its edges.
    ///
    /// The edge `loops[i][j]` ends where the edge `loops[i][(j + 1) % len]` starts.
    pub loops: Vec<Vec<u32>>,
    /// The number of chains that could not be closed into a loop.
    pub open_chains: usize,
}

impl EdgeLoops {
    /// The edge indices of every loop, concatenated in loop order.
    pub fn flattened(&self) -> Vec<u32> {
        self.loops.iter().flatten().copied().collect()
    }
}

/// Sorts a set of directed edges `[start, end]` into closed loops.
///
/// An edge continues a loop if its start point is the end point of the previous edge. A loop
/// is closed when the traversal comes back to its first point. Chains that never come back
/// to their first point are dropped and counted in [`EdgeLoops::open_chains`].
pub fn extract_edge_loops(edges: &[[u32; 2]]) -> EdgeLoops {
    let mut outgoing: HashMap<u32, SmallVec<[u32; 2]>> = HashMap::default();
    for (eid, edge) in edges.iter().enumerate() {
        outgoing.entry(edge[0]).or_default().push(eid as u32);
    }

    let mut visited = vec![false; edges.len()];
    let mut result = EdgeLoops::default();

    for first in 0..edges.len() {
        if visited[first] {
            continue;
        }

        visited[first] = true;
        let start = edges[first][0];
        let mut chain = vec![first as u32];
        let mut end = edges[first][1];

        let closed = loop {
            if end == start {
                break true;
            }

            let next = outgoing
                .get(&end)
                .and_then(|candidates| candidates.iter().find(|e| !visited[**e as usize]));

            match next {
                Some(&next) => {
                    visited[next as usize] = true;
                    chain.push(next);
                    end = edges[next as usize][1];
                }
                None => break false,
            }
        };

        if closed {
            result.loops.push(chain);
        } else {
            log::debug!(
                "Dropping an open chain of {} edges starting at point {}.",
                chain.len(),
                start
            );
            result.open_chains += 1;
        }
    }

    result
}
