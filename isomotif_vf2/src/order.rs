//! Static vertex ordering used to seed new components of the mapping.

use std::cmp::Reverse;

use isomotif_common::{Graph, Vertex};

/// Order the vertices of `graph` breadth first, one component at a time.
///
/// Components are started from their highest degree vertex. Within a BFS
/// level, the vertex with the most links to already ordered vertices goes
/// first, then the one with the highest degree, then the lowest index.
pub(crate) fn degree_order<G: Graph>(graph: &G) -> Vec<Vertex> {
    let n = graph.order();
    let degree: Vec<usize> = (0..n).map(|v| graph.degree(v)).collect();
    let mut conn: Vec<usize> = vec![0; n];
    let mut seen: Vec<bool> = vec![false; n];
    let mut order: Vec<Vertex> = Vec::with_capacity(n);

    let mut roots: Vec<Vertex> = (0..n).collect();
    roots.sort_by_key(|&v| (Reverse(degree[v]), v));

    for root in roots {
        if seen[root] {
            continue;
        }
        seen[root] = true;
        let mut level = vec![root];
        while !level.is_empty() {
            // repeatedly bring the best remaining vertex to the front.
            for i in 0..level.len() {
                let Some((offset, _)) = level[i..]
                    .iter()
                    .enumerate()
                    .max_by_key(|&(_, &v)| (conn[v], degree[v], Reverse(v)))
                else {
                    break;
                };
                level.swap(i, i + offset);
                let v = level[i];
                order.push(v);
                for w in graph.neighbors(v) {
                    conn[w] += 1;
                }
            }

            let mut next = Vec::new();
            for &v in &level {
                for w in graph.neighbors(v) {
                    if !seen[w] {
                        seen[w] = true;
                        next.push(w);
                    }
                }
            }
            level = next;
        }
    }
    order
}
