//! Dependency graph cycle detection.
//!
//! The graph is a mapping from component id to the ids it depends on. Ids
//! that only appear as dependencies are sinks. Traversal is a depth-first
//! search with three-colour marking:
//!
//! - white: not visited yet (absent from `colours`)
//! - gray: on the current DFS path
//! - black: fully explored, never entered again
//!
//! Reaching a gray node is a cycle and stops the whole search. Every key is
//! tried as a start node, in sorted order, so disconnected components are
//! covered and the reported path is deterministic. O(V + E).

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Colour {
    Gray,
    Black,
}

/// True if `deps` contains at least one cycle, self-loops included.
pub fn has_cycle(deps: &BTreeMap<String, Vec<String>>) -> bool {
    find_cycle(deps).is_some()
}

/// Return one cycle as a closed path (`["A", "B", "A"]`), if any.
pub fn find_cycle(deps: &BTreeMap<String, Vec<String>>) -> Option<Vec<String>> {
    let mut colours: BTreeMap<&str, Colour> = BTreeMap::new();
    let mut path: Vec<&str> = Vec::new();

    for start in deps.keys() {
        if colours.contains_key(start.as_str()) {
            continue;
        }
        if let Some(cycle) = visit(start, deps, &mut colours, &mut path) {
            return Some(cycle);
        }
    }
    None
}

fn visit<'a>(
    node: &'a str,
    deps: &'a BTreeMap<String, Vec<String>>,
    colours: &mut BTreeMap<&'a str, Colour>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    match colours.get(node) {
        Some(Colour::Gray) => {
            let start = path.iter().position(|n| *n == node).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
            cycle.push(node.to_string());
            return Some(cycle);
        }
        Some(Colour::Black) => return None,
        None => {}
    }

    colours.insert(node, Colour::Gray);
    path.push(node);

    if let Some(next) = deps.get(node) {
        for dep in next {
            if let Some(cycle) = visit(dep, deps, colours, path) {
                return Some(cycle);
            }
        }
    }

    path.pop();
    colours.insert(node, Colour::Black);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        edges
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    #[test]
    fn empty_graph_has_no_cycle() {
        assert!(!has_cycle(&BTreeMap::new()));
    }

    #[test]
    fn chain_is_acyclic() {
        let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
        assert!(!has_cycle(&g));
    }

    #[test]
    fn diamond_is_acyclic() {
        let g = graph(&[("A", &["B", "C"]), ("B", &["D"]), ("C", &["D"]), ("D", &[])]);
        assert!(!has_cycle(&g));
    }

    #[test]
    fn missing_keys_are_sinks() {
        let g = graph(&[("A", &["B"]), ("B", &["external"])]);
        assert!(!has_cycle(&g));
    }

    #[test]
    fn three_node_cycle() {
        let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &["A"])]);
        assert!(has_cycle(&g));
        assert_eq!(find_cycle(&g).unwrap(), ["A", "B", "C", "A"]);
    }

    #[test]
    fn self_loop() {
        let g = graph(&[("A", &["A"])]);
        assert_eq!(find_cycle(&g).unwrap(), ["A", "A"]);
    }

    #[test]
    fn cycle_in_disconnected_part_is_found() {
        let g = graph(&[
            ("A", &["B"]),
            ("B", &[]),
            ("X", &["Y"]),
            ("Y", &["Z"]),
            ("Z", &["Y"]),
        ]);
        let cycle = find_cycle(&g).unwrap();
        assert_eq!(cycle, ["Y", "Z", "Y"]);
    }

    #[test]
    fn cycle_reached_through_a_tail() {
        let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &["B"])]);
        let cycle = find_cycle(&g).unwrap();
        assert_eq!(cycle.first(), cycle.last());
        assert_eq!(cycle, ["B", "C", "B"]);
    }
}
