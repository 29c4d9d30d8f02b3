use crate::graph_exploration::domain::{ForwardGraph, PackageName, ReverseGraph};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// ReverseIndex service for who-depends-on-me queries
///
/// Pure functions over domain objects: the reverse graph is derived entirely
/// from a forward graph and queries never consult a dependency source.
pub struct ReverseIndex;

impl ReverseIndex {
    /// Derives the reverse adjacency map from a forward graph
    ///
    /// For every `package -> dep` edge, `package` is added to the dependents of
    /// `dep`. Edge targets that were never expanded (filtered, or past the depth
    /// limit) still get an entry.
    pub fn build_reverse(forward: &ForwardGraph) -> ReverseGraph {
        let mut reverse = ReverseGraph::new();
        for (package, dependencies) in forward.iter() {
            for dependency in dependencies {
                reverse.add_edge(dependency.clone(), package.clone());
            }
        }
        reverse
    }

    /// Packages that list `target` as a direct dependency, sorted ascending
    pub fn direct_dependents(target: &PackageName, reverse: &ReverseGraph) -> Vec<PackageName> {
        reverse
            .dependents_of(target)
            .map(|dependents| dependents.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every package from which `target` is reachable, sorted ascending
    ///
    /// Breadth-first closure over the reverse graph. `target` itself is never
    /// part of the result, even when it sits on a cycle.
    pub fn reverse_dependents(target: &PackageName, reverse: &ReverseGraph) -> Vec<PackageName> {
        if !reverse.contains(target) {
            return Vec::new();
        }

        let mut visited: HashSet<&PackageName> = HashSet::new();
        let mut collected: BTreeSet<&PackageName> = BTreeSet::new();
        let mut queue: VecDeque<&PackageName> = VecDeque::new();

        visited.insert(target);
        queue.push_back(target);

        while let Some(current) = queue.pop_front() {
            let Some(dependents) = reverse.dependents_of(current) else {
                continue;
            };
            for dependent in dependents {
                if visited.insert(dependent) {
                    collected.insert(dependent);
                    queue.push_back(dependent);
                }
            }
        }

        collected.into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PackageName {
        PackageName::new(s).unwrap()
    }

    fn graph(rows: &[(&str, &[&str])]) -> ForwardGraph {
        let mut forward = ForwardGraph::new();
        for (package, deps) in rows {
            forward.insert(name(package), deps.iter().map(|d| name(d)).collect());
        }
        forward
    }

    fn names(list: &[PackageName]) -> Vec<&str> {
        list.iter().map(|p| p.as_str()).collect()
    }

    #[test]
    fn test_build_reverse_is_exact_converse() {
        let forward = graph(&[("A", &["B", "C"]), ("B", &["C"]), ("C", &[])]);
        let reverse = ReverseIndex::build_reverse(&forward);

        // Every forward edge has its converse
        for (package, deps) in forward.iter() {
            for dep in deps {
                assert!(reverse.dependents_of(dep).unwrap().contains(package));
            }
        }
        // And nothing else exists
        let reverse_edges: usize = reverse.iter().map(|(_, s)| s.len()).sum();
        assert_eq!(reverse_edges, forward.edge_count());
        assert!(!reverse.contains(&name("A")));
    }

    #[test]
    fn test_build_reverse_includes_unexpanded_targets() {
        let forward = graph(&[("D", &["G"])]);
        let reverse = ReverseIndex::build_reverse(&forward);

        assert_eq!(
            ReverseIndex::direct_dependents(&name("G"), &reverse),
            vec![name("D")]
        );
    }

    #[test]
    fn test_reverse_dependents_transitive_closure() {
        let forward = graph(&[
            ("D", &["G"]),
            ("E", &["G", "H"]),
            ("F", &["H"]),
            ("G", &["I"]),
            ("H", &["I"]),
        ]);
        let reverse = ReverseIndex::build_reverse(&forward);

        let result = ReverseIndex::reverse_dependents(&name("I"), &reverse);
        assert_eq!(names(&result), vec!["D", "E", "F", "G", "H"]);
    }

    #[test]
    fn test_direct_dependents_only_first_level() {
        let forward = graph(&[
            ("D", &["G"]),
            ("E", &["G", "H"]),
            ("F", &["H"]),
            ("G", &["I"]),
            ("H", &["I"]),
        ]);
        let reverse = ReverseIndex::build_reverse(&forward);

        let result = ReverseIndex::direct_dependents(&name("I"), &reverse);
        assert_eq!(names(&result), vec!["G", "H"]);
    }

    #[test]
    fn test_reverse_dependents_unknown_target_is_empty() {
        let forward = graph(&[("A", &["B"])]);
        let reverse = ReverseIndex::build_reverse(&forward);

        assert!(ReverseIndex::reverse_dependents(&name("A"), &reverse).is_empty());
        assert!(ReverseIndex::reverse_dependents(&name("Z"), &reverse).is_empty());
        assert!(ReverseIndex::direct_dependents(&name("Z"), &reverse).is_empty());
    }

    #[test]
    fn test_reverse_dependents_terminates_on_cycle_and_excludes_target() {
        let forward = graph(&[("J", &["K", "L"]), ("K", &["J"]), ("L", &["M"]), ("M", &[])]);
        let reverse = ReverseIndex::build_reverse(&forward);

        assert_eq!(
            names(&ReverseIndex::reverse_dependents(&name("K"), &reverse)),
            vec!["J"]
        );
        assert_eq!(
            names(&ReverseIndex::reverse_dependents(&name("J"), &reverse)),
            vec!["K"]
        );
        assert_eq!(
            names(&ReverseIndex::reverse_dependents(&name("M"), &reverse)),
            vec!["J", "K", "L"]
        );
    }

    #[test]
    fn test_reverse_dependents_sorted_without_duplicates() {
        let forward = graph(&[
            ("z", &["a", "b"]),
            ("y", &["a"]),
            ("a", &["t"]),
            ("b", &["t"]),
        ]);
        let reverse = ReverseIndex::build_reverse(&forward);

        let result = ReverseIndex::reverse_dependents(&name("t"), &reverse);
        assert_eq!(names(&result), vec!["a", "b", "y", "z"]);
    }
}
