//! Topological sorting and cycle detection.
//!
//! A depth-first postorder sort over an abstract dependency relation: every
//! item is emitted after all of the items it depends on. Callers that want
//! "dependency last" order reverse the result.

use std::collections::HashSet;
use std::hash::Hash;

/// Error returned when the dependency relation contains a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError<T> {
    /// Items along the detected cycle, in visiting order, with the item that
    /// closed the cycle repeated at the end.
    pub involved: Vec<T>,
}

/// Sort `items` so that every item follows its dependencies.
///
/// `dependencies` is queried once per reachable item. Items reached only
/// through the relation are included in the output as well. When
/// `ignore_cycles` is set, back edges are skipped instead of reported and the
/// result is a best-effort order.
pub fn topological_sort<T, F, I>(
    items: &[T],
    mut dependencies: F,
    ignore_cycles: bool,
) -> Result<Vec<T>, CycleError<T>>
where
    T: Copy + Eq + Hash,
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    let mut sorter = Sorter {
        visited: HashSet::new(),
        finished: HashSet::new(),
        path: Vec::new(),
        sorted: Vec::with_capacity(items.len()),
        ignore_cycles,
    };

    for item in items {
        sorter.visit(*item, &mut dependencies)?;
    }

    Ok(sorter.sorted)
}

struct Sorter<T> {
    visited: HashSet<T>,
    finished: HashSet<T>,
    path: Vec<T>,
    sorted: Vec<T>,
    ignore_cycles: bool,
}

impl<T: Copy + Eq + Hash> Sorter<T> {
    fn visit<F, I>(&mut self, item: T, dependencies: &mut F) -> Result<(), CycleError<T>>
    where
        F: FnMut(&T) -> I,
        I: IntoIterator<Item = T>,
    {
        if self.visited.insert(item) {
            self.path.push(item);
            let next: Vec<T> = dependencies(&item).into_iter().collect();
            for dependency in next {
                self.visit(dependency, dependencies)?;
            }
            self.path.pop();
            self.finished.insert(item);
            self.sorted.push(item);
        } else if !self.ignore_cycles && !self.finished.contains(&item) {
            // Visited but unfinished: `item` is on the current path.
            let start = self.path.iter().position(|p| *p == item).unwrap_or(0);
            let mut involved = self.path[start..].to_vec();
            involved.push(item);
            return Err(CycleError { involved });
        }
        Ok(())
    }
}
