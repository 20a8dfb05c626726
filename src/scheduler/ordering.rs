//! Prerequisite ordering.
//!
//! # Algorithm
//! Depth-first topological sort. Tasks are first stable-sorted by priority
//! (descending) so that, among independent tasks, higher priority is
//! ordered first. A prerequisite that is still on the DFS stack closes a
//! cycle: the edge is skipped and reported, so a cyclic graph still yields
//! an order covering every task.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::HashMap;

use crate::models::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// A prerequisite edge skipped because it closes a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEdge {
    /// Task whose prerequisite was skipped.
    pub task_id: String,
    /// The prerequisite still being ordered.
    pub prerequisite_id: String,
}

/// Result of ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskOrder {
    /// Task indices, prerequisites first.
    pub order: Vec<usize>,
    /// Edges dropped to break cycles.
    pub cycles: Vec<CycleEdge>,
}

/// Orders tasks so that prerequisites come first.
///
/// Unknown prerequisite IDs are ignored.
pub fn topological_order(tasks: &[Task]) -> TaskOrder {
    let index: HashMap<&str, usize> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.as_str(), i))
        .collect();

    let mut roots: Vec<usize> = (0..tasks.len()).collect();
    roots.sort_by(|&a, &b| tasks[b].priority.cmp(&tasks[a].priority));

    let mut marks = vec![Mark::Unvisited; tasks.len()];
    let mut result = TaskOrder::default();

    for &root in &roots {
        if marks[root] == Mark::Unvisited {
            visit(root, tasks, &index, &mut marks, &mut result);
        }
    }

    result
}

/// Iterative DFS from `root`; the stack holds (task, next prerequisite index).
fn visit(
    root: usize,
    tasks: &[Task],
    index: &HashMap<&str, usize>,
    marks: &mut [Mark],
    result: &mut TaskOrder,
) {
    marks[root] = Mark::Visiting;
    let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

    while let Some(top) = stack.last_mut() {
        let (node, cursor) = *top;
        let Some(pre) = tasks[node].prerequisites.get(cursor) else {
            stack.pop();
            marks[node] = Mark::Done;
            result.order.push(node);
            continue;
        };
        top.1 += 1;

        let Some(&next) = index.get(pre.as_str()) else {
            continue;
        };
        match marks[next] {
            Mark::Unvisited => {
                marks[next] = Mark::Visiting;
                stack.push((next, 0));
            }
            Mark::Visiting => result.cycles.push(CycleEdge {
                task_id: tasks[node].id.clone(),
                prerequisite_id: pre.clone(),
            }),
            Mark::Done => {}
        }
    }
}
