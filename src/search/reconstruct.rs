use super::Predecessors;
use crate::cell::Cell;
use crate::error::{GridError, Result};
use crate::grid::Grid;
use grid_util::point::Point;
use log::warn;
use std::ops::ControlFlow;

/// Walks the predecessor chain from `end` back to `start` and returns the path from the step after
/// `start` up to and including `end`.
///
/// Cells strictly between the endpoints are marked [Path](crate::Role::Path) (if `mark_roles` is
/// set) starting next to the end, and `on_step` is invoked once per cell. Returns
/// [ControlFlow::Break] if the callback asks to stop.
pub(crate) fn reconstruct<F>(
    predecessors: &Predecessors,
    start: Point,
    end: Point,
    grid: &mut Grid,
    mark_roles: bool,
    on_step: &mut F,
) -> Result<ControlFlow<(), Vec<Point>>>
where
    F: FnMut(&Grid) -> ControlFlow<()>,
{
    let mut path = vec![end];
    let mut current = end;
    let mut steps = 0;
    while let Some(&previous) = predecessors.get(&current) {
        steps += 1;
        if steps > predecessors.len() || !grid.contains(previous) {
            warn!("Predecessor chain from {:?} loops or leaves the grid", end);
            return Err(GridError::BrokenChain { at: previous });
        }
        current = previous;
        if current == start {
            continue;
        }
        path.push(current);
        if mark_roles {
            grid.update(current, Cell::mark_path)?;
        }
        if on_step(&*grid).is_break() {
            return Ok(ControlFlow::Break(()));
        }
    }
    if current != start {
        warn!("Predecessor chain from {:?} ends at {:?}", end, current);
        return Err(GridError::BrokenChain { at: current });
    }
    path.reverse();
    Ok(ControlFlow::Continue(path))
}
