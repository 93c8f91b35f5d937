//! A* over a [Grid] with the Manhattan heuristic and unit move costs.
mod open_set;
mod reconstruct;

use crate::error::{GridError, Result};
use crate::cell::Cell;
use crate::grid::Grid;
use crate::{FxIndexMap, EDGE_COST, UNREACHED};
use fxhash::FxHashMap;
use grid_util::point::Point;
use itertools::Itertools;
use log::info;
use open_set::OpenSet;
use reconstruct::reconstruct;
use std::ops::ControlFlow;

/// Best known predecessor of every cell reached during a run, in discovery order.
pub type Predecessors = FxIndexMap<Point, Point>;

/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two cells.
/// Admissible and consistent on a 4-connected grid with unit costs.
/// Saturates at [u32::MAX] for points spanning the whole `i32` range.
pub fn heuristic(a: Point, b: Point) -> u32 {
    a.x.abs_diff(b.x).saturating_add(a.y.abs_diff(b.y))
}

/// Checks that every consecutive pair of points is orthogonally adjacent.
pub fn is_contiguous(path: &[Point]) -> bool {
    path.iter()
        .tuple_windows()
        .all(|(&a, &b)| heuristic(a, b) == 1)
}

/// Terminal state of a search run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The end was reached. Holds the path from the cell after the start up to and including the
    /// end, so its length is the number of moves.
    Succeeded(Vec<Point>),
    /// The open set ran dry: no path exists under the current obstacles.
    Exhausted,
    /// The step callback asked to stop. Roles are left as they were last marked.
    Cancelled,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            SearchOutcome::Succeeded(path) => Some(path),
            _ => None,
        }
    }
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Succeeded(_))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of cells popped from the open set and expanded.
    pub expanded: usize,
    /// Largest size the open set reached.
    pub max_open: usize,
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
    pub predecessors: Predecessors,
}

/// Runs A* searches over a [Grid].
///
/// With `mark_roles` set (the default) the engine writes [Frontier](crate::Role::Frontier),
/// [Visited](crate::Role::Visited) and [Path](crate::Role::Path) roles into the grid as it
/// goes, which is what a visualizing caller wants. Headless callers can turn it off and only
/// look at the returned path.
#[derive(Clone, Debug)]
pub struct SearchEngine {
    pub mark_roles: bool,
}

impl Default for SearchEngine {
    fn default() -> SearchEngine {
        SearchEngine { mark_roles: true }
    }
}

impl SearchEngine {
    pub fn new() -> SearchEngine {
        SearchEngine::default()
    }

    /// Searches for a shortest path from `start` to `end`. `on_step` is called after each
    /// expansion and after each path cell is marked; returning [ControlFlow::Break] from it stops
    /// the run with [SearchOutcome::Cancelled].
    ///
    /// The adjacency of `grid` is used as is, so it should be refreshed after any obstacle
    /// changes. Fails with [GridError::InvalidEndpoints] if `start == end` or either lies outside
    /// the grid.
    pub fn run<F>(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        on_step: F,
    ) -> Result<SearchOutcome>
    where
        F: FnMut(&Grid) -> ControlFlow<()>,
    {
        self.run_report(grid, start, end, on_step)
            .map(|report| report.outcome)
    }

    /// Same as [run](Self::run), but also returns the expansion statistics and the final
    /// predecessor map.
    pub fn run_report<F>(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        mut on_step: F,
    ) -> Result<RunReport>
    where
        F: FnMut(&Grid) -> ControlFlow<()>,
    {
        if start == end || !grid.contains(start) || !grid.contains(end) {
            return Err(GridError::InvalidEndpoints { start, end });
        }
        info!(
            "Searching path from {:?} to {:?} on {}x{} grid",
            start,
            end,
            grid.rows(),
            grid.rows()
        );
        let mut g_score: FxHashMap<Point, u32> = FxHashMap::default();
        let mut predecessors = Predecessors::default();
        let mut stats = SearchStats {
            expanded: 0,
            max_open: 1,
        };
        g_score.insert(start, 0);
        let mut open = OpenSet::new(start, heuristic(start, end));

        while let Some(current) = open.pop() {
            if current == end {
                let outcome = match reconstruct(
                    &predecessors,
                    start,
                    end,
                    grid,
                    self.mark_roles,
                    &mut on_step,
                )? {
                    ControlFlow::Continue(path) => {
                        if self.mark_roles {
                            // The end was marked as frontier when it was discovered.
                            grid.update(end, Cell::mark_end)?;
                        }
                        SearchOutcome::Succeeded(path)
                    }
                    ControlFlow::Break(()) => SearchOutcome::Cancelled,
                };
                return Ok(self.report(outcome, stats, predecessors));
            }
            stats.expanded += 1;

            let tentative = g_score
                .get(&current)
                .copied()
                .unwrap_or(UNREACHED)
                .saturating_add(EDGE_COST);
            for neighbour in grid.neighbours(current) {
                let known = g_score.get(&neighbour).copied().unwrap_or(UNREACHED);
                if tentative < known {
                    predecessors.insert(neighbour, current);
                    g_score.insert(neighbour, tentative);
                    if !open.contains(&neighbour) {
                        open.push(neighbour, tentative.saturating_add(heuristic(neighbour, end)));
                        if self.mark_roles {
                            grid.update(neighbour, Cell::mark_frontier)?;
                        }
                    }
                }
            }
            stats.max_open = stats.max_open.max(open.len());

            let flow = on_step(&*grid);
            if self.mark_roles && current != start {
                grid.update(current, Cell::mark_visited)?;
            }
            if flow.is_break() {
                return Ok(self.report(SearchOutcome::Cancelled, stats, predecessors));
            }
        }
        Ok(self.report(SearchOutcome::Exhausted, stats, predecessors))
    }

    fn report(
        &self,
        outcome: SearchOutcome,
        stats: SearchStats,
        predecessors: Predecessors,
    ) -> RunReport {
        match &outcome {
            SearchOutcome::Succeeded(path) => info!(
                "Found path of {} moves after {} expansions",
                path.len(),
                stats.expanded
            ),
            SearchOutcome::Exhausted => {
                info!("No path exists, exhausted after {} expansions", stats.expanded)
            }
            SearchOutcome::Cancelled => info!("Search cancelled after {} expansions", stats.expanded),
        }
        RunReport {
            outcome,
            stats,
            predecessors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Role;

    fn keep_going(_: &Grid) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn prepared(text: &str) -> (Grid, Point, Point) {
        let mut grid = Grid::parse(text).unwrap();
        grid.refresh_adjacency();
        let start = grid.start().unwrap();
        let end = grid.end().unwrap();
        (grid, start, end)
    }

    #[test]
    fn heuristic_is_manhattan() {
        assert_eq!(heuristic(Point::new(0, 0), Point::new(4, 4)), 8);
        assert_eq!(heuristic(Point::new(3, 1), Point::new(1, 2)), 3);
        assert_eq!(heuristic(Point::new(2, 2), Point::new(2, 2)), 0);
        assert_eq!(heuristic(Point::new(-3, 0), Point::new(2, -1)), 6);
    }

    #[test]
    fn heuristic_does_not_overflow() {
        let (low, high) = (Point::new(i32::MIN, 0), Point::new(i32::MAX, 0));
        assert_eq!(heuristic(low, high), u32::MAX);
        assert_eq!(heuristic(high, low), u32::MAX);
        assert_eq!(
            heuristic(Point::new(i32::MIN, i32::MIN), Point::new(i32::MAX, i32::MAX)),
            u32::MAX
        );
    }

    #[test]
    fn contiguity() {
        let path = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)];
        assert!(is_contiguous(&path));
        assert!(!is_contiguous(&[Point::new(0, 0), Point::new(1, 1)]));
        assert!(is_contiguous(&[]));
    }

    #[test]
    fn rejects_invalid_endpoints() {
        let mut grid = Grid::build(3).unwrap();
        grid.refresh_adjacency();
        let engine = SearchEngine::new();
        let p = Point::new(1, 1);
        assert_eq!(
            engine.run(&mut grid, p, p, keep_going),
            Err(GridError::InvalidEndpoints { start: p, end: p })
        );
        assert!(matches!(
            engine.run(&mut grid, p, Point::new(3, 0), keep_going),
            Err(GridError::InvalidEndpoints { .. })
        ));
        assert!(matches!(
            engine.run(&mut grid, Point::new(-1, 0), p, keep_going),
            Err(GridError::InvalidEndpoints { .. })
        ));
    }

    /// Solves the following grid, where the only way around the wall is along the bottom row.
    ///  ___
    /// |S#E|
    /// |.#.|
    /// |...|
    ///  ___
    #[test]
    fn solve_simple_problem() {
        let (mut grid, start, end) = prepared("S#E\n.#.\n...");
        let outcome = SearchEngine::new()
            .run(&mut grid, start, end, keep_going)
            .unwrap();
        assert_eq!(
            outcome,
            SearchOutcome::Succeeded(vec![
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2),
                Point::new(1, 2),
                Point::new(0, 2)
            ])
        );
        let rendered = grid.to_string();
        assert_eq!(rendered.lines().next(), Some("S#E"));
        assert_eq!(rendered.lines().nth(2), Some("***"));
    }

    #[test]
    fn straight_line_expands_only_the_line() {
        let (mut grid, start, end) = prepared("S...E\n.....\n.....\n.....\n.....");
        let report = SearchEngine::new()
            .run_report(&mut grid, start, end, keep_going)
            .unwrap();
        assert_eq!(report.outcome.path().map(<[Point]>::len), Some(4));
        assert_eq!(report.stats.expanded, 4);
        assert_eq!(grid.cell_at(0, 4).unwrap().role(), Role::End);
        assert_eq!(grid.cell_at(0, 0).unwrap().role(), Role::Start);
    }

    #[test]
    fn step_callback_sees_roles_and_can_cancel() {
        let (mut grid, start, end) = prepared("S..\n...\n..E");
        let mut calls = 0;
        let outcome = SearchEngine::new()
            .run(&mut grid, start, end, |g: &Grid| {
                calls += 1;
                // Start expanded: both of its free neighbours are on the frontier.
                assert_eq!(g.cells().filter(|c| c.role() == Role::Frontier).count(), 2);
                ControlFlow::Break(())
            })
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(calls, 1);
        assert_eq!(grid.cell_at(0, 0).unwrap().role(), Role::Start);
    }

    #[test]
    fn visited_marked_after_callback() {
        let (mut grid, start, end) = prepared("S..\n...\n..E");
        let mut steps = 0;
        SearchEngine::new()
            .run(&mut grid, start, end, |g: &Grid| {
                steps += 1;
                if steps == 2 {
                    // The second expanded cell is (1, 0) and is not yet marked visited.
                    assert_eq!(g.cell_at(1, 0).unwrap().role(), Role::Frontier);
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            })
            .unwrap();
        assert_eq!(grid.cell_at(1, 0).unwrap().role(), Role::Visited);
    }

    #[test]
    fn exhausted_when_walled_off() {
        let (mut grid, start, end) = prepared("S#.\n.#.\n.#E");
        let report = SearchEngine::new()
            .run_report(&mut grid, start, end, keep_going)
            .unwrap();
        assert_eq!(report.outcome, SearchOutcome::Exhausted);
        assert_eq!(report.stats.expanded, 3);
        assert!(!report.outcome.is_found());
    }

    #[test]
    fn headless_run_leaves_roles_untouched() {
        let (mut grid, start, end) = prepared("S..\n.#.\n..E");
        let before = grid.to_string();
        let engine = SearchEngine { mark_roles: false };
        let outcome = engine.run(&mut grid, start, end, keep_going).unwrap();
        assert_eq!(outcome.path().map(<[Point]>::len), Some(4));
        assert_eq!(grid.to_string(), before);
    }
}
