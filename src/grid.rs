use crate::cell::{Cell, Role};
use crate::error::{GridError, Result};
use crate::{NEIGHBOUR_OFFSETS, N_NEIGHBOURS};
use core::fmt;
use grid_util::grid::{Grid as _, SimpleGrid, SimpleValueGrid, ValueGrid as _};
use grid_util::point::Point;
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

pub type Neighbours = SmallVec<[Point; N_NEIGHBOURS]>;

/// A square grid of [Cell]s together with the 4-connected adjacency derived from the cell roles
/// and the connected components of that adjacency.
///
/// Points are `(row, col)` with `x` the row and `y` the column. The adjacency and components are
/// only recomputed by [refresh_adjacency](Self::refresh_adjacency). Changing a cell to or from
/// [Role::Obstacle] leaves both stale until the next refresh, so it has to be refreshed before
/// every search.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: SimpleValueGrid<Cell>,
    adjacency: SimpleGrid<Neighbours>,
    components: UnionFind<usize>,
}

impl Grid {
    /// Creates a `rows` by `rows` grid with every cell [Role::Free] and no adjacency.
    pub fn build(rows: i32) -> Result<Grid> {
        if rows <= 0 {
            return Err(GridError::InvalidDimension { rows });
        }
        let n = rows as usize;
        let mut cells = SimpleValueGrid::new(n, n, Cell::new(0, 0));
        for (row, col) in iproduct!(0..rows, 0..rows) {
            cells.set_point(Point::new(row, col), Cell::new(row, col));
        }
        Ok(Grid {
            cells,
            adjacency: SimpleGrid::new(n, n, Neighbours::new()),
            components: UnionFind::new(n * n),
        })
    }

    /// Builds a grid from its textual form as produced by [Display](fmt::Display): one line per
    /// row, one [Role::symbol] per cell. Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Grid> {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>();
        let mut grid = Grid::build(lines.len() as i32)?;
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != grid.rows() {
                return Err(GridError::InvalidDimension {
                    rows: width as i32,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let (row, col) = (row as i32, col as i32);
                let role =
                    Role::from_symbol(symbol).ok_or(GridError::UnknownSymbol { row, col, symbol })?;
                grid.update_cell(row, col, |c| c.set_role(role))?;
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.cells.height()
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0 && point.y >= 0 && self.cells.point_in_bounds(point)
    }

    fn checked(&self, row: i32, col: i32) -> Result<Point> {
        let point = Point::new(row, col);
        if self.contains(point) {
            Ok(point)
        } else {
            Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows(),
            })
        }
    }

    /// A copy of the cell at `(row, col)`. Use [update_cell](Self::update_cell) to change it.
    pub fn cell_at(&self, row: i32, col: i32) -> Result<Cell> {
        let point = self.checked(row, col)?;
        Ok(self.cells.get_point(point))
    }

    pub fn cell(&self, point: Point) -> Result<Cell> {
        self.cell_at(point.x, point.y)
    }

    /// Applies `f` to the cell at `(row, col)` and stores the result, e.g.
    /// `grid.update_cell(1, 2, Cell::mark_obstacle)`.
    pub fn update_cell<R>(
        &mut self,
        row: i32,
        col: i32,
        f: impl FnOnce(&mut Cell) -> R,
    ) -> Result<R> {
        let point = self.checked(row, col)?;
        let mut cell = self.cells.get_point(point);
        let result = f(&mut cell);
        self.cells.set_point(point, cell);
        Ok(result)
    }

    pub fn update<R>(&mut self, point: Point, f: impl FnOnce(&mut Cell) -> R) -> Result<R> {
        self.update_cell(point.x, point.y, f)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let rows = self.rows() as i32;
        iproduct!(0..rows, 0..rows).map(|(row, col)| self.cells.get_point(Point::new(row, col)))
    }

    /// Neighbours of `point` as of the last [refresh_adjacency](Self::refresh_adjacency), in
    /// down, up, right, left order. Empty for points outside the grid.
    pub fn neighbours(&self, point: Point) -> Neighbours {
        if self.contains(point) {
            self.adjacency.get_point(point).cloned().unwrap_or_default()
        } else {
            Neighbours::new()
        }
    }

    /// Recomputes the neighbour list of every cell (obstacles included) as the orthogonal
    /// in-bounds cells that are not obstacles, then regenerates the connected components.
    pub fn refresh_adjacency(&mut self) {
        let mut edges = 0;
        let locations = self.cells().map(|c| c.location()).collect::<Vec<_>>();
        for &location in &locations {
            let neighbours = NEIGHBOUR_OFFSETS
                .iter()
                .map(|(dr, dc)| Point::new(location.x + dr, location.y + dc))
                .filter(|&p| self.contains(p) && !self.cells.get_point(p).is_obstacle())
                .collect::<Neighbours>();
            edges += neighbours.len();
            self.adjacency.set_point(location, neighbours);
        }
        self.generate_components(&locations);
        debug!(
            "Refreshed adjacency of {}x{} grid: {} directed edges",
            self.rows(),
            self.rows(),
            edges
        );
    }

    /// Links up cells that list each other as neighbours. A cell that is an obstacle is never
    /// listed, so it forms a component of its own.
    fn generate_components(&mut self, locations: &[Point]) {
        self.components = UnionFind::new(locations.len());
        for &location in locations {
            let ix = self.cells.get_ix_point(&location);
            for &n in self.adjacency.get_point(location).into_iter().flatten() {
                if self.adjacency.get_point(n).is_some_and(|ns| ns.contains(&location)) {
                    self.components.union(ix, self.cells.get_ix_point(&n));
                }
            }
        }
    }

    /// Position of the cell with [Role::Start], if any.
    pub fn start(&self) -> Option<Point> {
        self.find_role(Role::Start)
    }

    /// Position of the cell with [Role::End], if any.
    pub fn end(&self) -> Option<Point> {
        self.find_role(Role::End)
    }

    fn find_role(&self, role: Role) -> Option<Point> {
        self.cells().find(|c| c.role() == role).map(|c| c.location())
    }

    /// Marks the cell as the start, resetting the previous start cell if there was one. Fails
    /// with [GridError::InvalidEndpoints] when the cell is the current end.
    pub fn place_start(&mut self, row: i32, col: i32) -> Result<()> {
        self.place_endpoint(row, col, Role::Start)
    }

    /// Marks the cell as the end, resetting the previous end cell if there was one. Fails with
    /// [GridError::InvalidEndpoints] when the cell is the current start.
    pub fn place_end(&mut self, row: i32, col: i32) -> Result<()> {
        self.place_endpoint(row, col, Role::End)
    }

    fn place_endpoint(&mut self, row: i32, col: i32, role: Role) -> Result<()> {
        let target = self.checked(row, col)?;
        let (other, other_role) = match role {
            Role::Start => (self.end(), Role::End),
            _ => (self.start(), Role::Start),
        };
        if other == Some(target) {
            debug!("Refusing to place {:?} on the {:?} cell {:?}", role, other_role, target);
            return Err(GridError::InvalidEndpoints {
                start: target,
                end: target,
            });
        }
        if let Some(previous) = self.find_role(role) {
            self.update(previous, Cell::reset)?;
        }
        self.update(target, |c| c.set_role(role))
    }

    /// Marks the cell as an obstacle unless it is the start or the end. Returns whether the cell
    /// was marked.
    pub fn place_obstacle(&mut self, row: i32, col: i32) -> Result<bool> {
        self.update_cell(row, col, |cell| {
            if cell.is_start() || cell.is_end() {
                return false;
            }
            cell.mark_obstacle();
            true
        })
    }

    /// Resets a cell to [Role::Free], whatever it was.
    pub fn clear(&mut self, row: i32, col: i32) -> Result<()> {
        self.update_cell(row, col, Cell::reset)
    }

    /// Resets every frontier, visited and path cell left over from a previous run.
    pub fn clear_search_marks(&mut self) {
        let marked = self
            .cells()
            .filter(|c| c.role().is_search_mark())
            .map(|c| c.location())
            .collect::<Vec<_>>();
        for location in marked {
            let mut cell = self.cells.get_point(location);
            cell.reset();
            self.cells.set_point(location, cell);
        }
    }

    /// Checks whether `a` and `b` were in the same connected component at the last
    /// [refresh_adjacency](Self::refresh_adjacency).
    pub fn reachable(&self, a: Point, b: Point) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        self.components
            .equiv(self.cells.get_ix_point(&a), self.cells.get_ix_point(&b))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Rows run along x, columns along y.
        for row in 0..self.cells.width() as i32 {
            let line = (0..self.cells.height() as i32)
                .map(|col| self.cells.get_point(Point::new(row, col)).role().symbol())
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
