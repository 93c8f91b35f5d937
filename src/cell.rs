use core::fmt;
use grid_util::point::Point;
use std::hash::{Hash, Hasher};

/// What a [Cell] currently represents. Set by the caller (free, obstacle, start, end) and by the
/// search engine while it runs (frontier, visited, path).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Free,
    Obstacle,
    Start,
    End,
    /// Discovered and waiting in the open set.
    Frontier,
    /// Expanded.
    Visited,
    Path,
}

impl Role {
    /// Single character used when a grid is rendered as text.
    pub fn symbol(self) -> char {
        match self {
            Role::Free => '.',
            Role::Obstacle => '#',
            Role::Start => 'S',
            Role::End => 'E',
            Role::Frontier => 'o',
            Role::Visited => 'x',
            Role::Path => '*',
        }
    }

    pub fn from_symbol(c: char) -> Option<Role> {
        Some(match c {
            '.' => Role::Free,
            '#' => Role::Obstacle,
            'S' => Role::Start,
            'E' => Role::End,
            'o' => Role::Frontier,
            'x' => Role::Visited,
            '*' => Role::Path,
            _ => return None,
        })
    }

    /// Roles written by a search run, as opposed to roles set up by the caller.
    pub fn is_search_mark(self) -> bool {
        matches!(self, Role::Frontier | Role::Visited | Role::Path)
    }
}

/// A single grid position. Identity is its location; the [Role] is mutable state and is ignored by
/// equality and hashing.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    location: Point,
    role: Role,
}

impl Cell {
    pub(crate) fn new(row: i32, col: i32) -> Cell {
        Cell {
            location: Point::new(row, col),
            role: Role::Free,
        }
    }
    pub fn row(&self) -> i32 {
        self.location.x
    }
    pub fn col(&self) -> i32 {
        self.location.y
    }
    /// Location as a [Point] with `x` being the row and `y` the column.
    pub fn location(&self) -> Point {
        self.location
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn is_obstacle(&self) -> bool {
        self.role == Role::Obstacle
    }
    pub fn is_start(&self) -> bool {
        self.role == Role::Start
    }
    pub fn is_end(&self) -> bool {
        self.role == Role::End
    }

    pub fn mark_obstacle(&mut self) {
        self.role = Role::Obstacle;
    }
    pub fn mark_start(&mut self) {
        self.role = Role::Start;
    }
    pub fn mark_end(&mut self) {
        self.role = Role::End;
    }
    pub fn mark_frontier(&mut self) {
        self.role = Role::Frontier;
    }
    pub fn mark_visited(&mut self) {
        self.role = Role::Visited;
    }
    pub fn mark_path(&mut self) {
        self.role = Role::Path;
    }
    pub fn reset(&mut self) {
        self.role = Role::Free;
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}) {:?}", self.row(), self.col(), self.role)
    }
}
