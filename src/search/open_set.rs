use fxhash::FxHashSet;
use grid_util::point::Point;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct OpenEntry {
    f_score: u32,
    insertion: usize,
    point: Point,
}

impl Eq for OpenEntry {}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score && self.insertion == other.insertion
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest f-score first, and among equal f-scores the
        // entry that was inserted first.
        match other.f_score.cmp(&self.f_score) {
            Ordering::Equal => other.insertion.cmp(&self.insertion),
            s => s,
        }
    }
}

/// Min-priority queue keyed on `(f_score, insertion order)` with a membership set mirroring its
/// contents.
///
/// An entry keeps the f-score it was pushed with. A point whose score improves while it is
/// already queued is not pushed again, so it is expanded at its original position.
pub(crate) struct OpenSet {
    heap: BinaryHeap<OpenEntry>,
    members: FxHashSet<Point>,
    counter: usize,
}

impl OpenSet {
    /// Creates the open set holding only `start`, with insertion order 0.
    pub fn new(start: Point, f_score: u32) -> OpenSet {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry {
            f_score,
            insertion: 0,
            point: start,
        });
        let mut members = FxHashSet::default();
        members.insert(start);
        OpenSet {
            heap,
            members,
            counter: 0,
        }
    }

    pub fn push(&mut self, point: Point, f_score: u32) {
        self.counter += 1;
        self.heap.push(OpenEntry {
            f_score,
            insertion: self.counter,
            point,
        });
        self.members.insert(point);
    }

    pub fn pop(&mut self) -> Option<Point> {
        let OpenEntry { point, .. } = self.heap.pop()?;
        self.members.remove(&point);
        Some(point)
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.members.contains(point)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
