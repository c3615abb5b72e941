//! Grid geometry and the room graph - the central level structure.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

use crate::emotions::Emotion;

/// Integer cell coordinate in the maze grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct GridPos {
    pub x: i32,
    pub z: i32,
}

impl GridPos {
    /// The maze entrance cell.
    pub const ORIGIN: GridPos = GridPos { x: 0, z: 0 };

    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Euclidean distance to another cell, in cell units.
    pub fn distance(self, other: GridPos) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dz = (self.z - other.z) as f32;
        (dx * dx + dz * dz).sqrt()
    }

    /// The four axis-aligned neighbor cells.
    pub fn neighbors(self) -> [GridPos; 4] {
        [
            GridPos::new(self.x + 1, self.z),
            GridPos::new(self.x - 1, self.z),
            GridPos::new(self.x, self.z + 1),
            GridPos::new(self.x, self.z - 1),
        ]
    }

    /// Map a world-space position to the cell it rounds into, given the
    /// world-space footprint of one room.
    pub fn from_world(x: f32, z: f32, room_size: f32) -> GridPos {
        GridPos::new((x / room_size).round() as i32, (z / room_size).round() as i32)
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// One maze cell.
///
/// Connections are undirected and always mutual; a room never connects to
/// itself. The puzzle flag is set at most once per generation cycle and never
/// cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub position: GridPos,
    pub emotion: Emotion,
    connections: HashSet<GridPos>,
    has_puzzle: bool,
}

impl Room {
    pub fn new(position: GridPos) -> Self {
        Self {
            position,
            emotion: Emotion::Fear,
            connections: HashSet::new(),
            has_puzzle: false,
        }
    }

    /// Cells this room has an open passage to.
    pub fn connections(&self) -> &HashSet<GridPos> {
        &self.connections
    }

    pub fn is_connected_to(&self, other: GridPos) -> bool {
        self.connections.contains(&other)
    }

    pub fn has_puzzle(&self) -> bool {
        self.has_puzzle
    }

    fn add_connection(&mut self, other: GridPos) {
        self.connections.insert(other);
    }

    fn mark_puzzle(&mut self) {
        self.has_puzzle = true;
    }
}

/// The NxN collection of rooms plus the grid dimension.
///
/// Owns all rooms exclusively; the whole set is discarded and rebuilt on the
/// next level generation. Read-only to consumers once generation completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeGraph {
    size: u32,
    rooms: HashMap<GridPos, Room>,
}

impl MazeGraph {
    /// Create a graph of `size x size` unconnected rooms.
    pub(crate) fn with_rooms(size: u32) -> Self {
        let mut rooms = HashMap::with_capacity((size * size) as usize);
        for x in 0..size as i32 {
            for z in 0..size as i32 {
                let position = GridPos::new(x, z);
                rooms.insert(position, Room::new(position));
            }
        }
        Self { size, rooms }
    }

    /// Grid dimension N.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room(&self, position: GridPos) -> Option<&Room> {
        self.rooms.get(&position)
    }

    pub(crate) fn room_mut(&mut self, position: GridPos) -> Option<&mut Room> {
        self.rooms.get_mut(&position)
    }

    pub fn contains(&self, position: GridPos) -> bool {
        self.rooms.contains_key(&position)
    }

    /// Cell positions in the fixed traversal order used for assignment.
    pub fn positions_row_major(&self) -> impl Iterator<Item = GridPos> + '_ {
        let size = self.size as i32;
        (0..size).flat_map(move |x| (0..size).map(move |z| GridPos::new(x, z)))
    }

    /// Open a mutual passage between two rooms.
    ///
    /// Returns false (and changes nothing) if the cells are equal or either
    /// is outside the grid.
    pub(crate) fn connect(&mut self, a: GridPos, b: GridPos) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) {
            return false;
        }
        if let Some(room) = self.rooms.get_mut(&a) {
            room.add_connection(b);
        }
        if let Some(room) = self.rooms.get_mut(&b) {
            room.add_connection(a);
        }
        true
    }

    /// Flag a room as a puzzle-trigger location.
    pub(crate) fn mark_puzzle(&mut self, position: GridPos) -> bool {
        match self.rooms.get_mut(&position) {
            Some(room) => {
                room.mark_puzzle();
                true
            }
            None => false,
        }
    }

    /// Number of undirected passages, each counted once.
    pub fn passage_count(&self) -> usize {
        let endpoint_total: usize = self.rooms.values().map(|r| r.connections.len()).sum();
        endpoint_total / 2
    }

    /// Count of rooms reachable from the origin by passages.
    pub fn reachable_from_origin(&self) -> usize {
        if !self.contains(GridPos::ORIGIN) {
            return 0;
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(GridPos::ORIGIN);
        queue.push_back(GridPos::ORIGIN);

        while let Some(current) = queue.pop_front() {
            if let Some(room) = self.rooms.get(&current) {
                for &next in &room.connections {
                    if visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        visited.len()
    }

    pub fn is_fully_connected(&self) -> bool {
        self.reachable_from_origin() == self.room_count()
    }

    /// Positions of all puzzle-flagged rooms.
    pub fn puzzle_rooms(&self) -> Vec<GridPos> {
        let mut positions: Vec<GridPos> = self
            .rooms
            .values()
            .filter(|r| r.has_puzzle)
            .map(|r| r.position)
            .collect();
        positions.sort_by_key(|p| (p.x, p.z));
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, 4);
        assert!((a.distance(b) - 5.0).abs() < 0.001);
        assert!((b.distance(a) - 5.0).abs() < 0.001);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn test_from_world_rounds_to_nearest_cell() {
        assert_eq!(GridPos::from_world(0.0, 0.0, 10.0), GridPos::new(0, 0));
        assert_eq!(GridPos::from_world(14.9, 0.0, 10.0), GridPos::new(1, 0));
        assert_eq!(GridPos::from_world(15.1, 26.0, 10.0), GridPos::new(2, 3));
    }

    #[test]
    fn test_connect_is_mutual() {
        let mut graph = MazeGraph::with_rooms(3);
        let a = GridPos::new(0, 0);
        let b = GridPos::new(0, 1);

        assert!(graph.connect(a, b));
        assert!(graph.room(a).unwrap().is_connected_to(b));
        assert!(graph.room(b).unwrap().is_connected_to(a));
        assert_eq!(graph.passage_count(), 1);
    }

    #[test]
    fn test_connect_rejects_self_and_outside() {
        let mut graph = MazeGraph::with_rooms(2);
        let a = GridPos::new(0, 0);

        assert!(!graph.connect(a, a));
        assert!(!graph.connect(a, GridPos::new(5, 5)));
        assert_eq!(graph.passage_count(), 0);
        assert!(graph.room(a).unwrap().connections().is_empty());
    }

    #[test]
    fn test_connect_is_idempotent() {
        let mut graph = MazeGraph::with_rooms(2);
        let a = GridPos::new(0, 0);
        let b = GridPos::new(1, 0);

        graph.connect(a, b);
        graph.connect(a, b);
        graph.connect(b, a);
        assert_eq!(graph.passage_count(), 1);
    }

    #[test]
    fn test_reachability() {
        let mut graph = MazeGraph::with_rooms(2);
        assert_eq!(graph.reachable_from_origin(), 1);
        assert!(!graph.is_fully_connected());

        graph.connect(GridPos::new(0, 0), GridPos::new(0, 1));
        graph.connect(GridPos::new(0, 1), GridPos::new(1, 1));
        graph.connect(GridPos::new(1, 1), GridPos::new(1, 0));

        assert_eq!(graph.reachable_from_origin(), 4);
        assert!(graph.is_fully_connected());
    }

    #[test]
    fn test_row_major_order() {
        let graph = MazeGraph::with_rooms(2);
        let order: Vec<GridPos> = graph.positions_row_major().collect();
        assert_eq!(
            order,
            vec![
                GridPos::new(0, 0),
                GridPos::new(0, 1),
                GridPos::new(1, 0),
                GridPos::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_puzzle_flag() {
        let mut graph = MazeGraph::with_rooms(2);
        let target = GridPos::new(1, 1);

        assert!(!graph.room(target).unwrap().has_puzzle());
        assert!(graph.mark_puzzle(target));
        assert!(graph.room(target).unwrap().has_puzzle());
        assert_eq!(graph.puzzle_rooms(), vec![target]);
        assert!(!graph.mark_puzzle(GridPos::new(9, 9)));
    }
}
