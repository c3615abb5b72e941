//! Maze carving via randomized depth-first backtracking.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use super::GenerationError;
use crate::grid::{GridPos, MazeGraph};

/// Builds spanning-tree mazes over an NxN room grid.
///
/// Starting at the origin, each step shuffles the unvisited four-directional
/// neighbors of the current cell, opens a mutual passage into each one that is
/// still unvisited when its turn comes, and descends; control backtracks when
/// a cell has no unvisited neighbors left. The result is always a spanning
/// tree: `size^2-1` passages, no cycles, every room reachable from the origin.
pub struct MazeGraphBuilder;

impl MazeGraphBuilder {
    /// Generate a maze with a fresh thread-local random source.
    pub fn generate(size: u32) -> Result<MazeGraph, GenerationError> {
        Self::generate_with(size, &mut rand::rng())
    }

    /// Generate a maze deterministically from a seed.
    pub fn generate_seeded(size: u32, seed: u64) -> Result<MazeGraph, GenerationError> {
        Self::generate_with(size, &mut StdRng::seed_from_u64(seed))
    }

    /// Generate a maze using the provided random source.
    pub fn generate_with<R: Rng>(size: u32, rng: &mut R) -> Result<MazeGraph, GenerationError> {
        if size == 0 {
            return Err(GenerationError::InvalidSize);
        }

        let mut graph = MazeGraph::with_rooms(size);
        let mut visited = HashSet::with_capacity(graph.room_count());
        carve(&mut graph, GridPos::ORIGIN, &mut visited, rng);

        Ok(graph)
    }
}

fn carve<R: Rng>(
    graph: &mut MazeGraph,
    current: GridPos,
    visited: &mut HashSet<GridPos>,
    rng: &mut R,
) {
    visited.insert(current);

    let mut neighbors: Vec<GridPos> = current
        .neighbors()
        .into_iter()
        .filter(|p| graph.contains(*p) && !visited.contains(p))
        .collect();
    neighbors.shuffle(rng);

    for next in neighbors {
        // A sibling branch may have claimed this neighbor in the meantime.
        if !visited.contains(&next) {
            graph.connect(current, next);
            carve(graph, next, visited, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_size() {
        assert!(matches!(
            MazeGraphBuilder::generate_seeded(0, 1),
            Err(GenerationError::InvalidSize)
        ));
    }

    #[test]
    fn test_single_room_maze() {
        let graph = MazeGraphBuilder::generate_seeded(1, 7).unwrap();
        assert_eq!(graph.room_count(), 1);
        assert_eq!(graph.passage_count(), 0);
        assert_eq!(graph.reachable_from_origin(), 1);
    }

    #[test]
    fn test_spanning_tree_for_all_sizes_and_seeds() {
        for size in 1..=8u32 {
            for seed in 0..5u64 {
                let graph = MazeGraphBuilder::generate_seeded(size, seed).unwrap();
                let rooms = (size * size) as usize;

                assert_eq!(graph.room_count(), rooms);
                // A connected graph with exactly rooms-1 edges is acyclic.
                assert_eq!(graph.passage_count(), rooms - 1, "size {size} seed {seed}");
                assert_eq!(
                    graph.reachable_from_origin(),
                    rooms,
                    "size {size} seed {seed}"
                );
            }
        }
    }

    #[test]
    fn test_connections_are_symmetric() {
        let graph = MazeGraphBuilder::generate_seeded(6, 42).unwrap();
        for pos in graph.positions_row_major() {
            let room = graph.room(pos).unwrap();
            for &other in room.connections() {
                assert!(graph.room(other).unwrap().is_connected_to(pos));
            }
        }
    }

    #[test]
    fn test_passages_connect_adjacent_cells_only() {
        let graph = MazeGraphBuilder::generate_seeded(5, 9).unwrap();
        for pos in graph.positions_row_major() {
            for &other in graph.room(pos).unwrap().connections() {
                assert!((pos.distance(other) - 1.0).abs() < 0.001);
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_maze() {
        let a = MazeGraphBuilder::generate_seeded(5, 1234).unwrap();
        let b = MazeGraphBuilder::generate_seeded(5, 1234).unwrap();

        for pos in a.positions_row_major() {
            assert_eq!(
                a.room(pos).unwrap().connections(),
                b.room(pos).unwrap().connections()
            );
        }
    }

    #[test]
    fn test_five_by_five_has_24_passages() {
        let graph = MazeGraphBuilder::generate_seeded(5, 99).unwrap();
        assert_eq!(graph.room_count(), 25);
        assert_eq!(graph.passage_count(), 24);
        assert!(graph.is_fully_connected());
    }
}
