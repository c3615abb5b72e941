//! Puzzle room placement under a minimum-separation constraint.

use log::debug;
use rand::Rng;

use super::GenerationError;
use crate::grid::{GridPos, MazeGraph};

/// Selects puzzle-trigger rooms by greedy random packing.
///
/// Each pick is drawn uniformly from the remaining candidate pool, then every
/// candidate strictly closer than the minimum separation is dropped from the
/// pool. The packing is order-dependent rather than globally optimal, and may
/// yield fewer rooms than requested when the pool empties early; that
/// shortfall is an expected outcome, not an error.
pub struct PuzzlePlacer;

impl PuzzlePlacer {
    /// Select up to `count` rooms, flag them on the graph, and return their
    /// positions. All selected pairs end up at least `min_separation` cells
    /// apart.
    pub fn place<R: Rng>(
        graph: &mut MazeGraph,
        count: u32,
        min_separation: f32,
        rng: &mut R,
    ) -> Result<Vec<GridPos>, GenerationError> {
        if min_separation < 0.0 {
            return Err(GenerationError::NegativeSeparation(min_separation));
        }

        let mut pool: Vec<GridPos> = graph.positions_row_major().collect();
        let mut selected = Vec::with_capacity(count as usize);

        for _ in 0..count {
            if pool.is_empty() {
                break;
            }
            let pick = pool.swap_remove(rng.random_range(0..pool.len()));
            selected.push(pick);
            pool.retain(|candidate| candidate.distance(pick) >= min_separation);
        }

        if (selected.len() as u32) < count {
            debug!(
                "puzzle placement pool emptied after {} of {} rooms",
                selected.len(),
                count
            );
        }

        for &position in &selected {
            graph.mark_puzzle(position);
        }

        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::MazeGraphBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rejects_negative_separation() {
        let mut graph = MazeGraphBuilder::generate_seeded(3, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            PuzzlePlacer::place(&mut graph, 2, -1.0, &mut rng),
            Err(GenerationError::NegativeSeparation(_))
        ));
        assert!(graph.puzzle_rooms().is_empty());
    }

    #[test]
    fn test_zero_count_selects_nothing() {
        let mut graph = MazeGraphBuilder::generate_seeded(4, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let placed = PuzzlePlacer::place(&mut graph, 0, 2.0, &mut rng).unwrap();
        assert!(placed.is_empty());
        assert!(graph.puzzle_rooms().is_empty());
    }

    #[test]
    fn test_separation_holds_for_every_pair() {
        for seed in 0..10u64 {
            let mut graph = MazeGraphBuilder::generate_seeded(6, seed).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let placed = PuzzlePlacer::place(&mut graph, 4, 2.5, &mut rng).unwrap();

            for (i, &a) in placed.iter().enumerate() {
                for &b in &placed[i + 1..] {
                    assert!(a.distance(b) >= 2.5, "seed {seed}: {a} and {b} too close");
                }
            }
        }
    }

    #[test]
    fn test_never_selects_more_than_requested() {
        let mut graph = MazeGraphBuilder::generate_seeded(5, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let placed = PuzzlePlacer::place(&mut graph, 3, 0.0, &mut rng).unwrap();
        assert_eq!(placed.len(), 3);
    }

    #[test]
    fn test_shortfall_when_separation_exceeds_grid() {
        // No two cells of a 5x5 grid are 15 apart, so one pick clears the pool.
        let mut graph = MazeGraphBuilder::generate_seeded(5, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let placed = PuzzlePlacer::place(&mut graph, 3, 15.0, &mut rng).unwrap();
        assert_eq!(placed.len(), 1);
    }

    #[test]
    fn test_selected_rooms_are_flagged() {
        let mut graph = MazeGraphBuilder::generate_seeded(5, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut placed = PuzzlePlacer::place(&mut graph, 3, 1.0, &mut rng).unwrap();
        placed.sort_by_key(|p| (p.x, p.z));

        assert_eq!(graph.puzzle_rooms(), placed);
        for position in placed {
            assert!(graph.room(position).unwrap().has_puzzle());
        }
    }

    #[test]
    fn test_duplicate_selection_impossible_with_zero_separation() {
        let mut graph = MazeGraphBuilder::generate_seeded(2, 6).unwrap();
        let mut rng = StdRng::seed_from_u64(6);
        let placed = PuzzlePlacer::place(&mut graph, 10, 0.0, &mut rng).unwrap();

        // The pool holds four cells, each selectable at most once.
        assert_eq!(placed.len(), 4);
        let mut unique = placed.clone();
        unique.sort_by_key(|p| (p.x, p.z));
        unique.dedup();
        assert_eq!(unique.len(), 4);
    }
}
