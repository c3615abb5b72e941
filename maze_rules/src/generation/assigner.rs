//! Emotion assignment over the room graph.

use rand::seq::SliceRandom;
use rand::Rng;

use super::GenerationError;
use crate::emotions::Emotion;
use crate::grid::MazeGraph;

/// Labels every room with an emotion, as evenly as integer division allows.
///
/// The emotion set is shuffled once, then cycled over rooms in row-major
/// order. For N^2 rooms and K emotions, each emotion lands on `floor(N^2/K)` or
/// `ceil(N^2/K)` rooms; this is not an independent random draw per room.
pub struct EmotionAssigner;

impl EmotionAssigner {
    pub fn assign<R: Rng>(
        graph: &mut MazeGraph,
        emotions: &[Emotion],
        rng: &mut R,
    ) -> Result<(), GenerationError> {
        if emotions.is_empty() {
            return Err(GenerationError::EmptyEmotionSet);
        }

        let mut order: Vec<Emotion> = emotions.to_vec();
        order.shuffle(rng);

        let positions: Vec<_> = graph.positions_row_major().collect();
        for (index, position) in positions.into_iter().enumerate() {
            if let Some(room) = graph.room_mut(position) {
                room.emotion = order[index % order.len()];
            }
        }

        Ok(())
    }
}
