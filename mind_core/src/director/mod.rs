//! Level orchestration: wires configuration, maze, quotes, and session.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use maze_rules::{
    ConfigError, Emotion, EmotionAssigner, GameConfig, GenerationError, GridPos, MazeGraph,
    MazeGraphBuilder, PuzzlePlacer,
};

use crate::events::{EventQueue, GameEvent};
use crate::quote_bank::{QuoteBank, QuoteId};
use crate::session::{AttemptOutcome, PuzzleSession, SessionConfig, SessionError, SessionState};

/// Owns one run of the game: the current maze, the quote bank, the puzzle
/// session, level progression, and the player's tracked cell.
///
/// Every collaborator is handed in at construction; nothing here is global.
/// Consumers call [`drain_events`](LevelDirector::drain_events) once per
/// frame after driving [`tick`](LevelDirector::tick) and the player-facing
/// entry points.
#[derive(Debug)]
pub struct LevelDirector {
    config: GameConfig,
    bank: QuoteBank,
    session: PuzzleSession,
    events: EventQueue,
    graph: Option<MazeGraph>,
    rng: StdRng,
    current_level: u32,
    player_room: GridPos,
    last_emotion: Option<Emotion>,
    paused: bool,
}

impl LevelDirector {
    /// Create a director over a validated configuration and a quote bank.
    pub fn new(config: GameConfig, bank: QuoteBank) -> Result<Self, ConfigError> {
        Self::with_rng(config, bank, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create a director whose randomness is fully determined by `seed`.
    pub fn with_seed(config: GameConfig, bank: QuoteBank, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, bank, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, bank: QuoteBank, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = PuzzleSession::new(SessionConfig::from(&config));
        Ok(Self {
            config,
            bank,
            session,
            events: EventQueue::new(),
            graph: None,
            rng,
            current_level: 1,
            player_room: GridPos::ORIGIN,
            last_emotion: None,
            paused: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bank(&self) -> &QuoteBank {
        &self.bank
    }

    pub fn session(&self) -> &PuzzleSession {
        &self.session
    }

    pub fn graph(&self) -> Option<&MazeGraph> {
        self.graph.as_ref()
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn player_room(&self) -> GridPos {
        self.player_room
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Build a fresh level: new maze, new emotion layout, new puzzle rooms.
    ///
    /// The previous graph is discarded wholesale, the player returns to the
    /// origin, and the session's quote history starts empty.
    pub fn generate_level(&mut self) -> Result<(), GenerationError> {
        let mut graph = MazeGraphBuilder::generate_with(self.config.maze_size, &mut self.rng)?;
        EmotionAssigner::assign(&mut graph, &Emotion::ALL, &mut self.rng)?;
        let placed = PuzzlePlacer::place(
            &mut graph,
            self.config.puzzles_per_level,
            self.config.min_puzzle_separation,
            &mut self.rng,
        )?;
        info!(
            "generated level {}: {} rooms, {} puzzle rooms",
            self.current_level,
            graph.room_count(),
            placed.len()
        );

        self.player_room = GridPos::ORIGIN;
        self.last_emotion = graph.room(GridPos::ORIGIN).map(|room| room.emotion);
        self.graph = Some(graph);
        self.session.reset();
        self.session.clear_history();
        Ok(())
    }

    /// Track the player's world-space position.
    ///
    /// Crossing into another room announces the room change, announces the
    /// emotion when it differs from the previously observed one, and starts a
    /// puzzle when the room is a puzzle trigger. Positions outside the maze
    /// are ignored.
    pub fn update_player_position(&mut self, x: f32, z: f32) -> Result<(), SessionError> {
        let cell = GridPos::from_world(x, z, self.config.room_size);
        let room_info = self
            .graph
            .as_ref()
            .and_then(|graph| graph.room(cell))
            .map(|room| (room.emotion, room.has_puzzle()));
        let Some((emotion, has_puzzle)) = room_info else {
            return Ok(());
        };
        if cell == self.player_room {
            return Ok(());
        }

        self.player_room = cell;
        self.events.push(GameEvent::PlayerRoomChanged(cell));

        if self.last_emotion != Some(emotion) {
            self.last_emotion = Some(emotion);
            self.events.push(GameEvent::RoomEmotionChanged(emotion));
        }

        if has_puzzle && !self.session.is_active() {
            self.start_puzzle(emotion)?;
        }
        Ok(())
    }

    /// Begin a puzzle for an emotion at the current level.
    pub fn start_puzzle(&mut self, emotion: Emotion) -> Result<QuoteId, SessionError> {
        self.session.start(
            emotion,
            &self.bank,
            self.current_level,
            &mut self.rng,
            &mut self.events,
        )
    }

    /// Submit the player's answer to the active puzzle.
    ///
    /// Solving advances the level; exhausting the attempts restarts the same
    /// encounter with a fresh quote.
    pub fn attempt_solution(&mut self, answer: &str) -> AttemptOutcome {
        let outcome = self.session.attempt(answer, &mut self.events);
        match outcome {
            AttemptOutcome::Solved => self.complete_level(),
            AttemptOutcome::Failed => self.restart_puzzle(),
            _ => {}
        }
        outcome
    }

    /// Advance all timers by `delta` seconds. Ignored while paused.
    pub fn tick(&mut self, delta: f32) {
        if self.paused {
            return;
        }
        self.session.tick(delta, &mut self.events);
        if self.session.state() == (SessionState::Completed { success: false }) {
            self.restart_puzzle();
        }
    }

    /// Abandon the active puzzle without penalty.
    pub fn cancel_puzzle(&mut self) {
        self.session.cancel(&mut self.events);
    }

    /// Mark the level as completed and advance progression.
    pub fn complete_level(&mut self) {
        self.current_level += 1;
        self.session.reset();
        self.events.push(GameEvent::LevelCompleted(self.current_level));
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Take all pending notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    fn restart_puzzle(&mut self) {
        let Some(emotion) = self.session.emotion() else {
            return;
        };
        self.session.reset();
        if let Err(err) = self.start_puzzle(emotion) {
            warn!("could not restart puzzle: {err}");
        }
    }
}
