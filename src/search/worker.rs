//! Off-thread move selection for interactive shells.
//!
//! `spawn_search` moves a position snapshot and an engine onto their own OS
//! thread and reports back through a one-shot channel. The caller keeps its
//! own `GameState` untouched. Cancellation is coarse: dropping the
//! `SearchHandle` discards whatever the worker eventually produces.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

pub struct SearchHandle {
    receiver: Receiver<ChessResult<EngineOutput>>,
    thread: Option<JoinHandle<()>>,
}

/// Run `engine.choose_move` for `game_state` on a background thread.
pub fn spawn_search(
    mut game_state: GameState,
    valid_moves: Vec<Move>,
    mut engine: Box<dyn Engine>,
) -> SearchHandle {
    let (sender, receiver) = mpsc::sync_channel(1);

    let thread = thread::spawn(move || {
        debug!(engine = engine.name(), moves = valid_moves.len(), "search worker started");
        let result = engine.choose_move(&mut game_state, &valid_moves);
        if sender.send(result).is_err() {
            debug!("search handle dropped before the result was ready");
        } else {
            debug!("search worker finished");
        }
    });

    SearchHandle {
        receiver,
        thread: Some(thread),
    }
}

impl SearchHandle {
    /// Non-blocking poll. `None` while the worker is still searching.
    ///
    /// The result is delivered once; polling again afterwards reports
    /// [`ChessError::SearchWorkerDisconnected`].
    pub fn try_result(&mut self) -> Option<ChessResult<EngineOutput>> {
        match self.receiver.try_recv() {
            Ok(result) => {
                self.join();
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ChessError::SearchWorkerDisconnected)),
        }
    }

    /// Block until the worker reports.
    pub fn wait(mut self) -> ChessResult<EngineOutput> {
        let result = self
            .receiver
            .recv()
            .map_err(|_| ChessError::SearchWorkerDisconnected)?;
        self.join();
        result
    }

    fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                debug!("search worker panicked after reporting");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::spawn_search;
    use crate::engines::engine_negamax::NegamaxEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::engines::engine_trait::{Engine, EngineOutput};
    use crate::errors::{ChessError, ChessResult};
    use crate::game_state::game_state::GameState;
    use crate::moves::chess_move::Move;
    use crate::search::negamax::SearchConfig;

    struct PanickingEngine;

    impl Engine for PanickingEngine {
        fn name(&self) -> &str {
            "panics"
        }

        fn choose_move(&mut self, _: &mut GameState, _: &[Move]) -> ChessResult<EngineOutput> {
            panic!("engine failure");
        }
    }

    #[test]
    fn wait_returns_a_move_from_the_list() {
        let mut game = GameState::new_game();
        let moves = game.get_valid_moves();
        let handle = spawn_search(game.clone(), moves.clone(), Box::new(RandomEngine::seeded(5)));

        let out = handle.wait().expect("worker should report");
        let best = out.best_move.expect("a move should be chosen");
        assert!(moves.contains(&best));
        assert!(game.move_log().is_empty());
    }

    #[test]
    fn polling_eventually_yields_the_mate() {
        let mut game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("FEN should parse");
        let moves = game.get_valid_moves();
        let engine = NegamaxEngine::new(SearchConfig {
            depth: 3,
            seed: Some(1),
        });
        let mut handle = spawn_search(game, moves, Box::new(engine));

        let out = loop {
            if let Some(result) = handle.try_result() {
                break result.expect("worker should report");
            }
            thread::sleep(Duration::from_millis(5));
        };
        let best = out.best_move.expect("a move should be chosen");
        assert_eq!(best.long_algebraic(), "a1a8");
        assert!(matches!(handle.try_result(), Some(Err(ChessError::SearchWorkerDisconnected))));
    }

    #[test]
    fn dropping_the_handle_discards_the_result() {
        let mut game = GameState::new_game();
        let moves = game.get_valid_moves();
        let handle = spawn_search(game, moves, Box::new(NegamaxEngine::default()));
        drop(handle);
    }

    #[test]
    fn panicking_engine_reports_disconnect() {
        let game = GameState::new_game();
        let handle = spawn_search(game, Vec::new(), Box::new(PanickingEngine));
        assert_eq!(handle.wait().err(), Some(ChessError::SearchWorkerDisconnected));
    }
}
