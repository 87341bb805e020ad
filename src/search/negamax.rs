//! Fixed-depth negamax search with alpha-beta pruning.
//!
//! The root moves are shuffled, then stably ordered so that mating moves come
//! first and checking moves next. The search walks the tree in place with
//! `make_move`/`undo_move` and hands the root's best move back through an
//! explicit `SearchContext` rather than shared state. Leaves are scored with
//! `turn × score_board`, where turn is +1 for light to move.

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{BoardScorer, PositionalScorer, CHECKMATE_SCORE};

pub const DEFAULT_SEARCH_DEPTH: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below the root. Zero is treated as one.
    pub depth: u8,
    /// Seed for the root shuffle and random fallback; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Root score from the side to move's perspective.
    pub best_score: i32,
    pub depth: u8,
    pub nodes: u64,
    /// True when no root move beat the losing bound and the move was picked at random.
    pub random_fallback: bool,
}

/// Accumulator owned by one top-level search call.
struct SearchContext<'a, S: BoardScorer> {
    scorer: &'a S,
    root_depth: u8,
    best_move: Option<Move>,
    nodes: u64,
}

/// Best move among `valid_moves` for the side to move, searched to `config.depth`.
///
/// `game_state` is returned to its starting position, including its check
/// flags. An empty `valid_moves` yields [`ChessError::NoLegalMoves`].
pub fn find_best_move(
    game_state: &mut GameState,
    valid_moves: &[Move],
    config: &SearchConfig,
) -> ChessResult<Move> {
    search(game_state, valid_moves, config, &PositionalScorer).map(|result| result.best_move)
}

/// [`find_best_move`] with an explicit scorer and the full search report.
pub fn search<S: BoardScorer>(
    game_state: &mut GameState,
    valid_moves: &[Move],
    config: &SearchConfig,
    scorer: &S,
) -> ChessResult<SearchResult> {
    if valid_moves.is_empty() {
        return Err(ChessError::NoLegalMoves);
    }

    let depth = config.depth.max(1);
    let mut rng = config.rng();
    let saved = game_state.save_check_state();

    let mut ordered = valid_moves.to_vec();
    ordered.shuffle(&mut rng);
    order_by_forcing(game_state, &mut ordered);

    let mut context = SearchContext {
        scorer,
        root_depth: depth,
        best_move: None,
        nodes: 0,
    };
    let turn = turn_multiplier(game_state.side_to_move());
    let best_score = negamax(
        game_state,
        &ordered,
        depth,
        -CHECKMATE_SCORE,
        CHECKMATE_SCORE,
        turn,
        &mut context,
    );

    game_state.restore_check_state(saved);

    let (best_move, random_fallback) = match context.best_move {
        Some(mv) => (mv, false),
        None => (find_random_move(valid_moves, &mut rng)?, true),
    };

    debug!(
        depth,
        nodes = context.nodes,
        score = best_score,
        best_move = %best_move.long_algebraic(),
        random_fallback,
        "search finished"
    );

    Ok(SearchResult {
        best_move,
        best_score,
        depth,
        nodes: context.nodes,
        random_fallback,
    })
}

/// Uniformly random pick from `valid_moves`.
pub fn find_random_move<R: Rng + ?Sized>(valid_moves: &[Move], rng: &mut R) -> ChessResult<Move> {
    valid_moves.choose(rng).copied().ok_or(ChessError::NoLegalMoves)
}

#[inline]
fn turn_multiplier(side: Color) -> i32 {
    match side {
        Color::Light => 1,
        Color::Dark => -1,
    }
}

/// Stable sort: mating moves first, then checking moves.
fn order_by_forcing(game_state: &mut GameState, moves: &mut [Move]) {
    let mut keyed: Vec<((bool, bool), Move)> = moves
        .iter()
        .map(|mv| {
            game_state.make_move(*mv);
            let replies = game_state.get_valid_moves();
            let key = (replies.is_empty() && game_state.in_check(), game_state.in_check());
            game_state.undo_move();
            (key, *mv)
        })
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    for (slot, (_, mv)) in moves.iter_mut().zip(keyed) {
        *slot = mv;
    }
}

fn negamax<S: BoardScorer>(
    game_state: &mut GameState,
    valid_moves: &[Move],
    depth: u8,
    mut alpha: i32,
    beta: i32,
    turn: i32,
    context: &mut SearchContext<'_, S>,
) -> i32 {
    context.nodes += 1;

    // A node without moves is terminal; scoring it as a leaf keeps stalemate at zero.
    if depth == 0 || valid_moves.is_empty() {
        return turn * context.scorer.score(game_state);
    }

    let mut max_score = -CHECKMATE_SCORE;
    for mv in valid_moves {
        game_state.make_move(*mv);
        let replies = game_state.get_valid_moves();
        let score = -negamax(game_state, &replies, depth - 1, -beta, -alpha, -turn, context);
        game_state.undo_move();

        if depth == context.root_depth {
            trace!(mv = %mv.long_algebraic(), score, "root move scored");
        }

        if score > max_score {
            max_score = score;
            if depth == context.root_depth {
                context.best_move = Some(*mv);
            }
        }
        if max_score > alpha {
            alpha = max_score;
        }
        if alpha >= beta {
            break;
        }
    }

    max_score
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{find_best_move, find_random_move, search, SearchConfig, DEFAULT_SEARCH_DEPTH};
    use crate::errors::ChessError;
    use crate::game_state::game_state::GameState;
    use crate::search::board_scoring::{PositionalScorer, CHECKMATE_SCORE};

    fn seeded(depth: u8) -> SearchConfig {
        SearchConfig {
            depth,
            seed: Some(7),
        }
    }

    #[test]
    fn default_config_searches_three_plies() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, DEFAULT_SEARCH_DEPTH);
        assert_eq!(config.depth, 3);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn finds_back_rank_mate_in_one() {
        let mut game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("FEN should parse");
        let moves = game.get_valid_moves();
        let best = find_best_move(&mut game, &moves, &SearchConfig::default()).expect("search should pick a move");
        assert_eq!(best.long_algebraic(), "a1a8");
    }

    #[test]
    fn dark_finds_mate_in_one_too() {
        let mut game = GameState::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").expect("FEN should parse");
        let moves = game.get_valid_moves();
        let result = search(&mut game, &moves, &seeded(3), &PositionalScorer).expect("search should run");
        assert_eq!(result.best_move.long_algebraic(), "a8a1");
        assert_eq!(result.best_score, CHECKMATE_SCORE);
        assert!(!result.random_fallback);
    }

    #[test]
    fn search_restores_the_position_and_check_flags() {
        let mut game = GameState::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let moves = game.get_valid_moves();
        let fen = game.to_fen();
        let pins = game.pins().to_vec();

        let result = search(&mut game, &moves, &seeded(2), &PositionalScorer).expect("search should run");

        assert!(moves.contains(&result.best_move));
        assert!(result.nodes > moves.len() as u64);
        assert_eq!(game.to_fen(), fen);
        assert_eq!(game.pins(), pins.as_slice());
        assert!(!game.in_check());
        assert!(game.move_log().is_empty());
    }

    #[test]
    fn grabs_a_hanging_queen() {
        let mut game = GameState::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").expect("FEN should parse");
        let moves = game.get_valid_moves();
        let best = find_best_move(&mut game, &moves, &seeded(2)).expect("search should pick a move");
        assert_eq!(best.long_algebraic(), "d2d5");
    }

    #[test]
    fn seeded_searches_are_reproducible() {
        let mut game = GameState::new_game();
        let moves = game.get_valid_moves();
        let first = find_best_move(&mut game, &moves, &seeded(2)).expect("search should pick a move");
        let second = find_best_move(&mut game, &moves, &seeded(2)).expect("search should pick a move");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_move_lists_are_rejected() {
        let mut game = GameState::new_game();
        assert_eq!(
            find_best_move(&mut game, &[], &SearchConfig::default()),
            Err(ChessError::NoLegalMoves)
        );

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(find_random_move(&[], &mut rng), Err(ChessError::NoLegalMoves));
    }

    #[test]
    fn random_move_comes_from_the_list() {
        let mut game = GameState::new_game();
        let moves = game.get_valid_moves();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            let mv = find_random_move(&moves, &mut rng).expect("non-empty list should yield a move");
            assert!(moves.contains(&mv));
        }
    }
}
