use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::PositionalScorer;
use crate::search::negamax::{search, SearchConfig};

pub struct NegamaxEngine {
    config: SearchConfig,
    scorer: PositionalScorer,
}

impl NegamaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            scorer: PositionalScorer,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Default for NegamaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine for NegamaxEngine {
    fn name(&self) -> &str {
        "Plum Negamax"
    }

    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        valid_moves: &[Move],
    ) -> ChessResult<EngineOutput> {
        let mut out = EngineOutput::default();
        if valid_moves.is_empty() {
            out.info_lines
                .push("info string negamax_engine no_legal_moves".to_owned());
            return Ok(out);
        }

        let result = search(game_state, valid_moves, &self.config, &self.scorer)?;

        out.best_move = Some(result.best_move);
        out.info_lines.push(format!(
            "info depth {} score cp {} nodes {} pv {}",
            result.depth,
            result.best_score,
            result.nodes,
            result.best_move.long_algebraic()
        ));
        if result.random_fallback {
            out.info_lines
                .push("info string negamax_engine random_fallback".to_owned());
        }

        Ok(out)
    }
}
