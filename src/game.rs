use tracing::{debug, info};

use crate::ai::search::Searcher;
use crate::board::{BOARD_SIZE, Board};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::persist::{SaveRecord, ScoreEntry, normalize_player_name};
use crate::rules::{has_any_legal_move, legal_moves, try_apply_move};
use crate::types::{GameResult, GameState, Position, Side};

/// Side played by the human.
pub const HUMAN: Side = Side::Dark;
/// Side played by the engine.
pub const COMPUTER: Side = Side::Light;
/// Name written to the score log when the final counts are equal.
pub const DRAW_NAME: &str = "Draw";

pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, side: Side, depth: u8) -> Option<Position>;
}

/// Alpha-beta minimax at the configured depth.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimaxSelector;

impl MoveSelector for MinimaxSelector {
    fn select_move(&self, board: &Board, side: Side, depth: u8) -> Option<Position> {
        Searcher::new(depth).search(board, side).best_move
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board, side: Side, _depth: u8) -> Option<Position> {
        legal_moves(board, side).first().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingHumanMove,
    ComputerToMove,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Dark,
    Light,
    Draw,
}

/// Final disc counts. Equal counts are an explicit draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Winner,
    pub dark_count: u8,
    pub light_count: u8,
}

impl Outcome {
    fn from_board(board: &Board) -> Self {
        let (dark_count, light_count) = board.count();
        let winner = if dark_count > light_count {
            Winner::Dark
        } else if light_count > dark_count {
            Winner::Light
        } else {
            Winner::Draw
        };
        Self {
            winner,
            dark_count,
            light_count,
        }
    }
}

/// Turn controller for one human-versus-computer game.
pub struct GameInstance {
    player_name: String,
    board: Board,
    phase: Phase,
    config: EngineConfig,
    pub is_pass: bool,
    pub flipped: Vec<u8>,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(player_name: impl Into<String>, config: EngineConfig) -> Result<Self> {
        Self::with_selector(player_name, config, Box::new(MinimaxSelector))
    }

    pub fn with_selector(
        player_name: impl Into<String>,
        config: EngineConfig,
        selector: Box<dyn MoveSelector>,
    ) -> Result<Self> {
        Self::start(player_name.into(), Board::new(), HUMAN, config, selector)
    }

    /// Restores a saved game. A position where the side to move is stuck is settled
    /// immediately, so a restored game may start with a pass or already be over.
    pub fn from_record(record: SaveRecord, config: EngineConfig) -> Result<Self> {
        Self::start(
            record.player_name,
            record.board,
            record.turn,
            config,
            Box::new(MinimaxSelector),
        )
    }

    fn start(
        player_name: String,
        board: Board,
        to_move: Side,
        config: EngineConfig,
        selector: Box<dyn MoveSelector>,
    ) -> Result<Self> {
        config.validate()?;
        let player_name = normalize_player_name(&player_name)
            .map_err(|reason| EngineError::InvalidConfig(reason.to_string()))?
            .to_string();
        let mut game = Self {
            player_name,
            board,
            phase: phase_for(to_move),
            config,
            is_pass: false,
            flipped: Vec::new(),
            selector,
        };
        game.settle();
        debug!(player = %game.player_name, phase = ?game.phase, "game started");
        Ok(game)
    }

    /// Human move.
    pub fn place(&mut self, row: usize, col: usize) -> Result<()> {
        self.expect_phase(Phase::AwaitingHumanMove)?;
        let flips = try_apply_move(&mut self.board, HUMAN, row, col)?;
        debug!(row, col, flipped = flips.len(), "human moved");

        self.record_flips(&flips);
        self.phase = Phase::ComputerToMove;
        self.settle();
        Ok(())
    }

    /// Computer move. Returns the cell played.
    pub fn computer_move(&mut self) -> Result<Position> {
        self.expect_phase(Phase::ComputerToMove)?;
        let mv = self
            .selector
            .select_move(&self.board, COMPUTER, self.config.search_depth)
            .ok_or(EngineError::NoMoveFound)?;
        let flips = try_apply_move(&mut self.board, COMPUTER, mv.row as usize, mv.col as usize)?;
        debug!(row = mv.row, col = mv.col, flipped = flips.len(), "computer moved");

        self.record_flips(&flips);
        self.phase = Phase::AwaitingHumanMove;
        self.settle();
        Ok(mv)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn side_to_move(&self) -> Option<Side> {
        match self.phase {
            Phase::AwaitingHumanMove => Some(HUMAN),
            Phase::ComputerToMove => Some(COMPUTER),
            Phase::GameOver => None,
        }
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.side_to_move()
            .map(|side| legal_moves(&self.board, side))
            .unwrap_or_default()
    }

    /// Returns `(dark_count, light_count)`.
    pub fn counts(&self) -> (u8, u8) {
        self.board.count()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        (self.phase == Phase::GameOver).then(|| Outcome::from_board(&self.board))
    }

    /// The `name: score` line for the score log, available once the game is over.
    pub fn score_entry(&self) -> Option<ScoreEntry> {
        let outcome = self.outcome()?;
        let entry = match outcome.winner {
            Winner::Dark => ScoreEntry::new(self.player_name.clone(), outcome.dark_count.into()),
            Winner::Light => ScoreEntry::new(
                self.config.computer_name.clone(),
                outcome.light_count.into(),
            ),
            Winner::Draw => ScoreEntry::new(DRAW_NAME, outcome.dark_count.into()),
        };
        Some(entry)
    }

    pub fn save_record(&self) -> SaveRecord {
        SaveRecord::new(
            self.player_name.clone(),
            self.side_to_move().unwrap_or(HUMAN),
            self.board,
        )
    }

    pub fn to_game_state(&self) -> GameState {
        let (dark_count, light_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.side_to_move().map_or(0, Side::to_u8),
            dark_count,
            light_count,
            is_game_over: self.phase == Phase::GameOver,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> Option<GameResult> {
        let outcome = self.outcome()?;
        let (winner, winner_name) = match outcome.winner {
            Winner::Dark => (HUMAN.to_u8(), self.player_name.clone()),
            Winner::Light => (COMPUTER.to_u8(), self.config.computer_name.clone()),
            Winner::Draw => (0, DRAW_NAME.to_string()),
        };
        Some(GameResult {
            winner,
            winner_name,
            dark_count: outcome.dark_count,
            light_count: outcome.light_count,
        })
    }

    fn expect_phase(&self, wanted: Phase) -> Result<()> {
        match self.phase {
            Phase::GameOver => Err(EngineError::GameOver),
            current if current == wanted => Ok(()),
            Phase::AwaitingHumanMove => Err(EngineError::NotYourTurn { to_move: HUMAN }),
            Phase::ComputerToMove => Err(EngineError::NotYourTurn { to_move: COMPUTER }),
        }
    }

    fn record_flips(&mut self, flips: &[Position]) {
        self.is_pass = false;
        self.flipped = flips
            .iter()
            .map(|p| (p.row as usize * BOARD_SIZE + p.col as usize) as u8)
            .collect();
    }

    /// Ends the game when nobody can move, or hands the turn over when only the
    /// side to move is stuck.
    fn settle(&mut self) {
        let Some(side) = self.side_to_move() else {
            return;
        };

        let side_can_move = has_any_legal_move(&self.board, side);
        let other_can_move = has_any_legal_move(&self.board, side.opponent());

        if !side_can_move && !other_can_move {
            self.phase = Phase::GameOver;
            let (dark, light) = self.board.count();
            info!(dark, light, "game over");
        } else if !side_can_move {
            self.phase = phase_for(side.opponent());
            self.is_pass = true;
            info!(passed = ?side, "no legal move, turn passes");
        }
    }
}

fn phase_for(side: Side) -> Phase {
    match side {
        Side::Dark => Phase::AwaitingHumanMove,
        Side::Light => Phase::ComputerToMove,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    struct FixedMoveSelector {
        mv: Position,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&self, _board: &Board, _side: Side, _depth: u8) -> Option<Position> {
            Some(self.mv)
        }
    }

    fn board_with(dark: &[(usize, usize)], light: &[(usize, usize)]) -> Board {
        let mut board = Board::empty();
        for &(r, c) in dark {
            board.set(r, c, Cell::Dark).unwrap();
        }
        for &(r, c) in light {
            board.set(r, c, Cell::Light).unwrap();
        }
        board
    }

    fn restored(board: Board, turn: Side) -> GameInstance {
        GameInstance::from_record(SaveRecord::new("tester", turn, board), EngineConfig::default())
            .unwrap()
    }

    fn filled_board(dark_cells: usize) -> Board {
        let mut board = Board::empty();
        for idx in 0..BOARD_SIZE * BOARD_SIZE {
            let cell = if idx < dark_cells { Cell::Dark } else { Cell::Light };
            board.set(idx / BOARD_SIZE, idx % BOARD_SIZE, cell).unwrap();
        }
        board
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameInstance::new("alice", EngineConfig::default()).unwrap();
        let state = game.to_game_state();

        assert_eq!(game.phase(), Phase::AwaitingHumanMove);
        assert_eq!(state.current_player, 1);
        assert_eq!(state.dark_count, 2);
        assert_eq!(state.light_count, 2);
        assert!(!state.is_game_over);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(game.legal_moves().len(), 4);
        assert!(game.outcome().is_none());
        assert!(game.score_entry().is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = GameInstance::new("alice", EngineConfig::with_depth(0));

        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn blank_or_multi_line_player_names_are_rejected() {
        for name in ["", "   ", "ann\nB", "ann\r\nB"] {
            let result = GameInstance::new(name, EngineConfig::default());

            assert!(
                matches!(result, Err(EngineError::InvalidConfig(_))),
                "name {name:?}"
            );
        }
    }

    #[test]
    fn player_name_is_stored_trimmed_and_survives_save() {
        let game = GameInstance::new(" bob ", EngineConfig::default()).unwrap();
        assert_eq!(game.player_name(), "bob");

        let text = game.save_record().to_text();
        let restored =
            GameInstance::from_record(SaveRecord::parse(&text).unwrap(), EngineConfig::default())
                .unwrap();

        assert_eq!(restored.player_name(), "bob");
        assert_eq!(restored.board(), game.board());
    }

    #[test]
    fn illegal_human_move_returns_error_and_keeps_turn() {
        let mut game = GameInstance::new("alice", EngineConfig::default()).unwrap();

        assert_eq!(
            game.place(0, 0),
            Err(EngineError::IllegalMove { row: 0, col: 0 })
        );
        assert_eq!(
            game.place(12, 3),
            Err(EngineError::OutOfBounds { row: 12, col: 3 })
        );
        assert_eq!(game.phase(), Phase::AwaitingHumanMove);
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn moves_out_of_turn_are_rejected() {
        let mut game = GameInstance::new("alice", EngineConfig::default()).unwrap();

        assert_eq!(
            game.computer_move(),
            Err(EngineError::NotYourTurn { to_move: Side::Dark })
        );

        game.place(4, 5).unwrap();
        assert_eq!(
            game.place(3, 5),
            Err(EngineError::NotYourTurn { to_move: Side::Light })
        );
    }

    #[test]
    fn human_then_computer_move_alternates_turns() {
        let mut game = GameInstance::new("alice", EngineConfig::default()).unwrap();

        game.place(4, 5).unwrap();
        assert_eq!(game.phase(), Phase::ComputerToMove);
        assert_eq!(game.flipped, vec![(5 * BOARD_SIZE + 5) as u8]);

        let mv = game.computer_move().unwrap();
        assert_eq!(game.board().get(mv.row as usize, mv.col as usize), Ok(Cell::Light));
        assert_eq!(game.phase(), Phase::AwaitingHumanMove);
        let (dark, light) = game.counts();
        assert_eq!(dark + light, 6);
    }

    #[test]
    fn computer_move_uses_selector() {
        let mut game = GameInstance::with_selector(
            "alice",
            EngineConfig::default(),
            Box::new(FixedMoveSelector {
                mv: Position::new(3, 4),
            }),
        )
        .unwrap();
        game.place(4, 5).unwrap();

        // (3, 4) brackets nothing for light after dark's opening.
        assert_eq!(
            game.computer_move(),
            Err(EngineError::IllegalMove { row: 3, col: 4 })
        );
        assert_eq!(game.phase(), Phase::ComputerToMove);
    }

    #[test]
    fn human_without_moves_passes_to_computer() {
        // Dark cannot bracket the light corner disc; light can capture at (0, 2).
        let board = board_with(&[(0, 1)], &[(0, 0)]);

        let mut game = restored(board, Side::Dark);

        assert_eq!(game.phase(), Phase::ComputerToMove);
        assert!(game.is_pass);

        let mv = game.computer_move().unwrap();
        assert_eq!(mv, Position::new(0, 2));
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(
            game.outcome(),
            Some(Outcome {
                winner: Winner::Light,
                dark_count: 0,
                light_count: 3,
            })
        );
        assert_eq!(game.score_entry(), Some(ScoreEntry::new("AI", 3)));
    }

    #[test]
    fn computer_moves_again_when_human_is_stuck() {
        let board = board_with(&[(0, 1), (5, 1)], &[(0, 0), (5, 0)]);
        let mut game = restored(board, Side::Light);
        assert_eq!(game.phase(), Phase::ComputerToMove);

        game.computer_move().unwrap();
        assert_eq!(game.phase(), Phase::ComputerToMove);
        assert!(game.is_pass);
        assert_eq!(game.legal_moves().len(), 1);

        game.computer_move().unwrap();
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.counts(), (0, 6));
    }

    #[test]
    fn full_board_is_game_over_with_strict_winner() {
        let mut game = restored(filled_board(80), Side::Dark);

        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.side_to_move(), None);
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.place(0, 0), Err(EngineError::GameOver));
        assert_eq!(game.computer_move(), Err(EngineError::GameOver));

        let result = game.to_game_result().unwrap();
        assert_eq!(result.winner, 1);
        assert_eq!(result.winner_name, "tester");
        assert_eq!((result.dark_count, result.light_count), (80, 64));
        assert_eq!(game.score_entry(), Some(ScoreEntry::new("tester", 80)));
        assert_eq!(game.to_game_state().current_player, 0);
    }

    #[test]
    fn equal_final_counts_are_a_draw() {
        let game = restored(filled_board(72), Side::Light);

        let outcome = game.outcome().unwrap();
        assert_eq!(outcome.winner, Winner::Draw);
        assert_eq!(game.to_game_result().unwrap().winner, 0);
        assert_eq!(game.score_entry(), Some(ScoreEntry::new(DRAW_NAME, 72)));
    }

    #[test]
    fn save_record_restores_same_position() {
        let mut game = GameInstance::new("alice", EngineConfig::default()).unwrap();
        game.place(4, 5).unwrap();

        let record = game.save_record();
        let text = record.to_text();
        let restored =
            GameInstance::from_record(SaveRecord::parse(&text).unwrap(), EngineConfig::default())
                .unwrap();

        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.phase(), Phase::ComputerToMove);
        assert_eq!(restored.player_name(), "alice");
    }

    #[test]
    fn shallow_game_plays_to_completion() {
        let mut game = GameInstance::new("alice", EngineConfig::with_depth(1)).unwrap();
        let mut turns = 0;

        while game.phase() != Phase::GameOver {
            match game.phase() {
                Phase::AwaitingHumanMove => {
                    let mv = game.legal_moves()[0];
                    game.place(mv.row as usize, mv.col as usize).unwrap();
                }
                Phase::ComputerToMove => {
                    game.computer_move().unwrap();
                }
                Phase::GameOver => unreachable!(),
            }
            turns += 1;
            assert!(turns <= BOARD_SIZE * BOARD_SIZE);
        }

        let outcome = game.outcome().unwrap();
        let (dark, light) = game.counts();
        assert_eq!((outcome.dark_count, outcome.light_count), (dark, light));
        assert!(game.score_entry().is_some());
    }
}
