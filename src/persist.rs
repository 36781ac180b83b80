//! Text records exchanged with the save-file and high-score collaborators.
//!
//! Save record layout:
//!
//! ```text
//! <player name>
//! <turn marker: B | W>
//! 12 lines of 12 comma-separated tokens: B | W | None
//! ```
//!
//! Score log: one `name: score` line per finished game.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::board::{BOARD_SIZE, Board};
use crate::error::{EngineError, Result};
use crate::types::{Cell, Side};

const DARK_TOKEN: &str = "B";
const LIGHT_TOKEN: &str = "W";
const EMPTY_TOKEN: &str = "None";

/// Snapshot of a game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRecord {
    pub player_name: String,
    pub turn: Side,
    pub board: Board,
}

impl SaveRecord {
    pub fn new(player_name: impl Into<String>, turn: Side, board: Board) -> Self {
        Self {
            player_name: player_name.into(),
            turn,
            board,
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.player_name);
        out.push('\n');
        out.push_str(side_token(self.turn));
        out.push('\n');
        for row in self.board.rows() {
            let tokens: Vec<&str> = row.iter().map(|&cell| cell_token(cell)).collect();
            out.push_str(&tokens.join(","));
            out.push('\n');
        }
        out
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.to_text().as_bytes())
    }

    /// Parses a save record. An empty turn line means dark (the human) to move.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();

        let player_name = lines
            .next()
            .ok_or_else(|| parse_error(1, "missing player name"))?;
        let player_name = normalize_player_name(player_name)
            .map_err(|reason| parse_error(1, reason))?
            .to_string();

        let turn = match lines.next().map(str::trim) {
            None | Some("") | Some(DARK_TOKEN) => Side::Dark,
            Some(LIGHT_TOKEN) => Side::Light,
            Some(other) => return Err(parse_error(2, format!("unknown turn marker {other:?}"))),
        };

        let mut board = Board::empty();
        for row in 0..BOARD_SIZE {
            let line_no = row + 3;
            let line = lines
                .next()
                .ok_or_else(|| parse_error(line_no, "missing board row"))?;
            let tokens: Vec<&str> = line.trim().split(',').map(str::trim).collect();
            if tokens.len() != BOARD_SIZE {
                return Err(parse_error(
                    line_no,
                    format!("expected {BOARD_SIZE} cells, got {}", tokens.len()),
                ));
            }
            for (col, token) in tokens.into_iter().enumerate() {
                let cell = parse_cell(token).ok_or_else(|| {
                    parse_error(line_no, format!("unknown cell token {token:?}"))
                })?;
                board.set(row, col, cell)?;
            }
        }

        Ok(Self {
            player_name,
            turn,
            board,
        })
    }
}

impl FromStr for SaveRecord {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// One line of the append-only score log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

impl fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.score)
    }
}

impl FromStr for ScoreEntry {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        parse_score_line(s, 1)
    }
}

/// Parses a whole score log, skipping blank lines.
pub fn parse_score_log(text: &str) -> Result<Vec<ScoreEntry>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_score_line(line, idx + 1))
        .collect()
}

fn parse_score_line(line: &str, line_no: usize) -> Result<ScoreEntry> {
    // Names may contain ": ", the score never does.
    let (name, score) = line
        .trim()
        .rsplit_once(": ")
        .ok_or_else(|| parse_error(line_no, "expected `name: score`"))?;
    let score = score
        .trim()
        .parse::<u32>()
        .map_err(|e| parse_error(line_no, format!("invalid score {score:?}: {e}")))?;
    Ok(ScoreEntry::new(name, score))
}

/// Trims a player name and checks it fits on the single name line of a save record.
pub fn normalize_player_name(name: &str) -> std::result::Result<&str, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("player name is empty");
    }
    if name.contains(['\n', '\r']) {
        return Err("player name spans several lines");
    }
    Ok(name)
}

fn cell_token(cell: Cell) -> &'static str {
    match cell {
        Cell::Dark => DARK_TOKEN,
        Cell::Light => LIGHT_TOKEN,
        Cell::Empty => EMPTY_TOKEN,
    }
}

fn side_token(side: Side) -> &'static str {
    cell_token(side.cell())
}

fn parse_cell(token: &str) -> Option<Cell> {
    match token {
        DARK_TOKEN => Some(Cell::Dark),
        LIGHT_TOKEN => Some(Cell::Light),
        EMPTY_TOKEN => Some(Cell::Empty),
        _ => None,
    }
}

fn parse_error(line: usize, reason: impl Into<String>) -> EngineError {
    EngineError::Parse {
        line,
        reason: reason.into(),
    }
}
