//! The advisor wire contract.
//!
//! Requests serialize the board as a JSON matrix (`[[0,2,0,0],...]`, 0 for
//! empty). Replies are JSON objects with a `direction` and a `reason`,
//! optionally with a short outlook per direction:
//!
//! ```json
//! { "ifUp": "...", "ifDown": "...", "ifLeft": "...", "ifRight": "...",
//!   "direction": "UP", "reason": "keeps the 64 in the corner" }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{AdvisorError, Direction};
use crate::grid::BoardMatrix;

/// Standing instructions for a language-model advisor: the rules, worked
/// examples and the reply format [`Proposal::from_json`] reads. Sent as
/// the system message alongside each [`AdvisorRequest::prompt`].
pub const SYSTEM_PROMPT: &str = r#"
You are a game-playing system for 2048, tasked with finding the optimal move. The 4x4 board is represented as a nested array with 4 row entries, each containing 4 integers for each position in the row, and where each integer is a tile's value (all powers of 2) and 0 means an empty cell.
The first element of the first row array corresponds to the top-left corner, proceeding left to right across each row (e.g. the first element in each row array is the left most tile of that row, and the 4th element is the right most tile).

In each move, you can shift tiles in one of four directions: UP, DOWN, LEFT, or RIGHT.
Tiles slide toward the chosen direction, and adjacent tiles of the same value merge to form a new tile with double the original value (all tiles will have values that are a power of 2: 2, 4, 8, 16...).
Tiles with different values do not merge, and will stack up from the far side of the board in the chosen direction in the same order, but with no empty spaces between them.
Tiles merge from the farthest side toward the nearest, and each tile can merge only once per move.
The shape of the board does not change based on your moves, only the tiles on the board move and merge in the chosen direction, leaving a 4x4 board with the appropriate changes to tiles shifted or merged on top of the board.
At the beginning of the game, 2 tiles with value 2 or 4 are placed randomly on the board.
After each move, a new tile with value 2 or 4 is added to a random empty cell.

The game ends when you create a tile with a value of 2048 through merges (you win), or when there are no empty cells and no valid moves (you lose).

**Important Rules:**
1. Choose a direction that results in tiles either moving or merging, avoiding any move that leaves the board unchanged.

Examples of attempted moves which result in no changes (bad moves):
If the board is [[0, 0, 2, 4], [0, 0, 0, 8], [0, 8, 2, 4], [0, 0, 0, 4]], making a move to the RIGHT would not result in any tiles moving or merging.
If the board is [[0, 0, 0, 0], [0, 0, 0, 8], [2, 0, 2, 16], [4, 0, 4, 8]], making a move to the DOWN would not result in any tiles moving or merging.

Examples of valid moves (good moves):
If the board is [[0, 0, 0, 0], [0, 0, 0, 8], [2, 0, 2, 16], [4, 0, 4, 8]], making a move to the LEFT would result in the board being [[0, 0, 0, 0], [8, 0, 0, 0], [4, 16, 0, 0], [8, 8, 0, 0]].
If the board is [[2, 2, 2, 0], [0, 4, 4, 4], [8, 16, 0, 16], [2, 2, 2, 2]], making a move to the RIGHT would result in the board being [[0, 0, 2, 4], [0, 0, 4, 8], [0, 0, 8, 32], [0, 0, 4, 4]].
If the board is [[2, 2, 2, 0], [2, 4, 4, 4], [8, 16, 4, 16], [2, 2, 0, 0]], making a move to the DOWN would result in the board being [[0, 2, 0, 0], [4, 4, 0, 0], [8, 16, 2, 4], [2, 2, 8, 16]].

**Strategies:**
1. **Merge Largest Tiles:** Focus on merging high-value tiles to gain points.
2. **Maximize Merges:** Pick moves that merge multiple tiles in one action.
3. **Position High-Value Tiles:** Aim to keep high-value tiles in corners for easier merging.
4. **Plan Ahead:** Consider the impact on future moves, aligning tiles to set up successive merges.

Analyze what would happen if you moved in each direction, then based on your analysis choose the best move.

Return your answer in a JSON object formatted like:
{ "ifUp": "???", "ifDown": "???", "ifLeft": "???", "ifRight": "???", "direction": "UP", "reason": "Why this is the best move" }

where ifUp, ifDown, ifLeft, and ifRight are your analysis of what would happen if you moved UP, DOWN, LEFT, and RIGHT, the direction is the direction you would like to move, and the reason is why you decide in that direction.
For your analysis and reason, keep your answers brief, under 20 words if possible, and as precise as possible.
Possible values for "direction" are "UP", "DOWN", "LEFT", or "RIGHT". Ensure your choice results in tile movement or merging.

----------------
"#;

/// Name of the function a tool-calling model is asked to call.
pub const FUNCTION_NAME: &str = "get_direction";

/// JSON schema for the `get_direction` function, for models that reply
/// through tool calls. Its arguments parse with [`Proposal::from_json`].
#[must_use]
pub fn function_schema() -> serde_json::Value {
    let directions: Vec<&str> = Direction::ALL.iter().map(|d| d.as_str()).collect();
    serde_json::json!({
        "name": FUNCTION_NAME,
        "description": "Provides a direction",
        "parameters": {
            "type": "object",
            "properties": {
                "direction": {
                    "type": "string",
                    "enum": directions,
                    "description": "The direction to be returned"
                },
                "reason": {
                    "type": "string",
                    "description": "The reason why that direction was chosen"
                },
                "ifUp": { "type": "string", "description": "What would happen if you moved UP" },
                "ifDown": { "type": "string", "description": "What would happen if you moved DOWN" },
                "ifLeft": { "type": "string", "description": "What would happen if you moved LEFT" },
                "ifRight": { "type": "string", "description": "What would happen if you moved RIGHT" }
            },
            "required": ["direction", "reason", "ifUp", "ifDown", "ifLeft", "ifRight"]
        }
    })
}

/// What an advisor is asked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorRequest {
    pub board: BoardMatrix,
    /// Directions already known to fail this turn, newest first.
    pub avoid: Vec<Direction>,
}

impl AdvisorRequest {
    pub fn new(board: BoardMatrix, avoid: Vec<Direction>) -> Self {
        Self { board, avoid }
    }

    /// The board as a compact JSON matrix.
    #[must_use]
    pub fn board_json(&self) -> String {
        serde_json::json!(self.board).to_string()
    }

    /// Prompt text for a text-completion advisor.
    ///
    /// ```
    /// use rust_2048::advisor::AdvisorRequest;
    /// use rust_2048::core::Direction;
    ///
    /// let request = AdvisorRequest::new([[0; 4]; 4], vec![Direction::Up]);
    /// assert_eq!(
    ///     request.prompt(),
    ///     "Current Board: [[0,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]\n \
    ///      Avoid using the following directions: UP  \nNext Move: "
    /// );
    /// ```
    #[must_use]
    pub fn prompt(&self) -> String {
        let mut prompt = format!("Current Board: {}\n", self.board_json());
        if !self.avoid.is_empty() {
            let avoid: Vec<&str> = self.avoid.iter().map(|d| d.as_str()).collect();
            prompt.push_str(&format!(
                " Avoid using the following directions: {}  \n",
                avoid.join(" ")
            ));
        }
        prompt.push_str("Next Move: ");
        prompt
    }
}

/// One proposed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proposal {
    pub direction: Direction,
    pub reason: String,
    /// Advisor's notes on what each direction would do, when given.
    pub outlook: Vec<(Direction, String)>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProposal {
    direction: String,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    if_up: Option<String>,
    #[serde(default)]
    if_down: Option<String>,
    #[serde(default)]
    if_left: Option<String>,
    #[serde(default)]
    if_right: Option<String>,
}

impl Proposal {
    pub fn new(direction: Direction, reason: impl Into<String>) -> Self {
        Self {
            direction,
            reason: reason.into(),
            outlook: Vec::new(),
        }
    }

    /// Parse an advisor's JSON reply. The direction is case-insensitive.
    ///
    /// ```
    /// use rust_2048::advisor::Proposal;
    /// use rust_2048::core::Direction;
    ///
    /// let p = Proposal::from_json(r#"{"direction": "left", "reason": "merge"}"#).unwrap();
    /// assert_eq!(p.direction, Direction::Left);
    /// assert_eq!(p.reason, "merge");
    /// ```
    pub fn from_json(text: &str) -> Result<Self, AdvisorError> {
        let raw: RawProposal =
            serde_json::from_str(text).map_err(|e| AdvisorError::Unparsable(e.to_string()))?;
        let direction = raw
            .direction
            .parse::<Direction>()
            .map_err(|_| AdvisorError::InvalidDirection(raw.direction.clone()))?;

        let outlook = [
            (Direction::Up, raw.if_up),
            (Direction::Down, raw.if_down),
            (Direction::Left, raw.if_left),
            (Direction::Right, raw.if_right),
        ]
        .into_iter()
        .filter_map(|(d, note)| note.map(|n| (d, n)))
        .collect();

        Ok(Self {
            direction,
            reason: raw.reason.unwrap_or_default(),
            outlook,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{shift, Board, ShiftOutcome};

    fn spaced(matrix: &BoardMatrix) -> String {
        let rows: Vec<String> = matrix
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(u32::to_string).collect();
                format!("[{}]", cells.join(", "))
            })
            .collect();
        format!("[{}]", rows.join(", "))
    }

    #[test]
    fn test_system_prompt_examples_match_engine() {
        let bad: [(BoardMatrix, Direction); 2] = [
            ([[0, 0, 2, 4], [0, 0, 0, 8], [0, 8, 2, 4], [0, 0, 0, 4]], Direction::Right),
            ([[0, 0, 0, 0], [0, 0, 0, 8], [2, 0, 2, 16], [4, 0, 4, 8]], Direction::Down),
        ];
        for (matrix, dir) in bad {
            assert!(SYSTEM_PROMPT.contains(&spaced(&matrix)));
            assert_eq!(shift(&Board::from_matrix(&matrix), dir), ShiftOutcome::NoMove);
        }

        let good: [(BoardMatrix, Direction, BoardMatrix); 3] = [
            (
                [[0, 0, 0, 0], [0, 0, 0, 8], [2, 0, 2, 16], [4, 0, 4, 8]],
                Direction::Left,
                [[0, 0, 0, 0], [8, 0, 0, 0], [4, 16, 0, 0], [8, 8, 0, 0]],
            ),
            (
                [[2, 2, 2, 0], [0, 4, 4, 4], [8, 16, 0, 16], [2, 2, 2, 2]],
                Direction::Right,
                [[0, 0, 2, 4], [0, 0, 4, 8], [0, 0, 8, 32], [0, 0, 4, 4]],
            ),
            (
                [[2, 2, 2, 0], [2, 4, 4, 4], [8, 16, 4, 16], [2, 2, 0, 0]],
                Direction::Down,
                [[0, 2, 0, 0], [4, 4, 0, 0], [8, 16, 2, 4], [2, 2, 8, 16]],
            ),
        ];
        for (before, dir, after) in good {
            let line = format!(
                "If the board is {}, making a move to the {} would result in the board being {}.",
                spaced(&before),
                dir,
                spaced(&after)
            );
            assert!(SYSTEM_PROMPT.contains(&line), "missing: {line}");
            let moved = shift(&Board::from_matrix(&before), dir).into_board().unwrap();
            assert_eq!(moved.to_matrix(), after, "{dir}");
        }
    }

    #[test]
    fn test_function_schema() {
        let schema = function_schema();
        assert_eq!(schema["name"], FUNCTION_NAME);
        let params = &schema["parameters"];
        assert_eq!(
            params["properties"]["direction"]["enum"],
            serde_json::json!(["UP", "DOWN", "LEFT", "RIGHT"])
        );
        let required: Vec<&str> = params["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        for key in required {
            assert!(params["properties"].get(key).is_some(), "{key} has no property");
        }
    }

    #[test]
    fn test_tool_call_arguments_parse() {
        let args = r#"{"direction":"UP","reason":"corner","ifUp":"a","ifDown":"b","ifLeft":"c","ifRight":"d"}"#;
        let p = Proposal::from_json(args).unwrap();
        assert_eq!(p.direction, Direction::Up);
        assert_eq!(p.outlook.len(), 4);
    }

    #[test]
    fn test_board_json() {
        let mut board = [[0; 4]; 4];
        board[0][1] = 2;
        board[3][3] = 1024;
        let request = AdvisorRequest::new(board, Vec::new());
        assert_eq!(
            request.board_json(),
            "[[0,2,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,1024]]"
        );
    }

    #[test]
    fn test_prompt_without_avoid() {
        let request = AdvisorRequest::new([[0; 4]; 4], Vec::new());
        assert!(request.prompt().ends_with("]]\nNext Move: "));
        assert!(!request.prompt().contains("Avoid"));
    }

    #[test]
    fn test_prompt_lists_avoided_directions() {
        let request = AdvisorRequest::new([[0; 4]; 4], vec![Direction::Left, Direction::Up]);
        assert!(request
            .prompt()
            .contains("Avoid using the following directions: LEFT UP  \n"));
    }

    #[test]
    fn test_parse_full_reply() {
        let text = r#"{
            "ifUp": "nothing", "ifDown": "merges 2s", "ifLeft": "slides", "ifRight": "slides",
            "direction": "DOWN", "reason": "merges the 2s"
        }"#;
        let p = Proposal::from_json(text).unwrap();
        assert_eq!(p.direction, Direction::Down);
        assert_eq!(p.reason, "merges the 2s");
        assert_eq!(p.outlook.len(), 4);
        assert_eq!(p.outlook[1], (Direction::Down, "merges 2s".to_string()));
    }

    #[test]
    fn test_parse_missing_reason() {
        let p = Proposal::from_json(r#"{"direction": "Right"}"#).unwrap();
        assert_eq!(p.direction, Direction::Right);
        assert!(p.reason.is_empty());
        assert!(p.outlook.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Proposal::from_json("not json"),
            Err(AdvisorError::Unparsable(_))
        ));
        assert!(matches!(
            Proposal::from_json(r#"{"reason": "no direction"}"#),
            Err(AdvisorError::Unparsable(_))
        ));
        assert_eq!(
            Proposal::from_json(r#"{"direction": "DIAGONAL"}"#),
            Err(AdvisorError::InvalidDirection("DIAGONAL".to_string()))
        );
    }
}
