use crate::core::{Board, TaskKey};
use serde::{Deserialize, Serialize};

/// On TCP every message is one JSON object per line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NetMessage {
    // Worker -> Coordinator
    Join {
        name: String,
    },
    Request,
    Result {
        key: TaskKey,
        score: f64,
    },
    Rejected {
        key: TaskKey,
        reason: String,
    },

    // Coordinator -> Worker
    Board {
        board: Board,
    },
    Task {
        key: TaskKey,
    },
    Wait,
    Stop,
}

impl NetMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            NetMessage::Join { .. } => "JOIN",
            NetMessage::Request => "REQUEST",
            NetMessage::Result { .. } => "RESULT",
            NetMessage::Rejected { .. } => "REJECTED",
            NetMessage::Board { .. } => "BOARD",
            NetMessage::Task { .. } => "TASK",
            NetMessage::Wait => "WAIT",
            NetMessage::Stop => "STOP",
        }
    }

    pub fn to_line(&self) -> serde_json::Result<String> {
        Ok(serde_json::to_string(self)? + "\n")
    }

    pub fn from_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_message_survives_the_wire() {
        let mut board = Board::new(7, 6);
        board.play(3).unwrap();
        board.play(4).unwrap();

        let line = NetMessage::Board {
            board: board.clone(),
        }
        .to_line()
        .unwrap();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);

        match NetMessage::from_line(&line).unwrap() {
            NetMessage::Board { board: decoded } => {
                assert_eq!(decoded, board);
                assert_eq!(decoded.side_to_move(), board.side_to_move());
            }
            other => panic!("unexpected {}", other.kind()),
        }
    }

    #[test]
    fn test_unit_variants_encode_as_strings() {
        assert_eq!(NetMessage::Request.to_line().unwrap(), "\"Request\"\n");
        assert!(matches!(
            NetMessage::from_line("\"Stop\"\n").unwrap(),
            NetMessage::Stop
        ));
    }

    #[test]
    fn test_board_with_missing_cells_is_rejected() {
        let line = r#"{"Board":{"board":{"columns":7,"rows":6,"cells":[],"heights":[0,0,0,0,0,0,0],"history":[],"opening":"Maximizer"}}}"#;
        assert!(NetMessage::from_line(line).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(NetMessage::from_line("{\"Task\":{}}").is_err());
        assert!(NetMessage::from_line("hello").is_err());
    }
}
