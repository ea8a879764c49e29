//! Terminal pointer input
//!
//! | Line      | Events                                  |
//! |-----------|-----------------------------------------|
//! | `e2`      | `Activate(e2)`                          |
//! | `e2e4`    | `Drop { e2, e4 }`                       |
//! | `e7e8q`   | `Drop { e7, e8 }` then `ChoosePromotion` |
//! | `q`       | `ChoosePromotion(Queen)`                |
//! | `cancel`  | `Cancel`                                |
//! | `quit`    | `Shutdown`                              |

use crate::game::events::{GameEvent, PointerEvent};
use crate::game::types::{PieceType, Square};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// One parsed input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pointer(PointerEvent),
    /// Move with the promotion piece given up front
    DropAndPromote {
        from: Square,
        to: Square,
        kind: PieceType,
    },
    Quit,
}

impl Command {
    /// Events to post for this command, in order
    pub fn into_events(self) -> Vec<GameEvent> {
        match self {
            Command::Pointer(pointer) => vec![GameEvent::Pointer(pointer)],
            Command::DropAndPromote { from, to, kind } => vec![
                GameEvent::Pointer(PointerEvent::Drop { from, to }),
                GameEvent::Pointer(PointerEvent::ChoosePromotion(kind)),
            ],
            Command::Quit => vec![GameEvent::Shutdown],
        }
    }
}

/// Parse one line; `None` for blank or unrecognized input
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim().to_ascii_lowercase();
    match line.as_str() {
        "" => return None,
        "cancel" | "c" | "esc" => return Some(Command::Pointer(PointerEvent::Cancel)),
        "quit" | "exit" => return Some(Command::Quit),
        _ => {}
    }

    let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    match chars.as_slice() {
        [piece] => PieceType::from_char(*piece)
            .filter(|kind| kind.is_promotion_choice())
            .map(|kind| Command::Pointer(PointerEvent::ChoosePromotion(kind))),
        [f, r] => Square::from_chars(*f, *r).map(|sq| Command::Pointer(PointerEvent::Activate(sq))),
        [f1, r1, f2, r2] => {
            let from = Square::from_chars(*f1, *r1)?;
            let to = Square::from_chars(*f2, *r2)?;
            Some(Command::Pointer(PointerEvent::Drop { from, to }))
        }
        [f1, r1, f2, r2, piece] => {
            let from = Square::from_chars(*f1, *r1)?;
            let to = Square::from_chars(*f2, *r2)?;
            let kind = PieceType::from_char(*piece).filter(|kind| kind.is_promotion_choice())?;
            Some(Command::DropAndPromote { from, to, kind })
        }
        _ => None,
    }
}

/// Read commands line by line and post them to the driver
///
/// Ends on EOF, on `quit`, or when the driver is gone.
pub async fn read_commands<R>(reader: R, events: mpsc::UnboundedSender<GameEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("[INPUT] End of input");
                let _ = events.send(GameEvent::Shutdown);
                return;
            }
            Err(e) => {
                warn!("[INPUT] Failed to read input: {}", e);
                let _ = events.send(GameEvent::Shutdown);
                return;
            }
        };

        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                warn!("[INPUT] Unrecognized command {:?}", line.trim());
            }
            continue;
        };

        let quit = command == Command::Quit;
        for event in command.into_events() {
            if events.send(event).is_err() {
                return;
            }
        }
        if quit {
            return;
        }
    }
}
