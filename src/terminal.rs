use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::chess_board::{ChessBoard, Color, Locale};

/// Interactive loop: prints the board, reads one move per line and keeps
/// track of whose turn it is. Returns the side to move when input ends.
pub fn run_terminal<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    board: &mut ChessBoard,
    mut turn: Color,
    locale: Locale,
) -> io::Result<Color> {
    info!(%turn, %locale, "terminal session started");
    print_position(&mut output, board, turn)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens[0] {
            "quit" | "exit" => break,
            "board" => print_position(&mut output, board, turn)?,
            "moves" => {
                let moves: Vec<String> = board.legal_moves(turn).iter().map(|m| m.as_algebraic()).collect();
                writeln!(output, "{}", moves.join(" "))?;
            }
            "fen" => writeln!(output, "{}", board.to_fen(turn))?,
            _ => match board.apply_move(line, turn) {
                Ok(next) => {
                    turn = next;
                    print_position(&mut output, board, turn)?;
                    if board.is_missing_king() {
                        writeln!(output, "{}", king_taken_message(locale))?;
                    }
                }
                Err(err) => {
                    debug!(%err, "rejected terminal input");
                    writeln!(output, "{}", err.localized(locale))?;
                }
            },
        }
        output.flush()?;
    }

    info!(%turn, "terminal session ended");
    Ok(turn)
}

fn print_position<W: Write>(output: &mut W, board: &ChessBoard, turn: Color) -> io::Result<()> {
    writeln!(output, "{}", board.render_ascii())?;
    writeln!(output, "{} to move", turn)?;
    output.flush()
}

fn king_taken_message(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "A king has been captured.",
        Locale::Vietnamese => "Một quân vua đã bị bắt.",
    }
}
