use std::io::{stdin, stdout};
use std::process::ExitCode;
use std::time::Instant;

use clap::arg;
use clap::command;
use clap::ArgMatches;
use clap::Command;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use movecheck::chess_board::{ChessBoard, ChessField, Color, Locale, Piece, INITIAL_POSITION};
use movecheck::perft::divide;
use movecheck::random_game::{Outcome, RandomGame};
use movecheck::terminal::run_terminal;

fn fen_arg() -> clap::Arg {
    arg!(
        -f --fen <FEN> "Board position"
    )
    .default_value(INITIAL_POSITION)
}

fn main() -> ExitCode {
    let matches = command!()
        .version("v0.1.0")
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Turn debugging information on"
        ))
        .subcommand(
            Command::new("play")
                .about("Play a game in the terminal")
                .arg(fen_arg())
                .arg(
                    arg!(
                    -l --lang <LANG> "Language of the messages (en, vi)"
                            )
                    .default_value("en")
                    .value_parser(clap::value_parser!(Locale)),
                ),
        )
        .subcommand(
            Command::new("moves")
                .about("List the moves available to the side to move")
                .arg(fen_arg())
                .arg(
                    arg!(
                    -s --square <SQUARE> "Only moves of the piece on this square"
                            )
                    .required(false),
                )
                .arg(
                    arg!(
                    -p --piece <CODE> "Only moves of this kind of piece, such as wN"
                            )
                    .required(false),
                ),
        )
        .subcommand(
            Command::new("perft")
                .about("Run Perft test")
                .arg(fen_arg())
                .arg(
                    arg!(
                    -x --depth <d> "depth"
                            )
                    .default_value("3")
                    .value_parser(clap::value_parser!(u8)),
                )
                .arg(
                    arg!(
                    -m --moves <moves> "List of moves"
                            )
                    .num_args(1..)
                    .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("random")
                .about("Play random moves")
                .arg(fen_arg())
                .arg(
                    arg!(
                    -p --plies <n> "Maximum number of plies"
                            )
                    .default_value("40")
                    .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(
                    --seed <seed> "Seed of the random generator"
                            )
                    .required(false)
                    .value_parser(clap::value_parser!(u64)),
                ),
        )
        .get_matches();

    init_tracing(matches.get_flag("debug"));

    let result = match matches.subcommand() {
        Some(("play", arg_matches)) => play(arg_matches),
        Some(("moves", arg_matches)) => moves(arg_matches),
        Some(("perft", arg_matches)) => perft(arg_matches),
        Some(("random", arg_matches)) => random(arg_matches),
        None => play_from(ChessBoard::starting_position(), Color::White, Locale::default()),
        _ => unreachable!("Exhausted list of subcommands"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_position(arg_matches: &ArgMatches) -> Result<(ChessBoard, Color), String> {
    let fen = arg_matches
        .get_one::<String>("fen")
        .map(String::as_str)
        .unwrap_or(INITIAL_POSITION);
    ChessBoard::from_fen(fen).map_err(|e| e.to_string())
}

fn play(arg_matches: &ArgMatches) -> Result<(), String> {
    let (board, turn) = load_position(arg_matches)?;
    let locale = arg_matches.get_one::<Locale>("lang").copied().unwrap_or_default();
    play_from(board, turn, locale)
}

fn play_from(mut board: ChessBoard, turn: Color, locale: Locale) -> Result<(), String> {
    let turn = run_terminal(stdin().lock(), stdout().lock(), &mut board, turn, locale).map_err(|e| e.to_string())?;
    info!(fen = %board.to_fen(turn), "game left");
    Ok(())
}

#[derive(Tabled)]
struct MoveRow {
    piece: String,
    from: String,
    destinations: String,
    count: usize,
}

fn moves(arg_matches: &ArgMatches) -> Result<(), String> {
    let (board, turn) = load_position(arg_matches)?;
    let only = arg_matches
        .get_one::<String>("square")
        .map(|s| ChessField::from_algebraic(s))
        .transpose()
        .map_err(|e| e.to_string())?;
    let wanted = arg_matches
        .get_one::<String>("piece")
        .map(|code| Piece::from_code(code).ok_or_else(|| format!("Invalid piece code: {}", code)))
        .transpose()?;

    let mut table_rows = Vec::new();
    for (from, piece) in board.pieces_with_coordinates() {
        if piece.color != turn || only.is_some_and(|f| f != from) || wanted.is_some_and(|w| w != piece) {
            continue;
        }
        let destinations = board.legal_destinations(from, turn);
        table_rows.push(MoveRow {
            piece: piece.code(),
            from: from.as_algebraic(),
            destinations: destinations.iter().map(|f| f.as_algebraic()).collect::<Vec<_>>().join(" "),
            count: destinations.len(),
        });
    }
    let total: usize = table_rows.iter().map(|r| r.count).sum();
    println!("{}", board.render_grid());
    println!("{} to move, {} moves", turn, total);
    println!("{}", Table::new(table_rows).with(Style::modern()));
    Ok(())
}

#[derive(Tabled)]
struct PerftRow {
    #[tabled(rename = "move")]
    mv: String,
    nodes: u64,
}

fn perft(arg_matches: &ArgMatches) -> Result<(), String> {
    let (mut board, mut turn) = load_position(arg_matches)?;
    let depth = arg_matches.get_one::<u8>("depth").copied().unwrap_or(3);
    let moves = arg_matches
        .get_many::<String>("moves")
        .unwrap_or_default()
        .filter(|&v| !v.is_empty())
        .collect::<Vec<_>>();
    println!("Perft test for {} moves {:?} with depth {}", board.to_fen(turn), moves, depth);

    for m in moves {
        turn = board.apply_move(m, turn).map_err(|e| format!("{}: {}", m, e))?;
    }

    let start_time = Instant::now();
    let result_moves = divide(&board, turn, depth);
    let elapsed = start_time.elapsed();

    let num_nodes: u64 = if depth == 0 { 1 } else { result_moves.iter().map(|(_, c)| c).sum() };
    let table_rows: Vec<PerftRow> = result_moves
        .into_iter()
        .map(|(mv, nodes)| PerftRow { mv, nodes })
        .collect();
    println!("{}", Table::new(table_rows).with(Style::modern()));
    println!("\nNodes searched: {}", num_nodes);
    info!(depth, nodes = num_nodes, elapsed_ms = elapsed.as_millis() as u64, "perft finished");
    Ok(())
}

fn random(arg_matches: &ArgMatches) -> Result<(), String> {
    let (mut board, turn) = load_position(arg_matches)?;
    let max_plies = arg_matches.get_one::<usize>("plies").copied().unwrap_or(40);
    let seed = arg_matches
        .get_one::<u64>("seed")
        .copied()
        .unwrap_or_else(rand::random);
    info!(seed, max_plies, "starting random playout");

    let report = RandomGame::new(seed).play(&mut board, turn, max_plies, |ply, color, mv, _| {
        println!("{:>3}. {} {}", ply, color.to_char(), mv);
    });

    println!("{}", board.render_ascii());
    println!("{}", board.to_fen(report.turn));
    match report.outcome {
        Outcome::PlyLimit => println!("Stopped after {} plies", report.plies),
        Outcome::NoMoves(color) => println!("{} has no moves", color),
        Outcome::KingCaptured(color) => println!("{} king was captured", color),
    }
    Ok(())
}
