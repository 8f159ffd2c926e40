use chess_commentary::chess::{AnnotatedMove, BoardState};
use chess_commentary::config::{self, Config};
use chess_commentary::{AppError, OpenAiCommentator, annotate_file, logging};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Analyze a chess PGN file and provide commentary on each move", long_about = None)]
struct Args {
    /// Path to the PGN file to be analyzed (.pgn or .pgn.zst)
    pgn_file_path: PathBuf,

    /// Directory for the annotated game [default: Commentated_Games next to the input]
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Chat model to request commentary from (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _ = dotenvy::dotenv();
    logging::init();

    match run(args) {
        Ok(path) => {
            println!("Annotated game written to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(args: Args) -> Result<PathBuf, AppError> {
    let config = Config::from_env()?.with_model(args.model);
    let commentator = OpenAiCommentator::new(&config)?;
    info!("using model {}", commentator.model());

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config::default_output_dir(&args.pgn_file_path));

    annotate_file(&args.pgn_file_path, &output_dir, &commentator, print_move)
}

fn print_move(annotated: &AnnotatedMove, board: &BoardState) {
    println!("Move: {}", annotated.san);
    println!("{}", board.diagram());
    println!("Commentary: {}", annotated.comment);
    println!("========");
}
