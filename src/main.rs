use std::path::PathBuf;

use anyhow::Context;
use battleship_client::{
    domain::InitResponse, init_logging, transport::scripted::ScriptedTransport, CellId,
    ConsoleUi, Coordinate, Endpoints, Game, GameClient, RemoteApi, DEFAULT_BOARD_SIZE,
    DEFAULT_PLAYER_NAME, DEFAULT_INIT_LINK, DEFAULT_TURN_LINK,
};
use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Deserialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = DEFAULT_INIT_LINK)]
    init_link: String,
    #[arg(long, default_value = DEFAULT_TURN_LINK)]
    turn_link: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the init request body for a random ship layout.
    Layout {
        #[arg(long, default_value = DEFAULT_PLAYER_NAME)]
        name: String,
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        #[arg(long, help = "Fix RNG seed for a reproducible layout (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Replay a recorded session transcript through the client model.
    Replay {
        transcript: PathBuf,
        #[arg(long, help = "Print every battlefield after each step")]
        boards: bool,
        #[arg(long, help = "Print the requests the client issued")]
        show_requests: bool,
    },
}

/// A recorded session: the player's setup and the service's answers.
#[derive(Deserialize)]
struct Transcript {
    player: String,
    size: usize,
    ships: Vec<Coordinate>,
    init: InitResponse,
    #[serde(default)]
    turns: Vec<TranscriptTurn>,
}

#[derive(Deserialize)]
struct TranscriptTurn {
    cell: u64,
    response: serde_json::Value,
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let endpoints = Endpoints::new(cli.init_link, cli.turn_link);

    match cli.command {
        Commands::Layout { name, size, seed } => {
            let mut rng = seeded_rng(seed);
            let ships = battleship_client::random_layout(&mut rng, size)
                .map_err(|e| anyhow::anyhow!(e))?;
            let mut game = Game::new();
            let outgoing = game
                .init(&name, size, &ships)
                .map_err(|e| anyhow::anyhow!(e))?;
            let request = endpoints.init_request(&outgoing.request)?;
            println!("{} {}", request.method, request.url);
            println!("{}", serde_json::to_string_pretty(&request.body)?);
        }
        Commands::Replay {
            transcript,
            boards,
            show_requests,
        } => {
            let text = std::fs::read_to_string(&transcript)
                .with_context(|| format!("reading {}", transcript.display()))?;
            let transcript: Transcript =
                serde_json::from_str(&text).context("parsing transcript")?;

            let mut transport = ScriptedTransport::new();
            transport.push_response(serde_json::to_string(&transcript.init)?);
            for turn in &transcript.turns {
                transport.push_response(turn.response.to_string());
            }
            let log = transport.request_log();

            let api = Box::new(RemoteApi::new(transport, endpoints));
            let ui = Box::new(ConsoleUi::new(boards));
            let mut client = GameClient::new(api, ui, seeded_rng(Some(0)));

            client
                .new_game_with_layout(&transcript.player, transcript.size, &transcript.ships)
                .await?;
            let mut outcome = None;
            for turn in &transcript.turns {
                outcome = client.fire(CellId(turn.cell)).await?;
                if outcome.is_some() {
                    break;
                }
            }

            if show_requests {
                let requests = log
                    .lock()
                    .map_err(|_| anyhow::anyhow!("request log poisoned"))?;
                for request in requests.iter() {
                    match &request.body {
                        Some(body) => println!("{} {} {}", request.method, request.url, body),
                        None => println!("{} {}", request.method, request.url),
                    }
                }
            }
            match outcome {
                Some(outcome) => println!("finished: {}", outcome.message()),
                None => println!("finished without a result after {} turns", transcript.turns.len()),
            }
        }
    }
    Ok(())
}
