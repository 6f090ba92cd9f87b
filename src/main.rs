use anyhow::bail;
use clap::{Parser, Subcommand};
use four_farm::core::{Board, Side};
use four_farm::farm::{evaluate_all, spawn_local_workers, Coordinator, LocalPool};
use four_farm::game::Game;
use four_farm::network::{client, server};
use four_farm::player::ai::{DepthSearch, EngineConfig, Evaluator};
use four_farm::player::{EngineController, TuiController};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "four-farm", about = "Four in a row against a farm of search workers")]
struct Cli {
    /// Engine config (JSON). Defaults to ./engine_config.json when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Search depth after the two forced plies
    #[arg(long, global = true)]
    depth: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play against the engine with a local thread pool
    Play {
        #[arg(long, short = 'w')]
        workers: Option<usize>,
        /// Let the human open the game
        #[arg(long)]
        human_first: bool,
    },
    /// Coordinate remote workers over TCP and play against them
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
        #[arg(long, short = 'w')]
        workers: Option<usize>,
        #[arg(long)]
        human_first: bool,
    },
    /// Join a coordinator as a worker
    Work {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
        #[arg(long, default_value = "worker")]
        name: String,
    },
    /// Time one round on the empty board: farm vs rayon reference
    Bench {
        #[arg(long, short = 'w')]
        workers: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load_or_default(),
    };
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }

    match cli.command {
        Command::Play {
            workers,
            human_first,
        } => {
            apply_overrides(&mut config, workers, human_first);
            let evaluator: Arc<dyn Evaluator> = Arc::new(DepthSearch::new(config.search.depth));
            let (links, pool) = spawn_local_workers(config.farm.workers, evaluator)?;
            let coordinator = Coordinator::new(links, config.worker_timeout());

            tokio::task::spawn_blocking(move || run_game(coordinator, Some(pool), &config))
                .await??;
        }
        Command::Serve {
            addr,
            workers,
            human_first,
        } => {
            apply_overrides(&mut config, workers, human_first);
            let listener = server::bind(&addr).await?;
            print!("Waiting for {} workers on {}...\r\n", config.farm.workers, addr);
            let links = server::accept_workers(&listener, config.farm.workers).await?;
            let coordinator = Coordinator::new(links, config.worker_timeout());

            tokio::task::spawn_blocking(move || run_game(coordinator, None, &config)).await??;
        }
        Command::Work { addr, name } => {
            let evaluator = Arc::new(DepthSearch::new(config.search.depth));
            client::run_remote_worker(&addr, &name, evaluator).await?;
        }
        Command::Bench { workers } => {
            apply_overrides(&mut config, workers, false);
            tokio::task::spawn_blocking(move || run_bench(&config)).await??;
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut EngineConfig, workers: Option<usize>, human_first: bool) {
    if let Some(workers) = workers {
        config.farm.workers = workers;
    }
    if human_first {
        config.game.engine_first = false;
    }
}

fn new_board(config: &EngineConfig) -> Board {
    let opening = if config.game.engine_first {
        Side::Maximizer
    } else {
        Side::Minimizer
    };
    Board::new(config.board.columns, config.board.rows).with_opening(opening)
}

/// `pool` is joined before the coordinator goes away, so a worker that was
/// reaped mid-search can still hand in its late result and read STOP.
fn run_game(
    coordinator: Coordinator,
    pool: Option<LocalPool>,
    config: &EngineConfig,
) -> anyhow::Result<()> {
    let engine = EngineController::new("CPU", coordinator).announcing();
    let human = TuiController::stdin("Player");

    let mut game = Game::new(new_board(config))
        .with_display(true)
        .with_clear_screen(true);
    let res = game.play(&engine, &human);
    engine.shutdown();
    if let Some(pool) = pool {
        let stats = pool.join()?;
        info!(
            "workers evaluated {} tasks",
            stats.iter().map(|s| s.tasks).sum::<usize>()
        );
    }
    let outcome = res?;

    if let Some(dir) = &config.game.record_dir {
        let path = game.record(&outcome).save(dir)?;
        info!("game record saved to {}", path.display());
    }
    Ok(())
}

fn run_bench(config: &EngineConfig) -> anyhow::Result<()> {
    let board = new_board(config);
    let search = Arc::new(DepthSearch::new(config.search.depth));

    let start = Instant::now();
    let reference = evaluate_all(&board, search.as_ref());
    let reference_time = start.elapsed();

    let evaluator: Arc<dyn Evaluator> = search;
    let (links, pool) = spawn_local_workers(config.farm.workers, evaluator)?;
    let mut coordinator = Coordinator::new(links, config.worker_timeout());
    let report = coordinator.run_round(&board)?;
    coordinator.shutdown();
    pool.join()?;

    print!(
        "rayon reference: column {:?} in {:.3}s\r\n",
        reference.best_column(),
        reference_time.as_secs_f64()
    );
    print!(
        "farm ({} workers): column {:?} in {:.3}s\r\n",
        config.farm.workers,
        report.column,
        report.elapsed.as_secs_f64()
    );
    if reference.best_column() != report.column {
        bail!("farm and reference disagree");
    }
    Ok(())
}
