use clap::Parser;
use clap::ValueEnum;

use shorty::thread_pool::RayonThreadPool;
use shorty::thread_pool::SharedQueueThreadPool;
use shorty::thread_pool::ThreadPool;
use shorty::MemoryStore;
use shorty::ShortenEngine;
use shorty::ShortyServer;
use shorty::SledStore;
use shorty::DEFAULT_MAX_ATTEMPTS;
use slog::error;
use slog::info;
use slog::o;
use slog::Drain;
use slog::Logger;
use slog_async::Async;
use slog_term::CompactFormat;
use slog_term::TermDecorator;
use std::env::current_dir;
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::process;
use std::result::Result;
use std::str::FromStr;

#[derive(ValueEnum, Clone, Debug, PartialEq)]
enum EngineName {
    Memory,
    Sled,
}

impl fmt::Display for EngineName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            Self::Memory => write!(f, "memory"),
            Self::Sled => write!(f, "sled"),
        }
    }
}

#[derive(Debug)]
struct ParseEngineNameError(String);

impl fmt::Display for ParseEngineNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unrecognized engine name: {}", self.0)
    }
}

impl Error for ParseEngineNameError {}

impl FromStr for EngineName {
    type Err = ParseEngineNameError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim() {
            "memory" => Ok(Self::Memory),
            "sled" => Ok(Self::Sled),
            val => Err(ParseEngineNameError(val.to_string())),
        }
    }
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
enum PoolName {
    Shared,
    Rayon,
}

impl fmt::Display for PoolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            Self::Shared => write!(f, "shared"),
            Self::Rayon => write!(f, "rayon"),
        }
    }
}

const DEFAULT_ADDR: &str = "127.0.0.1:4000";
const ADDR_NAME: &str = "IP-PORT";
const ENGINE_FILE: &str = "shorty.engine";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, name = ADDR_NAME, default_value = DEFAULT_ADDR)]
    addr: SocketAddr,

    #[arg(long, value_enum, name = "ENGINE-NAME", default_value_t = EngineName::Memory)]
    engine: EngineName,

    #[arg(long, value_enum, name = "POOL-NAME", default_value_t = PoolName::Shared)]
    pool: PoolName,

    /// Worker threads serving connections.
    #[arg(long, default_value_t = 4)]
    threads: u32,

    /// Candidate keys drawn for a new value before giving up.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let decorator = TermDecorator::new().stderr().build();
    let drain = CompactFormat::new(decorator).build().fuse();
    let drain = Async::new(drain).build().fuse();

    let log = slog::Logger::root(drain, o!());

    info!(log, "starting up"; "version" => env!("CARGO_PKG_VERSION"));
    info!(
        log,
        "using configuration";
        "engine" => cli.engine.to_string(),
        "pool" => cli.pool.to_string(),
        "threads" => cli.threads,
        "max-attempts" => cli.max_attempts,
        "ip-port" => cli.addr.to_string()
    );

    let current_dir = current_dir()?;
    let engine_file = current_dir.join(ENGINE_FILE);

    let last_engine = if !engine_file.exists() {
        None
    } else {
        Some(std::fs::read_to_string(&engine_file)?.parse::<EngineName>()?)
    };

    if let Some(last_engine) = last_engine {
        if last_engine != cli.engine {
            error!(
                log,
                "{} was chosen, but last engine was {}; quitting!", cli.engine, last_engine
            );
            drop(log);
            process::exit(1);
        }
    }

    std::fs::write(&engine_file, format!("{}", cli.engine))?;

    match cli.engine {
        EngineName::Memory => {
            info!(log, "memory store");
            let engine = MemoryStore::new().max_attempts(cli.max_attempts);
            serve(engine, log, &cli)
        }
        EngineName::Sled => {
            info!(log, "sled store"; "directory" => current_dir.to_str());
            let engine = SledStore::new(sled::open(&current_dir)?)?.max_attempts(cli.max_attempts);
            serve(engine, log, &cli)
        }
    }
}

fn serve<E: ShortenEngine>(engine: E, log: Logger, cli: &Cli) -> Result<(), Box<dyn Error>> {
    match cli.pool {
        PoolName::Shared => serve_with(engine, SharedQueueThreadPool::new(cli.threads)?, log, cli),
        PoolName::Rayon => serve_with(engine, RayonThreadPool::new(cli.threads)?, log, cli),
    }
}

fn serve_with<E: ShortenEngine, P: ThreadPool>(
    engine: E,
    pool: P,
    log: Logger,
    cli: &Cli,
) -> Result<(), Box<dyn Error>> {
    let server = ShortyServer::new(engine, pool, log);
    server.serve(&cli.addr)?;
    Ok(())
}
