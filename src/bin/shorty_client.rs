use clap::Parser;
use clap::Subcommand;

use std::net::SocketAddr;
use std::process;

use std::error::Error;
use std::result::Result;

use shorty::ShortyClient;
use shorty::ShortyError;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

const DEFAULT_ADDR: &str = "127.0.0.1:4000";
const ADDR_NAME: &str = "IP-PORT";

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the short key for a value, issuing a new one if needed.
    Shorten {
        value: String,
        #[arg(long, name = ADDR_NAME, default_value = DEFAULT_ADDR)]
        addr: SocketAddr,
    },

    /// Print the value stored under a short key. Exits non-zero if the key is unknown.
    Resolve {
        key: String,
        #[arg(long, name = ADDR_NAME, default_value = DEFAULT_ADDR)]
        addr: SocketAddr,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Shorten { value, addr } => {
            let mut client = ShortyClient::connect(&addr)?;
            println!("{}", client.shorten(value)?);
        }
        Commands::Resolve { key, addr } => {
            let mut client = ShortyClient::connect(&addr)?;
            match client.resolve(key) {
                Ok(value) => println!("{}", value),
                Err(ShortyError::NotFound(_)) => {
                    eprintln!("Key not found");
                    process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
    Ok(())
}
