use clap::{Parser, Subcommand};
use zabbix_bridge::app::App;
use zabbix_bridge::errors::NodeError;
use zabbix_bridge::services::context::StaticContext;

#[derive(Parser)]
#[command(author, version, about = "Zabbix JSON-RPC operations for workflow hosts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute an invocation document and print the output records
    Run {
        /// Path to the invocation document, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// List supported resource/operation pairs
    Operations,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("zabbix-bridge: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), NodeError> {
    match cli.command {
        Commands::Run { input, pretty } => {
            let ctx = StaticContext::load(&input)?;
            let app = App::initialize()?;
            let records = serde_json::Value::Array(app.run(&ctx).await?);
            print_json(&records, pretty)
        }
        Commands::Operations => print_json(&serde_json::Value::Array(App::operations()), true),
    }
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<(), NodeError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}
