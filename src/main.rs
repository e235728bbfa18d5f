use clap::Parser;
use tracing::Level;

use sql_workbench::{ConnectSettings, PostgresGateway, RustylinePrompt, SessionLoop};

#[derive(Parser, Debug)]
#[command(author, version, about = "Guided interactive SQL console for PostgreSQL")]
struct Args {
    #[arg(long, default_value = "localhost")]
    host: String,
    #[arg(long, default_value_t = 5432)]
    port: u16,
    #[arg(long, default_value = "postgres")]
    user: String,
    #[arg(long, default_value = "")]
    password: String,
    #[arg(long, default_value = "postgres")]
    dbname: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(Level::INFO)
        .init();

    let settings = ConnectSettings {
        host: args.host,
        port: args.port,
        user: args.user,
        password: args.password,
        dbname: args.dbname,
    };
    let settings_json = serde_json::to_string(&settings).unwrap_or_else(|_| "{}".to_string());
    tracing::info!("connect settings: {}", settings_json);

    let gateway = PostgresGateway::connect(&settings).await.unwrap_or_else(|err| {
        eprintln!("failed to connect: {err}");
        std::process::exit(1);
    });
    println!("Connected to the database.");

    let prompt = RustylinePrompt::new().unwrap_or_else(|err| {
        eprintln!("failed to open terminal input: {err}");
        std::process::exit(1);
    });

    let mut console = SessionLoop::new(prompt, gateway);
    if let Err(err) = console.run().await {
        eprintln!("session ended with error: {err}");
        std::process::exit(1);
    }

    // The pooled connection drops with the loop, on this and every other
    // exit path.
    println!("Database connection closed.");
}
