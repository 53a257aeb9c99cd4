//! Grant admin rights to a registered devochat user.
//!
//! Reads `MONGODB_URI` from the environment (`.env` supported), looks the
//! user up by email, and sets the admin flag if it is not already set.

use clap::Parser;
use devochat_backend::store::{promote_to_admin, MongoUserStore, PromoteOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "make-admin")]
#[command(about = "Make a devochat user an admin")]
struct CliArgs {
    /// Email of the user to promote. Defaults to ADMIN_EMAIL from the
    /// environment.
    #[arg(value_name = "EMAIL")]
    email: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devochat_backend=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let args = CliArgs::parse();

    let Ok(uri) = std::env::var("MONGODB_URI") else {
        eprintln!("Error: MONGODB_URI not found in environment variables");
        eprintln!("Make sure your .env file exists and contains MONGODB_URI");
        std::process::exit(1);
    };

    let Some(email) = args.email.or_else(|| std::env::var("ADMIN_EMAIL").ok()) else {
        eprintln!("Error: no email given and ADMIN_EMAIL is not set");
        std::process::exit(1);
    };

    let db_name = std::env::var("MONGODB_DB").unwrap_or_else(|_| "chat_db".to_string());

    match run(&uri, &db_name, &email).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(uri: &str, db_name: &str, email: &str) -> devochat_backend::Result<i32> {
    let client = mongodb::Client::with_uri_str(uri).await?;
    let store = MongoUserStore::new(&client.database(db_name));

    let code = match promote_to_admin(&store, email).await? {
        PromoteOutcome::NotFound => {
            println!("User with email {} not found.", email);
            println!("Register this account first, then re-run this tool.");
            1
        }
        PromoteOutcome::AlreadyAdmin => {
            println!("{} is already an admin.", email);
            0
        }
        PromoteOutcome::Promoted(modified) => {
            println!(
                "Successfully made {} an admin ({} record modified).",
                email, modified
            );
            println!();
            println!("Next steps:");
            println!("1. Log out of the application");
            println!("2. Log back in as {}", email);
            println!("3. Open /admin to access the admin panel");
            0
        }
        PromoteOutcome::Unchanged => {
            println!("Failed to update {}: matched but nothing was modified.", email);
            1
        }
    };

    Ok(code)
}
