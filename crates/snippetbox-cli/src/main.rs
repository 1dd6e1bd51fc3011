use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use snippetbox_cli::seeder::{self, SeedConfig};
use snippetbox_db::{PgPool, PgUserStore};
use snippetbox_models::{ModelError, UserStore};

#[derive(Parser)]
#[command(name = "snippetbox-cli")]
#[command(about = "Snippetbox CLI - Administrative tools for Snippetbox", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a user account
    CreateUser {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake snippets
    Seed {
        /// Number of snippets to create
        #[arg(short = 'c', long, default_value = "25")]
        count: usize,
    },
    /// Delete every snippet
    ClearSnippets,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let pool = match snippetbox_db::init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::CreateUser {
            name,
            email,
            password,
        } => handle_create_user(&pool, name, email, password).await,
        Commands::Seed { count } => handle_seed(&pool, count).await,
        Commands::ClearSnippets => handle_clear_snippets(&pool).await,
    }
}

async fn handle_migrate(pool: &PgPool) {
    match snippetbox_db::run_migrations(pool).await {
        Ok(()) => println!("✅ Migrations applied"),
        Err(e) => {
            eprintln!("\n❌ Error running migrations: {}", e);
            std::process::exit(1);
        }
    }
}

fn prompt_text(prompt: &str) -> String {
    match Input::<String>::new().with_prompt(prompt).interact_text() {
        Ok(value) => value,
        Err(e) => {
            eprintln!("❌ Failed to read {}: {}", prompt.to_lowercase(), e);
            std::process::exit(1);
        }
    }
}

async fn handle_create_user(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let name = name.unwrap_or_else(|| prompt_text("Name"));
    let email = email.unwrap_or_else(|| prompt_text("Email address"));

    let password = password.unwrap_or_else(|| {
        match Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
        {
            Ok(password) => password,
            Err(e) => {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            }
        }
    });

    if password.chars().count() < 8 {
        eprintln!("\n❌ Password must be at least 8 characters long");
        std::process::exit(1);
    }

    let store = PgUserStore::new(pool.clone());
    match store.create(&name, &email, &password).await {
        Ok(id) => {
            println!("\n✅ User created successfully!");
            println!("   ID: {}", id);
            println!("   Email: {}", email);
            println!("   Name: {}", name);
        }
        Err(ModelError::DuplicateEmail) => {
            eprintln!("\n❌ Email address is already in use: {}", email);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating user: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, count: usize) {
    if let Err(e) = seeder::seed_snippets(pool, SeedConfig::new(count)).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_clear_snippets(pool: &PgPool) {
    if let Err(e) = seeder::clear_snippets(pool).await {
        eprintln!("\n❌ Error clearing snippets: {}", e);
        std::process::exit(1);
    }
}
