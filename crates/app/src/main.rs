//! Storefront Application CLI

#![expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "a CLI talks to its user on stdout/stderr"
)]

use std::process;

use clap::{Args, Parser, Subcommand};

use storefront_app::{
    auth::password,
    database::{self, Db},
    domain::users::{
        PgUsersService, UsersService,
        models::{AccountUpdate, NewUser, Role, UserUuid},
    },
};

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Admin(AdminCommand),
}

#[derive(Debug, Args)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Create an admin account, or promote an existing one.
    Create(CreateAdminArgs),
}

#[derive(Debug, Args)]
struct CreateAdminArgs {
    /// Login username
    #[arg(long)]
    username: String,

    /// Account email
    #[arg(long)]
    email: String,

    /// Display name; defaults to the username
    #[arg(long)]
    name: Option<String>,

    /// Initial password; generated when omitted
    #[arg(long)]
    password: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Admin(AdminCommand {
            command: AdminSubcommand::Create(args),
        }) => create_admin(args).await,
    }
}

async fn create_admin(args: CreateAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let users = PgUsersService::new(Db::new(pool));

    // Promote instead of failing when the username is already registered.
    if let Some(existing) = users
        .find_by_login(&args.username)
        .await
        .map_err(|error| format!("failed to look up user: {error}"))?
    {
        let promoted = users
            .update_account(
                existing.uuid,
                AccountUpdate {
                    role: Some(Role::Admin),
                    is_active: Some(true),
                },
            )
            .await
            .map_err(|error| format!("failed to promote user: {error}"))?;

        println!("promoted existing user to admin");
        println!("user_uuid: {}", promoted.uuid);

        return Ok(());
    }

    let raw_password = args.password.unwrap_or_else(generate_password);

    if raw_password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let password_hash = password::hash(&raw_password)
        .map_err(|error| format!("failed to hash password: {error}"))?;

    let user = users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: args.username.clone(),
            email: args.email.to_lowercase(),
            name: args.name.unwrap_or(args.username),
            password_hash,
            role: Role::Admin,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("username: {}", user.username);
    println!("password: {raw_password}");
    println!("store this password now; it is only shown once");

    Ok(())
}

fn generate_password() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    let mut rng = rand::thread_rng();

    (0..24)
        .map(|_| {
            let index = rng.gen_range(0..CHARSET.len());
            CHARSET[index] as char
        })
        .collect()
}
