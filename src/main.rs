use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;

use learnhub::learnhub_auth::{Role, UserStatus, create_access_token};
use learnhub::learnhub_config::{CorsConfig, JwtConfig, ServerConfig};
use learnhub::modules::users::CreateUserDto;
use learnhub::modules::users::service::UserService;
use learnhub::router::init_router;
use learnhub::routes::RouteTable;
use learnhub::state::AppState;

#[derive(Parser)]
#[command(name = "learnhub")]
#[command(about = "LearnHub API server and development tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve(ServeArgs),
    /// Print the route protection table
    Routes,
    /// Mint an access token signed with JWT_SECRET
    Token {
        /// Subject (user id) of the token
        #[arg(short = 's', long)]
        sub: String,

        /// STUDENT, INSTRUCTOR, ADMIN or SUPER_ADMIN
        #[arg(short = 'r', long)]
        role: Role,
    },
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Create a super admin with this email on startup
    #[arg(long, requires = "super_admin_password")]
    super_admin_email: Option<String>,

    /// Password for the bootstrap super admin
    #[arg(long)]
    super_admin_password: Option<String>,

    /// Display name for the bootstrap super admin
    #[arg(long, default_value = "Super Admin")]
    super_admin_name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        None => serve(ServeArgs::default()).await,
        Some(Commands::Serve(args)) => serve(args).await,
        Some(Commands::Routes) => print_routes(),
        Some(Commands::Token { sub, role }) => print_token(&sub, role),
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    learnhub::logging::init_tracing()?;

    let jwt_config = JwtConfig::from_env().context("Invalid JWT configuration")?;
    let server_config = ServerConfig::from_env().context("Invalid server configuration")?;
    let cors_config = CorsConfig::from_env().context("Invalid CORS configuration")?;
    let state = AppState::new(jwt_config, cors_config)?;

    if let (Some(email), Some(password)) = (args.super_admin_email, args.super_admin_password) {
        let admin = UserService::create_user(
            &state.store,
            CreateUserDto {
                name: args.super_admin_name,
                email,
                password,
            },
            Role::SuperAdmin,
            state.password_cost,
        )
        .await?;
        info!(user_id = %admin.id, email = %admin.email, "Bootstrap super admin created");
    }

    let app = init_router(state)?;

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!("Server running on http://{address}");
    info!("Swagger UI available at http://{address}/swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

fn print_routes() -> anyhow::Result<()> {
    let table = RouteTable::standard()?;

    println!("{:<24} {:<7} {:<36} ROLES", "ID", "METHOD", "PATH");
    for route in table.iter() {
        println!(
            "{:<24} {:<7} {:<36} {}",
            route.declaration.id,
            route.declaration.method,
            route.declaration.path,
            route.gate.permitted()
        );
    }

    Ok(())
}

fn print_token(sub: &str, role: Role) -> anyhow::Result<()> {
    let jwt_config = JwtConfig::from_env().context("Invalid JWT configuration")?;
    let token = create_access_token(sub, role, UserStatus::Active, &jwt_config)?;
    println!("{token}");
    Ok(())
}
