// CLI modules
mod cli;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Ai, Daemon, File, Health, Init, Login, Logout, Project, Register, Tree, Version};

command_enum! {
    (Init, Init),
    (Daemon, Daemon),
    (Health, Health),
    (Version, Version),
    (Register, Register),
    (Login, Login),
    (Logout, Logout),
    (Project, Project),
    (File, File),
    (Ai, Ai),
    (Tree, Tree),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Resolve remote URL: explicit flag > config api_port > hardcoded 5001
    let remote = cli::op::resolve_remote(args.remote, args.config_path.clone());

    let ctx = match cli::op::OpContext::new(remote, args.config_path) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to create API client: {}", e);
            std::process::exit(1);
        }
    };

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
