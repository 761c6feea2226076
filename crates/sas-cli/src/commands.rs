use colored::Colorize;
use sas_server::{seed_demo, InMemoryBackends, SasServer, ServerConfig};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    match cli.command {
        Command::Serve(args) => cmd_serve(config, args).await,
        Command::Config => cmd_config(&config),
    }
}

async fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    config.validate()?;

    let backends = InMemoryBackends::new(&config);
    if args.demo {
        let accounts = seed_demo(&backends, &config).await?;
        println!("{} Demo data seeded", "✓".green().bold());
        println!("  Client key:   {}", accounts.client.client_id.cyan());
        println!("  Owner token:  {} ({})", accounts.owner_token.yellow(), accounts.owner);
        println!("  Other token:  {} ({})", accounts.other_token.yellow(), accounts.other);
    }

    tracing::info!(bind = %config.bind_addr, base_url = %config.base_url, "starting server");
    println!(
        "SAS server on {} ({})",
        config.bind_addr.to_string().bold(),
        config.base_url
    );
    SasServer::new(backends.state(config)).serve().await?;
    Ok(())
}

fn cmd_config(config: &ServerConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
