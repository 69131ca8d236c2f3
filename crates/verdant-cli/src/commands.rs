use std::sync::Arc;

use colored::Colorize;
use verdant_ingest::Ingestor;
use verdant_media::CloudinaryHost;
use verdant_server::{ApiServer, AppState};
use verdant_store::FsRecordStore;
use verdant_vcs::GitPersister;

use crate::cli::{Cli, Command, PostsArgs, ServeArgs};
use crate::config::AppConfig;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Serve(args) => serve(config, args).await,
        Command::Posts(args) => posts(config, args),
    }
}

fn build_ingestor(config: &AppConfig) -> Arc<Ingestor> {
    Arc::new(Ingestor::new(
        Arc::new(FsRecordStore::new(config.posts_root())),
        Arc::new(CloudinaryHost::new(config.cloudinary.clone())),
        Arc::new(GitPersister::new(config.git.clone())),
        config.ingest.clone(),
    ))
}

async fn serve(config: AppConfig, args: ServeArgs) -> anyhow::Result<()> {
    let mut server_config = config.server.clone();
    if let Some(bind) = args.bind {
        server_config.bind_addr = bind;
    }
    let state = AppState::new(build_ingestor(&config), server_config);
    ApiServer::new(state).serve().await?;
    Ok(())
}

fn posts(config: AppConfig, args: PostsArgs) -> anyhow::Result<()> {
    let records = build_ingestor(&config).list()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    if records.is_empty() {
        println!("{}", "no posts yet".dimmed());
        return Ok(());
    }
    for record in records {
        let draft = if record.draft {
            " (draft)".yellow().to_string()
        } else {
            String::new()
        };
        println!("{}  {}{}", record.slug.bold(), record.title, draft);
        if !record.tags.is_empty() {
            println!("    {}", record.tags.join(", ").dimmed());
        }
    }
    Ok(())
}
