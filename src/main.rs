use clap::Parser;
use swot::cli::{
    handle_add, handle_delete, handle_export, handle_generate, handle_list, handle_serve,
    handle_show, handle_theme, Cli, Commands,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add {
            title,
            content,
            source,
            stdin,
            json,
        } => handle_add(title, content, source, stdin, json).await,
        Commands::Generate {
            text,
            file,
            stdin,
            images,
            json,
        } => handle_generate(text, file, stdin, images, json).await,
        Commands::List { json } => handle_list(json).await,
        Commands::Show { id, json } => handle_show(id, json).await,
        Commands::Delete { id, force } => handle_delete(id, force).await,
        Commands::Export { id, html, out } => handle_export(id, html, out).await,
        Commands::Theme { mode } => handle_theme(mode).await,
        Commands::Serve { port } => handle_serve(port).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
