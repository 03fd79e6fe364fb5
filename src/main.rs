use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use hippo_core::bootstrap::{build_hippocampus, create_embedding_provider, create_provider};
use hippo_core::config::Config;
use hippo_core::vault::EnvVaultProvider;
use hippo_llm::LlmProvider;
use hippo_llm::provider::Message;
use hippo_memory::{Document, TextSplitter};
use tokio::io::AsyncReadExt;

/// Split documents into chunks and attach embedding vectors.
#[derive(Parser, Debug)]
#[command(name = "hippo", version, about)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(
        long,
        env = "HIPPO_CONFIG",
        default_value = hippo_core::config::DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split documents into chunks. Reads a JSON array from FILE or stdin.
    Chunk { file: Option<PathBuf> },
    /// Chunk documents, then attach an embedding vector to every chunk.
    Embed { file: Option<PathBuf> },
    /// Send a single user prompt to the configured chat provider.
    Chat { prompt: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)?;
    config.validate()?;
    config.resolve_secrets(&EnvVaultProvider).await?;

    match cli.command {
        Command::Chunk { file } => {
            let documents = read_documents(file.as_deref()).await?;
            let splitter = TextSplitter::new(config.splitter_config())?;
            let chunks = splitter.make_chunks(documents);
            tracing::info!(chunks = chunks.len(), "chunking complete");
            print_documents(&chunks)?;
        }
        Command::Embed { file } => {
            let documents = read_documents(file.as_deref()).await?;
            let provider = create_embedding_provider(&config)?;
            tracing::info!(provider = provider.name(), "embedding documents");
            let hippocampus = build_hippocampus(&config, &provider)?;
            let prepared = hippocampus.prepare(documents).await?;
            tracing::info!(chunks = prepared.len(), "embedding complete");
            print_documents(&prepared)?;
        }
        Command::Chat { prompt } => {
            let provider = create_provider(&config)?;
            tracing::info!(provider = provider.name(), "sending chat request");
            let reply = provider.chat(&[Message::user(prompt)]).await?;
            println!("{reply}");
        }
    }

    Ok(())
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn read_documents(file: Option<&Path>) -> anyhow::Result<Vec<Document>> {
    let raw = match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read stdin")?;
            buf
        }
    };
    parse_documents(&raw)
}

fn parse_documents(raw: &str) -> anyhow::Result<Vec<Document>> {
    serde_json::from_str(raw).context("input must be a JSON array of documents")
}

fn print_documents(documents: &[Document]) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(documents)?;
    println!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_chunk_with_file_and_config() {
        let cli =
            Cli::try_parse_from(["hippo", "--config", "x.toml", "chunk", "docs.json"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("x.toml"));
        assert!(
            matches!(cli.command, Command::Chunk { file: Some(ref p) } if p == Path::new("docs.json"))
        );
    }

    #[test]
    fn parses_chat_prompt() {
        let cli = Cli::try_parse_from(["hippo", "chat", "hello there"]).unwrap();
        assert!(matches!(cli.command, Command::Chat { ref prompt } if prompt == "hello there"));
    }

    #[test]
    fn parse_documents_defaults_missing_fields() {
        let docs = parse_documents(r#"[{"content": "foo bar"}]"#).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "foo bar");
        assert!(docs[0].metadata.is_empty());
        assert!(docs[0].vector.is_none());
    }

    #[test]
    fn parse_documents_rejects_object() {
        let err = parse_documents(r#"{"content": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("JSON array"));
    }

    #[tokio::test]
    async fn read_documents_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        std::fs::write(&path, r#"[{"content": "a", "metadata": {"info": "test"}}]"#).unwrap();

        let docs = read_documents(Some(&path)).await.unwrap();
        assert_eq!(docs[0].metadata["info"], "test");
    }

    #[tokio::test]
    async fn read_documents_missing_file_errors() {
        let err = read_documents(Some(Path::new("/nonexistent/docs.json")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
