use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use mp_app::WriterSession;
use mp_inference::prelude::*;
use tracing::{debug, info};

mod cli;
mod logging;

use cli::{handle_command, Commands};
use logging::init_logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Format articles into WeChat-ready HTML", long_about = None)]
pub struct Cli {
    /// Gemini API key (falls back to API_KEY)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "MPFMT_MODEL", default_value = "gemini", help = "Model to use for inference. Available models: gemini (default), dummy")]
    model: String,
    #[arg(long, env = "MPFMT_BASE_URL")]
    base_url: Option<String>,
    #[arg(long, env = "MPFMT_STORAGE", default_value = "file", help = "History backend: memory, file (default), sqlite")]
    storage: String,
    #[arg(long, env = "MPFMT_HISTORY_PATH")]
    history_path: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config(&self) -> Config {
        let env = Config::from_env();
        Config {
            api_key: self.api_key.clone().or(env.api_key),
            model_name: Some(self.model.clone()),
            base_url: self.base_url.clone().or(env.base_url),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config();
    debug!("Using {:?}", config);
    let model = create_model(Some(config)).await?;
    info!("🤖 Using {} model", model.name());

    let storage = cli.storage.clone();
    let history_path = cli.history_path.clone();
    let writer = async move {
        let store = mp_storage::create_storage(&storage, history_path).await?;
        WriterSession::open(store).await
    };

    handle_command(cli.command, model.as_ref(), writer).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_format_command() {
        let cli = Cli::try_parse_from([
            "mpfmt", "--model", "dummy", "format", "post.txt", "--image", "a.png", "--image", "b.jpg", "--theme",
            "tech", "--ratio", "1:1",
        ])
        .unwrap();
        assert_eq!(cli.model, "dummy");
        match cli.command {
            Commands::Format { images, look, .. } => {
                assert_eq!(images.len(), 2);
                assert_eq!(look.theme, "tech");
                assert_eq!(look.ratio, mp_core::ImageRatio::Square);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_ratio() {
        assert!(Cli::try_parse_from(["mpfmt", "format", "post.txt", "--ratio", "3:2"]).is_err());
    }

    #[tokio::test]
    async fn test_format_command_writes_preview() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("post.txt");
        std::fs::write(&input, "# Hello\n\nWorld [IMG-1]\n\n1. first").unwrap();
        let image = dir.path().join("pic.png");
        std::fs::write(&image, [1u8, 2, 3]).unwrap();
        let out_dir = dir.path().join("out");

        let cli = Cli::try_parse_from([
            "mpfmt",
            "--model",
            "dummy",
            "format",
            input.to_str().unwrap(),
            "--image",
            image.to_str().unwrap(),
            "--out-dir",
            out_dir.to_str().unwrap(),
        ])
        .unwrap();
        let model = create_model(Some(cli.config())).await.unwrap();
        let writer = async { WriterSession::open(std::sync::Arc::new(mp_storage::MemoryHistoryStore::new())).await };
        handle_command(cli.command, model.as_ref(), writer).await.unwrap();

        let html = std::fs::read_to_string(out_dir.join("preview.html")).unwrap();
        assert!(html.contains(">Hello</h1>"));
        assert!(html.contains("data:image/png;base64,AQID"));
        let text = std::fs::read_to_string(out_dir.join("preview.txt")).unwrap();
        assert!(text.contains("1. first"));
    }

    #[tokio::test]
    async fn test_write_then_history_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let history_path = dir.path().join("history.json");
        let model = create_model(Some(Config {
            model_name: Some("dummy".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();

        let open = |path: PathBuf| async move {
            let store = mp_storage::create_storage("file", Some(path)).await?;
            WriterSession::open(store).await
        };

        let cli = Cli::try_parse_from(["mpfmt", "write", "--topic", "Sleep", "--no-search"]).unwrap();
        handle_command(cli.command, model.as_ref(), open(history_path.clone())).await.unwrap();

        let writer = open(history_path.clone()).await.unwrap();
        assert_eq!(writer.history().len(), 1);
        let id = writer.history().entries()[0].id.clone();

        let cli = Cli::try_parse_from(["mpfmt", "history", "delete", &id]).unwrap();
        handle_command(cli.command, model.as_ref(), open(history_path.clone())).await.unwrap();
        assert!(open(history_path).await.unwrap().history().is_empty());
    }
}
