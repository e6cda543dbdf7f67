use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use mp_app::{EditorSession, FileClipboard, WriterSession};
use mp_core::{
    decode_data_url, themes, ImageGenAspectRatio, ImageModelTier, ImageRatio, ImageRequest, ImageResolution,
    InferenceModel,
};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct LookArgs {
    /// Theme id (see `mpfmt themes`)
    #[arg(long, default_value = "minimalist")]
    pub theme: String,
    /// Crop applied to every image: original, 1:1 or 4:3
    #[arg(long, default_value = "original")]
    pub ratio: ImageRatio,
    /// Where preview.html and preview.txt are written
    #[arg(long, default_value = "out")]
    pub out_dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ImageArgs {
    #[arg(long, default_value = "1K")]
    pub resolution: ImageResolution,
    #[arg(long, default_value = "4:3")]
    pub aspect_ratio: ImageGenAspectRatio,
    #[arg(long, default_value = "flash")]
    pub tier: ImageModelTier,
}

impl ImageArgs {
    fn request(&self, prompt: &str) -> ImageRequest {
        ImageRequest {
            prompt: prompt.to_string(),
            resolution: self.resolution,
            aspect_ratio: self.aspect_ratio,
            tier: self.tier,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available themes
    Themes,
    /// Structure a text file and write the themed preview
    Format {
        /// Raw article text
        input: PathBuf,
        /// Local images, registered as IMG-1, IMG-2, ... in order
        #[arg(long = "image")]
        images: Vec<PathBuf>,
        /// Generate an image from this prompt and append its tag to the text
        #[arg(long = "generate")]
        prompts: Vec<String>,
        #[command(flatten)]
        look: LookArgs,
        #[command(flatten)]
        image: ImageArgs,
        /// Also print the structured blocks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a single image and save it to a file
    Image {
        prompt: String,
        #[arg(long, short, default_value = "image.png")]
        output: PathBuf,
        #[command(flatten)]
        image: ImageArgs,
    },
    /// Draft an article on a topic and keep it in the history
    Write {
        #[arg(long)]
        topic: String,
        #[arg(long, default_value = "")]
        context: String,
        /// Disable search grounding
        #[arg(long)]
        no_search: bool,
        /// Import the draft into the editor, format it and write the preview here
        #[arg(long)]
        format_to: Option<PathBuf>,
    },
    /// Browse the article history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    List,
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    Delete {
        id: String,
    },
    /// Format a history entry and write its preview
    Import {
        id: String,
        #[command(flatten)]
        look: LookArgs,
    },
}

fn apply_look(editor: &mut EditorSession, look: &LookArgs) -> Result<()> {
    editor.select_theme(&look.theme).with_context(|| {
        let ids: Vec<_> = themes::all().iter().map(|t| t.id).collect();
        format!("valid themes: {}", ids.join(", "))
    })?;
    editor.set_ratio(look.ratio);
    Ok(())
}

async fn format_and_export(editor: &mut EditorSession, model: &dyn InferenceModel, out_dir: &Path) -> Result<()> {
    let count = editor.format(model).await?;
    let clipboard = FileClipboard::new(out_dir);
    editor.copy_to(&clipboard).await?;
    info!("✨ Formatted {} blocks into {}", count, clipboard.html_path().display());
    Ok(())
}

pub async fn handle_command(
    command: Commands,
    model: &dyn InferenceModel,
    writer: impl std::future::Future<Output = mp_core::Result<WriterSession>>,
) -> Result<()> {
    match command {
        Commands::Themes => {
            for theme in themes::all() {
                println!("{:<12} {} - {}", theme.id, theme.name, theme.description);
            }
        }
        Commands::Format {
            input,
            images,
            prompts,
            look,
            image,
            json,
        } => {
            let text = tokio::fs::read_to_string(&input)
                .await
                .with_context(|| format!("failed to read {}", input.display()))?;

            let mut editor = EditorSession::new();
            editor.set_text(text);
            apply_look(&mut editor, &look)?;
            for path in &images {
                let asset = editor
                    .attach_image_file(path)
                    .await
                    .with_context(|| format!("failed to load image {}", path.display()))?;
                info!("🖼️ Registered {} as {}", path.display(), asset.tag());
            }
            for prompt in &prompts {
                editor.insert_at_cursor("\n");
                if let Some(tag) = editor.generate_image(model, &image.request(prompt)).await? {
                    info!("🎨 Generated {} for '{}'", tag, prompt);
                }
            }

            format_and_export(&mut editor, model, &look.out_dir).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(editor.blocks())?);
            }
        }
        Commands::Image { prompt, output, image } => {
            let mut editor = EditorSession::new();
            editor.set_text("");
            let Some(tag) = editor.generate_image(model, &image.request(&prompt)).await? else {
                anyhow::bail!("prompt is empty");
            };
            let data = editor
                .document()
                .images
                .resolve_tag(&tag)
                .context("generated image was not registered")?;
            let (mime, bytes) = decode_data_url(data)?;
            tokio::fs::write(&output, bytes).await?;
            info!("🎨 Saved {} image to {}", mime, output.display());
        }
        Commands::Write {
            topic,
            context,
            no_search,
            format_to,
        } => {
            let mut writer = writer.await?;
            writer.topic = topic;
            writer.context = context;
            writer.use_search = !no_search;

            let article = writer.write(model).await?;
            println!("# {}\n\n{}", article.title, article.content);
            if !article.sources.is_empty() {
                println!("\nSources:");
                for source in &article.sources {
                    println!("- {} <{}>", source.title, source.uri);
                }
            }
            info!("📝 Saved '{}' as {}", article.title, article.id);

            if let Some(out_dir) = format_to {
                let mut editor = EditorSession::new();
                writer.import_to_editor(&mut editor);
                format_and_export(&mut editor, model, &out_dir).await?;
            }
        }
        Commands::History { command } => {
            let mut writer = writer.await?;
            match command {
                HistoryCommands::List => {
                    if writer.history().is_empty() {
                        println!("No history yet");
                    }
                    for article in writer.history().entries() {
                        println!(
                            "{}  {}  {}",
                            article.id,
                            article.timestamp.format("%Y-%m-%d %H:%M"),
                            article.title
                        );
                    }
                }
                HistoryCommands::Show { id, json } => {
                    let article = writer.load(&id)?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(article)?);
                    } else {
                        println!("# {}\n\n{}", article.title, article.content);
                    }
                }
                HistoryCommands::Delete { id } => {
                    let removed = writer.delete(&id).await?;
                    info!("🗑️ Deleted '{}'", removed.title);
                }
                HistoryCommands::Import { id, look } => {
                    writer.load(&id)?;
                    let mut editor = EditorSession::new();
                    apply_look(&mut editor, &look)?;
                    writer.import_to_editor(&mut editor);
                    format_and_export(&mut editor, model, &look.out_dir).await?;
                }
            }
        }
    }
    Ok(())
}
