use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "welcomer", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect to the chat platform and greet new members (default).
    Run(RunArgs),
    /// Render a single welcome card to a PNG without connecting anywhere.
    Render(RenderArgs),
}

#[derive(Parser, Debug, Default)]
struct RunArgs {
    /// Directory holding the background, avatar, overlay and font assets.
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Directory for the transient card files.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Name written into the greeting.
    #[arg(long)]
    name: String,

    /// Avatar image to place top-left; omitted means "no custom avatar".
    #[arg(long)]
    avatar: Option<PathBuf>,

    /// Directory holding the background, avatar, overlay and font assets.
    #[arg(long, default_value = ".")]
    assets_dir: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.cmd.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => cmd_run(args).await,
        Command::Render(args) => cmd_render(args),
    }
}

async fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = welcomer::BotConfig::from_env()?;
    if let Some(dir) = args.assets_dir {
        config = config.with_assets_dir(dir);
    }
    if let Some(dir) = args.output_dir {
        config = config.with_output_dir(dir);
    }

    tracing::info!(
        guild = %config.guild_id,
        channel = %config.welcome_channel_id,
        "starting welcomer"
    );
    welcomer::run(config).await?;
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let avatar = args
        .avatar
        .as_deref()
        .map(welcomer::load_rgba)
        .transpose()
        .with_context(|| "load avatar")?;

    let compositor = welcomer::Compositor::new(
        welcomer::AssetPaths::in_dir(&args.assets_dir),
        std::env::temp_dir(),
    );
    let canvas = compositor.compose(avatar.as_ref(), &args.name)?;
    welcomer::Compositor::write_png(&canvas, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
