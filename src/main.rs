use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use rhapcli::{
    cli, config, error,
    types::{ArtistImageSize, ChartRange},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Log requests and response bodies
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in, refresh or log out
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Show an album with its tracks
    Album { id: String },

    /// Show an artist
    Artist(ArtistOptions),

    /// List all genres
    Genres,

    /// New releases: curated, by genre or by artist
    Releases(ReleasesOptions),

    /// Show your account
    Account,

    /// Handle your library
    #[command(subcommand)]
    Library(LibraryCommand),

    /// Your most played tracks, artists or albums
    Charts(ChartsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Log in with your Rhapsody member account
    Login {
        #[clap(long, short)]
        username: String,

        /// Falls back to RHAPSODY_PASSWORD
        #[clap(long, short)]
        password: Option<String>,
    },
    /// Get a new access token
    Refresh,
    /// Forget the stored authorization
    Logout,
    /// Show whether you are logged in
    Status,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistOptions {
    id: String,

    /// Also print the biography
    #[clap(long)]
    bio: bool,

    #[clap(long, value_enum)]
    image_size: Option<ArtistImageSize>,
}

#[derive(Parser, Debug, Clone)]
pub struct ReleasesOptions {
    /// New releases of a genre (e.g. g.115)
    #[clap(long, conflicts_with = "artist")]
    genre: Option<String>,

    /// New releases of an artist
    #[clap(long)]
    artist: Option<String>,

    /// Personalize the curated list for this member id
    #[clap(long, conflicts_with_all = ["genre", "artist"])]
    user: Option<String>,

    #[clap(long)]
    limit: Option<u32>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LibraryCommand {
    /// List artists in your library
    Artists {
        #[clap(long)]
        limit: Option<u32>,
    },
    /// List albums in your library
    Albums {
        /// Only albums of this artist
        #[clap(long)]
        artist: Option<String>,

        #[clap(long)]
        limit: Option<u32>,
    },
    /// Add an album to your library
    Add { id: String },
    /// Remove an album from your library
    Remove { id: String },
}

#[derive(Parser, Debug, Clone)]
pub struct ChartsOptions {
    #[clap(value_enum)]
    kind: cli::ChartKind,

    #[clap(long, value_enum, default_value_t = ChartRange::Life)]
    range: ChartRange,

    #[clap(long)]
    limit: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let sdk = cli::connect(cli.verbose).await;

    match cli.command {
        Command::Auth(cmd) => match cmd {
            AuthCommand::Login { username, password } => {
                cli::login(&sdk, &username, password).await
            }
            AuthCommand::Refresh => cli::refresh(&sdk).await,
            AuthCommand::Logout => cli::logout(&sdk).await,
            AuthCommand::Status => cli::status(&sdk).await,
        },
        Command::Album { id } => cli::album(&sdk, &id).await,
        Command::Artist(opt) => cli::artist(&sdk, &opt.id, opt.bio, opt.image_size).await,
        Command::Genres => cli::genres(&sdk).await,
        Command::Releases(opt) => {
            cli::releases(&sdk, opt.genre, opt.artist, opt.user, opt.limit).await
        }
        Command::Account => cli::account(&sdk).await,
        Command::Library(cmd) => match cmd {
            LibraryCommand::Artists { limit } => cli::library_artists(&sdk, limit).await,
            LibraryCommand::Albums { artist, limit } => {
                cli::library_albums(&sdk, artist, limit).await
            }
            LibraryCommand::Add { id } => cli::add_album(&sdk, &id).await,
            LibraryCommand::Remove { id } => cli::remove_album(&sdk, &id).await,
        },
        Command::Charts(opt) => cli::charts(&sdk, opt.kind, opt.range, opt.limit).await,
        Command::Completions(_) => {}
    }
}
