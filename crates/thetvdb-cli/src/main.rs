//! thetvdb - command-line client for TheTVDB API v2.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use thetvdb_api::TvdbClient;
use thetvdb_api::model::{
    EpisodeData, EpisodeQuery, ImageQuery, RatingType, SeriesData, Token, UserRatingData,
};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Log in and print the issued token.
    Login(LoginArgs),
    /// Search for a series.
    Search(SearchArgs),
    /// Query a series.
    Series(SeriesCommand),
    /// Get an episode.
    Episode(IdArgs),
    /// List languages, or get one by ID.
    Languages(LanguagesArgs),
    /// List series updated within a time interval.
    Updates(UpdatesArgs),
    /// Manage the user account.
    User(UserCommand),
}

/// Arguments for the `login` subcommand.
#[derive(clap::Args)]
struct LoginArgs {
    /// Save the token to config.toml for later commands.
    #[arg(long)]
    save: bool,
}

/// Arguments for the `search` subcommand. Exactly one filter is required.
#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct SearchArgs {
    /// Series name (e.g. "Game of Thrones").
    #[arg(long)]
    name: Option<String>,
    /// IMDb ID (e.g. "tt0944947").
    #[arg(long)]
    imdb_id: Option<String>,
    /// Zap2it ID (e.g. "EP01231710").
    #[arg(long)]
    zap2it_id: Option<String>,
}

/// Arguments taking a single numeric ID.
#[derive(clap::Args)]
struct IdArgs {
    /// TheTVDB ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `series` subcommand.
#[derive(clap::Args)]
struct SeriesCommand {
    /// Series subcommand to run.
    #[command(subcommand)]
    command: SeriesSubcommands,
}

/// Available series subcommands.
#[derive(Subcommand)]
enum SeriesSubcommands {
    /// Get series details.
    Get(IdArgs),
    /// List actors.
    Actors(IdArgs),
    /// List episodes.
    Episodes(EpisodesArgs),
    /// Show season and episode counts.
    Summary(IdArgs),
    /// Show image counts, or list images of one key type.
    Images(ImagesArgs),
}

/// Arguments for the `series episodes` subcommand.
#[derive(clap::Args)]
struct EpisodesArgs {
    /// Series ID.
    #[arg(long, required = true)]
    id: u64,
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Filter by aired season.
    #[arg(long)]
    season: Option<u32>,
    /// Filter by aired episode number.
    #[arg(long)]
    episode: Option<u32>,
}

/// Arguments for the `series images` subcommand.
#[derive(clap::Args)]
struct ImagesArgs {
    /// Series ID.
    #[arg(long, required = true)]
    id: u64,
    /// Image key type (e.g. "poster", "fanart"). Lists images when given.
    #[arg(long)]
    key_type: Option<String>,
    /// Resolution filter (e.g. "1920x1080"). Requires --key-type.
    #[arg(long, requires = "key_type")]
    resolution: Option<String>,
}

/// Arguments for the `languages` subcommand.
#[derive(clap::Args)]
struct LanguagesArgs {
    /// Language ID. Lists all languages when omitted.
    #[arg(long)]
    id: Option<u64>,
}

/// Arguments for the `updates` subcommand.
#[derive(clap::Args)]
struct UpdatesArgs {
    /// Start of the interval.
    /// Formats: "2024-01-01T00:00:00Z", "2024-01-01 00:00:00", "2024-01-01" (UTC).
    #[arg(long, required = true)]
    from: String,
    /// End of the interval. Same formats as --from.
    #[arg(long)]
    to: Option<String>,
}

/// Arguments for the `user` subcommand.
#[derive(clap::Args)]
struct UserCommand {
    /// User subcommand to run.
    #[command(subcommand)]
    command: UserSubcommands,
}

/// Available user subcommands.
#[derive(Subcommand)]
enum UserSubcommands {
    /// Show account details.
    Info,
    /// List favorite series IDs.
    Favorites,
    /// Add a series to the favorites.
    AddFavorite(IdArgs),
    /// Remove a series from the favorites.
    RemoveFavorite(IdArgs),
    /// List ratings.
    Ratings(RatingsArgs),
}

/// Arguments for the `user ratings` subcommand.
#[derive(clap::Args)]
struct RatingsArgs {
    /// Only list ratings of this item type.
    #[arg(long, value_enum)]
    item_type: Option<ItemTypeArg>,
}

/// Rated item types accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum ItemTypeArg {
    /// Series ratings.
    Series,
    /// Episode ratings.
    Episode,
    /// Image ratings.
    Image,
}

impl From<ItemTypeArg> for RatingType {
    fn from(arg: ItemTypeArg) -> Self {
        match arg {
            ItemTypeArg::Series => Self::Series,
            ItemTypeArg::Episode => Self::Episode,
            ItemTypeArg::Image => Self::Image,
        }
    }
}

/// Loads config.toml and applies environment overrides.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<(AppConfig, PathBuf)> {
    let path = resolve_config_path(dir)?;
    let config = AppConfig::load(&path)?.with_env_overrides(|key| std::env::var(key).ok());
    Ok((config, path))
}

/// Builds an unauthenticated client from the config.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the client fails to build.
fn build_client(config: &AppConfig) -> Result<TvdbClient> {
    let mut builder = TvdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(ref base_url) = config.client.base_url {
        let url = Url::parse(base_url).with_context(|| format!("invalid base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }
    if let Some(ref language) = config.client.language {
        builder = builder.language(language);
    }
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().context("failed to build TheTVDB client")
}

/// Builds a client carrying a token: the configured one, or a fresh login.
///
/// # Errors
///
/// Returns an error if no token or API key is configured, or login fails.
#[instrument(skip_all)]
async fn authorized_client(dir: Option<&PathBuf>) -> Result<TvdbClient> {
    let (config, _) = load_config(dir)?;
    let client = build_client(&config)?;

    if let Some(ref token) = config.auth.token {
        tracing::debug!("Using configured token");
        return Ok(client.with_token(Token::new(token.as_str())));
    }

    let credentials = config.credentials()?;
    client
        .authenticate(&credentials)
        .await
        .context("TheTVDB login failed")
}

/// Parses a UTC datetime argument.
///
/// # Errors
///
/// Returns an error if `input` matches none of the accepted formats.
fn parse_time(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("invalid date: {input}"))?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .with_context(|| format!("invalid date: {input}"))
}

/// Runs the `login` subcommand.
///
/// # Errors
///
/// Returns an error if credentials are missing, login fails, or saving fails.
#[instrument(skip_all)]
async fn run_login(args: &LoginArgs, dir: Option<&PathBuf>) -> Result<()> {
    let (mut config, path) = load_config(dir)?;
    let credentials = config.credentials()?;
    let client = build_client(&config)?;

    let token = client
        .authentication()
        .login(&credentials)
        .await
        .context("TheTVDB login failed")?;

    if args.save {
        config.auth.token = Some(String::from(token.as_str()));
        config.save(&path)?;
        tracing::info!("Token saved to {}", path.display());
    } else {
        tracing::info!("{}", token.as_str());
    }

    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if authentication or the search request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = authorized_client(dir).await?;
    let search = client.search();

    let series = if let Some(ref name) = args.name {
        search.series_by_name(name).await
    } else if let Some(ref imdb_id) = args.imdb_id {
        search.series_by_imdb_id(imdb_id).await
    } else if let Some(ref zap2it_id) = args.zap2it_id {
        search.series_by_zap2it_id(zap2it_id).await
    } else {
        bail!("one of --name, --imdb-id or --zap2it-id is required");
    }
    .context("TheTVDB search request failed")?;

    print_series(&series);
    Ok(())
}

/// Logs one series.
fn print_series(series: &SeriesData) {
    tracing::info!("ID:          {}", series.id);
    tracing::info!("Name:        {}", series.series_name.as_deref().unwrap_or("-"));
    tracing::info!("Network:     {}", series.network.as_deref().unwrap_or("-"));
    tracing::info!("Status:      {}", series.status.as_deref().unwrap_or("-"));
    tracing::info!("FirstAired:  {}", series.first_aired.as_deref().unwrap_or("-"));
    tracing::info!("IMDb:        {}", series.imdb_id.as_deref().unwrap_or("-"));
    tracing::info!("Genre:       {}", series.genre.join(", "));
    if let Some(ref overview) = series.overview {
        tracing::info!("Overview:    {overview}");
    }
}

/// Logs episode rows.
fn print_episodes(episodes: &[EpisodeData]) {
    tracing::info!("ID\t\tSeason\tEpisode\tFirstAired\tName");
    for episode in episodes {
        tracing::info!(
            "{}\t\t{}\t{}\t{}\t{}",
            episode.id,
            episode
                .aired_season
                .map_or_else(|| String::from("-"), |v| v.to_string()),
            episode
                .aired_episode_number
                .map_or_else(|| String::from("-"), |v| v.to_string()),
            episode.first_aired.as_deref().unwrap_or("-"),
            episode.episode_name.as_deref().unwrap_or("-"),
        );
    }
}

/// Runs the `series` subcommands.
///
/// # Errors
///
/// Returns an error if authentication or the API request fails.
#[instrument(skip_all)]
async fn run_series(command: &SeriesSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let client = authorized_client(dir).await?;
    let series = client.series();

    match command {
        SeriesSubcommands::Get(args) => {
            let data = series
                .get(args.id)
                .await
                .context("TheTVDB series request failed")?;
            print_series(&data);
        }
        SeriesSubcommands::Actors(args) => {
            let actors = series
                .actors(args.id)
                .await
                .context("TheTVDB actors request failed")?;
            tracing::info!("ID\tName\t\t\tRole");
            for actor in &actors {
                tracing::info!(
                    "{}\t{}\t\t{}",
                    actor.id,
                    actor.name.as_deref().unwrap_or("-"),
                    actor.role.as_deref().unwrap_or("-"),
                );
            }
            tracing::info!("Total: {} actors", actors.len());
        }
        SeriesSubcommands::Episodes(args) => {
            let page = if args.season.is_some() || args.episode.is_some() {
                let mut query = EpisodeQuery::new().page(args.page);
                if let Some(season) = args.season {
                    query = query.aired_season(season);
                }
                if let Some(episode) = args.episode {
                    query = query.aired_episode(episode);
                }
                series.episodes_with_query(args.id, &query).await
            } else {
                series.episodes(args.id, args.page).await
            }
            .context("TheTVDB episodes request failed")?;

            print_episodes(&page.episodes);
            tracing::info!(
                "Page {} of {}",
                args.page,
                page.links
                    .last
                    .map_or_else(|| String::from("?"), |v| v.to_string()),
            );
        }
        SeriesSubcommands::Summary(args) => {
            let summary = series
                .episodes_summary(args.id)
                .await
                .context("TheTVDB episode summary request failed")?;
            tracing::info!("Aired seasons:  {}", summary.aired_seasons.join(", "));
            tracing::info!(
                "Aired episodes: {}",
                summary.aired_episodes.as_deref().unwrap_or("-")
            );
            tracing::info!("DVD seasons:    {}", summary.dvd_seasons.join(", "));
            tracing::info!(
                "DVD episodes:   {}",
                summary.dvd_episodes.as_deref().unwrap_or("-")
            );
        }
        SeriesSubcommands::Images(args) => {
            if let Some(ref key_type) = args.key_type {
                let mut query = ImageQuery::new(key_type.as_str());
                if let Some(ref resolution) = args.resolution {
                    query = query.resolution(resolution.as_str());
                }
                let images = series
                    .images_with_query(args.id, &query)
                    .await
                    .context("TheTVDB images request failed")?;
                tracing::info!("ID\t\tResolution\tFile");
                for image in &images {
                    tracing::info!(
                        "{}\t{}\t{}",
                        image.id,
                        image.resolution.as_deref().unwrap_or("-"),
                        image.file_name.as_deref().unwrap_or("-"),
                    );
                }
                tracing::info!("Total: {} images", images.len());
            } else {
                let stats = series
                    .images(args.id)
                    .await
                    .context("TheTVDB images request failed")?;
                let count = |v: Option<u32>| v.map_or_else(|| String::from("0"), |n| n.to_string());
                tracing::info!("fanart:     {}", count(stats.fanart));
                tracing::info!("poster:     {}", count(stats.poster));
                tracing::info!("season:     {}", count(stats.season));
                tracing::info!("seasonwide: {}", count(stats.seasonwide));
                tracing::info!("series:     {}", count(stats.series));
            }
        }
    }

    Ok(())
}

/// Runs the `episode` subcommand.
///
/// # Errors
///
/// Returns an error if authentication or the API request fails.
#[instrument(skip_all)]
async fn run_episode(args: &IdArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = authorized_client(dir).await?;
    let episode = client
        .episodes()
        .get(args.id)
        .await
        .context("TheTVDB episode request failed")?;

    print_episodes(std::slice::from_ref(&episode));
    if let Some(ref overview) = episode.overview {
        tracing::info!("Overview: {overview}");
    }
    Ok(())
}

/// Runs the `languages` subcommand.
///
/// # Errors
///
/// Returns an error if authentication or the API request fails.
#[instrument(skip_all)]
async fn run_languages(args: &LanguagesArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = authorized_client(dir).await?;
    let languages = if let Some(id) = args.id {
        vec![
            client
                .languages()
                .get(id)
                .await
                .context("TheTVDB language request failed")?,
        ]
    } else {
        client
            .languages()
            .all()
            .await
            .context("TheTVDB languages request failed")?
    };

    tracing::info!("ID\tAbbr\tName\t\tEnglishName");
    for language in &languages {
        tracing::info!(
            "{}\t{}\t{}\t\t{}",
            language.id,
            language.abbreviation.as_deref().unwrap_or("-"),
            language.name.as_deref().unwrap_or("-"),
            language.english_name.as_deref().unwrap_or("-"),
        );
    }
    tracing::info!("Total: {} languages", languages.len());
    Ok(())
}

/// Runs the `updates` subcommand.
///
/// # Errors
///
/// Returns an error if a date is invalid, or authentication or the API
/// request fails.
#[instrument(skip_all)]
async fn run_updates(args: &UpdatesArgs, dir: Option<&PathBuf>) -> Result<()> {
    let from = parse_time(&args.from)?;
    let to = args.to.as_deref().map(parse_time).transpose()?;
    if let Some(to) = to
        && to < from
    {
        bail!("--to must not be before --from");
    }

    let client = authorized_client(dir).await?;
    let updates = client
        .updates()
        .query(from, to)
        .await
        .context("TheTVDB updates request failed")?;

    tracing::info!("SeriesID\tLastUpdated");
    for update in &updates {
        let when = DateTime::from_timestamp(update.last_updated, 0).map_or_else(
            || update.last_updated.to_string(),
            |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        tracing::info!("{}\t\t{}", update.id, when);
    }
    tracing::info!("Total: {} updated series", updates.len());
    Ok(())
}

/// Logs rating rows.
fn print_ratings(ratings: &[UserRatingData]) {
    tracing::info!("Type\tItemID\t\tRating");
    for rating in ratings {
        tracing::info!(
            "{}\t{}\t\t{}",
            rating.rating_type.as_deref().unwrap_or("-"),
            rating
                .rating_item_id
                .map_or_else(|| String::from("-"), |v| v.to_string()),
            rating
                .rating
                .map_or_else(|| String::from("-"), |v| v.to_string()),
        );
    }
    tracing::info!("Total: {} ratings", ratings.len());
}

/// Runs the `user` subcommands.
///
/// # Errors
///
/// Returns an error if authentication or the API request fails.
#[instrument(skip_all)]
async fn run_user(command: &UserSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let client = authorized_client(dir).await?;
    let users = client.users();

    match command {
        UserSubcommands::Info => {
            let user = users.get().await.context("TheTVDB user request failed")?;
            tracing::info!("User:     {}", user.user_name.as_deref().unwrap_or("-"));
            tracing::info!("Language: {}", user.language.as_deref().unwrap_or("-"));
            tracing::info!(
                "Display:  {}",
                user.favorites_displaymode.as_deref().unwrap_or("-")
            );
        }
        UserSubcommands::Favorites => {
            let favorites = users
                .favorites()
                .await
                .context("TheTVDB favorites request failed")?;
            for id in &favorites.favorites {
                tracing::info!("{id}");
            }
            tracing::info!("Total: {} favorites", favorites.favorites.len());
        }
        UserSubcommands::AddFavorite(args) => {
            let favorites = users
                .add_favorite(args.id)
                .await
                .with_context(|| format!("failed to add series {} to favorites", args.id))?;
            tracing::info!(
                "Added {} ({} favorites)",
                args.id,
                favorites.favorites.len()
            );
        }
        UserSubcommands::RemoveFavorite(args) => {
            let favorites = users
                .remove_favorite(args.id)
                .await
                .with_context(|| format!("failed to remove series {} from favorites", args.id))?;
            tracing::info!(
                "Removed {} ({} favorites)",
                args.id,
                favorites.favorites.len()
            );
        }
        UserSubcommands::Ratings(args) => {
            let ratings = match args.item_type {
                Some(item_type) => users.ratings_with_query(item_type.into()).await,
                None => users.ratings().await,
            }
            .context("TheTVDB ratings request failed")?;
            print_ratings(&ratings);
        }
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Login(args) => run_login(&args, dir).await,
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Series(cmd) => run_series(&cmd.command, dir).await,
        Commands::Episode(args) => run_episode(&args, dir).await,
        Commands::Languages(args) => run_languages(&args, dir).await,
        Commands::Updates(args) => run_updates(&args, dir).await,
        Commands::User(cmd) => run_user(&cmd.command, dir).await,
    }
}
