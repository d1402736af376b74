use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use digitalarchive::archive::HttpOptions;
use digitalarchive::config::Config;
use digitalarchive::error::format_archive_error;
use digitalarchive::matching::{FilterValue, Filters};
use digitalarchive::model::{
    resolve_record, serialize, Collection, Contributor, Coverage, Document, Kind, PayloadShape,
    Publisher, Repository, Searchable, Subject,
};
use digitalarchive::{ArchiveClient, Hydrator};
use futures::TryStreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Version injected at compile time via DIGITALARCHIVE_VERSION env var (set by
/// CI/CD), or "dev" for local builds.
pub const VERSION: &str = match option_env!("DIGITALARCHIVE_VERSION") {
    Some(v) => v,
    None => "dev",
};

/// Search and download records from the Wilson Center Digital Archive
#[derive(Parser, Debug)]
#[command(name = "digitalarchive", version, about, long_about = None)]
struct Args {
    /// Archive root URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Search results per page
    #[arg(long, global = true)]
    page_size: Option<u32>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    accept_invalid_certs: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search one kind of record; prints one JSON object per line
    Search(SearchArgs),
    /// Fetch and hydrate one record by id (slug for themes)
    Get {
        #[arg(value_parser = parse_kind)]
        kind: Kind,
        id: String,
        /// Also hydrate nested records and download assets
        #[arg(long)]
        recurse: bool,
    },
    /// Print the earliest and latest document dates
    DateRange,
    /// Save --base-url, --page-size and --accept-invalid-certs to the config file
    Config {
        /// Turn certificate verification back on
        #[arg(long)]
        verify_certs: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct SearchArgs {
    #[arg(value_parser = parse_kind)]
    kind: Kind,
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    value: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    q: Option<String>,
    /// YYYYMMDD
    #[arg(long)]
    start_date: Option<String>,
    /// YYYYMMDD
    #[arg(long)]
    end_date: Option<String>,
    /// Related records as field=id,id (e.g. collections=35,12)
    #[arg(long = "related", value_name = "FIELD=IDS")]
    related: Vec<String>,
    /// Any other filter as name=value
    #[arg(long = "filter", value_name = "NAME=VALUE")]
    filter: Vec<String>,
    /// Print only the first match
    #[arg(long)]
    first: bool,
    /// Stop after this many records
    #[arg(long)]
    limit: Option<usize>,
    /// Hydrate each record before printing
    #[arg(long)]
    hydrate: bool,
    /// With --hydrate, also hydrate nested records
    #[arg(long)]
    recurse: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn parse_kind(raw: &str) -> std::result::Result<Kind, String> {
    let key = raw.trim().to_ascii_lowercase().replace('-', "_");
    Kind::from_key(&key).ok_or_else(|| {
        let known: Vec<&str> = Kind::ALL.iter().map(|k| k.key()).collect();
        format!("unknown kind '{}' (expected one of: {})", raw, known.join(", "))
    })
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled: cannot open {}: {}", log_path.display(), e);
            return None;
        },
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("digitalarchive {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("digitalarchive").join("digitalarchive.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".digitalarchive").join("digitalarchive.log");
    }
    PathBuf::from("digitalarchive.log")
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    if let Err(err) = run(args).await {
        tracing::error!("{:?}", err);
        eprintln!("Error: {}", format_archive_error(&err));
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load();

    if let Command::Config { verify_certs } = &args.command {
        if let Some(base_url) = &args.base_url {
            config.set_base_url(base_url)?;
        }
        if let Some(page_size) = args.page_size {
            if page_size == 0 {
                bail!("--page-size must be at least 1");
            }
            config.set_items_per_page(page_size)?;
        }
        if args.accept_invalid_certs || *verify_certs {
            config.accept_invalid_certs = Some(args.accept_invalid_certs);
            config.save()?;
        }
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let options = HttpOptions {
        user_agent: config.effective_user_agent(),
        timeout: Duration::from_secs(config.effective_timeout_secs()),
        accept_invalid_certs: config.effective_accept_invalid_certs(args.accept_invalid_certs),
    };
    let base_url = config.effective_base_url(args.base_url.as_deref());
    tracing::info!("Using archive: {}", base_url);
    let client = ArchiveClient::with_options(
        &base_url,
        config.effective_items_per_page(args.page_size),
        &options,
    )?;

    match args.command {
        Command::Search(search) => match search.kind {
            Kind::Document => run_search::<Document>(&client, &search).await,
            Kind::Collection => run_search::<Collection>(&client, &search).await,
            Kind::Subject => run_search::<Subject>(&client, &search).await,
            Kind::Coverage => run_search::<Coverage>(&client, &search).await,
            Kind::Contributor => run_search::<Contributor>(&client, &search).await,
            Kind::Repository => run_search::<Repository>(&client, &search).await,
            Kind::Publisher => run_search::<Publisher>(&client, &search).await,
            other => bail!("{} records cannot be searched", other),
        },
        Command::Get { kind, id, recurse } => {
            let def = kind.def();
            if def.endpoint.is_none() {
                bail!("{} records have no detail endpoint", kind);
            }
            let stub = serde_json::json!({ def.identity_field.clone(): id });
            let mut record = resolve_record(kind, &stub, PayloadShape::Summary)?;
            Hydrator::new(&client).hydrate_record(&mut record, recurse).await?;
            println!("{}", serde_json::to_string_pretty(&record.to_value()?)?);
            Ok(())
        },
        Command::DateRange => {
            let range = client.date_range().await?;
            println!("{} {}", range.begin, range.end);
            Ok(())
        },
        Command::Config { .. } => Ok(()),
    }
}

fn build_filters(search: &SearchArgs) -> Result<Filters> {
    let mut filters = Filters::new();
    let text_filters = [
        ("id", &search.id),
        ("name", &search.name),
        ("value", &search.value),
        ("title", &search.title),
        ("description", &search.description),
        ("q", &search.q),
        ("start_date", &search.start_date),
        ("end_date", &search.end_date),
    ];
    for (name, value) in text_filters {
        if let Some(value) = value {
            filters.insert(name, FilterValue::Text(value.clone()));
        }
    }

    for raw in &search.related {
        let (name, ids) = raw
            .split_once('=')
            .with_context(|| format!("--related expects FIELD=IDS, got '{}'", raw))?;
        let ids: Vec<String> = ids.split(',').map(|id| id.trim().to_string()).collect();
        filters.insert(name.trim(), FilterValue::Related(ids));
    }

    for raw in &search.filter {
        let (name, value) = raw
            .split_once('=')
            .with_context(|| format!("--filter expects NAME=VALUE, got '{}'", raw))?;
        filters.insert(name.trim(), FilterValue::Text(value.to_string()));
    }

    Ok(filters)
}

async fn run_search<R: Searchable>(client: &ArchiveClient, search: &SearchArgs) -> Result<()> {
    let matcher = client.matcher::<R>(build_filters(search)?).await?;
    eprintln!("{} matching {} records", matcher.count(), R::KIND);

    let hydrator = Hydrator::new(client);

    if search.first {
        let mut record = matcher.first()?;
        if search.hydrate {
            hydrator.hydrate(&mut record, search.recurse).await?;
        }
        println!("{}", serde_json::to_string(&serialize(&record)?)?);
        return Ok(());
    }

    let limit = search.limit.unwrap_or(usize::MAX);
    let mut records = matcher.all();
    let mut printed = 0;
    while printed < limit {
        let Some(mut record) = records.try_next().await? else {
            break;
        };
        if search.hydrate {
            hydrator.hydrate(&mut record, search.recurse).await?;
        }
        println!("{}", serde_json::to_string(&serialize(&record)?)?);
        printed += 1;
    }

    Ok(())
}
