// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use listing_feed::utils::logging::{format_error, format_heading, format_success};
use listing_feed::{
    Config, Envelope, HitTable, JsonlExporter, ListingTransformer, QueryBuilder, SearchHit,
    SearchMode, Uploader, Validator, VespaClient,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

const EMBEDDING_FIELD: &str = "embedding";

#[derive(Parser)]
#[command(name = "listing_feed")]
#[command(version = "0.1.0")]
#[command(about = "Convert listings exports into Vespa feed documents and query them", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "LISTING_FEED_CONFIG",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the listings CSV as newline-delimited JSON documents
    Convert {
        #[arg(short, long, value_name = "CSV")]
        input: Option<PathBuf>,

        #[arg(short, long, value_name = "JSONL")]
        output: Option<PathBuf>,

        /// Write full {put, fields} envelopes instead of field objects
        #[arg(long)]
        envelopes: bool,
    },

    /// Feed every listing to the document API, one request per document
    Upload {
        #[arg(short, long, value_name = "CSV")]
        input: Option<PathBuf>,

        #[arg(long, value_name = "NUM")]
        limit: Option<usize>,
    },

    /// Run a keyword or semantic query
    Search {
        query: String,

        #[arg(short, long, default_value = "keyword")]
        mode: SearchMode,

        #[arg(long, value_name = "NUM")]
        hits: Option<usize>,
    },

    /// Show the stored embedding of a document
    Embedding { doc_id: String },

    /// Find listings close to a document's embedding
    Similar {
        doc_id: String,

        #[arg(long, value_name = "NUM")]
        hits: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    listing_feed::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Convert {
            input,
            output,
            envelopes,
        } => {
            cmd_convert(&config, input, output, envelopes)?;
        }
        Commands::Upload { input, limit } => {
            cmd_upload(&config, input, limit, cli.color).await?;
        }
        Commands::Search { query, mode, hits } => {
            cmd_search(&config, &query, mode, hits).await?;
        }
        Commands::Embedding { doc_id } => {
            cmd_embedding(&config, &doc_id).await?;
        }
        Commands::Similar { doc_id, hits } => {
            cmd_similar(&config, &doc_id, hits).await?;
        }
    }

    Ok(())
}

fn load_envelopes(config: &Config, input: Option<PathBuf>) -> Result<Vec<Envelope>> {
    let input = input.unwrap_or_else(|| config.input.csv_path.clone());
    Validator::validate_input_file(&input)?;

    let transformer = ListingTransformer::new(config.vespa.feed_template()?);
    let envelopes = transformer
        .transform_file(&input)
        .with_context(|| format!("Failed to transform {}", input.display()))?;

    Ok(envelopes)
}

fn cmd_convert(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    envelopes: bool,
) -> Result<()> {
    let start_time = Instant::now();
    let documents = load_envelopes(config, input)?;

    let output = output.unwrap_or_else(|| config.output.jsonl_path.clone());
    let exporter = JsonlExporter::with_envelopes(envelopes || config.output.envelopes);
    let manifest = exporter
        .export_file(&documents, &output)
        .context("Failed to write JSONL output")?;

    println!(
        "{}",
        format_success(&format!(
            "Wrote {} documents to {} in {:.2}s",
            manifest.total_documents,
            manifest.output.display(),
            start_time.elapsed().as_secs_f64()
        ))
    );

    Ok(())
}

async fn cmd_upload(
    config: &Config,
    input: Option<PathBuf>,
    limit: Option<usize>,
    colored: bool,
) -> Result<()> {
    let mut documents = load_envelopes(config, input)?;
    if let Some(limit) = limit {
        documents.truncate(limit);
    }

    let client = VespaClient::new(&config.vespa).context("Failed to create Vespa client")?;
    let uploader =
        Uploader::new(&client, config.vespa.upload_template()?).with_progress(colored);

    match uploader.upload(&documents).await {
        Ok(stats) => {
            println!(
                "{}",
                format_success(&format!(
                    "Successfully uploaded {} listings to Vespa ({:.1} docs/s)",
                    stats.documents_uploaded,
                    stats.documents_per_second()
                ))
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", format_error("Upload aborted"));
            Err(e).context("Upload failed")
        }
    }
}

async fn cmd_search(
    config: &Config,
    query: &str,
    mode: SearchMode,
    hits: Option<usize>,
) -> Result<()> {
    Validator::validate_query_text(query)?;

    let builder = query_builder(config, hits)?;
    let client = VespaClient::new(&config.vespa).context("Failed to create Vespa client")?;

    info!("Running {} search for: {}", mode, query);
    let results = client
        .query(&builder.search(mode, query))
        .await
        .context("Query failed")?;

    print_hits(
        &format!("{} results for \"{}\"", mode, query),
        &results,
        &config.search.display_fields,
    );
    Ok(())
}

async fn cmd_embedding(config: &Config, doc_id: &str) -> Result<()> {
    let client = VespaClient::new(&config.vespa).context("Failed to create Vespa client")?;

    let Some(hit) = lookup_document(config, &client, doc_id).await? else {
        println!("\nNo document found with doc_id {}\n", doc_id);
        return Ok(());
    };

    match hit.embedding(EMBEDDING_FIELD) {
        Some(embedding) => println!(
            "\nDocument {} has an embedding with {} dimensions",
            doc_id,
            embedding.len()
        ),
        None => println!("\nDocument {} has no readable embedding", doc_id),
    }

    print_hits("Stored document", &[hit], &detail_fields());
    Ok(())
}

async fn cmd_similar(config: &Config, doc_id: &str, hits: Option<usize>) -> Result<()> {
    let builder = query_builder(config, hits)?;
    let client = VespaClient::new(&config.vespa).context("Failed to create Vespa client")?;

    let Some(hit) = lookup_document(config, &client, doc_id).await? else {
        println!("\nNo document found with doc_id {}\n", doc_id);
        return Ok(());
    };

    let embedding = hit
        .embedding(EMBEDDING_FIELD)
        .with_context(|| format!("Document {} has no readable embedding", doc_id))?;

    let results = client
        .query(&builder.recommendation(&embedding)?)
        .await
        .context("Recommendation query failed")?;

    print_hits(
        &format!("Listings similar to {}", doc_id),
        &results,
        &detail_fields(),
    );
    Ok(())
}

fn query_builder(config: &Config, hits: Option<usize>) -> Result<QueryBuilder> {
    let hits = hits.unwrap_or(config.search.hits);
    Validator::validate_hits(hits)?;
    Ok(QueryBuilder::from_config(&config.search).with_hits(hits))
}

async fn lookup_document(
    config: &Config,
    client: &VespaClient,
    doc_id: &str,
) -> Result<Option<SearchHit>> {
    let query = QueryBuilder::from_config(&config.search).embedding_lookup(doc_id);
    let hits = client
        .query(&query)
        .await
        .with_context(|| format!("Failed to look up document {}", doc_id))?;

    Ok(hits.into_iter().next())
}

fn detail_fields() -> Vec<String> {
    ["doc_id", "title", "text"]
        .iter()
        .map(|f| f.to_string())
        .collect()
}

fn print_hits(heading: &str, hits: &[SearchHit], fields: &[String]) {
    println!("\n{}\n", format_heading(heading));
    print!("{}", HitTable::from_hits(hits, fields));
    println!();
}
