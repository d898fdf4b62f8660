use clap::Parser;

#[derive(Parser)]
#[command(
    name = "avro2athena",
    about = "Generate an AWS Athena CREATE TABLE statement from an Avro schema in a schema registry"
)]
struct Cli {
    /// URL of the Avro schema registry (or file:// directory of <subject>.avsc files)
    #[arg(value_name = "REGISTRY_URL")]
    registry_url: String,

    /// Schema subject to generate the CREATE TABLE statement from
    #[arg(value_name = "AVRO_SUBJECT")]
    avro_subject: String,

    /// Name of the Athena database
    #[arg(value_name = "ATHENA_DATABASE")]
    athena_database: String,

    /// Name of the table to create
    #[arg(value_name = "ATHENA_TABLE_NAME")]
    athena_table_name: String,

    /// Storage location of the table data, e.g. s3://bucket/folder/
    #[arg(value_name = "S3_LOCATION")]
    s3_location: String,

    /// Partition column; repeat the flag or list several names after it
    #[arg(long = "partition", value_name = "NAME", num_args = 1..)]
    partitions: Vec<String>,

    /// Registry request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    timeout: u64,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if quiet {
        "avro2athena=warn"
    } else {
        "avro2athena=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> avro2athena::Result<()> {
    use avro2athena::config::{RegistryConfig, TableConfig};
    use avro2athena::ddl::{create_database_statement, create_table_statement};
    use avro2athena::registry::fetch_latest_schema;
    use avro2athena::translator::translate;
    use std::time::Duration;

    let registry = RegistryConfig::new(cli.registry_url).with_timeout(Duration::from_secs(cli.timeout));
    let registered = fetch_latest_schema(&registry, &cli.avro_subject)?;
    let columns = translate(&registered.schema, &cli.partitions)?;

    let table = TableConfig {
        database: cli.athena_database,
        table: cli.athena_table_name,
        location: cli.s3_location,
    };
    println!("{}", create_database_statement(&table.database));
    println!();
    println!("{}", create_table_statement(&table, &columns, &registered.schema));
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
