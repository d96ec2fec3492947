use clap::{Args, Parser, Subcommand};

mod batch;
mod diagnostics;
mod error;
mod ident;
mod items;
mod render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Debug, Parser)]
#[command(name = "kafka-tf-gen")]
#[command(about = "Kafka ACL and topic Terraform generator", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate kafka_acl blocks, one per operation of each ACL.
    Acl {
        /// acls.json with an "acls" list.
        #[arg(long, conflicts_with_all = ["resource_name", "user", "operations"])]
        input: Option<String>,

        /// Topic name or group id (single-ACL mode).
        #[arg(long)]
        resource_name: Option<String>,

        #[arg(long, default_value = "Topic")]
        resource_type: items::ResourceType,

        #[arg(long)]
        user: Option<String>,

        /// Comma-separated, e.g. "Read, Write, Describe".
        #[arg(long)]
        operations: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate kafka_topic blocks.
    Topic {
        /// topics.json with a "topics" list.
        #[arg(long, conflicts_with_all = ["name", "custom", "config"])]
        input: Option<String>,

        /// Topic name (single-topic mode).
        #[arg(long)]
        name: Option<String>,

        /// Use custom partitions and config instead of the defaults.
        #[arg(long)]
        custom: bool,

        #[arg(long, default_value_t = items::DEFAULT_PARTITIONS, requires = "custom",
              value_parser = clap::value_parser!(u32).range(1..))]
        partitions: u32,

        /// Extra config as key=value (repeatable; custom mode only).
        #[arg(long = "config", requires = "custom")]
        config: Vec<items::ConfigEntry>,

        /// Do not start custom config from the default lines.
        #[arg(long, requires = "custom")]
        no_seed: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Write generated Terraform here instead of stdout.
    #[arg(short = 'o', long)]
    out: Option<String>,

    /// Fail if any item was skipped.
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init_logging(cli.verbose);

    match cli.cmd {
        Commands::Acl {
            input,
            resource_name,
            resource_type,
            user,
            operations,
            output,
        } => {
            // 1) Collect items (file or single item from flags).
            let acls = match input {
                Some(path) => items::load_acl_file(&path)?,
                None => vec![items::AclSpec::new(
                    resource_name.unwrap_or_default(),
                    resource_type,
                    user.unwrap_or_default(),
                    items::parse_operations(operations.as_deref().unwrap_or_default()),
                )],
            };

            // 2) Assemble + emit.
            emit(&batch::assemble_acls(&acls), &output)?;
        }
        Commands::Topic {
            input,
            name,
            custom,
            partitions,
            config,
            no_seed,
            output,
        } => {
            let topics = match input {
                Some(path) => items::load_topic_file(&path)?,
                None => {
                    let name = name.unwrap_or_default();
                    if custom {
                        let params = items::build_custom_params(
                            !no_seed,
                            Vec::<(String, String)>::new(),
                            &config,
                        );
                        vec![items::TopicSpec::custom(name, partitions, params)]
                    } else {
                        vec![items::TopicSpec::with_defaults(name)]
                    }
                }
            };

            emit(&batch::assemble_topics(&topics), &output)?;
        }
    }

    Ok(())
}

/// Write the generated text, then report notices on stderr.
fn emit(batch: &batch::Batch, output: &OutputArgs) -> Result<()> {
    use anyhow::{Context, bail};
    use std::io::Write;

    match &output.out {
        Some(path) => {
            std::fs::write(path, &batch.text)
                .with_context(|| diagnostics::error_message(format!("write {}", path)))?;
            println!("Wrote {} block(s) to {}", batch.blocks, path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(batch.text.as_bytes())?;
            stdout.flush()?;
        }
    }

    for notice in &batch.notices {
        diagnostics::report_notice(notice);
    }

    if output.strict && !batch.is_clean() {
        bail!(
            "{}",
            diagnostics::error_message(format!("{} item(s) skipped", batch.notices.len()))
        );
    }
    Ok(())
}
