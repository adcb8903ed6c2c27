use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;

use std::fs;
use std::path::PathBuf;

use flowgen_rs::bundle::Bundle;
use flowgen_rs::codegen::{emitter_for, EmitterKind, Language};
use flowgen_rs::graph::GraphLoader;
use flowgen_rs::spec::{compile, render, SPEC_FILE_NAME};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a graph snapshot to the canonical spec
    Compile {
        /// Path to the graph snapshot (YAML or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Write the spec here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate stub and implementation code for a target language
    Generate {
        /// Path to the graph snapshot (YAML or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Target language
        #[arg(short, long, default_value = "python")]
        language: Language,

        /// Use the remote generation service instead of local templates
        #[arg(long)]
        remote: bool,

        /// Directory the artifacts are written into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Package spec and generated code into a zip archive
    Bundle {
        /// Path to the graph snapshot (YAML or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Languages to include (defaults to every supported language)
        #[arg(short, long)]
        language: Vec<Language>,

        /// Use the remote generation service instead of local templates
        #[arg(long)]
        remote: bool,

        /// Archive path
        #[arg(short, long, default_value = "workflow.zip")]
        output: PathBuf,

        /// Include Dockerfile / docker-compose.yml scaffolding
        #[arg(long)]
        deployment: bool,
    },
    /// Start the HTTP API server
    Serve {
        #[arg(short, long, default_value_t = 8088)]
        port: u16,
    },
}

fn emitter_kind(remote: bool) -> EmitterKind {
    if remote {
        EmitterKind::Remote
    } else {
        EmitterKind::Local
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Compile { file, output } => {
            let graph = GraphLoader::new().load_graph(&file)?;
            let spec = compile(&graph)?;
            let text = render(&spec);
            match output {
                Some(path) => {
                    fs::write(&path, &text)
                        .with_context(|| format!("writing {}", path.display()))?;
                    log::info!("Wrote {}", path.display());
                }
                None => print!("{}", text),
            }
        }
        Commands::Generate {
            file,
            language,
            remote,
            out_dir,
        } => {
            let graph = GraphLoader::new().load_graph(&file)?;
            let spec = compile(&graph)?;
            let code = emitter_for(emitter_kind(remote))
                .emit(&spec, language)
                .await?;

            fs::create_dir_all(&out_dir)
                .with_context(|| format!("creating {}", out_dir.display()))?;
            let spec_path = out_dir.join(SPEC_FILE_NAME);
            let stub_path = out_dir.join(format!("stub.{}", language.extension()));
            let impl_path = out_dir.join(format!("implementation.{}", language.extension()));
            fs::write(&spec_path, render(&spec))?;
            fs::write(&stub_path, &code.stub)?;
            fs::write(&impl_path, &code.implementation)?;
            log::info!(
                "Wrote {}, {}, {}",
                spec_path.display(),
                stub_path.display(),
                impl_path.display()
            );
        }
        Commands::Bundle {
            file,
            language,
            remote,
            output,
            deployment,
        } => {
            let graph = GraphLoader::new().load_graph(&file)?;
            let spec = compile(&graph)?;
            let emitter = emitter_for(emitter_kind(remote));

            let languages = if language.is_empty() {
                Language::ALL.to_vec()
            } else {
                language
            };

            let mut bundle = Bundle::new(render(&spec));
            if deployment {
                bundle = bundle.with_deployment();
            }
            for language in languages {
                let code = emitter
                    .emit(&spec, language)
                    .await
                    .with_context(|| format!("generating {} artifacts", language))?;
                bundle = bundle.with_language(language, code);
            }

            let bytes = bundle.to_zip_bytes()?;
            fs::write(&output, bytes)
                .with_context(|| format!("writing {}", output.display()))?;
            log::info!("Wrote {}", output.display());
        }
        Commands::Serve { port } => {
            flowgen_rs::server::serve(port)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
    }

    Ok(())
}
