mod fs_host;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use fs_host::FsHost;
use ig_core::{LintSeverity, TemplatePayload, lint_document};
use ig_editor::persistence::lock_store;
use ig_editor::{EditorAction, EditorConfig, Session};
use std::io::Read as _;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "infograph", version)]
struct Cli {
    /// Working directory holding the source images.
    dir: PathBuf,
    /// Editor configuration (JSON). Missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the images of the working directory.
    Images,
    /// List saved templates, newest first.
    Templates,
    /// Save a template payload read from stdin under NAME.
    Save { name: String },
    /// Delete the template named NAME.
    Delete { name: String },
    /// Report document problems in the template named NAME.
    Lint { name: String },
    /// Print the generation request for NAME applied to every image.
    Prepare {
        name: String,
        /// Worker count; defaults to the recommended value for this machine.
        #[arg(long)]
        parallelism: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EditorConfig::default(),
    };
    let session = Session::new(FsHost, config);
    let dir = cli.dir.to_string_lossy().into_owned();
    let dir_name = cli
        .dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.clone());
    session
        .open_directory(&dir, &dir_name)
        .await
        .with_context(|| format!("open {}", cli.dir.display()))?;

    match cli.cmd {
        Command::Images => cmd_images(&session),
        Command::Templates => cmd_templates(&session),
        Command::Save { name } => cmd_save(&session, &name).await,
        Command::Delete { name } => cmd_delete(&session, &name).await,
        Command::Lint { name } => cmd_lint(&session, &name).await,
        Command::Prepare { name, parallelism } => cmd_prepare(&session, &name, parallelism).await,
    }
}

fn load_config(path: &Path) -> anyhow::Result<EditorConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config: EditorConfig = serde_json::from_str(&json)
        .with_context(|| format!("parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn cmd_images(session: &Session<FsHost>) -> anyhow::Result<()> {
    session.read(|store| {
        for image in store.images().all() {
            println!("{}", image.path);
        }
    });
    Ok(())
}

fn cmd_templates(session: &Session<FsHost>) -> anyhow::Result<()> {
    session.read(|store| {
        for template in store.templates() {
            println!("{}\t{}\t{}", template.name, template.created_at, template.path);
        }
    });
    Ok(())
}

async fn cmd_save(session: &Session<FsHost>, name: &str) -> anyhow::Result<()> {
    let mut json = String::new();
    std::io::stdin()
        .read_to_string(&mut json)
        .context("read payload from stdin")?;
    let payload = TemplatePayload::decode(&json).context("decode payload")?;
    lock_store(session.store()).load_payload(payload);
    let path = session
        .save_template(name)
        .await
        .with_context(|| format!("save template `{name}`"))?;
    println!("{path}");
    Ok(())
}

async fn cmd_delete(session: &Session<FsHost>, name: &str) -> anyhow::Result<()> {
    let path = find_template(session, name)?;
    session
        .delete_template(&path)
        .await
        .with_context(|| format!("delete template `{name}`"))?;
    Ok(())
}

async fn cmd_lint(session: &Session<FsHost>, name: &str) -> anyhow::Result<()> {
    open_template(session, name).await?;
    let diagnostics = session.read(|store| lint_document(store.document()));
    for diag in &diagnostics {
        let level = match diag.severity {
            LintSeverity::Warning => "warning",
            LintSeverity::Info => "info",
        };
        match diag.object_id {
            Some(id) => println!("{level}[{}] {}: {}", diag.rule, id, diag.message),
            None => println!("{level}[{}] {}", diag.rule, diag.message),
        }
    }
    if diagnostics
        .iter()
        .any(|d| d.severity == LintSeverity::Warning)
    {
        anyhow::bail!("template `{name}` has {} finding(s)", diagnostics.len());
    }
    Ok(())
}

async fn cmd_prepare(
    session: &Session<FsHost>,
    name: &str,
    parallelism: Option<usize>,
) -> anyhow::Result<()> {
    open_template(session, name).await?;
    session.dispatch(EditorAction::SelectAllImages);
    let parallelism = parallelism.unwrap_or_else(|| session.cpu_info().recommended);
    let request = lock_store(session.store())
        .generate_request(parallelism)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("prepare template `{name}`"))?;
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

fn find_template(session: &Session<FsHost>, name: &str) -> anyhow::Result<String> {
    session
        .read(|store| {
            store
                .templates()
                .iter()
                .find(|t| t.name == name)
                .map(|t| t.path.clone())
        })
        .with_context(|| format!("no template named `{name}`"))
}

async fn open_template(session: &Session<FsHost>, name: &str) -> anyhow::Result<()> {
    let path = find_template(session, name)?;
    session
        .load_template(&path)
        .await
        .with_context(|| format!("load template `{name}`"))?;
    Ok(())
}
