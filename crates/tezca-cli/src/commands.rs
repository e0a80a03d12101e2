use std::path::Path;

use anyhow::{bail, Context};
use colored::{ColoredString, Colorize};
use tezca_compare::{
    render_outline, ArticleView, CompareConfig, Comparison, ComparisonSession, DiffSpan,
    MarkerStyle, OutlineEntry, PaneModel, RenderMode, SpanKind, ViewState,
};
use tezca_source::{DirectorySource, DocumentLoader, SourceConfig};
use tezca_types::DocumentId;
use tracing::debug;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let source = DirectorySource::from_config(&SourceConfig { root: cli.root });
    debug!(root = %source.root().display(), "reading documents");
    match cli.command {
        Command::Compare(args) => cmd_compare(source, args, cli.format).await,
        Command::Outline(args) => cmd_outline(source, args, cli.format).await,
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CompareConfig> {
    match path {
        Some(path) => {
            CompareConfig::load(path).with_context(|| format!("reading config {}", path.display()))
        }
        None => Ok(CompareConfig::default()),
    }
}

async fn cmd_compare(
    source: DirectorySource,
    args: CompareArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let left: DocumentId = args.left.parse()?;
    let right: DocumentId = args.right.parse()?;

    let session = ComparisonSession::new(source, config);
    match session.compare(&[left, right]).await {
        ViewState::Ready(comparison) => {
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&*comparison)?),
                OutputFormat::Text => print_comparison(&comparison),
            }
            Ok(())
        }
        ViewState::Error(failure) => {
            eprintln!("{} {}", "✗".red().bold(), failure.message);
            bail!(failure.cause)
        }
        other => bail!("comparison did not complete: {other:?}"),
    }
}

async fn cmd_outline(
    source: DirectorySource,
    args: OutlineArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let id: DocumentId = args.id.parse()?;
    let snapshot = DocumentLoader::new(source).load(&id).await?;
    let entries = render_outline(snapshot.outline(), 0, &config.outline);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            println!("{}", snapshot.display_name().bold());
            for entry in &entries {
                print_outline_entry(entry);
            }
        }
    }
    Ok(())
}

fn print_comparison(comparison: &Comparison) {
    print_pane(&comparison.left);
    println!();
    print_pane(&comparison.right);
    println!();
    println!(
        "{} matched, {} differing, {} only in {}, {} only in {}",
        comparison.alignment.matched_ids.len().to_string().bold(),
        comparison.differing_count().to_string().yellow(),
        comparison.alignment.unique_to_left.len(),
        comparison.left.document_id.as_str().cyan(),
        comparison.alignment.unique_to_right.len(),
        comparison.right.document_id.as_str().cyan(),
    );
}

fn print_pane(pane: &PaneModel) {
    println!(
        "{} {} ({}) — {} of {} articles, {} matched, {} only here",
        format!("[{}]", pane.side).dimmed(),
        pane.display_name.bold(),
        pane.document_id.as_str().cyan(),
        pane.article_count,
        pane.total_articles,
        pane.matched_count,
        pane.unique_count,
    );
    for entry in &pane.outline {
        print_outline_entry(entry);
    }
    println!();
    for article in &pane.articles {
        print_article(article);
    }
}

fn print_outline_entry(entry: &OutlineEntry) {
    let line = entry.to_string();
    match entry {
        OutlineEntry::Placeholder => println!("  {}", line.dimmed()),
        OutlineEntry::Node { collapsible: true, .. } => println!("  {}", line.bold()),
        OutlineEntry::Node { .. } => println!("  {line}"),
    }
}

fn print_article(article: &ArticleView) {
    let gutter = match article.marker_style() {
        Some(MarkerStyle::Changed) => "~".yellow().bold(),
        Some(MarkerStyle::LeftUnique) => "<".blue().bold(),
        Some(MarkerStyle::RightUnique) => ">".magenta().bold(),
        None => " ".normal(),
    };
    let body = match &article.mode {
        RenderMode::Plain(text) => text.clone(),
        RenderMode::Diffed(diff) => diff
            .spans()
            .iter()
            .map(|span| paint(span).to_string())
            .collect(),
    };
    println!("{gutter} {}  {body}", article.article_id.bold());
}

/// Words only in this pane are green, words only in the other pane are struck through.
fn paint(span: &DiffSpan) -> ColoredString {
    match span.kind {
        SpanKind::Unchanged => span.value.normal(),
        SpanKind::Inserted => span.value.green().underline(),
        SpanKind::Removed => span.value.red().strikethrough(),
    }
}
