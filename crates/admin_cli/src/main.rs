use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{Category, Engine, EngineError, NewCategory};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

mod settings;

const DEFAULT_DATABASE_URL: &str = "sqlite:./categories.db?mode=rwc";

#[derive(Parser, Debug)]
#[command(name = "categories_admin")]
#[command(about = "Admin utilities for the category hierarchy")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    ///
    /// Falls back to the `database` entry of `settings.toml`.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Category(CategoryCmd),
    /// Fill empty alternate URLs below the configured root with the computed path.
    BackfillAlternateUrls(BackfillArgs),
    /// List the categories of a section.
    Section(SectionArgs),
}

#[derive(Args, Debug)]
struct CategoryCmd {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    Create(CreateArgs),
    Show(ShowArgs),
    Move(MoveArgs),
    Delete(RefArgs),
    /// Activate categories and their direct children.
    Activate(SelectionArgs),
    /// Deactivate categories and their whole subtree.
    Deactivate(SelectionArgs),
    /// Print every tree, indented by level.
    Tree,
    /// Recompute the cached display name.
    RefreshName(RefArgs),
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long)]
    name: String,
    /// Parent category, by id or slug.
    #[arg(long)]
    parent: Option<String>,
    #[arg(long)]
    slug: Option<String>,
    #[arg(long)]
    alternate_url: Option<String>,
    #[arg(long)]
    inactive: bool,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Category id or slug.
    category: String,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct MoveArgs {
    /// Category id or slug.
    category: String,
    /// New parent, by id or slug.
    #[arg(long, conflicts_with = "root")]
    parent: Option<String>,
    /// Make the category the root of its own tree.
    #[arg(long)]
    root: bool,
}

#[derive(Args, Debug)]
struct RefArgs {
    /// Category id or slug.
    category: String,
}

#[derive(Args, Debug)]
struct SelectionArgs {
    /// Category ids or slugs.
    #[arg(required = true)]
    categories: Vec<String>,
}

#[derive(Args, Debug)]
struct BackfillArgs {
    /// Slug of the root to backfill below (defaults to `backfill.root_slug`).
    #[arg(long)]
    root: Option<String>,
}

#[derive(Args, Debug)]
struct SectionArgs {
    /// Slug of the section root (defaults to `section.root_slug`).
    #[arg(long)]
    root: Option<String>,
    /// Extra slugs to include (defaults to `section.extra_slugs`).
    #[arg(long = "extra")]
    extras: Vec<String>,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Resolve a category given either its id or its slug.
async fn resolve(engine: &Engine, reference: &str) -> Result<Category, EngineError> {
    if let Ok(id) = Uuid::parse_str(reference) {
        return engine.category(id).await;
    }
    engine
        .category_by_slug(reference)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound(reference.to_string()))
}

async fn resolve_all(engine: &Engine, references: &[String]) -> Result<Vec<Uuid>, EngineError> {
    let mut ids = Vec::with_capacity(references.len());
    for reference in references {
        ids.push(resolve(engine, reference).await?.id);
    }
    Ok(ids)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "categories_admin={level},engine={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let database_url = cli
        .database_url
        .clone()
        .or_else(|| settings.database.as_ref().map(settings::Database::url))
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
    tracing::debug!("using database {database_url}");

    let db = connect_db(&database_url).await?;
    let engine = Engine::builder()
        .database(db)
        .settings(settings.engine_settings())
        .build()
        .await?;

    match cli.command {
        Command::Category(CategoryCmd { command }) => run_category(&engine, command).await?,
        Command::BackfillAlternateUrls(args) => {
            let written = engine.backfill_alternate_urls(args.root.as_deref()).await?;
            for entry in &written {
                println!("{}=[{}]", entry.name, entry.url);
            }
            println!("updated {} categories", written.len());
        }
        Command::Section(args) => {
            let root = args
                .root
                .unwrap_or_else(|| engine.settings().section_root_slug.clone());
            let extras = if args.extras.is_empty() {
                engine.settings().section_extra_slugs.clone()
            } else {
                args.extras
            };
            for category in engine.section_categories(&root, &extras).await? {
                println!("{}\t{}", category.slug, engine.display_name(category.id).await?);
            }
        }
    }

    Ok(())
}

async fn run_category(
    engine: &Engine,
    command: CategoryCommand,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match command {
        CategoryCommand::Create(args) => {
            let mut new = NewCategory::new(args.name).active(!args.inactive);
            if let Some(parent) = args.parent {
                new = new.parent(resolve(engine, &parent).await?.id);
            }
            if let Some(slug) = args.slug {
                new = new.slug(slug);
            }
            if let Some(url) = args.alternate_url {
                new = new.alternate_url(url);
            }
            let category = engine.create_category(new).await?;
            println!("created category: {} ({})", category.slug, category.id);
        }
        CategoryCommand::Show(args) => {
            let category = resolve(engine, &args.category).await?;
            let display_name = engine.display_name(category.id).await?;
            let url = engine.absolute_url(category.id).await?;
            let paths: Vec<String> = engine.all_category_paths(category.id, None).await?.collect();
            if args.json {
                let value = serde_json::json!({
                    "id": category.id,
                    "name": category.name,
                    "slug": category.slug,
                    "active": category.active,
                    "tree_id": category.tree_id,
                    "level": category.level,
                    "display_name": display_name,
                    "url": url,
                    "paths": paths,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{display_name}");
                println!("  id:     {}", category.id);
                println!("  slug:   {}", category.slug);
                println!("  active: {}", category.active);
                println!("  url:    {url}");
                for path in paths {
                    println!("  path:   {path}");
                }
            }
        }
        CategoryCommand::Move(args) => {
            let category = resolve(engine, &args.category).await?;
            let parent = match (args.parent, args.root) {
                (Some(parent), _) => Some(resolve(engine, &parent).await?.id),
                (None, true) => None,
                (None, false) => {
                    eprintln!("either --parent or --root is required");
                    std::process::exit(2);
                }
            };
            let moved = engine.move_category(category.id, parent).await?;
            println!(
                "moved category: {} (tree {}, level {})",
                moved.slug, moved.tree_id, moved.level
            );
        }
        CategoryCommand::Delete(args) => {
            let category = resolve(engine, &args.category).await?;
            let deleted = engine.delete_category(category.id).await?;
            println!("deleted {deleted} categories");
        }
        CategoryCommand::Activate(args) => {
            let ids = resolve_all(engine, &args.categories).await?;
            let count = engine.activate_selected(&ids).await?;
            println!("activated {count} categories");
        }
        CategoryCommand::Deactivate(args) => {
            let ids = resolve_all(engine, &args.categories).await?;
            let count = engine.deactivate_selected(&ids).await?;
            println!("deactivated {count} categories");
        }
        CategoryCommand::Tree => {
            for root in engine.roots().await? {
                for category in engine.descendants(root.id, true).await? {
                    let marker = if category.active { ' ' } else { '-' };
                    println!(
                        "{marker} {}{} [{}]",
                        "  ".repeat(usize::try_from(category.level).unwrap_or(0)),
                        category.name,
                        category.slug
                    );
                }
            }
        }
        CategoryCommand::RefreshName(args) => {
            let category = resolve(engine, &args.category).await?;
            let name = engine.refresh_unicode_name(category.id).await?;
            println!("{name}");
        }
    }
    Ok(())
}
