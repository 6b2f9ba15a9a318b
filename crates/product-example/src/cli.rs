//! Command-line interface for the `products` binary.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::info;
use sieve::{and, filter, not, Criteria, Group, Specification};

use crate::inventory;
use crate::product::{Color, Product, Size};
use crate::specs::{name_contains, price_at_most, ColorSpec, SizeSpec};

#[derive(Parser, Debug, Clone)]
#[command(name = "products", about = "Filter a product catalog with composable criteria")]
pub struct Cli {
    /// env_logger-style filter string (e.g. "debug,sieve=trace"); overrides RUST_LOG
    #[arg(long, global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Walk through the built-in catalog with a few fixed criteria
    Demo,
    /// Filter an inventory
    List(ListArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Inventory JSON file (defaults to the built-in catalog)
    #[arg(long)]
    pub inventory: Option<PathBuf>,

    /// Require this color (repeatable, all must hold)
    #[arg(long, value_enum)]
    pub color: Vec<Color>,

    /// Require this size (repeatable, all must hold)
    #[arg(long, value_enum)]
    pub size: Vec<Size>,

    /// Accept this color (repeatable, at least one OR clause must hold)
    #[arg(long, value_enum)]
    pub any_color: Vec<Color>,

    /// Accept this size (repeatable, at least one OR clause must hold)
    #[arg(long, value_enum)]
    pub any_size: Vec<Size>,

    /// Reject this color (repeatable)
    #[arg(long, value_enum)]
    pub exclude_color: Vec<Color>,

    /// Reject this size (repeatable)
    #[arg(long, value_enum)]
    pub exclude_size: Vec<Size>,

    /// Require the name to contain this text (case sensitive)
    #[arg(long)]
    pub name_contains: Option<String>,

    /// Require a price of at most this many cents; unpriced products are an error
    #[arg(long)]
    pub max_price: Option<u64>,

    /// Stop after this many matches (at least 1)
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub const DEFAULT_LOG_FILTER: &str = "warn";

pub fn init_logging(cli_filter: Option<&str>) {
    let env = Env::default().default_filter_or(DEFAULT_LOG_FILTER);
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(filter) = cli_filter {
        builder.parse_filters(filter);
    }
    builder.format(|buf, record| {
        let ts = buf.timestamp();
        writeln!(
            buf,
            "[{} {:<5} {}] {}",
            ts,
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder.init();
}

/// Turns list flags into clause groups.
///
/// `--color`/`--size`/`--name-contains`/`--max-price` are AND clauses,
/// `--any-*` are OR clauses and `--exclude-*` are NOT clauses.
pub fn build_criteria(args: &ListArgs) -> Criteria<Product> {
    let mut criteria = Criteria::new();
    for color in &args.color {
        criteria.push(Group::And, ColorSpec::new(*color).boxed());
    }
    for size in &args.size {
        criteria.push(Group::And, SizeSpec::new(*size).boxed());
    }
    if let Some(pattern) = &args.name_contains {
        criteria.push(Group::And, name_contains(pattern).boxed());
    }
    if let Some(cents) = args.max_price {
        criteria.push(Group::And, price_at_most(cents).boxed());
    }
    for color in &args.any_color {
        criteria.push(Group::Or, ColorSpec::new(*color).boxed());
    }
    for size in &args.any_size {
        criteria.push(Group::Or, SizeSpec::new(*size).boxed());
    }
    for color in &args.exclude_color {
        criteria.push(Group::Not, ColorSpec::new(*color).boxed());
    }
    for size in &args.exclude_size {
        criteria.push(Group::Not, SizeSpec::new(*size).boxed());
    }
    criteria.build()
}

pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Command::Demo => run_demo(out),
        Command::List(args) => run_list(args, out),
    }
}

fn run_demo(out: &mut impl Write) -> Result<()> {
    let products = inventory::builtin()?;

    section(out, "Green products:", &products, &ColorSpec::new(Color::Green))?;
    section(out, "Large products:", &products, &SizeSpec::new(Size::Large))?;
    section(
        out,
        "Large blue items:",
        &products,
        &and(ColorSpec::new(Color::Blue), SizeSpec::new(Size::Large)),
    )?;
    section(
        out,
        "Non-green products:",
        &products,
        &not(ColorSpec::new(Color::Green)),
    )?;
    Ok(())
}

fn section<S>(out: &mut impl Write, title: &str, products: &[Product], spec: &S) -> Result<()>
where
    S: Specification<Product>,
{
    writeln!(out, "{title}")?;
    for product in filter(products, spec) {
        let product = product.with_context(|| format!("evaluating {}", spec.describe()))?;
        writeln!(out, " - {}", product.name())?;
    }
    Ok(())
}

fn run_list(args: &ListArgs, out: &mut impl Write) -> Result<()> {
    let products = match &args.inventory {
        Some(path) => inventory::load(path)?,
        None => inventory::builtin()?,
    };
    let criteria = build_criteria(args);
    info!(
        "filtering {} products with {}",
        products.len(),
        criteria.describe()
    );

    let limit = args.limit.unwrap_or(usize::MAX);
    let matched: Vec<&Product> = filter(&products, &criteria)
        .take(limit)
        .collect::<sieve::Result<_>>()
        .context("filtering inventory failed")?;

    match args.format {
        Format::Text if matched.is_empty() => writeln!(out, "No matching products.")?,
        Format::Text => {
            for product in &matched {
                writeln!(out, "{}", product.name())?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &matched)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
