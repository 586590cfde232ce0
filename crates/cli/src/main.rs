//! Tillpoint CLI - Interactive terminal till.
//!
//! A line-oriented front end for the cart widget: renders the product grid
//! and cart panel as text, forwards typed commands as widget events, and
//! talks to the same sales backend the web screen would.
//!
//! # Usage
//!
//! ```bash
//! # Catalog from a JSON file, backend from TILLPOINT_BACKEND_URL
//! tillpoint --catalog products.json
//!
//! # Override the backend explicitly
//! tillpoint --catalog products.json --backend-url http://localhost:5000
//! ```
//!
//! # Commands
//!
//! - `all` - Show the full product grid
//! - `search <text>` - Filter by name, ID, or category
//! - `add <id>` - Add a product to the cart
//! - `rm <index>` - Remove the cart row at the given index
//! - `clear` - Empty the cart (asks for confirmation)
//! - `pay <cash|card|upi>` - Complete the sale
//! - `quit` - Exit

#![cfg_attr(not(test), forbid(unsafe_code))]
// Interactive terminal tool; stdout is the UI.
#![allow(clippy::print_stdout)]

use std::io::{BufRead, Write as _};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tillpoint_core::{PaymentMode, Product, ProductId};
use tillpoint_widget::{
    Availability, BackendClient, CartPanel, CartWidget, Catalog, ProductCard, SuggestionPrompt,
    WidgetConfig, WidgetView,
};

#[derive(Parser)]
#[command(name = "tillpoint")]
#[command(version, about = "Interactive point-of-sale till")]
struct Cli {
    /// JSON file holding the product catalog (an array of products).
    /// Omitting it starts the till with no products to display.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Sales backend base URL; overrides TILLPOINT_BACKEND_URL.
    #[arg(long)]
    backend_url: Option<String>,
}

/// Terminal rendering of the widget view.
struct TerminalView;

impl TerminalView {
    fn ask(question: &str) -> bool {
        print!("{question} [y/N] ");
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }
}

impl WidgetView for TerminalView {
    fn render_grid(&self, cards: &[ProductCard]) {
        if cards.is_empty() {
            println!("  (no products found)");
            return;
        }
        for card in cards {
            let badge = match card.availability {
                Availability::OutOfStock => " [OUT OF STOCK]",
                Availability::LowStock => " [LOW STOCK]",
                Availability::InStock => "",
            };
            println!(
                "  #{:<4} {:<28} {:<12} {:>10}  stock {}{badge}",
                card.id.as_i64(),
                card.name,
                card.category,
                card.price,
                card.stock_quantity
            );
        }
    }

    fn render_cart(&self, panel: &CartPanel) {
        println!("--- cart ---");
        if panel.is_empty() {
            println!("  (cart is empty)");
        } else {
            for row in &panel.rows {
                println!(
                    "  [{}] {:<28} {} x {} = {}",
                    row.index, row.name, row.quantity, row.unit_price, row.line_subtotal
                );
            }
        }
        println!("  total: {}", panel.total);
        if !panel.checkout_enabled {
            println!("  (checkout disabled)");
        }
    }

    fn notify(&self, message: &str) {
        println!("!! {message}");
    }

    fn show_suggestion(&self, prompt: &SuggestionPrompt) {
        println!(
            "tip: with {}, people also buy {} - `add {}` to take it",
            prompt.trigger_name, prompt.product_name, prompt.product_id
        );
    }

    fn confirm_clear_cart(&self) -> bool {
        Self::ask("Clear the cart?")
    }

    fn set_checkout_busy(&self, busy: bool) {
        if busy {
            println!("processing sale...");
        }
    }

    fn show_checkout_success(&self, invoice: &str) {
        println!("sale recorded, invoice {invoice}");
    }

    fn show_checkout_error(&self, message: &str) {
        println!("!! checkout failed: {message}");
    }

    fn confirm_open_receipt(&self) -> bool {
        Self::ask("Open the receipt?")
    }

    fn open_receipt(&self, url: &str) {
        // No browser here; print the link instead of opening it.
        println!("receipt: {url}");
    }
}

/// Load the catalog file, if one was given.
fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(Catalog::from_injected(None));
    };
    let raw = std::fs::read_to_string(path)?;
    let products: Vec<Product> = serde_json::from_str(&raw)?;
    Ok(Catalog::new(products))
}

fn build_config(backend_override: Option<&str>) -> Result<WidgetConfig, Box<dyn std::error::Error>> {
    let config = match backend_override {
        Some(url) => WidgetConfig::new(url)?,
        None => WidgetConfig::from_env()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() {
    // Default to info level for our crates if RUST_LOG is not set.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tillpoint_widget=info,tillpoint_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("till failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(cli.backend_url.as_deref())?;
    let catalog = load_catalog(cli.catalog.as_ref())?;
    tracing::info!(
        products = catalog.len(),
        backend = %config.backend_url,
        "till starting"
    );

    let client = BackendClient::new(&config)?;
    let view = Arc::new(TerminalView);
    let mut widget = CartWidget::new(catalog, client, view, &config);

    println!("tillpoint - type `help` for commands");
    widget.start();

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let (command, rest) = match line.trim().split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line.trim(), ""),
        };

        match command {
            "" => {}
            "help" => print_help(),
            "all" => widget.on_search(""),
            "search" => widget.on_search(rest),
            "add" => match rest.parse::<i64>() {
                Ok(id) => {
                    // Suggestion prompts print on their own when they arrive.
                    let _task = widget.on_add_product(ProductId::new(id));
                }
                Err(_) => println!("usage: add <id>"),
            },
            "rm" => match rest.parse::<usize>() {
                Ok(index) => widget.on_remove_line(index),
                Err(_) => println!("usage: rm <index>"),
            },
            "clear" => widget.on_clear_cart(),
            "pay" => match rest.parse::<PaymentMode>() {
                Ok(mode) => widget.on_checkout(Some(mode)).await,
                Err(e) => println!("{e} (expected cash, card, or upi)"),
            },
            "quit" | "exit" => break,
            other => println!("unknown command `{other}`; type `help`"),
        }
    }

    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  all              show the full product grid");
    println!("  search <text>    filter by name, id, or category");
    println!("  add <id>         add a product to the cart");
    println!("  rm <index>       remove the cart row at <index>");
    println!("  clear            empty the cart");
    println!("  pay <mode>       complete the sale (cash, card, upi)");
    println!("  quit             exit");
}
