//! # Storefront Shell
//!
//! A line-oriented front end over the command handlers. One command per
//! line, plain-text output.
//!
//! ## Session Example
//! ```text
//! > add 1
//!   1 x Wheat (1 kg)                ₹100
//!   1 item · ₹100
//! > add 5
//! > bill
//!   ...
//!   To pay                          ₹272
//! > city Pune
//! > order
//!   Order placed: ₹272 for 3 items
//! ```
//!
//! Errors never end the session; they are printed as `error [CODE] message`
//! and the next line is read.

use std::io::{self, Write};
use std::str::FromStr;

use grocer_checkout::OrderOutcome;
use grocer_core::{Bill, CartSnapshot, DeliveryInstruction, Money, Product};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::commands::cart::CartResponse;
use crate::commands::{cart, checkout, config, product};
use crate::error::ApiError;
use crate::state::{ConfigState, Storefront};

const HELP: &str = "\
Products
  products             list the catalog
  search <text>        search by name
  recs                 recommendations (not already in the cart)
  fav <id>             toggle a favorite
Cart
  add <id>             add one unit
  inc <id> / dec <id>  change the quantity of a line
  rm <id>              remove a line
  clear                empty the cart
  hide                 dismiss the view-cart indicator
  cart                 show the cart
Checkout
  bill                 show the bill
  city <name>          set the delivery city
  note <tag>           toggle a delivery note (record, avoid-bell, no-bell, other)
  pay <label>          set the payment method
  order                place the order
Other
  config               show the configuration
  help                 this text
  quit                 leave the shell";

// =============================================================================
// Parsing
// =============================================================================

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Products,
    Search(String),
    Recommendations,
    Favorite(String),
    Add(String),
    Increment(String),
    Decrement(String),
    Remove(String),
    Clear,
    Hide,
    Cart,
    Bill,
    City(String),
    Note(String),
    Pay(String),
    Order,
    Config,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let argument = |usage: &str| -> Result<String, ApiError> {
            if rest.is_empty() {
                Err(ApiError::validation(format!("usage: {}", usage)))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match word.to_lowercase().as_str() {
            "products" | "ls" => ShellCommand::Products,
            // A blank search is allowed and lists nothing.
            "search" => ShellCommand::Search(rest.to_string()),
            "recs" => ShellCommand::Recommendations,
            "fav" => ShellCommand::Favorite(argument("fav <id>")?),
            "add" => ShellCommand::Add(argument("add <id>")?),
            "inc" => ShellCommand::Increment(argument("inc <id>")?),
            "dec" => ShellCommand::Decrement(argument("dec <id>")?),
            "rm" => ShellCommand::Remove(argument("rm <id>")?),
            "clear" => ShellCommand::Clear,
            "hide" => ShellCommand::Hide,
            "cart" => ShellCommand::Cart,
            "bill" => ShellCommand::Bill,
            "city" => ShellCommand::City(rest.to_string()),
            "note" => ShellCommand::Note(argument("note <tag>")?),
            "pay" => ShellCommand::Pay(rest.to_string()),
            "order" => ShellCommand::Order,
            "config" => ShellCommand::Config,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => {
                return Err(ApiError::validation(format!(
                    "unknown command '{}', try 'help'",
                    other
                )))
            }
        };
        Ok(command)
    }
}

// =============================================================================
// Session
// =============================================================================

/// Runs the shell until `quit` or end of input.
///
/// ## Errors
/// Only I/O errors on `output` or `input` end the session.
pub async fn run_shell<R, W>(storefront: &Storefront, input: R, output: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let watcher = watch_indicator(storefront.cart.subscribe());
    let mut lines = input.lines();

    writeln!(
        output,
        "{}: {} products. Type 'help' for commands.",
        storefront.config.config().store.name,
        storefront.catalog.catalog().len()
    )?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "error {}", err)?;
                continue;
            }
        };
        let quit = command == ShellCommand::Quit;

        debug!(?command, "Shell command");
        match execute(storefront, command).await {
            Ok(text) => writeln!(output, "{}", text)?,
            Err(err) => writeln!(output, "error {}", err)?,
        }

        if quit {
            break;
        }
    }

    watcher.abort();
    Ok(())
}

/// Runs one command and renders its result.
///
/// `Quit` only renders the farewell; ending the session is up to the caller.
pub async fn execute(storefront: &Storefront, command: ShellCommand) -> Result<String, ApiError> {
    let Storefront {
        config: cfg,
        catalog: cat,
        cart: crt,
        checkout: chk,
    } = storefront;
    let view = Renderer { config: cfg };

    let text = match command {
        ShellCommand::Products => view.products(&product::list_products(cat)),
        ShellCommand::Search(query) => {
            let results = product::search_products(cat, &query)?;
            if results.is_empty() {
                "No products found".to_string()
            } else {
                view.products(&results)
            }
        }
        ShellCommand::Recommendations => {
            view.products(&product::recommended_products(cat, crt, None))
        }
        ShellCommand::Favorite(id) => {
            let response = product::toggle_favorite(cat, &id)?;
            if response.is_favorite {
                format!("Added {} to favorites", response.product_id)
            } else {
                format!("Removed {} from favorites", response.product_id)
            }
        }
        ShellCommand::Add(id) => view.cart(&cart::add_to_cart(cat, crt, &id)?),
        ShellCommand::Increment(id) => view.cart(&cart::increment_quantity(cat, crt, &id)),
        ShellCommand::Decrement(id) => view.cart(&cart::decrement_quantity(cat, crt, &id)),
        ShellCommand::Remove(id) => view.cart(&cart::remove_from_cart(cat, crt, &id)),
        ShellCommand::Clear => view.cart(&cart::clear_cart(cat, crt)),
        ShellCommand::Hide => {
            cart::hide_view_cart(cat, crt);
            "View cart hidden".to_string()
        }
        ShellCommand::Cart => view.cart(&cart::get_cart(cat, crt)),
        ShellCommand::Bill => view.bill(&checkout::get_bill(cfg, cat, crt)),
        ShellCommand::City(city) => {
            let draft = checkout::set_city(chk, &city)?;
            format!("Delivering to {}", draft.city)
        }
        ShellCommand::Note(tag) => {
            let draft = checkout::toggle_instruction(chk, &tag)?;
            view.instructions(draft.instructions())
        }
        ShellCommand::Pay(label) => {
            let draft = checkout::set_payment_method(chk, &label)?;
            format!("Paying with {}", draft.payment_method)
        }
        ShellCommand::Order => {
            let response = checkout::place_order(cfg, cat, crt, chk).await?;
            match response.outcome {
                OrderOutcome::Placed { .. } => format!(
                    "Order placed: {} for {} {}",
                    view.money(response.total),
                    response.item_count,
                    plural(response.item_count, "item")
                ),
                OrderOutcome::Rejected { message } => format!("Order not accepted: {}", message),
            }
        }
        ShellCommand::Config => {
            let current = config::get_config(cfg);
            format!(
                "{} ({})\nOrders go to {} (timeout {}s)\nPayment: {}",
                current.store_name,
                current.currency_code,
                current.order_endpoint,
                current.request_timeout_secs,
                current.default_payment_method
            )
        }
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => format!("Thanks for shopping at {}.", cfg.config().store.name),
    };
    Ok(text)
}

/// Follows the cart snapshots and logs when the view-cart indicator flips.
fn watch_indicator(mut updates: watch::Receiver<CartSnapshot>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut visible = updates.borrow_and_update().indicator_visible;
        while updates.changed().await.is_ok() {
            let now = updates.borrow_and_update().indicator_visible;
            if now != visible {
                info!(visible = now, "View cart indicator changed");
                visible = now;
            }
        }
    })
}

// =============================================================================
// Rendering
// =============================================================================

/// Plain-text rendering with the configured currency.
pub struct Renderer<'a> {
    pub config: &'a ConfigState,
}

impl Renderer<'_> {
    pub fn money(&self, amount: Money) -> String {
        self.config.money(amount)
    }

    pub fn products(&self, products: &[Product]) -> String {
        products
            .iter()
            .map(|p| {
                let mut row = format!(
                    "{:>3}  {:<24} {:<12} {:>6}",
                    p.id,
                    p.name,
                    p.quantity_label,
                    self.money(p.price)
                );
                if let Some(mrp) = p.original_price {
                    row.push_str(&format!("  (MRP {})", self.money(mrp)));
                }
                if p.is_favorite {
                    row.push_str("  ♥");
                }
                row
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn cart(&self, cart: &CartResponse) -> String {
        if cart.is_empty() {
            return "Cart is empty".to_string();
        }

        let mut rows: Vec<String> = cart
            .lines
            .iter()
            .map(|line| {
                let name = line.name.as_deref().unwrap_or(&line.product_id);
                let subtotal = line
                    .subtotal
                    .map(|m| self.money(m))
                    .unwrap_or_else(|| "unavailable".to_string());
                format!("{:>3} x {:<28} {:>8}", line.quantity, name, subtotal)
            })
            .collect();

        rows.push(format!(
            "{} {} · {}",
            cart.total_item_count,
            plural(cart.total_item_count, "item"),
            self.money(cart.items_total)
        ));
        if !cart.indicator_visible {
            rows.push("(view cart hidden)".to_string());
        }
        rows.join("\n")
    }

    pub fn bill(&self, bill: &Bill) -> String {
        if bill.lines.is_empty() && bill.unpriced.is_empty() {
            return "Cart is empty".to_string();
        }

        let mut rows: Vec<String> = bill
            .lines
            .iter()
            .map(|line| {
                let label = format!("{} ({}) x{}", line.name, line.quantity_label, line.quantity);
                self.row(&label, &self.money(line.subtotal))
            })
            .collect();

        for id in &bill.unpriced {
            rows.push(format!("  {} is no longer available", id));
        }

        rows.push(String::new());
        rows.push(self.row("Item total", &self.money(bill.items_total)));
        if bill.savings.is_positive() {
            rows.push(self.row("You save", &self.money(bill.savings)));
        }
        rows.push(self.row("Delivery charge", &self.charge(bill.delivery, bill.charges_waived())));
        rows.push(self.row("Handling charge", &self.money(bill.handling)));
        rows.push(self.row("Small cart charge", &self.charge(bill.small_cart, bill.charges_waived())));
        rows.push(self.row("Donation", &self.money(bill.donation)));
        rows.push(self.row("To pay", &self.money(bill.grand_total)));

        if bill.amount_to_waiver.is_positive() {
            rows.push(format!(
                "Add {} more to get FREE delivery",
                self.money(bill.amount_to_waiver)
            ));
        }
        rows.join("\n")
    }

    pub fn instructions(&self, instructions: &[DeliveryInstruction]) -> String {
        if instructions.is_empty() {
            return "No delivery notes".to_string();
        }
        let labels: Vec<&str> = instructions.iter().map(|i| i.label()).collect();
        format!("Delivery notes: {}", labels.join(", "))
    }

    fn charge(&self, amount: Money, waived: bool) -> String {
        if waived {
            "FREE".to_string()
        } else {
            self.money(amount)
        }
    }

    fn row(&self, label: &str, amount: &str) -> String {
        format!("{:<32} {:>8}", label, amount)
    }
}

fn plural(count: u64, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_checkout::StorefrontConfig;
    use grocer_core::InMemoryCatalog;

    fn storefront() -> Storefront {
        Storefront::new(StorefrontConfig::default(), InMemoryCatalog::sample()).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("add 7".parse::<ShellCommand>().unwrap(), ShellCommand::Add("7".into()));
        assert_eq!("  INC  7 ".parse::<ShellCommand>().unwrap(), ShellCommand::Increment("7".into()));
        assert_eq!(
            "pay Cash on Delivery".parse::<ShellCommand>().unwrap(),
            ShellCommand::Pay("Cash on Delivery".into())
        );
        assert_eq!("search".parse::<ShellCommand>().unwrap(), ShellCommand::Search(String::new()));
        assert_eq!("exit".parse::<ShellCommand>().unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!("add".parse::<ShellCommand>().is_err());
        assert!("dance".parse::<ShellCommand>().is_err());
    }

    #[tokio::test]
    async fn test_bill_rendering() {
        let s = storefront();
        execute(&s, ShellCommand::Add("1".into())).await.unwrap();
        execute(&s, ShellCommand::Add("1".into())).await.unwrap();
        execute(&s, ShellCommand::Add("5".into())).await.unwrap();

        let bill = execute(&s, ShellCommand::Bill).await.unwrap();
        assert!(bill.contains("Wheat (1 kg) x2"));
        assert!(bill.contains("FREE"));
        assert!(bill.contains("₹272"));
        assert!(!bill.contains("more to get FREE delivery"));
    }

    #[tokio::test]
    async fn test_small_cart_shows_waiver_hint() {
        let s = storefront();
        execute(&s, ShellCommand::Add("7".into())).await.unwrap();

        let bill = execute(&s, ShellCommand::Bill).await.unwrap();
        assert!(bill.contains("Add ₹74 more to get FREE delivery"));
        assert!(bill.contains("₹77"));
    }

    #[tokio::test]
    async fn test_unknown_product_is_reported() {
        let s = storefront();
        let err = execute(&s, ShellCommand::Add("42".into())).await.unwrap_err();
        assert_eq!(err.message, "Product not found: 42");
    }

    #[tokio::test]
    async fn test_session_survives_errors() {
        let s = storefront();
        let input: &[u8] = b"dance\nadd 42\nadd 7\ncart\nquit\nadd 7\n";
        let mut output = Vec::new();

        run_shell(&s, input, &mut output).await.unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("unknown command 'dance'"));
        assert!(text.contains("Product not found: 42"));
        assert!(text.contains("1 item · ₹25"));
        // Lines after quit are not read.
        assert_eq!(s.cart.snapshot().total_item_count, 1);
        assert!(text.trim_end().ends_with("Thanks for shopping at Grocer."));
    }

    #[tokio::test]
    async fn test_quit_renders_farewell() {
        let s = storefront();
        let text = execute(&s, ShellCommand::Quit).await.unwrap();
        assert_eq!(text, "Thanks for shopping at Grocer.");
    }
}
