//! The interactive storefront shell.
//!
//! One loop: render state, read a command, apply the transition, repeat.
//! All domain behavior lives in `footwa-storefront`; this module only parses
//! commands, collects input, and prints.

use std::error::Error;
use std::io::{self, BufRead, Write};

use console::style;
use dialoguer::{Confirm, Input, Select};

use footwa_core::{DisplayRate, OrderId, PaymentMethod, ProductId};
use footwa_storefront::catalog::Product;
use footwa_storefront::export::ExportDocument;
use footwa_storefront::filter::{ALL, CATEGORIES, CatalogFilter};
use footwa_storefront::orders::{CheckoutForm, Order, OrderService};
use footwa_storefront::overrides::{Listing, OverrideForm, apply_override};
use footwa_storefront::reviews::ReviewService;
use footwa_storefront::session::{Session, SessionError};
use footwa_storefront::store::{OverrideRepository, Store};

use crate::link;

type ShellResult = Result<(), Box<dyn Error>>;

/// A parsed shell command.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    List,
    Categories,
    Search(String),
    Category(String),
    Buy(u64),
    Reviews(u64),
    Review(u64),
    Open(u64),
    Edit(u64),
    Orders(Option<String>),
    Complete(String),
    Delete(String),
    Clear,
    History,
    Customers,
    Stats,
    Export,
    Quit,
}

/// Parse a non-blank input line.
fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    let (head, tail) = match trimmed.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (trimmed, ""),
    };

    match head.to_lowercase().as_str() {
        "help" | "?" => Ok(Command::Help),
        "list" | "ls" => Ok(Command::List),
        "cats" | "categories" => Ok(Command::Categories),
        "search" => Ok(Command::Search(tail.to_owned())),
        "cat" | "category" => {
            if tail.is_empty() {
                Err("usage: cat <name>  (see \"cats\")".to_owned())
            } else {
                Ok(Command::Category(tail.to_owned()))
            }
        }
        "buy" | "order" => parse_product_id(tail).map(Command::Buy),
        "reviews" => parse_product_id(tail).map(Command::Reviews),
        "review" => parse_product_id(tail).map(Command::Review),
        "open" => parse_product_id(tail).map(Command::Open),
        "edit" => parse_product_id(tail).map(Command::Edit),
        "orders" => Ok(Command::Orders(if tail.is_empty() {
            None
        } else {
            Some(tail.to_owned())
        })),
        "done" | "complete" => parse_order_id(tail).map(Command::Complete),
        "rm" | "delete" => parse_order_id(tail).map(Command::Delete),
        "clear" => Ok(Command::Clear),
        "history" => Ok(Command::History),
        "customers" => Ok(Command::Customers),
        "stats" => Ok(Command::Stats),
        "export" => Ok(Command::Export),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command {other:?} (try \"help\")")),
    }
}

fn parse_product_id(tail: &str) -> Result<u64, String> {
    tail.trim_start_matches('#')
        .parse()
        .map_err(|_| format!("expected a product id, got {tail:?}"))
}

fn parse_order_id(tail: &str) -> Result<String, String> {
    if tail.is_empty() {
        Err("expected an order id (see \"orders\")".to_owned())
    } else {
        Ok(tail.to_owned())
    }
}

/// The interactive shell.
pub struct Shell {
    session: Session,
    store: Store,
    rate: DisplayRate,
}

impl Shell {
    pub const fn new(session: Session, store: Store, rate: DisplayRate) -> Self {
        Self {
            session,
            store,
            rate,
        }
    }

    /// Run the shell until `quit` or end of input.
    pub fn run(&mut self) -> ShellResult {
        self.render_grid()?;
        println!("Type {} for commands.\n", style("help").cyan());

        let stdin = io::stdin();
        loop {
            print!("{} ", style("footwa>").cyan().bold());
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break; // end of input
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match parse_command(trimmed) {
                Err(message) => println!("{message}"),
                Ok(Command::Quit) => break,
                Ok(command) => {
                    if let Err(e) = self.dispatch(&command) {
                        println!("{} {e}", style("error:").red());
                    }
                }
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, command: &Command) -> ShellResult {
        match command {
            Command::Help => {
                print_help();
                Ok(())
            }
            Command::List => self.render_grid(),
            Command::Categories => {
                self.print_categories();
                Ok(())
            }
            Command::Search(text) => {
                self.session.search(text.clone());
                self.render_grid()
            }
            Command::Category(name) => {
                if self.session.select_category(name) {
                    self.render_grid()
                } else {
                    self.print_categories();
                    Ok(())
                }
            }
            Command::Buy(id) => self.buy(ProductId::new(*id)),
            Command::Reviews(id) => self.show_reviews(ProductId::new(*id)),
            Command::Review(id) => self.write_review(ProductId::new(*id)),
            Command::Open(id) => self.open_website(ProductId::new(*id)),
            Command::Edit(id) => self.edit_override(ProductId::new(*id)),
            Command::Orders(query) => self.show_orders(query.as_deref()),
            Command::Complete(id) => self.complete_order(&OrderId::from(id.as_str())),
            Command::Delete(id) => self.delete_order(&OrderId::from(id.as_str())),
            Command::Clear => self.clear_orders(),
            Command::History => self.show_history(),
            Command::Customers => self.show_customers(),
            Command::Stats => self.show_stats(),
            Command::Export => self.export(),
            Command::Quit => Ok(()),
        }
    }

    // =========================================================================
    // Shopper screens
    // =========================================================================

    fn render_grid(&self) -> ShellResult {
        let headline = match self.session.filter() {
            CatalogFilter::Search(query) => format!("Results for \"{query}\""),
            CatalogFilter::Category(category) => format!("{} Selection", category.name),
            CatalogFilter::All => "Shoes Selection".to_owned(),
        };
        println!("\n{}", style(headline).bold());

        let overrides = OverrideRepository::new(&self.store).all()?;
        let reviews = ReviewService::new(&self.store);

        let visible = self.session.visible();
        if visible.is_empty() {
            println!("  No shoes match.");
        }
        for product in &visible {
            let listing = apply_override(product, overrides.get(&product.id));
            let review_count = reviews.count(product.id)?;
            println!(
                "  {:>5}  {:<34} {:<12} {:>9}  {}",
                style(format!("#{}", product.id)).cyan(),
                truncate(&product.title, 34),
                style(truncate(product.brand.as_deref().unwrap_or("Premium"), 12)).dim(),
                style(format!("₹ {}", listing.price.in_display_currency(self.rate))).green(),
                style(format!("★ {review_count}")).yellow(),
            );
        }
        println!();
        Ok(())
    }

    fn print_categories(&self) {
        let active = self.session.filter().category_name();
        let mark = |name: &str| if name == active { "●" } else { " " };
        println!("{} {}", mark(ALL), ALL);
        for category in &CATEGORIES {
            println!("{} {}", mark(category.name), category.name);
        }
    }

    fn listing_for(&self, product: &Product) -> Result<Listing, Box<dyn Error>> {
        let stored = OverrideRepository::new(&self.store).get(product.id)?;
        Ok(apply_override(product, stored.as_ref()))
    }

    fn buy(&mut self, id: ProductId) -> ShellResult {
        let Some(product) = self.session.product(id).cloned() else {
            println!("No product #{id}.");
            return Ok(());
        };
        let listing = self.listing_for(&product)?;
        println!(
            "Ordering {} - {}",
            style(&product.title).bold(),
            style(format!("₹ {}", listing.price.in_display_currency(self.rate))).green()
        );

        self.session.begin_checkout(product);

        // Draft stage: collect details until they validate or the shopper
        // gives up.
        loop {
            let form = CheckoutForm {
                name: Input::new().with_prompt("Name").allow_empty(true).interact_text()?,
                phone: Input::new()
                    .with_prompt("Mobile")
                    .allow_empty(true)
                    .interact_text()?,
                address: Input::new()
                    .with_prompt("Full address")
                    .allow_empty(true)
                    .interact_text()?,
            };
            match self.session.submit_details(&form) {
                Ok(()) => break,
                Err(SessionError::InvalidCheckout(e)) => {
                    println!("{}", style(format!("Details incomplete: {e}")).red());
                    if !Confirm::new()
                        .with_prompt("Try again?")
                        .default(true)
                        .interact()?
                    {
                        self.session.cancel_checkout();
                        println!("Checkout cancelled.");
                        return Ok(());
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        // Payment selection: simulated, always succeeds once chosen.
        let mut items: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.label()).collect();
        items.push("Cancel");
        let choice = Select::new()
            .with_prompt("Select payment")
            .items(&items)
            .default(0)
            .interact()?;

        let Some(method) = PaymentMethod::ALL.get(choice).copied() else {
            self.session.cancel_checkout();
            println!("Checkout cancelled.");
            return Ok(());
        };

        let (product, details) = self.session.confirm_payment()?;
        let listing = self.listing_for(&product)?;
        let order =
            OrderService::new(&self.store, self.rate).place(&product, listing.price, &details, method)?;

        println!(
            "{} Order {} placed - your parcel will be ready soon.",
            style("Success!").green().bold(),
            style(&order.order_id).cyan()
        );
        Ok(())
    }

    fn show_reviews(&self, id: ProductId) -> ShellResult {
        let Some(product) = self.session.product(id) else {
            println!("No product #{id}.");
            return Ok(());
        };
        let reviews = ReviewService::new(&self.store).for_product(id)?;
        println!(
            "\n{} ({} reviews)",
            style(&product.title).bold(),
            reviews.len()
        );
        for review in &reviews {
            println!(
                "  {} - {}  {}",
                style(&review.name).cyan(),
                review.comment,
                style(review.date.format("%d/%m/%Y")).dim()
            );
        }
        println!();
        Ok(())
    }

    fn write_review(&self, id: ProductId) -> ShellResult {
        if self.session.product(id).is_none() {
            println!("No product #{id}.");
            return Ok(());
        }
        let name: String = Input::new()
            .with_prompt("Your name")
            .allow_empty(true)
            .interact_text()?;
        let comment: String = Input::new()
            .with_prompt("Your experience")
            .allow_empty(true)
            .interact_text()?;

        match ReviewService::new(&self.store).add(id, &name, &comment) {
            Ok(_) => println!("Thanks - your review has been saved."),
            Err(e) => println!("{}", style(e).red()),
        }
        Ok(())
    }

    fn open_website(&self, id: ProductId) -> ShellResult {
        let Some(product) = self.session.product(id) else {
            println!("No product #{id}.");
            return Ok(());
        };
        let listing = self.listing_for(product)?;
        match link::open_url(&listing.website) {
            Ok(()) => println!("Opened {}", style(&listing.website).dim()),
            Err(e) => println!("{}", style(format!("Could not open the link: {e}")).red()),
        }
        Ok(())
    }

    // =========================================================================
    // Admin screens
    // =========================================================================

    fn edit_override(&self, id: ProductId) -> ShellResult {
        let Some(product) = self.session.product(id) else {
            println!("No product #{id}.");
            return Ok(());
        };
        let listing = self.listing_for(product)?;
        println!(
            "Editing {} (price $ {}, blank keeps the current value)",
            style(&product.title).bold(),
            listing.price.amount()
        );

        let price: String = Input::new()
            .with_prompt("New price (USD)")
            .allow_empty(true)
            .interact_text()?;
        let image: String = Input::new()
            .with_prompt("Image link (URL)")
            .allow_empty(true)
            .interact_text()?;
        let website: String = Input::new()
            .with_prompt("Brand website (URL)")
            .allow_empty(true)
            .interact_text()?;

        let form = match OverrideForm::from_input(&price, &image, &website) {
            Ok(form) => form,
            Err(e) => {
                println!("{}", style(e).red());
                return Ok(());
            }
        };
        if form.is_empty() {
            println!("Nothing to change.");
            return Ok(());
        }

        OverrideRepository::new(&self.store).save(id, &form)?;
        println!("Product details updated.");
        Ok(())
    }

    fn show_orders(&self, query: Option<&str>) -> ShellResult {
        let service = OrderService::new(&self.store, self.rate);
        let orders = match query {
            Some(query) => service.search_active(query)?,
            None => service.active()?,
        };
        println!("\n{}", style("Customer Orders").bold());
        if orders.is_empty() {
            println!("  No active orders.");
        }
        for order in &orders {
            print_order(order);
        }
        println!();
        Ok(())
    }

    fn complete_order(&self, id: &OrderId) -> ShellResult {
        let confirmed = Confirm::new()
            .with_prompt("Order fulfilled? It will be moved into the history.")
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }

        let completion = OrderService::new(&self.store, self.rate).complete(id)?;
        if completion.customer_recorded {
            println!(
                "Completed {} and added {} to the marketing database.",
                style(id).cyan(),
                completion.order.customer_name
            );
        } else {
            println!("Completed {} (customer already known).", style(id).cyan());
        }
        Ok(())
    }

    fn delete_order(&self, id: &OrderId) -> ShellResult {
        let confirmed = Confirm::new()
            .with_prompt("Remove this order?")
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }

        OrderService::new(&self.store, self.rate).delete(id)?;
        println!("Order {} removed.", style(id).cyan());
        Ok(())
    }

    fn clear_orders(&self) -> ShellResult {
        let confirmed = Confirm::new()
            .with_prompt("Clear ALL active orders? History and marketing data are kept.")
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(());
        }

        let removed = OrderService::new(&self.store, self.rate).clear_active()?;
        println!("Cleared {removed} active orders.");
        Ok(())
    }

    fn show_history(&self) -> ShellResult {
        let archived = OrderService::new(&self.store, self.rate).archived()?;
        println!("\n{}", style("Order History").bold());
        if archived.is_empty() {
            println!("  No completed orders yet.");
        }
        for order in &archived {
            print_order(order);
        }
        println!();
        Ok(())
    }

    fn show_customers(&self) -> ShellResult {
        let customers = OrderService::new(&self.store, self.rate).customers()?;
        println!("\n{}", style("Marketing Database").bold());
        if customers.is_empty() {
            println!("  No customers yet.");
        }
        for customer in &customers {
            println!(
                "  {}  {}  {}",
                style(&customer.name).bold(),
                style(&customer.phone).green(),
                style(&customer.address).dim()
            );
        }
        println!();
        Ok(())
    }

    fn show_stats(&self) -> ShellResult {
        let stats = OrderService::new(&self.store, self.rate).stats()?;
        println!("Total customers: {}", stats.customers);
        println!("Total past orders: {}", stats.archived_orders);
        Ok(())
    }

    fn export(&self) -> ShellResult {
        let service = OrderService::new(&self.store, self.rate);
        let orders = service.archived()?;
        let marketing = service.customers()?;
        let document = ExportDocument::new(&orders, &marketing);
        println!("{}", document.to_json_pretty()?);
        Ok(())
    }
}

fn print_order(order: &Order) {
    println!(
        "  {}  {} ({})",
        style(&order.order_id).cyan(),
        order.customer_name,
        order.customer_phone
    );
    println!("         {}", style(&order.customer_address).dim());
    println!(
        "         {} - ₹ {}  [{}]  {}",
        order.product_title,
        order.price,
        order.status,
        style(order.order_date.format("%d/%m/%Y")).dim()
    );
}

fn print_help() {
    let rows: [(&str, &str); 18] = [
        ("list", "show the (filtered) catalog"),
        ("search <text>", "search by title or category"),
        ("cat <name>", "filter by shop category (\"cat All\" resets)"),
        ("cats", "list shop categories"),
        ("buy <id>", "order a shoe"),
        ("reviews <id>", "read reviews"),
        ("review <id>", "write a review"),
        ("open <id>", "open the product website"),
        ("edit <id>", "admin: override price/image/link"),
        ("orders [query]", "admin: active orders, optionally filtered"),
        ("done <order>", "admin: complete an order"),
        ("rm <order>", "admin: delete an order"),
        ("clear", "admin: clear all active orders"),
        ("history", "admin: completed orders"),
        ("customers", "admin: marketing database"),
        ("stats", "admin: store totals"),
        ("export", "admin: print the history export JSON"),
        ("quit", "leave the shop"),
    ];
    for (command, description) in rows {
        println!("  {:<16} {description}", style(command).cyan());
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_owned()
    } else {
        let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("help").unwrap(), Command::Help);
        assert_eq!(parse_command("  quit  ").unwrap(), Command::Quit);
        assert_eq!(parse_command("LS").unwrap(), Command::List);
        assert_eq!(parse_command("export").unwrap(), Command::Export);
    }

    #[test]
    fn test_parse_search_keeps_spaces() {
        assert_eq!(
            parse_command("search air runner").unwrap(),
            Command::Search("air runner".to_owned())
        );
        // An empty search is allowed; it matches everything.
        assert_eq!(parse_command("search").unwrap(), Command::Search(String::new()));
    }

    #[test]
    fn test_parse_product_ids() {
        assert_eq!(parse_command("buy 3").unwrap(), Command::Buy(3));
        assert_eq!(parse_command("open #12").unwrap(), Command::Open(12));
        assert!(parse_command("buy twelve").is_err());
        assert!(parse_command("buy").is_err());
    }

    #[test]
    fn test_parse_order_commands() {
        assert_eq!(
            parse_command("done ORD-abc").unwrap(),
            Command::Complete("ORD-abc".to_owned())
        );
        assert_eq!(
            parse_command("orders asha").unwrap(),
            Command::Orders(Some("asha".to_owned()))
        );
        assert_eq!(parse_command("orders").unwrap(), Command::Orders(None));
        assert!(parse_command("done").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long product title", 10), "a very lo…");
    }
}
