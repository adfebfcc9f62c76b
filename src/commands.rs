//! Command handlers behind the CLI. Each renders to the given writer so the
//! binary prints to stdout and tests capture the text.

use std::io::Write;

use anyhow::{bail, Context, Result};
use tracing::info;

use pt_app::usecases::cart::SelectionViewModel;
use pt_app::usecases::checkout::CheckoutOutcome;
use pt_core::cart::{HydratedEntry, HydrationStatus, Position};
use pt_core::checkout::CheckoutFailure;
use pt_core::catalog::{format_rupiah, ItemRecord};
use pt_core::ids::ItemId;
use pt_core::order::PaymentMethod;

use crate::bootstrap::Storefront;
use crate::cli::Commands;

/// Checkout ended without an order. The reason was already shown to the
/// user as a notice, so it is carried here but kept out of the message.
#[derive(Debug, thiserror::Error)]
#[error("Checkout did not go through")]
pub struct CheckoutNotPlaced(pub CheckoutFailure);

pub async fn run_command<W: Write>(
    storefront: &Storefront,
    command: Commands,
    out: &mut W,
) -> Result<()> {
    match command {
        Commands::Item { id } => show_item(storefront, ItemId::new(id), out).await,
        Commands::Add { id } => add_item(storefront, ItemId::new(id), out).await,
        Commands::Cart => show_cart(storefront, out).await,
        Commands::Remove { position } => {
            remove_line(storefront, Position::new(position), out).await
        }
        Commands::Clear => clear_cart(storefront, out).await,
        Commands::Checkout { payment } => {
            checkout(storefront, payment.as_deref().unwrap_or(""), out).await
        }
    }
}

async fn fetch(storefront: &Storefront, item_id: ItemId) -> Result<ItemRecord> {
    storefront
        .catalog
        .fetch_item(item_id)
        .await
        .with_context(|| format!("Failed to load item {item_id}"))
}

pub async fn show_item<W: Write>(storefront: &Storefront, item_id: ItemId, out: &mut W) -> Result<()> {
    let item = fetch(storefront, item_id).await?;
    let in_cart = storefront.store.contains(item_id).await;
    let media_base = &storefront.config.checkout.media_base_url;

    writeln!(out, "{}", item.title())?;
    writeln!(out, "  price:   {}", format_rupiah(item.price))?;
    writeln!(out, "  weight:  {} kg", item.weight)?;
    writeln!(out, "  age:     {} yr", item.age)?;
    writeln!(out, "  status:  {}", item.availability)?;
    writeln!(out, "  photo:   {}", item.photo_url(media_base))?;
    if !item.description.is_empty() {
        writeln!(out, "  {}", item.description)?;
    }
    writeln!(out, "  in cart: {}", if in_cart { "yes" } else { "no" })?;
    Ok(())
}

pub async fn add_item<W: Write>(storefront: &Storefront, item_id: ItemId, out: &mut W) -> Result<()> {
    let item = fetch(storefront, item_id).await?;
    if !item.is_available() {
        bail!("{} is not available ({})", item.title(), item.availability);
    }
    if storefront.store.contains(item_id).await {
        writeln!(out, "{} is already in the cart, adding another", item.title())?;
    }
    storefront.add_to_cart.execute(item_id).await?;
    Ok(())
}

fn render_row<W: Write>(entry: &HydratedEntry, out: &mut W) -> Result<()> {
    match &entry.status {
        HydrationStatus::Pending => {
            writeln!(
                out,
                "{:>3}  item {:<8} loading",
                entry.position.index(),
                entry.item_id.inner()
            )?;
        }
        HydrationStatus::Ready(item) => {
            let flag = if item.is_available() { "" } else { "  (unavailable)" };
            writeln!(
                out,
                "{:>3}  {:<20} {:>16}  {}{}",
                entry.position.index(),
                item.title(),
                format_rupiah(item.price),
                item.availability,
                flag
            )?;
        }
        HydrationStatus::Failed(reason) => {
            writeln!(
                out,
                "{:>3}  item {:<8} failed to load: {}",
                entry.position.index(),
                entry.item_id.inner(),
                reason
            )?;
        }
    }
    Ok(())
}

fn render_cart<W: Write>(view: &SelectionViewModel, out: &mut W) -> Result<()> {
    if view.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }
    for entry in view.entries() {
        render_row(entry, out)?;
    }
    writeln!(out, "Total: {}", format_rupiah(view.total_price()))?;
    Ok(())
}

async fn loaded_view(storefront: &Storefront) -> SelectionViewModel {
    let mut view = storefront.selection_view();
    view.mount();
    view.refresh().await;
    view
}

pub async fn show_cart<W: Write>(storefront: &Storefront, out: &mut W) -> Result<()> {
    let view = loaded_view(storefront).await;
    render_cart(&view, out)
}

pub async fn remove_line<W: Write>(
    storefront: &Storefront,
    position: Position,
    out: &mut W,
) -> Result<()> {
    let mut view = loaded_view(storefront).await;
    match view.remove_at(position).await? {
        Some(removed) => {
            info!(item_id = %removed.item_id, position = %position, "Removed cart line");
            writeln!(out, "Removed item {} from position {}", removed.item_id, position)?;
        }
        None => writeln!(out, "Nothing at position {position}")?,
    }
    render_cart(&view, out)
}

pub async fn clear_cart<W: Write>(storefront: &Storefront, out: &mut W) -> Result<()> {
    let mut view = storefront.selection_view();
    view.mount();
    view.clear().await?;
    writeln!(out, "Cart cleared")?;
    Ok(())
}

pub async fn checkout<W: Write>(storefront: &Storefront, payment: &str, out: &mut W) -> Result<()> {
    let payment_method = PaymentMethod::from_selection(payment)?;
    let view = loaded_view(storefront).await;

    match storefront
        .checkout
        .checkout(payment_method, &view.snapshot())
        .await
    {
        CheckoutOutcome::Succeeded { message } => {
            writeln!(out, "{message}")?;
            Ok(())
        }
        CheckoutOutcome::Rejected(reason) | CheckoutOutcome::Failed(reason) => {
            Err(CheckoutNotPlaced(reason).into())
        }
        CheckoutOutcome::Ignored => bail!("A checkout is already in progress"),
    }
}
