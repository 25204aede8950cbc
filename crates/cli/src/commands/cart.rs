//! Cart commands.

use shreya_pharmacy_core::ProductId;
use shreya_pharmacy_storefront::cart::CartError;
use shreya_pharmacy_storefront::state::AppState;

use super::{toast_info, toast_success};

/// Stepper bound on the product page.
const MAX_INPUT_QUANTITY: u32 = 99;

/// Print the cart lines and the order total.
pub fn show(state: &AppState) {
    let cart = state.cart();
    if cart.is_empty() {
        println!("🛒 Your cart is empty");
        return;
    }
    for line in cart.lines() {
        println!(
            "{} {}  {} × {} = {}",
            line.product.icon,
            line.product.name,
            line.product.price,
            line.quantity,
            line.subtotal()
        );
    }
    println!("Total: {} ({} items)", cart.total(), cart.count());
}

/// Add a product to the cart.
pub fn add(state: &mut AppState, id: u32, quantity: u32) -> Result<(), CartError> {
    let id = ProductId::new(id);
    state
        .cart_mut()
        .add_with_quantity(id, clamp_quantity(quantity))?;
    if let Some(product) = state.catalog().find_by_id(id) {
        toast_success(&format!("{} added to cart!", product.name));
    }
    Ok(())
}

/// Remove a product from the cart.
pub fn remove(state: &mut AppState, id: u32) {
    let id = ProductId::new(id);
    let name = state
        .cart()
        .lines()
        .iter()
        .find(|line| line.product.id == id)
        .map(|line| line.product.name.clone());

    if state.cart_mut().remove(id) {
        if let Some(name) = name {
            toast_info(&format!("{name} removed from cart"));
        }
    } else {
        toast_info(&format!("Product {} is not in the cart", id.get()));
    }
}

/// Set the quantity of a line already in the cart.
pub fn set_quantity(state: &mut AppState, id: u32, quantity: u32) {
    let id = ProductId::new(id);
    if state.cart_mut().update_quantity(id, clamp_quantity(quantity)) {
        if let Some(line) = state.cart().lines().iter().find(|line| line.product.id == id) {
            toast_success(&format!(
                "{} quantity set to {}",
                line.product.name, line.quantity
            ));
        }
    } else {
        toast_info(&format!("Product {} is not in the cart", id.get()));
    }
}

fn clamp_quantity(quantity: u32) -> u32 {
    quantity.clamp(1, MAX_INPUT_QUANTITY)
}
