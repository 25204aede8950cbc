//! Product browsing commands.

use shreya_pharmacy_core::Category;
use shreya_pharmacy_storefront::catalog::Product;
use shreya_pharmacy_storefront::state::AppState;

/// Print the product grid, optionally filtered to a single category.
pub fn list(state: &AppState, category: Option<Category>) {
    let products: Vec<&Product> = match category {
        Some(category) => state.catalog().filter_by_category(category),
        None => state.catalog().products().iter().collect(),
    };
    render(&products);
}

/// Print the products matching a search query.
pub fn search(state: &AppState, query: &str) {
    let hits = state.catalog().search(query);
    if hits.is_empty() {
        println!("No products match \"{query}\"");
        return;
    }
    render(&hits);
}

fn render(products: &[&Product]) {
    for product in products {
        let mut line = format!(
            "{:>2}. {} {}  {}",
            product.id.get(),
            product.icon,
            product.name,
            product.price
        );
        if let Some(original) = product.original_price {
            line.push_str(&format!(" (was {original})"));
        }
        if let Some(badge) = &product.badge {
            line.push_str(&format!("  [{badge}]"));
        }
        line.push_str(&format!("  {}, {} reviews", product.category, product.reviews));
        if !product.in_stock {
            line.push_str("  (out of stock)");
        }
        println!("{line}");
    }
}
