//! Site content commands.

use shreya_pharmacy_storefront::state::AppState;

/// Print the customer testimonials.
pub fn testimonials(state: &AppState) {
    for testimonial in state.content().testimonials() {
        println!("{}", "★".repeat(usize::from(testimonial.rating)));
        println!("\"{}\"", testimonial.text);
        println!(
            "    {} {}, {}",
            testimonial.avatar, testimonial.author, testimonial.role
        );
        println!();
    }
}
