//! Static marketing content.
//!
//! Holds the customer testimonials shown on the home page. Content lives
//! in memory; there is no editing surface.

use serde::{Deserialize, Serialize};
use shreya_pharmacy_core::TestimonialId;

/// A customer testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    /// Stable numeric id.
    pub id: TestimonialId,
    /// Quote text, without surrounding quotation marks.
    pub text: String,
    /// Who said it.
    pub author: String,
    /// The author's role, shown under the name.
    pub role: String,
    /// Emoji avatar.
    pub avatar: String,
    /// Star rating out of five.
    pub rating: u8,
}

/// Content store holding all static marketing copy in memory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    testimonials: Vec<Testimonial>,
}

impl ContentStore {
    /// The built-in testimonials.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            testimonials: vec![
                Testimonial {
                    id: TestimonialId::new(1),
                    text: "Absolutely revolutionary service! The interface is from the future \
                           and my medications arrive faster than ever."
                        .to_string(),
                    author: "Sarah Mitchell".to_string(),
                    role: "Healthcare Provider".to_string(),
                    avatar: "👩‍💼".to_string(),
                    rating: 5,
                },
                Testimonial {
                    id: TestimonialId::new(2),
                    text: "As a wholesale customer, the bulk ordering system and dedicated \
                           account manager have transformed our operations."
                        .to_string(),
                    author: "James Rodriguez".to_string(),
                    role: "Pharmacy Owner".to_string(),
                    avatar: "👨‍💼".to_string(),
                    rating: 5,
                },
                Testimonial {
                    id: TestimonialId::new(3),
                    text: "The prescription upload feature is so easy! I take a photo and my \
                           refills arrive like magic. Best pharmacy experience ever."
                        .to_string(),
                    author: "Emily Chen".to_string(),
                    role: "Regular Customer".to_string(),
                    avatar: "👩".to_string(),
                    rating: 5,
                },
            ],
        }
    }

    /// All testimonials in display order.
    #[must_use]
    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_testimonials() {
        let content = ContentStore::builtin();
        let testimonials = content.testimonials();

        assert_eq!(testimonials.len(), 3);
        assert_eq!(testimonials[0].author, "Sarah Mitchell");
        assert!(testimonials.iter().all(|t| t.rating == 5));
    }

    #[test]
    fn test_testimonial_serde_shape() {
        let content = ContentStore::builtin();
        let json = serde_json::to_value(&content.testimonials()[2]).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["author"], "Emily Chen");
        assert_eq!(json["rating"], 5);
    }
}
