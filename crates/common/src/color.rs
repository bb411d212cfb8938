//! Background color generation for exhibition tickets.

use rand::Rng;

/// Fallback used whenever a generated or stored color would render the
/// ticket unreadable on a white page ("warm paper").
pub const FALLBACK_COLOR: &str = "#EAD5B7";

const WHITE_FORMS: &[&str] = &["#ffffff", "#fff", "white"];

/// Ticket background color helper.
#[derive(Debug, Clone, Default)]
pub struct TicketColor {
    _private: (),
}

impl TicketColor {
    /// Create a new color generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a random `#RRGGBB` color for a newly created ticket.
    ///
    /// If the draw lands on pure white the fallback color is returned
    /// instead, so every ticket stays visible against the page.
    #[must_use]
    pub fn random(&self) -> String {
        let value: u32 = rand::thread_rng().gen_range(0..=0x00FF_FFFF);
        Self::ensure_visible(format!("#{value:06x}"))
    }

    /// Substitute the fallback for any form of white.
    #[must_use]
    pub fn ensure_visible(color: String) -> String {
        if Self::is_white(&color) {
            FALLBACK_COLOR.to_string()
        } else {
            color
        }
    }

    /// Whether a color string is one of the white forms.
    #[must_use]
    pub fn is_white(color: &str) -> bool {
        let lower = color.trim().to_lowercase();
        WHITE_FORMS.contains(&lower.as_str())
    }
}
