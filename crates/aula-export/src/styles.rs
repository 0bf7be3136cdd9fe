use serde::{Deserialize, Serialize};

/// Document styling configuration for DOCX exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text and bullets.
    pub body_font: String,

    /// Font for the section headings.
    pub heading_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Heading 1 font size in points (plan title).
    pub heading1_size: usize,

    /// Heading 2 font size in points (numbered sections).
    pub heading2_size: usize,

    /// Heading 3 font size in points (methodology stages).
    pub heading3_size: usize,

    /// Page margin in centimetres (applied uniformly, A4 page).
    pub margin_cm: f64,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Arial".to_string(),
            heading_font: "Arial".to_string(),
            body_size: 11,
            heading1_size: 18,
            heading2_size: 14,
            heading3_size: 12,
            margin_cm: 1.5,
        }
    }
}

impl DocumentStyles {
    /// Margin in twentieths of a point, the OOXML page unit.
    pub fn margin_twips(&self) -> i32 {
        (self.margin_cm / 2.54 * 1440.0).round() as i32
    }
}
