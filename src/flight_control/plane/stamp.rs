use strum_macros::{Display, EnumIter, FromRepr};

/// Rendering style of a stamp, resolved from the numeric variant carried on the wire.
#[derive(Debug, Display, EnumIter, FromRepr, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(usize)]
pub enum StampVariant {
    Red = 0,
    Blue = 1,
}

/// Visual attributes a presentation layer needs to draw a stamp.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct StampStyle {
    pub color: &'static str,
    pub font_size: u8,
}

impl StampVariant {
    /// Resolves a raw variant index. Anything out of range falls back to index 0.
    pub fn from_index(index: i64) -> Self {
        usize::try_from(index).ok().and_then(Self::from_repr).unwrap_or(StampVariant::Red)
    }

    pub fn style(self) -> StampStyle {
        match self {
            StampVariant::Red => StampStyle { color: "red", font_size: 32 },
            StampVariant::Blue => StampStyle { color: "blue", font_size: 32 },
        }
    }

    /// Short human readable rendering of `text` in this style.
    pub fn describe(self, text: &str) -> String {
        let style = self.style();
        format!("\"{text}\" in {} at {}px", style.color, style.font_size)
    }
}

/// Provenance annotation attached to a launch.
///
/// The stamp is carried verbatim between client and store; the raw `variant` index is kept
/// as received so an unknown style survives a round trip untouched.
#[derive(Debug, PartialEq, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Stamp {
    x: f64,
    y: f64,
    angle: f64,
    text: String,
    variant: i64,
}

impl Stamp {
    pub fn new(x: f64, y: f64, angle: f64, text: impl Into<String>, variant: i64) -> Self {
        Self { x, y, angle, text: text.into(), variant }
    }

    pub fn x(&self) -> f64 { self.x }
    pub fn y(&self) -> f64 { self.y }
    pub fn angle(&self) -> f64 { self.angle }
    pub fn text(&self) -> &str { &self.text }
    pub fn variant_index(&self) -> i64 { self.variant }

    /// Whether nothing was placed yet.
    pub fn is_blank(&self) -> bool { self.text.is_empty() }

    /// The resolved rendering style.
    pub fn variant(&self) -> StampVariant { StampVariant::from_index(self.variant) }

    /// SVG style transform placing the stamp on the plane sheet.
    pub fn transform(&self) -> String {
        format!("translate({}, {}) rotate({})", self.x, self.y, self.angle)
    }

    pub fn describe(&self) -> String { self.variant().describe(&self.text) }
}
