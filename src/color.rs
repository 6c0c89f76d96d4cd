//! Named RGBA colors and the lookup table the pipeline draws from.

/// An RGBA color that knows its filesystem-friendly name and a readable
/// label. Output directories are segmented by color name, so the name must
/// be safe to embed in a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    name: String,
    label: String,
}

impl NamedColor {
    /// Create a named color.
    pub fn new(r: u8, g: u8, b: u8, a: u8, name: &str) -> Self {
        Self {
            r,
            g,
            b,
            a,
            name: name.to_string(),
            label: name.to_string(),
        }
    }

    /// Create a color without a given name; it gets a synthetic
    /// `RGBA_r_g_b_a` name and an `RGBA(r,g,b,a)` label.
    pub fn anonymous(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            a,
            name: format!("RGBA_{r}_{g}_{b}_{a}"),
            label: format!("RGBA({r},{g},{b},{a})"),
        }
    }

    /// Filesystem-friendly name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The color as an RGBA byte quadruple.
    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255, "white")
    }

    pub fn light_gray() -> Self {
        Self::new(192, 192, 192, 255, "lightGray")
    }

    pub fn gray() -> Self {
        Self::new(128, 128, 128, 255, "gray")
    }

    pub fn dark_gray() -> Self {
        Self::new(64, 64, 64, 255, "darkGray")
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255, "black")
    }

    pub fn red() -> Self {
        Self::new(255, 0, 0, 255, "red")
    }

    pub fn pink() -> Self {
        Self::new(255, 175, 175, 255, "pink")
    }

    pub fn orange() -> Self {
        Self::new(255, 200, 0, 255, "orange")
    }

    pub fn yellow() -> Self {
        Self::new(255, 255, 0, 255, "yellow")
    }

    pub fn green() -> Self {
        Self::new(0, 255, 0, 255, "green")
    }

    pub fn magenta() -> Self {
        Self::new(255, 0, 255, 255, "magenta")
    }

    pub fn cyan() -> Self {
        Self::new(0, 255, 255, 255, "cyan")
    }

    pub fn blue() -> Self {
        Self::new(0, 0, 255, 255, "blue")
    }
}

/// Immutable name → color mapping, built once at startup and passed by
/// reference to whoever resolves user-facing color names.
#[derive(Debug, Clone)]
pub struct ColorTable {
    colors: Vec<NamedColor>,
}

impl ColorTable {
    /// The built-in palette.
    pub fn builtin() -> Self {
        Self {
            colors: vec![
                NamedColor::white(),
                NamedColor::light_gray(),
                NamedColor::gray(),
                NamedColor::dark_gray(),
                NamedColor::black(),
                NamedColor::red(),
                NamedColor::pink(),
                NamedColor::orange(),
                NamedColor::yellow(),
                NamedColor::green(),
                NamedColor::magenta(),
                NamedColor::cyan(),
                NamedColor::blue(),
            ],
        }
    }

    /// Look a color up by its filesystem-friendly name.
    pub fn get(&self, name: &str) -> Option<&NamedColor> {
        self.colors.iter().find(|c| c.name() == name)
    }

    /// All known color names, in palette order.
    pub fn names(&self) -> Vec<&str> {
        self.colors.iter().map(|c| c.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_lookup() {
        let table = ColorTable::builtin();
        let red = table.get("red").expect("red should exist");
        assert_eq!(red.rgba(), [255, 0, 0, 255]);
        assert!(table.get("chartreuse").is_none());
        assert_eq!(table.names().len(), 13);
    }

    #[test]
    fn anonymous_color_names() {
        let c = NamedColor::anonymous(1, 2, 3, 4);
        assert_eq!(c.name(), "RGBA_1_2_3_4");
        assert_eq!(c.label(), "RGBA(1,2,3,4)");
    }
}
