//! Size formats and chart genders.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Regional shoe size system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum SizeFormat {
    /// United States.
    Us,
    /// United Kingdom.
    Uk,
    /// Europe (thirds of a size).
    Eu,
    /// Japan, in millimetres.
    Jp,
}

impl SizeFormat {
    /// Every format, in display order.
    pub const ALL: [Self; 4] = [Self::Us, Self::Uk, Self::Eu, Self::Jp];

    /// Short code, also used as the label prefix.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Uk => "UK",
            Self::Eu => "EU",
            Self::Jp => "JP",
        }
    }

    /// Name shown in settings.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Jp => "JP (cm)",
            other => other.code(),
        }
    }

    /// Whether labels in this format differ between genders.
    #[must_use]
    pub const fn is_gendered(self) -> bool {
        matches!(self, Self::Us)
    }
}

impl fmt::Display for SizeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which gender's chart column to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SizeGender {
    /// Men's sizing.
    Mens,
    /// Women's sizing.
    Womens,
}

impl SizeGender {
    /// Both genders, men's first.
    pub const ALL: [Self; 2] = [Self::Mens, Self::Womens];

    /// Name shown in settings.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mens => "Men's",
            Self::Womens => "Women's",
        }
    }
}

impl fmt::Display for SizeGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A `(format, gender)` pair identifying one chart column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SizeSlot {
    /// Size system.
    pub format: SizeFormat,
    /// Gender column.
    pub gender: SizeGender,
}

impl SizeSlot {
    /// Create a slot.
    #[must_use]
    pub const fn new(format: SizeFormat, gender: SizeGender) -> Self {
        Self { format, gender }
    }

    /// Label prefix, e.g. `"US Men's"` or `"UK"`.
    #[must_use]
    pub fn label(self) -> String {
        if self.format.is_gendered() {
            format!("{} {}", self.format.code(), self.gender.display_name())
        } else {
            self.format.code().to_string()
        }
    }

    /// Column header for a results grid, e.g. `"US Women's"` or `"JP (cm)"`.
    #[must_use]
    pub fn header(self) -> String {
        if self.format.is_gendered() {
            self.label()
        } else {
            self.format.display_name().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(SizeFormat::Us.display_name(), "US");
        assert_eq!(SizeFormat::Jp.display_name(), "JP (cm)");
        assert_eq!(SizeGender::Womens.display_name(), "Women's");
    }

    #[test]
    fn slot_labels() {
        assert_eq!(SizeSlot::new(SizeFormat::Us, SizeGender::Mens).label(), "US Men's");
        assert_eq!(SizeSlot::new(SizeFormat::Us, SizeGender::Womens).label(), "US Women's");
        assert_eq!(SizeSlot::new(SizeFormat::Uk, SizeGender::Womens).label(), "UK");
        assert_eq!(SizeSlot::new(SizeFormat::Jp, SizeGender::Mens).label(), "JP");
        assert_eq!(SizeSlot::new(SizeFormat::Jp, SizeGender::Mens).header(), "JP (cm)");
    }

    #[test]
    fn only_us_is_gendered() {
        let gendered: Vec<_> = SizeFormat::ALL
            .into_iter()
            .filter(|f| f.is_gendered())
            .collect();
        assert_eq!(gendered, vec![SizeFormat::Us]);
    }
}
