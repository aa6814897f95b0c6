//! Size recommendations for completed measurements.

use foot_types::FootMeasurement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::chart::SizeChart;
use crate::format::{SizeFormat, SizeGender, SizeSlot};

/// Sizes for several chart columns, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AllSizes {
    sizes: Vec<(SizeSlot, String)>,
}

impl AllSizes {
    pub(crate) fn new(sizes: Vec<(SizeSlot, String)>) -> Self {
        Self { sizes }
    }

    /// Label for a column, if present.
    #[must_use]
    pub fn get(&self, format: SizeFormat, gender: SizeGender) -> Option<&str> {
        let slot = SizeSlot::new(format, gender);
        self.sizes
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, size)| size.as_str())
    }

    /// Iterate `(column, label)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (SizeSlot, &str)> {
        self.sizes.iter().map(|(slot, size)| (*slot, size.as_str()))
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// True if there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Size lookups for anything with a heel-to-toe length, against the
/// built-in chart.
pub trait MeasurementSizing {
    /// Heel-to-toe length in centimetres.
    fn heel_toe_cm(&self) -> f64;

    /// Raw size label, e.g. `"9"`.
    fn recommended_size(&self, format: SizeFormat, gender: SizeGender) -> String {
        SizeChart::standard().lookup(self.heel_toe_cm(), format, gender)
    }

    /// Labelled size, e.g. `"US Men's 9"`.
    fn formatted_size(&self, format: SizeFormat, gender: SizeGender) -> String {
        SizeChart::standard().formatted_size(self.heel_toe_cm(), format, gender)
    }

    /// Default recommendation shown when no preference is set: US men's.
    fn estimated_shoe_size(&self) -> String {
        self.formatted_size(SizeFormat::Us, SizeGender::Mens)
    }

    /// Every column of the results display.
    fn all_sizes(&self, gender: SizeGender) -> AllSizes {
        SizeChart::standard().all_formats(self.heel_toe_cm(), gender)
    }
}

impl MeasurementSizing for FootMeasurement {
    fn heel_toe_cm(&self) -> f64 {
        self.length_cm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foot_types::FootSide;

    fn measurement(length_cm: f64) -> FootMeasurement {
        FootMeasurement::new(length_cm, 10.0, None, 4, FootSide::Left)
    }

    #[test]
    fn measurement_recommendations() {
        let m = measurement(26.2);
        assert_eq!(m.recommended_size(SizeFormat::Us, SizeGender::Mens), "9");
        assert_eq!(m.formatted_size(SizeFormat::Uk, SizeGender::Womens), "UK 8.5");
        assert_eq!(m.estimated_shoe_size(), "US Men's 9");
    }

    #[test]
    fn all_sizes_lookup_by_slot() {
        let sizes = measurement(26.2).all_sizes(SizeGender::Womens);
        assert_eq!(sizes.len(), 5);
        assert!(!sizes.is_empty());
        assert_eq!(sizes.get(SizeFormat::Us, SizeGender::Mens), Some("9"));
        assert_eq!(sizes.get(SizeFormat::Us, SizeGender::Womens), Some("10"));
        assert_eq!(sizes.get(SizeFormat::Eu, SizeGender::Womens), Some("42⅔"));
        assert_eq!(sizes.get(SizeFormat::Eu, SizeGender::Mens), None);
    }

    #[test]
    fn headers_follow_display_order() {
        let sizes = measurement(24.0).all_sizes(SizeGender::Mens);
        let headers: Vec<String> = sizes.iter().map(|(slot, _)| slot.header()).collect();
        assert_eq!(headers, vec!["US Men's", "US Women's", "UK", "EU", "JP (cm)"]);
    }
}
