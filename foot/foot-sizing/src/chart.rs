//! Size chart table and lookup.

use std::fmt;
use std::sync::LazyLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::STANDARD_ROWS;
use crate::error::{SizingError, SizingResult};
use crate::format::{SizeFormat, SizeGender, SizeSlot};
use crate::recommend::AllSizes;

/// Label marking a size that is not made for a column.
pub const UNAVAILABLE: &str = "--";

/// Returned when a column has no available label at all.
pub const SIZE_NOT_FOUND: &str = "Size not found";

/// Suffix appended to the largest size when the foot is off the chart.
pub const OFF_CHART_MARKER: char = '+';

static STANDARD_CHART: LazyLock<SizeChart> = LazyLock::new(|| SizeChart {
    entries: STANDARD_ROWS
        .iter()
        .map(|&(cm, us_men, us_women, uk, eu, jp)| {
            SizeChartEntry::new(cm, us_men, us_women, uk, eu, jp)
        })
        .collect(),
});

/// One chart row: a reference heel-to-toe length and its size labels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SizeChartEntry {
    /// Reference heel-to-toe length in centimetres.
    pub heel_toe_cm: f64,
    /// US men's label.
    pub us_men: String,
    /// US women's label.
    pub us_women: String,
    /// UK label.
    pub uk: String,
    /// EU label.
    pub eu: String,
    /// JP label, in millimetres.
    pub jp: String,
}

impl SizeChartEntry {
    /// Create a row.
    #[must_use]
    pub fn new(
        heel_toe_cm: f64,
        us_men: impl Into<String>,
        us_women: impl Into<String>,
        uk: impl Into<String>,
        eu: impl Into<String>,
        jp: impl Into<String>,
    ) -> Self {
        Self {
            heel_toe_cm,
            us_men: us_men.into(),
            us_women: us_women.into(),
            uk: uk.into(),
            eu: eu.into(),
            jp: jp.into(),
        }
    }

    /// Raw label for a column, possibly [`UNAVAILABLE`].
    #[must_use]
    pub fn label(&self, format: SizeFormat, gender: SizeGender) -> &str {
        match format {
            SizeFormat::Us => match gender {
                SizeGender::Mens => &self.us_men,
                SizeGender::Womens => &self.us_women,
            },
            SizeFormat::Uk => &self.uk,
            SizeFormat::Eu => &self.eu,
            SizeFormat::Jp => &self.jp,
        }
    }

    /// Label for a column, or `None` if that size is not made.
    #[must_use]
    pub fn available_label(&self, format: SizeFormat, gender: SizeGender) -> Option<&str> {
        let label = self.label(format, gender);
        if label == UNAVAILABLE || label.is_empty() {
            None
        } else {
            Some(label)
        }
    }
}

/// Outcome of a chart lookup before it is rendered to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeMatch<'a> {
    /// A row at least as long as the foot carries this label.
    InChart(&'a str),
    /// The foot is longer than every available row; this is the largest label.
    OffChart(&'a str),
    /// The column has no available label.
    NotFound,
}

impl SizeMatch<'_> {
    /// True unless the lookup found nothing.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

impl fmt::Display for SizeMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InChart(label) => f.write_str(label),
            Self::OffChart(label) => write!(f, "{label}{OFF_CHART_MARKER}"),
            Self::NotFound => f.write_str(SIZE_NOT_FOUND),
        }
    }
}

/// An ordered, read-only size chart.
///
/// # Example
///
/// ```
/// use foot_sizing::{SizeChart, SizeFormat, SizeGender};
///
/// let chart = SizeChart::standard();
/// // 31.4 cm has no US women's size; the lookup moves on and, finding none,
/// // reports the largest women's size as off-chart.
/// assert_eq!(chart.lookup(31.2, SizeFormat::Us, SizeGender::Womens), "15.5+");
/// assert_eq!(chart.lookup(31.2, SizeFormat::Us, SizeGender::Mens), "15");
/// ```
///
/// With the `serde` feature a chart serialises as its row list, and
/// deserialising goes through [`SizeChart::new`] so the row checks apply.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<SizeChartEntry>", into = "Vec<SizeChartEntry>")
)]
pub struct SizeChart {
    entries: Vec<SizeChartEntry>,
}

impl SizeChart {
    /// Build a chart, checking rows are strictly ascending by length.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart is empty, a length is not a positive
    /// finite number, or rows are out of order.
    pub fn new(entries: Vec<SizeChartEntry>) -> SizingResult<Self> {
        if entries.is_empty() {
            return Err(SizingError::EmptyChart);
        }
        for (index, entry) in entries.iter().enumerate() {
            let length_cm = entry.heel_toe_cm;
            if !length_cm.is_finite() || length_cm <= 0.0 {
                return Err(SizingError::InvalidLength { index, length_cm });
            }
            if index > 0 && length_cm <= entries[index - 1].heel_toe_cm {
                return Err(SizingError::NotAscending { index, length_cm });
            }
        }
        Ok(Self { entries })
    }

    /// The built-in reference chart, 22.1 cm to 35.2 cm.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD_CHART
    }

    /// Rows in ascending order.
    #[must_use]
    pub fn entries(&self) -> &[SizeChartEntry] {
        &self.entries
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the chart has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest reference length in the chart.
    #[must_use]
    pub fn max_length_cm(&self) -> Option<f64> {
        self.entries.last().map(|e| e.heel_toe_cm)
    }

    /// Resolve a foot length against one column.
    ///
    /// A `NaN` length never matches.
    #[must_use]
    pub fn find(&self, length_cm: f64, format: SizeFormat, gender: SizeGender) -> SizeMatch<'_> {
        if length_cm.is_nan() {
            return SizeMatch::NotFound;
        }

        let in_chart = self
            .entries
            .iter()
            .skip_while(|entry| entry.heel_toe_cm < length_cm)
            .find_map(|entry| entry.available_label(format, gender));
        if let Some(label) = in_chart {
            return SizeMatch::InChart(label);
        }

        self.entries
            .iter()
            .rev()
            .find_map(|entry| entry.available_label(format, gender))
            .map_or(SizeMatch::NotFound, SizeMatch::OffChart)
    }

    /// Size label for a foot length, e.g. `"9"`, `"20+"` or
    /// [`SIZE_NOT_FOUND`].
    #[must_use]
    pub fn lookup(&self, length_cm: f64, format: SizeFormat, gender: SizeGender) -> String {
        self.find(length_cm, format, gender).to_string()
    }

    /// Size label prefixed with its format, e.g. `"US Men's 9"` or `"EU 42⅔"`.
    #[must_use]
    pub fn formatted_size(&self, length_cm: f64, format: SizeFormat, gender: SizeGender) -> String {
        let slot = SizeSlot::new(format, gender);
        format!("{} {}", slot.label(), self.find(length_cm, format, gender))
    }

    /// Labels for every column of a results display: US men's, US women's,
    /// then UK, EU and JP read with `gender`.
    #[must_use]
    pub fn all_formats(&self, length_cm: f64, gender: SizeGender) -> AllSizes {
        let slots = [
            SizeSlot::new(SizeFormat::Us, SizeGender::Mens),
            SizeSlot::new(SizeFormat::Us, SizeGender::Womens),
            SizeSlot::new(SizeFormat::Uk, gender),
            SizeSlot::new(SizeFormat::Eu, gender),
            SizeSlot::new(SizeFormat::Jp, gender),
        ];
        AllSizes::new(
            slots
                .into_iter()
                .map(|slot| (slot, self.lookup(length_cm, slot.format, slot.gender)))
                .collect(),
        )
    }
}

impl TryFrom<Vec<SizeChartEntry>> for SizeChart {
    type Error = SizingError;

    fn try_from(entries: Vec<SizeChartEntry>) -> SizingResult<Self> {
        Self::new(entries)
    }
}

impl From<SizeChart> for Vec<SizeChartEntry> {
    fn from(chart: SizeChart) -> Self {
        chart.entries
    }
}
