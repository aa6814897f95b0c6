//! Built-in heel-to-toe size catalogue.

/// One catalogue row: `(heel_to_toe_cm, us_men, us_women, uk, eu, jp)`.
pub(crate) type CatalogRow = (f64, &'static str, &'static str, &'static str, &'static str, &'static str);

/// Reference chart, ascending by heel-to-toe length. `--` marks a size
/// that is not made for that column.
#[rustfmt::skip]
pub(crate) const STANDARD_ROWS: [CatalogRow; 28] = [
    (22.1, "4", "5", "3.5", "36", "220"),
    (22.5, "4.5", "5.5", "4", "36⅔", "225"),
    (22.9, "5", "6", "4.5", "37⅓", "230"),
    (23.3, "5.5", "6.5", "5", "38", "235"),
    (23.8, "6", "7", "5.5", "38⅔", "240"),
    (24.2, "6.5", "7.5", "6", "39⅓", "245"),
    (24.6, "7", "8", "6.5", "40", "250"),
    (25.0, "7.5", "8.5", "7", "40⅔", "255"),
    (25.5, "8", "9", "7.5", "41⅓", "260"),
    (25.9, "8.5", "9.5", "8", "42", "265"),
    (26.3, "9", "10", "8.5", "42⅔", "270"),
    (26.7, "9.5", "10.5", "9", "43⅓", "275"),
    (27.1, "10", "11", "9.5", "44", "280"),
    (27.6, "10.5", "11.5", "10", "44⅔", "285"),
    (28.0, "11", "12", "10.5", "45⅓", "290"),
    (28.4, "11.5", "12.5", "11", "46", "295"),
    (28.8, "12", "13", "11.5", "46⅔", "300"),
    (29.3, "12.5", "13.5", "12", "47⅓", "305"),
    (29.7, "13", "14", "12.5", "48", "310"),
    (30.1, "13.5", "14.5", "13", "48⅔", "315"),
    (30.5, "14", "15", "13.5", "49⅓", "320"),
    (31.0, "14.5", "15.5", "14", "50", "325"),
    (31.4, "15", "--", "14.5", "50⅔", "--"),
    (31.8, "16", "--", "15", "51⅓", "--"),
    (32.6, "17", "--", "16", "52⅔", "--"),
    (33.5, "18", "--", "17", "53⅓", "--"),
    (34.3, "19", "--", "18", "54⅔", "--"),
    (35.2, "20", "--", "19", "55⅔", "--"),
];
