//! Horizontal text bar charts for grouped report series.

use std::collections::BTreeMap;

const BAR_WIDTH: usize = 30;
const POSITIVE_BAR: char = '█';
const NEGATIVE_BAR: char = '░';

/// A labelled series rendered as one bar per entry, scaled to the largest magnitude.
pub struct BarChart<'a> {
    pub series: &'a BTreeMap<String, f64>,
    pub width: usize,
}

impl<'a> BarChart<'a> {
    pub fn new(series: &'a BTreeMap<String, f64>) -> Self {
        Self {
            series,
            width: BAR_WIDTH,
        }
    }

    /// Renders each bar followed by its value formatted with `format_value`.
    /// Negative values use a lighter bar.
    pub fn render<F>(&self, format_value: F) -> String
    where
        F: Fn(f64) -> String,
    {
        if self.series.is_empty() {
            return String::from("(no data)");
        }

        let label_width = self
            .series
            .keys()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(0);
        let max = self
            .series
            .values()
            .map(|value| value.abs())
            .fold(0.0_f64, f64::max);

        self.series
            .iter()
            .map(|(label, value)| {
                let length = if max > 0.0 {
                    ((value.abs() / max) * self.width as f64).round() as usize
                } else {
                    0
                };
                let glyph = if *value < 0.0 { NEGATIVE_BAR } else { POSITIVE_BAR };
                let bar: String = std::iter::repeat(glyph).take(length).collect();
                let fill = " ".repeat(label_width - label.chars().count());
                format!("{label}{fill} | {bar} {}", format_value(*value))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_largest_value() {
        let mut series = BTreeMap::new();
        series.insert("Fresa".to_string(), 5.0);
        series.insert("Mango".to_string(), 10.0);
        let chart = BarChart {
            series: &series,
            width: 4,
        };
        let rendered = chart.render(|v| format!("{v}"));
        assert_eq!(rendered, "Fresa | ██ 5\nMango | ████ 10");
    }

    #[test]
    fn negative_values_use_light_bars() {
        let mut series = BTreeMap::new();
        series.insert("R1".to_string(), -2.0);
        series.insert("R2".to_string(), 2.0);
        let rendered = BarChart { series: &series, width: 2 }.render(|v| format!("{v}"));
        assert_eq!(rendered, "R1 | ░░ -2\nR2 | ██ 2");
    }

    #[test]
    fn empty_series_renders_placeholder() {
        let series = BTreeMap::new();
        assert_eq!(BarChart::new(&series).render(|v| v.to_string()), "(no data)");
    }
}
