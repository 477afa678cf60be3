//! Table output formatting for CLI commands
//!
//! Renders cache statistics and policy rules using comfy-table.
//! Respects NO_COLOR and dumb terminals.

use crate::domain::models::{ActionRule, AgentMaturity, CacheStats};
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format cache counters as a two-column table
    pub fn format_stats(&self, stats: &CacheStats) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        let hit_rate = format!("{:.1}%", stats.hit_rate * 100.0);
        let hit_rate_cell = if self.use_colors {
            Cell::new(&hit_rate).fg(hit_rate_color(stats.hit_rate))
        } else {
            Cell::new(&hit_rate)
        };

        let rows = [
            ("Hits", stats.hits.to_string()),
            ("Misses", stats.misses.to_string()),
            ("Evictions", stats.evictions.to_string()),
            ("Invalidations", stats.invalidations.to_string()),
            ("Expirations", stats.expirations.to_string()),
            ("Size", format!("{} / {}", stats.size, stats.max_size)),
            ("TTL (s)", stats.ttl_seconds.to_string()),
        ];
        for (name, value) in rows {
            table.add_row(vec![Cell::new(name), Cell::new(value)]);
        }
        table.add_row(vec![Cell::new("Hit rate"), hit_rate_cell]);

        table.to_string()
    }

    /// Format policy rules, one row per action type
    pub fn format_rules(&self, rules: &[ActionRule], default_min: AgentMaturity) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Action").add_attribute(Attribute::Bold),
            Cell::new("Minimum maturity").add_attribute(Attribute::Bold),
        ]);

        for rule in rules {
            table.add_row(vec![
                Cell::new(&rule.action_type),
                self.maturity_cell(rule.min_maturity),
            ]);
        }
        table.add_row(vec![
            Cell::new("(default)").add_attribute(Attribute::Italic),
            self.maturity_cell(default_min),
        ]);

        table.to_string()
    }

    fn maturity_cell(&self, maturity: AgentMaturity) -> Cell {
        if self.use_colors {
            Cell::new(maturity.as_str()).fg(maturity_color(maturity))
        } else {
            Cell::new(maturity.as_str())
        }
    }

    /// Create a base table with common settings
    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

fn hit_rate_color(hit_rate: f64) -> Color {
    if hit_rate >= 0.8 {
        Color::Green
    } else if hit_rate >= 0.5 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn maturity_color(maturity: AgentMaturity) -> Color {
    match maturity {
        AgentMaturity::Student => Color::Green,
        AgentMaturity::Intern => Color::Cyan,
        AgentMaturity::Supervised => Color::Yellow,
        AgentMaturity::Autonomous => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> CacheStats {
        CacheStats {
            hits: 9,
            misses: 3,
            evictions: 1,
            invalidations: 2,
            expirations: 0,
            size: 4,
            max_size: 10,
            ttl_seconds: 60,
            hit_rate: 0.75,
        }
    }

    #[test]
    fn test_format_stats_plain() {
        let formatter = TableFormatter::with_config(false, None);
        let rendered = formatter.format_stats(&sample_stats());

        assert!(rendered.contains("Hits"));
        assert!(rendered.contains("4 / 10"));
        assert!(rendered.contains("75.0%"));
    }

    #[test]
    fn test_format_rules_includes_default() {
        let formatter = TableFormatter::with_config(false, Some(80));
        let rules = vec![ActionRule::new("delete", AgentMaturity::Autonomous)];
        let rendered = formatter.format_rules(&rules, AgentMaturity::Supervised);

        assert!(rendered.contains("delete"));
        assert!(rendered.contains("autonomous"));
        assert!(rendered.contains("(default)"));
        assert!(rendered.contains("supervised"));
    }

    #[test]
    fn test_hit_rate_color_thresholds() {
        assert_eq!(hit_rate_color(0.9), Color::Green);
        assert_eq!(hit_rate_color(0.6), Color::Yellow);
        assert_eq!(hit_rate_color(0.1), Color::Red);
    }
}
