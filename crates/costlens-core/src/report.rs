//! Plain-text rendering of engine output for the CLI

use std::fmt::Write as _;

use crate::models::{DailyCost, GroupCost, KpiSummary, RollupRow};

const MAX_CELL: usize = 32;

/// Group digits in thousands, e.g. `1234567` -> `1,234,567`
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Currency amount with two decimals and grouped thousands
pub fn format_money(amount: f64, currency: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc();
    let frac = cents - whole * 100.0;
    // Amounts beyond u64 range are not meaningful for token costs
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (whole, frac) = (whole as u64, frac as u64);
    format!("{currency} {sign}{}.{frac:02}", format_number(whole))
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{head}…")
    }
}

/// Column alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Pad on the right
    Left,
    /// Pad on the left
    Right,
}

/// Minimal fixed-width table
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<(String, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given columns
    pub fn new(columns: &[(&str, Align)]) -> Self {
        Self {
            columns: columns
                .iter()
                .map(|(name, align)| ((*name).to_string(), *align))
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; cells beyond the column count are ignored
    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(
            cells
                .into_iter()
                .take(self.columns.len())
                .map(|c| truncate(&c, MAX_CELL))
                .collect(),
        );
    }

    /// Render with a header rule
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|(n, _)| n.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let header: Vec<String> = self.columns.iter().map(|(n, _)| n.clone()).collect();
        self.write_line(&mut out, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", rule.join("  "));
        for row in &self.rows {
            self.write_line(&mut out, row, &widths);
        }
        out
    }

    fn write_line(&self, out: &mut String, cells: &[String], widths: &[usize]) {
        let padded: Vec<String> = self
            .columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, ((_, align), width))| {
                let cell = cells.get(i).map_or("", String::as_str);
                match align {
                    Align::Left => format!("{cell:<width$}"),
                    Align::Right => format!("{cell:>width$}"),
                }
            })
            .collect();
        let _ = writeln!(out, "{}", padded.join("  ").trim_end());
    }
}

/// KPI block, one metric per line
pub fn render_summary(summary: &KpiSummary, currency: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Cost:           {}", format_money(summary.total_cost, currency));
    let _ = writeln!(out, "Tokens Used:          {}", format_number(summary.total_units));
    let _ = writeln!(out, "Delivered:            {}", format_number(summary.total_delivered));
    let _ = writeln!(
        out,
        "Avg Cost / Delivered: {}",
        format_money(summary.avg_cost_per_delivered, currency)
    );
    out
}

/// Cost over time
pub fn render_daily(daily: &[DailyCost], currency: &str) -> String {
    let mut table = Table::new(&[
        ("Day", Align::Left),
        ("Tokens", Align::Right),
        ("Cost", Align::Right),
    ]);
    for d in daily {
        table.row(vec![
            d.day.format("%b %d, %Y").to_string(),
            format_number(d.units),
            format_money(d.cost, currency),
        ]);
    }
    table.render()
}

/// Cost by group with share of total
pub fn render_groups(groups: &[GroupCost], currency: &str) -> String {
    let total: f64 = groups.iter().map(|g| g.cost).sum();
    let mut table = Table::new(&[
        ("Team", Align::Left),
        ("Tokens", Align::Right),
        ("Cost", Align::Right),
        ("Share", Align::Right),
    ]);
    for g in groups {
        let share = if total > 0.0 { g.cost / total * 100.0 } else { 0.0 };
        table.row(vec![
            g.group.clone(),
            format_number(g.units),
            format_money(g.cost, currency),
            format!("{share:.1}%"),
        ]);
    }
    table.render()
}

/// Cost breakdown by team and campaign
pub fn render_rollup(rows: &[RollupRow], currency: &str) -> String {
    let mut table = Table::new(&[
        ("Team", Align::Left),
        ("Campaign", Align::Left),
        ("Tokens Used", Align::Right),
        ("Total Cost", Align::Right),
        ("Attempted", Align::Right),
        ("Delivered", Align::Right),
        ("Read", Align::Right),
        ("Replied", Align::Right),
    ]);
    for r in rows {
        table.row(vec![
            r.group.clone(),
            r.campaign_id.clone(),
            format_number(r.units),
            format_money(r.cost, currency),
            format_number(r.attempted),
            format_number(r.delivered),
            format_number(r.read),
            format_number(r.responded),
        ]);
    }
    table.render()
}
