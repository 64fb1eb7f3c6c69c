//! Formatted terminal output.
//!
//! We keep formatting code in one place so the comparison and fitting code
//! stays free of presentation concerns.

use crate::compare::NamedModels;
use crate::domain::{ComparisonRow, ComparisonTable, CompareConfig};
use crate::models::OlsFit;

/// Format the AIC comparison table.
pub fn format_comparison(table: &ComparisonTable, config: &CompareConfig) -> String {
    let rows: Vec<&ComparisonRow> = if config.ranked {
        table.ranked()
    } else {
        table.rows().iter().collect()
    };
    let best = table.best().map(|r| r.name.as_str());
    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(4, 32);
    let d = config.digits;

    let mut out = String::new();
    out.push_str("AIC comparison:\n");
    push_line(
        &mut out,
        format!(
            "  {:<name_width$} {:>14} {:>12} {:>12} {:>10}",
            "name", "aic", "delta_aic", "likelihood", "weight"
        ),
    );
    push_line(
        &mut out,
        format!(
            "  {:-<name_width$} {:-<14} {:-<12} {:-<12} {:-<10}",
            "", "", "", "", ""
        ),
    );

    for r in rows {
        let marker = if Some(r.name.as_str()) == best { "*" } else { " " };
        push_line(
            &mut out,
            format!(
                "{marker} {:<name_width$} {:>14.d$} {:>12.d$} {:>12.d$} {:>10.d$}",
                truncate(&r.name, name_width),
                r.aic,
                r.delta_aic,
                r.likelihood,
                r.weight,
            ),
        );
    }

    if let Some(best) = table.best() {
        out.push_str(&format!(
            "\nBest model: {} (weight={:.d$})\n",
            best.name, best.weight
        ));
    }

    out
}

/// Format per-model fit diagnostics.
pub fn format_fit_summary(fits: &NamedModels<OlsFit>, digits: usize) -> String {
    let d = digits;
    let mut out = String::new();
    out.push_str("Model fits:\n");

    for (name, fit) in fits.iter() {
        out.push_str(&format!("- {name}: {}\n", fit.formula));
        out.push_str(&format!(
            "    n={} (dropped {}) | rank={} | df={} | RSS={:.d$} | R²={:.d$} | logLik={:.d$}\n",
            fit.n_obs,
            fit.n_dropped,
            fit.rank,
            fit.df(),
            fit.rss,
            fit.r_squared,
            fit.log_likelihood,
        ));
        let coefs: Vec<String> = fit
            .coefficients
            .iter()
            .map(|c| format!("{}={:.d$}", c.term, c.estimate))
            .collect();
        out.push_str(&format!("    coef: {}\n", coefs.join(", ")));
    }

    out
}

/// One-line ingest summary for a fitted dataset.
pub fn format_data_summary(rows_read: usize, rows_skipped: usize) -> String {
    if rows_skipped == 0 {
        format!("Data: {rows_read} rows read")
    } else {
        format!("Data: {rows_read} rows read, {rows_skipped} skipped (unreadable)")
    }
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
