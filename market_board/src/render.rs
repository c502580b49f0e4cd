//! Plain-text rendering of a board snapshot.

use std::fmt::Write;

use quote_feed::DisplayRecord;

use crate::{board::BoardSnapshot, identity::UserIdentity};

const HEADER: [&str; 8] = [
    "Pair", "Price", "Change", "Change %", "High", "Low", "Spread", "Volume",
];

/// Renders the snapshot as a header line, an optional banner and the table.
pub fn render_board(snapshot: &BoardSnapshot, user: &UserIdentity) -> String {
    let mut out = String::new();

    let updated = snapshot
        .last_updated
        .map(|t| t.format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());
    let _ = writeln!(
        out,
        "[{}] {} | {} | updated {}",
        user.initial(),
        user.display_name(),
        snapshot.mode_label(),
        updated
    );
    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "! {error}");
    }

    let rows: Vec<[String; 8]> = snapshot.records.iter().map(row_cells).collect();
    let mut widths = HEADER.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    push_line(&mut out, &HEADER.map(String::from), &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn row_cells(record: &DisplayRecord) -> [String; 8] {
    let arrow = if record.is_up() {
        "▲"
    } else if record.is_down() {
        "▼"
    } else {
        " "
    };
    [
        record.pair.clone(),
        format!("${:.2}", record.price),
        format!("{arrow} {}", signed(record.change, "$", "")),
        signed(record.change_percent, "", "%"),
        format!("${:.2}", record.high),
        format!("${:.2}", record.low),
        format!("${:.2}", record.spread),
        group_thousands(record.volume),
    ]
}

fn signed(value: f64, prefix: &str, suffix: &str) -> String {
    let sign = if value > 0.0 {
        "+"
    } else if value < 0.0 {
        "-"
    } else {
        ""
    };
    format!("{sign}{prefix}{:.2}{suffix}", value.abs())
}

fn group_thousands(n: u64) -> String {
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

fn push_line(out: &mut String, cells: &[String; 8], widths: &[usize; 8]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}
