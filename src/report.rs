//! Human-readable report rendering.
//!
//! Findings become sections: a count line followed by a boxed table. The same
//! sections are used for the report file (plain text) and for terminal output
//! (colored summary line). Every row is always rendered.
use colored::*;

use crate::finding::Finding;

pub const REPORT_TITLE: &str = "-= Password Validation Report =-";

/// File name of the report written into the output directory.
pub const REPORT_FILE_NAME: &str = "LockwiseReport.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A boxed ASCII table with centered headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub align: Vec<Align>,
    pub rows: Vec<Vec<String>>,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(char_len(s)));
    match align {
        Align::Left => format!("{}{}", s, fill),
        Align::Right => format!("{}{}", fill, s),
    }
}

fn center(s: &str, width: usize) -> String {
    let total = width.saturating_sub(char_len(s));
    let left = total / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(total - left))
}

impl Table {
    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| char_len(c))
                    .chain(std::iter::once(char_len(h)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render without a trailing newline.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let border = {
            let mut s = String::from("+");
            for w in &widths {
                s.push_str(&"-".repeat(w + 2));
                s.push('+');
            }
            s
        };
        let line = |cells: Vec<String>| {
            let mut s = String::from("|");
            for c in cells {
                s.push(' ');
                s.push_str(&c);
                s.push_str(" |");
            }
            s
        };

        let mut lines = vec![border.clone()];
        lines.push(line(
            self.headers
                .iter()
                .zip(&widths)
                .map(|(h, w)| center(h, *w))
                .collect(),
        ));
        lines.push(border.clone());
        for row in &self.rows {
            lines.push(line(
                widths
                    .iter()
                    .enumerate()
                    .map(|(i, w)| {
                        let cell = row.get(i).map(String::as_str).unwrap_or("");
                        let align = self.align.get(i).copied().unwrap_or(Align::Left);
                        pad(cell, *w, align)
                    })
                    .collect(),
            ));
        }
        lines.push(border);
        lines.join("\n")
    }
}

/// One check's worth of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub summary: String,
    pub table: Table,
}

impl Section {
    pub fn to_plain(&self) -> String {
        format!("{}\n{}\n", self.summary, self.table.render())
    }

    pub fn to_terminal(&self) -> String {
        format!("{}\n{}\n", self.summary.bold().yellow(), self.table.render())
    }
}

/// Group findings into report sections. Duplicate-domain findings share one
/// section with a row per group.
pub fn sections(findings: &[Finding]) -> Vec<Section> {
    let mut out = Vec::new();
    let mut dupes: Vec<Vec<String>> = Vec::new();
    for f in findings {
        match f {
            Finding::BlankUsernames(records) => out.push(Section {
                summary: format!("Found {} blank username(s):", records.len()),
                table: Table {
                    headers: vec!["url"],
                    align: vec![Align::Left],
                    rows: records.iter().map(|r| vec![r.url().to_string()]).collect(),
                },
            }),
            Finding::InvalidPasswords(items) => out.push(Section {
                summary: format!("Found {} invalid password(s):", items.len()),
                table: Table {
                    headers: vec!["url", "username", "password", "reason"],
                    align: vec![Align::Left; 4],
                    rows: items
                        .iter()
                        .map(|i| {
                            vec![
                                i.record.url().to_string(),
                                i.record.username().to_string(),
                                i.record.password().to_string(),
                                i.reason.to_string(),
                            ]
                        })
                        .collect(),
                },
            }),
            Finding::DuplicateDomain(group) => {
                dupes.push(vec![group.domain.clone(), group.count().to_string()]);
            }
        }
    }
    if !dupes.is_empty() {
        out.push(Section {
            summary: format!("Found {} potential duplicate site(s):", dupes.len()),
            table: Table {
                headers: vec!["domain", "count"],
                align: vec![Align::Left, Align::Right],
                rows: dupes,
            },
        });
    }
    out
}

/// Render the report file contents, or `None` when there is nothing to report.
pub fn render_report(findings: &[Finding]) -> Option<String> {
    if findings.is_empty() {
        return None;
    }
    let mut out = format!("{}\n\n\n", REPORT_TITLE);
    for section in sections(findings) {
        out.push_str(&section.to_plain());
        out.push('\n');
    }
    Some(out)
}

/// Colored rendering of the sections for stdout.
pub fn render_terminal(findings: &[Finding]) -> String {
    sections(findings)
        .iter()
        .map(Section::to_terminal)
        .collect::<Vec<_>>()
        .join("\n")
}
