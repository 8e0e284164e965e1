//! CLI output formatting for every tool.
//!
//! # Output Format
//!
//! Results lead with the value the user asked for; supporting detail is
//! indented below it.
//!
//! ## Color
//!
//! ```text
//! HEX  #ff8000
//! RGB  rgb(255, 128, 0)
//! HSL  hsl(30, 100%, 50%)
//! ```
//!
//! ## Password check
//!
//! ```text
//! Strength: Good (3/4)
//!     Entropy: 65.5 bits
//!     Crack time: 1 year
//!     - Use 12 or more characters for better security
//! ```
//!
//! ## Batch
//!
//! ```text
//! a.jpg → out/a.jpg (800x533)
//! b.png: FAILED Processing failed: ...
//! Resized 1 image, 1 failed
//! ```
//!
//! # Architecture
//!
//! Each tool has a `format_*` function (returns `Vec<String>`) for testability.
//! Format functions are pure, with no I/O. [`print_lines`] and
//! [`print_json`] do the writing; `--json` swaps one for the other.

use crate::batch::{BatchEvent, BatchSummary};
use crate::calculators::{Age, AmortizationRow, Bmi, LoanSummary};
use crate::color::{Hsl, Rgb};
use crate::generators::HashAlgorithm;
use crate::imaging::{Dimensions, GeneratedFavicon};
use crate::password::PasswordAnalysis;
use serde::Serialize;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Fixed decimals with trailing zeros trimmed: `2.50` → `2.5`, `3.00` → `3`.
pub fn trim_float(value: f64, places: usize) -> String {
    let fixed = format!("{:.*}", places, value);
    if !fixed.contains('.') {
        return fixed;
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Two decimals with thousands separators: `231676.38` → `231,676.38`.
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Write each line to stdout.
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Write `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ============================================================================
// Color and gradient
// ============================================================================

pub fn format_color(rgb: Rgb, hsl: Hsl) -> Vec<String> {
    vec![
        format!("HEX  {}", rgb.to_hex()),
        format!("RGB  {}", rgb.to_css()),
        format!("HSL  {}", hsl.to_css()),
    ]
}

// ============================================================================
// Imaging
// ============================================================================

/// `1920x1080 → 960x540`, or `unchanged` when nothing needed to shrink.
pub fn format_resize_dimensions(original: Dimensions, target: Dimensions) -> Vec<String> {
    let mut line = format!(
        "{}x{} → {}x{}",
        original.width, original.height, target.width, target.height
    );
    if original == target {
        line.push_str(" (unchanged)");
    }
    vec![line]
}

pub fn format_resized_file(output: &Path, dimensions: Dimensions) -> Vec<String> {
    vec![format!(
        "{} ({}x{})",
        output.display(),
        dimensions.width,
        dimensions.height
    )]
}

pub fn format_favicons(favicons: &[GeneratedFavicon]) -> Vec<String> {
    let mut lines = vec![format!("Favicons ({})", favicons.len())];
    for favicon in favicons {
        lines.push(format!(
            "{}{:>3}x{:<3} {}",
            indent(1),
            favicon.size,
            favicon.size,
            favicon.path.display()
        ));
    }
    lines
}

/// Format a single batch progress event.
pub fn format_batch_event(event: &BatchEvent) -> Vec<String> {
    match event {
        BatchEvent::Resized {
            source,
            output,
            dimensions,
        } => vec![format!(
            "{} → {} ({}x{})",
            file_name(source),
            output.display(),
            dimensions.width,
            dimensions.height
        )],
        BatchEvent::Failed { source, error } => {
            vec![format!("{}: FAILED {}", file_name(source), error)]
        }
    }
}

pub fn format_batch_summary(summary: &BatchSummary) -> Vec<String> {
    vec![format!(
        "Resized {}, {} failed",
        plural(summary.resized, "image"),
        summary.failed
    )]
}

// ============================================================================
// Passwords and generators
// ============================================================================

pub fn format_password_analysis(analysis: &PasswordAnalysis) -> Vec<String> {
    let mut lines = vec![
        format!("Strength: {} ({}/4)", analysis.strength, analysis.score),
        format!("{}Entropy: {} bits", indent(1), trim_float(analysis.entropy, 1)),
        format!("{}Crack time: {}", indent(1), analysis.crack_time),
    ];
    for item in &analysis.feedback {
        lines.push(format!("{}- {}", indent(1), item));
    }
    lines
}

/// One `ALGORITHM  digest` line per entry.
pub fn format_hashes(hashes: &[(HashAlgorithm, String)]) -> Vec<String> {
    if let [(_, digest)] = hashes {
        return vec![digest.clone()];
    }
    hashes
        .iter()
        .map(|(algorithm, digest)| format!("{:<8} {}", algorithm.name(), digest))
        .collect()
}

// ============================================================================
// Calculators
// ============================================================================

pub fn format_age(age: &Age) -> Vec<String> {
    let birthday = match age.days_until_birthday {
        0 => "Happy birthday!".to_string(),
        n => format!("Next birthday in {}", plural(n as usize, "day")),
    };
    vec![
        format!(
            "{}, {}, {}",
            plural(age.years as usize, "year"),
            plural(age.months as usize, "month"),
            plural(age.days as usize, "day")
        ),
        format!("{}Total: {}", indent(1), plural(age.total_days as usize, "day")),
        format!("{}{}", indent(1), birthday),
    ]
}

pub fn format_bmi(bmi: &Bmi) -> Vec<String> {
    vec![format!("BMI {} ({})", trim_float(bmi.value, 1), bmi.category)]
}

pub fn format_loan(summary: &LoanSummary, schedule: Option<&[AmortizationRow]>) -> Vec<String> {
    let mut lines = vec![
        format!("Monthly payment: {}", format_money(summary.monthly_payment)),
        format!(
            "{}Total payment: {} over {}",
            indent(1),
            format_money(summary.total_payment),
            plural(summary.months as usize, "month")
        ),
        format!(
            "{}Total interest: {}",
            indent(1),
            format_money(summary.total_interest)
        ),
    ];
    if let Some(rows) = schedule {
        lines.push(String::new());
        lines.push(format!(
            "{:>5} {:>12} {:>12} {:>12} {:>14}",
            "Month", "Payment", "Principal", "Interest", "Balance"
        ));
        for row in rows {
            lines.push(format!(
                "{:>5} {:>12} {:>12} {:>12} {:>14}",
                row.month,
                format_money(row.payment),
                format_money(row.principal),
                format_money(row.interest),
                format_money(row.balance)
            ));
        }
    }
    lines
}

/// Percentages and other plain numbers: up to 4 decimals, trimmed.
pub fn format_number(value: f64) -> Vec<String> {
    vec![trim_float(value, 4)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::{BmiCategory, calculate_age, calculate_bmi, calculate_loan};
    use crate::calculators::CivilDate;
    use crate::color::hex_to_rgb;
    use crate::password::analyze_password;
    use std::path::PathBuf;

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn trim_float_drops_trailing_zeros() {
        assert_eq!(trim_float(2.5, 2), "2.5");
        assert_eq!(trim_float(3.0, 2), "3");
        assert_eq!(trim_float(33.3333, 2), "33.33");
        assert_eq!(trim_float(-0.0001, 2), "0");
        assert_eq!(trim_float(120.0, 0), "120");
    }

    #[test]
    fn format_money_groups_thousands() {
        assert_eq!(format_money(231_676.38), "231,676.38");
        assert_eq!(format_money(1199.1), "1,199.10");
        assert_eq!(format_money(999.999), "1,000.00");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.5), "-1,234.50");
    }

    #[test]
    fn plural_words() {
        assert_eq!(plural(1, "day"), "1 day");
        assert_eq!(plural(0, "day"), "0 days");
        assert_eq!(plural(5, "day"), "5 days");
    }

    // =========================================================================
    // Tool output tests
    // =========================================================================

    #[test]
    fn color_lines() {
        let rgb = hex_to_rgb("#ff8000").unwrap();
        let lines = format_color(rgb, rgb.to_hsl());
        assert_eq!(
            lines,
            vec!["HEX  #ff8000", "RGB  rgb(255, 128, 0)", "HSL  hsl(30, 100%, 50%)"]
        );
    }

    #[test]
    fn resize_dimension_lines() {
        let a = Dimensions {
            width: 1920,
            height: 1080,
        };
        let b = Dimensions {
            width: 960,
            height: 540,
        };
        assert_eq!(format_resize_dimensions(a, b), vec!["1920x1080 → 960x540"]);
        assert_eq!(
            format_resize_dimensions(a, a),
            vec!["1920x1080 → 1920x1080 (unchanged)"]
        );
    }

    #[test]
    fn favicon_lines() {
        let favicons = vec![
            GeneratedFavicon {
                size: 16,
                path: PathBuf::from("out/favicon-16x16.png"),
            },
            GeneratedFavicon {
                size: 32,
                path: PathBuf::from("out/favicon.ico"),
            },
        ];
        let lines = format_favicons(&favicons);
        assert_eq!(lines[0], "Favicons (2)");
        assert_eq!(lines[1], "     16x16  out/favicon-16x16.png");
        assert!(lines[2].ends_with("out/favicon.ico"));
    }

    #[test]
    fn batch_event_lines() {
        let resized = BatchEvent::Resized {
            source: PathBuf::from("in/a.jpg"),
            output: PathBuf::from("out/a.jpg"),
            dimensions: Dimensions {
                width: 800,
                height: 533,
            },
        };
        assert_eq!(format_batch_event(&resized), vec!["a.jpg → out/a.jpg (800x533)"]);

        let failed = BatchEvent::Failed {
            source: PathBuf::from("in/b.png"),
            error: "boom".into(),
        };
        assert_eq!(format_batch_event(&failed), vec!["b.png: FAILED boom"]);
    }

    #[test]
    fn batch_summary_line() {
        let summary = BatchSummary {
            resized: 1,
            failed: 2,
        };
        assert_eq!(format_batch_summary(&summary), vec!["Resized 1 image, 2 failed"]);
    }

    #[test]
    fn password_analysis_lines() {
        let lines = format_password_analysis(&analyze_password(""));
        assert_eq!(lines[0], "Strength: Very Weak (0/4)");
        assert_eq!(lines[1], "    Entropy: 0 bits");
        assert_eq!(lines[2], "    Crack time: Instant");
        assert_eq!(lines[3], "    - Enter a password to analyze");
    }

    #[test]
    fn single_hash_is_bare_digest() {
        let hashes = vec![(HashAlgorithm::Sha256, "abc123".to_string())];
        assert_eq!(format_hashes(&hashes), vec!["abc123"]);
    }

    #[test]
    fn multiple_hashes_are_labelled() {
        let hashes = vec![
            (HashAlgorithm::Sha224, "aa".to_string()),
            (HashAlgorithm::Sha512, "bb".to_string()),
        ];
        assert_eq!(format_hashes(&hashes), vec!["SHA-224  aa", "SHA-512  bb"]);
    }

    #[test]
    fn age_lines() {
        let age = calculate_age(
            CivilDate::parse("1990-05-20").unwrap(),
            CivilDate::parse("2024-05-15").unwrap(),
        )
        .unwrap();
        let lines = format_age(&age);
        assert_eq!(lines[0], "33 years, 11 months, 25 days");
        assert_eq!(lines[2], "    Next birthday in 5 days");
    }

    #[test]
    fn bmi_line() {
        let bmi = calculate_bmi(70.0, 175.0).unwrap();
        assert_eq!(bmi.category, BmiCategory::Normal);
        assert_eq!(format_bmi(&bmi), vec!["BMI 22.9 (Normal weight)"]);
    }

    #[test]
    fn loan_lines_without_schedule() {
        let loan = calculate_loan(200_000.0, 6.0, 30).unwrap();
        let lines = format_loan(&loan, None);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Monthly payment: 1,199.10");
        assert!(lines[1].ends_with("over 360 months"));
    }

    #[test]
    fn loan_lines_with_schedule() {
        let rows = crate::calculators::amortization_schedule(1200.0, 0.0, 1).unwrap();
        let loan = calculate_loan(1200.0, 0.0, 1).unwrap();
        let lines = format_loan(&loan, Some(&rows));
        // summary + blank + header + 12 rows
        assert_eq!(lines.len(), 3 + 2 + 12);
        assert!(lines[5].trim_start().starts_with("1 "));
    }

    #[test]
    fn number_line() {
        assert_eq!(format_number(15.0), vec!["15"]);
        assert_eq!(format_number(100.0 / 3.0), vec!["33.3333"]);
    }
}
