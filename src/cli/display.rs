// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the rollcall CLI.
//!
//! Boxed sections, aligned record tables and tier badges. Colors follow
//! OneDark on dark terminals and One Light on light ones; `ROLLCALL_THEME`
//! picks explicitly, then `COLORFGBG` is consulted, then dark is assumed.
//! `NO_COLOR` and non-TTY stdout turn color off entirely.

use rollcall::{CanonicalRecord, MatchTier};
use std::sync::OnceLock;

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 78;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("ROLLCALL_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": background 7 and up (except 8) is a light terminal
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Colors only on a TTY, and never with `NO_COLOR` set.
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, ignoring ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Cut plain text to `max` characters, marking the cut with "…".
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn border() -> String {
    if use_colors() {
        GRAY()
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    let border = border();
    let pad = BOX_WIDTH.saturating_sub(visible_len(content) + 1);
    println!(
        "{}│{} {}{}{}│{}",
        border,
        reset(),
        content,
        " ".repeat(pad),
        border,
        reset()
    );
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    section_edge('┌', '┐', label);
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    section_edge('├', '┤', label);
}

fn section_edge(left: char, right: char, label: &str) {
    let border = border();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}{}{}{}{}{}",
        border,
        left,
        reset(),
        label_part,
        border,
        "─".repeat(remaining),
        right,
        reset()
    );
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", border(), "─".repeat(BOX_WIDTH), reset());
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded badge for the tier that answered a query.
pub fn tier_badge(tier: Option<MatchTier>) -> String {
    let Some(tier) = tier else {
        return themed(GRAY, &[], "[pool]");
    };
    let label = format!("[{}]", tier.as_str());
    let color: fn() -> String = match tier {
        MatchTier::ExactKey => GREEN,
        MatchTier::ExactBucket => BLUE,
        MatchTier::Prefix => MAGENTA,
        MatchTier::Substring => YELLOW,
    };
    themed(color, &[BOLD], &label)
}

const COLUMNS: [(&str, usize); 6] = [
    ("Number", 10),
    ("Name", 22),
    ("Class", 7),
    ("Subject", 22),
    ("Line", 4),
    ("Teacher", 8),
];

/// Header line for [`record_row`].
pub fn record_header() -> String {
    let cells: Vec<String> = COLUMNS
        .iter()
        .map(|(name, width)| pad_right(&themed(GRAY, &[BOLD], name), *width))
        .collect();
    cells.join(" ")
}

/// One record as aligned table cells.
pub fn record_row(record: &CanonicalRecord) -> String {
    let values = [
        record.identifier.as_str(),
        record.name.as_str(),
        record.registration_class.as_str(),
        record.subject.as_str(),
        record.line.as_str(),
        record.teacher.as_str(),
    ];
    let cells: Vec<String> = values
        .iter()
        .zip(COLUMNS.iter())
        .map(|(value, (_, width))| pad_right(&truncate(value, *width), *width))
        .collect();
    cells.join(" ")
}

/// Red message for failures and precondition prompts.
pub fn warning(text: &str) -> String {
    themed(RED, &[BOLD], text)
}
