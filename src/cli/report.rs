// src/cli/report.rs

//! Text printed by the binary: banner, usage, notes and the directive summary.
//!
//! Everything is rendered through a [`Localizer`] so that `--language`
//! applies to the whole output.

use crate::{
    constants::COPYRIGHT_YEAR,
    i18n::Localizer,
    models::{ConditionalType, Directive, ExecutionOptions},
};
use colored::*;
use std::time::Duration;

const WRAP_WIDTH: usize = 65;

/// `(short, long, value name, description key)` for every option, in usage order.
const OPTION_ROWS: &[(&str, &str, Option<&str>, &str)] = &[
    ("-h", "--help", None, "cli.option.help"),
    ("-L", "--language", Some("code"), "cli.option.language"),
    ("-l", "--log", None, "cli.option.log"),
    ("-m", "--max-loops", Some("number"), "cli.option.max_loops"),
    ("-n", "--dry-run", None, "cli.option.dry_run"),
    ("-t", "--timeout", Some("number"), "cli.option.timeout"),
    ("-V", "--version", None, "cli.option.version"),
    ("-v", "--verbose", None, "cli.option.verbose"),
];

/// Name, version, copyright and rights notice.
pub fn version_banner(localizer: &Localizer) -> String {
    format!(
        "nightingale {}\nCopyright (c) {}, {}\n{}\n",
        env!("CARGO_PKG_VERSION"),
        COPYRIGHT_YEAR,
        env!("CARGO_PKG_AUTHORS"),
        localizer.message("cli.rights")
    )
}

/// The usage line followed by one row per option.
pub fn usage(localizer: &Localizer) -> String {
    let rows: Vec<(String, &str)> = OPTION_ROWS
        .iter()
        .map(|(short, long, value, key)| {
            let flag = match value {
                Some(value) => format!("{},{} <{}>", short, long, value),
                None => format!("{},{}", short, long),
            };
            (flag, localizer.message(key))
        })
        .collect();
    let width = rows.iter().map(|(flag, _)| flag.len()).max().unwrap_or(0);

    let mut out = format!("usage: {}\n", localizer.message("cli.usage"));
    for (flag, description) in rows {
        out.push_str(&format!(" {:<width$}   {}\n", flag, description, width = width));
    }
    out
}

/// Closing remarks shown by `--version`, wrapped.
pub fn notes(localizer: &Localizer) -> String {
    wrap(localizer.message("cli.notes"), WRAP_WIDTH)
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Lists the validated directives as they will be handed to the rule engine.
pub fn summary(
    localizer: &Localizer,
    directives: &[Directive],
    options: &ExecutionOptions,
) -> String {
    let mut out = format!("\n{}\n", localizer.message("info.summary.header").yellow().bold());

    for (index, directive) in directives.iter().enumerate() {
        let header = localizer.format(
            "info.summary.directive",
            &[
                ("index", (index + 1).to_string()),
                ("identifier", directive.identifier.cyan().bold().to_string()),
                ("lines", join_lines(&directive.line_numbers)),
            ],
        );
        out.push_str(&header);
        out.push('\n');

        for (key, value) in &directive.parameters {
            let line = localizer.format(
                "info.summary.parameter",
                &[("key", key.blue().to_string()), ("value", value.to_string())],
            );
            out.push_str(&line);
            out.push('\n');
        }

        if directive.conditional.kind != ConditionalType::None {
            let line = localizer.format(
                "info.summary.conditional",
                &[
                    ("type", directive.conditional.kind.name().green().to_string()),
                    ("condition", directive.conditional.condition.clone()),
                ],
            );
            out.push_str(&line);
            out.push('\n');
        }
    }

    out.push('\n');
    let timeout = match options.timeout {
        Some(timeout) => format!("{} ms", timeout.as_millis()),
        None => localizer.message("info.summary.no_timeout").to_string(),
    };
    out.push_str(&localizer.format(
        "info.summary.limits",
        &[("timeout", timeout), ("loops", options.max_loops.to_string())],
    ));
    out.push('\n');
    if options.dry_run {
        out.push_str(&localizer.message("info.summary.dry_run").dimmed().to_string());
        out.push('\n');
    }
    out.push_str(
        &localizer
            .format("info.summary.ready", &[("count", directives.len().to_string())])
            .green()
            .to_string(),
    );
    out.push('\n');
    out
}

fn join_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Wall-clock time of the run, in seconds.
pub fn elapsed(localizer: &Localizer, elapsed: Duration) -> String {
    localizer.format(
        "info.elapsed",
        &[("seconds", format!("{:.2}", elapsed.as_secs_f64()))],
    )
}
