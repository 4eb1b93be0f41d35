//! Usage and help text rendering.

use std::fmt::Write;

use crate::{OptionSpec, Schema};

/// Renders a one-line usage summary.
///
/// Options are listed in declaration order, preferring the short form.
/// Optional options are bracketed.
///
/// # Examples
///
/// ```
/// use argspec_core::{OptionSpec, Schema, usage_line};
///
/// let schema = Schema::from_options(vec![
///     OptionSpec::required("pool_file", Some('p')),
///     OptionSpec::optional("threads", Some('t'), "1"),
///     OptionSpec::required("label", None),
/// ])
/// .unwrap();
///
/// assert_eq!(
///     usage_line("dalea", &schema),
///     "usage: dalea -p <pool_file> [-t <threads>] --label <label>"
/// );
/// ```
pub fn usage_line(program: &str, schema: &Schema) -> String {
    let mut line = format!("usage: {program}");
    for spec in schema {
        let flag = spec.short_flag().unwrap_or_else(|| spec.long_flag());
        if spec.required {
            let _ = write!(line, " {flag} <{}>", spec.long_name);
        } else {
            let _ = write!(line, " [{flag} <{}>]", spec.long_name);
        }
    }
    line
}

/// Renders the usage line followed by one row per option.
pub fn help_text(program: &str, schema: &Schema) -> String {
    let mut out = usage_line(program, schema);
    if schema.is_empty() {
        out.push('\n');
        return out;
    }

    out.push_str("\n\nOptions:\n");
    let rows: Vec<(String, String)> = schema.options().iter().map(option_row).collect();
    let width = rows.iter().map(|(flags, _)| flags.chars().count()).max().unwrap_or(0);
    for (flags, detail) in rows {
        let _ = writeln!(out, "  {flags:<width$}  {detail}");
    }
    out
}

fn option_row(spec: &OptionSpec) -> (String, String) {
    let flags = match spec.short_flag() {
        Some(short) => format!("{short}, {} <{}>", spec.long_flag(), spec.long_name),
        None => format!("    {} <{}>", spec.long_flag(), spec.long_name),
    };

    let marker = match &spec.default {
        Some(default) => format!("[default: {default}]"),
        None => "[required]".to_string(),
    };
    let detail = match &spec.description {
        Some(desc) => format!("{desc} {marker}"),
        None => marker,
    };
    (flags, detail)
}
