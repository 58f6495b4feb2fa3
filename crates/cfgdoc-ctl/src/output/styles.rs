//! Palette shared by output lines and `--help`.

use anstyle::{AnsiColor, Effects, Style};

/// Generation results.
pub(crate) const SUCCESS: Style =
    Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Green)));

/// Fatal errors.
pub(crate) const ERROR: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Red)));

/// Warnings.
pub(crate) const WARNING: Style =
    Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Yellow)));

/// Index and type headings.
pub(crate) const HEADER: Style = Style::new().effects(Effects::BOLD);

/// Field names in `inspect` output.
pub(crate) const LABEL: Style = Style::new().effects(Effects::BOLD);

pub(crate) const DIM: Style = Style::new().effects(Effects::DIMMED);

/// clap help styles in the same palette as the output lines.
pub(crate) fn clap_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .header(
            Style::new()
                .fg_color(Some(anstyle::Color::Ansi(AnsiColor::Green)))
                .effects(Effects::BOLD),
        )
        .usage(
            Style::new()
                .fg_color(Some(anstyle::Color::Ansi(AnsiColor::Green)))
                .effects(Effects::BOLD),
        )
        .literal(Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Cyan))))
        .placeholder(Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Cyan))))
        .error(
            Style::new()
                .fg_color(Some(anstyle::Color::Ansi(AnsiColor::Red)))
                .effects(Effects::BOLD),
        )
        .valid(Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Green))))
        .invalid(Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Yellow))))
}
