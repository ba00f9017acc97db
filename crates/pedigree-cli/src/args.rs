//! Command-line argument definitions for the pedigree CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the database and root person, the output
//! path, configuration file and logging verbosity, and override the layout
//! section of the configuration.

use clap::Parser;

use pedigree::{
    chart::{Direction, TreeStyle},
    config::LayoutConfig,
};

/// Command-line arguments for the pedigree chart tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the ancestry database (TOML)
    #[arg(help = "Path to the ancestry database")]
    pub database: String,

    /// Person to chart the ancestors of; defaults to the database's home person
    #[arg(short, long)]
    pub root: Option<String>,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "pedigree.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Number of generations (1 to 9)
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Tree style (standard, compact, expanded)
    #[arg(short, long)]
    pub style: Option<TreeStyle>,

    /// Chart direction (right, left, down, up)
    #[arg(long)]
    pub direction: Option<Direction>,

    /// Leave out marriage labels
    #[arg(long)]
    pub no_marriage_labels: bool,

    /// Leave out boxes for unknown ancestors
    #[arg(long)]
    pub no_placeholders: bool,
}

impl Args {
    /// Apply the layout flags on top of the loaded configuration
    pub fn apply_overrides(&self, layout: &mut LayoutConfig) {
        if let Some(depth) = self.depth {
            layout.set_max_depth(depth);
        }
        if let Some(style) = self.style {
            layout.set_style(style);
        }
        if let Some(direction) = self.direction {
            layout.set_direction(direction);
        }
        if self.no_marriage_labels {
            layout.set_show_marriage_labels(false);
        }
        if self.no_placeholders {
            layout.set_show_unknown_placeholders(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let args = Args::try_parse_from([
            "pedigree",
            "family.toml",
            "--root",
            "I1",
            "--depth",
            "4",
            "--style",
            "compact",
            "--direction",
            "up",
            "--no-placeholders",
        ])
        .unwrap();

        let mut layout = LayoutConfig::default();
        args.apply_overrides(&mut layout);

        assert_eq!(args.root.as_deref(), Some("I1"));
        assert_eq!(layout.max_depth(), 4);
        assert_eq!(layout.style(), TreeStyle::Compact);
        assert_eq!(layout.direction(), Direction::Up);
        assert!(layout.show_marriage_labels());
        assert!(!layout.show_unknown_placeholders());
    }

    #[test]
    fn test_defaults_leave_config_alone() {
        let args = Args::try_parse_from(["pedigree", "family.toml"]).unwrap();
        assert_eq!(args.output, "pedigree.svg");

        let mut layout = LayoutConfig::default();
        layout.set_max_depth(3);
        args.apply_overrides(&mut layout);
        assert_eq!(layout.max_depth(), 3);
        assert!(layout.show_marriage_labels());
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        assert!(Args::try_parse_from(["pedigree", "db.toml", "--style", "fancy"]).is_err());
    }
}
