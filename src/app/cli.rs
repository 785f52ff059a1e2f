use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Rename photos and videos after their modification time"
)]
pub struct Cli {
    /// Directories to process, comma separated
    #[arg(long, value_delimiter = ',')]
    pub dirs: Option<Vec<String>>,

    /// File suffixes to process without the dot (e.g. 'jpg,mp4'); all files if empty
    #[arg(long, value_delimiter = ',')]
    pub suffixes: Option<Vec<String>>,

    /// Move files into a YYYY directory
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub create_year_dir: Option<bool>,

    /// Move files into a YYYY/YYYYMM directory (needs --create-year-dir)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub create_month_dir: Option<bool>,

    /// Create the year directory next to the source directory instead of inside it
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub sibling_dir: Option<bool>,

    /// Directories to leave alone, comma separated, matched by exact path
    #[arg(long, value_delimiter = ',')]
    pub ignore_dirs: Option<Vec<String>>,

    /// Skip directories already named as a date when bucketing [default: true]
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub skip_date_dir: Option<bool>,

    /// Print what would be renamed without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_lists() {
        let cli = Cli::try_parse_from([
            "mediastamp",
            "--dirs",
            "/a,/b",
            "--suffixes=jpg,MP4",
        ])
        .unwrap();
        assert_eq!(cli.dirs.unwrap(), vec!["/a", "/b"]);
        assert_eq!(cli.suffixes.unwrap(), vec!["jpg", "MP4"]);
    }

    #[test]
    fn bool_flags_accept_bare_and_explicit_values() {
        let cli = Cli::try_parse_from([
            "mediastamp",
            "--dirs=/a",
            "--create-year-dir",
            "--skip-date-dir=false",
            "--sibling-dir=true",
        ])
        .unwrap();
        assert_eq!(cli.create_year_dir, Some(true));
        assert_eq!(cli.skip_date_dir, Some(false));
        assert_eq!(cli.sibling_dir, Some(true));
        assert_eq!(cli.create_month_dir, None);
        assert!(!cli.dry_run);
    }
}
