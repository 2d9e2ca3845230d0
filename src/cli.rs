use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "batch-image-resizer")]
#[command(about = "Resize every PNG and JPEG in a folder by a percentage", long_about = None)]
pub struct Cli {
    /// Folder containing the images; results go to <FOLDER>/resized
    #[arg(short, long, env = "RESIZER_FOLDER")]
    pub folder: Option<String>,

    /// Resize percentage, 1 to 100
    #[arg(short, long, env = "RESIZER_PERCENT", default_value = "50")]
    pub percent: String,

    /// Run in the terminal instead of opening a window
    #[arg(long)]
    pub headless: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_window_at_fifty_percent() {
        let cli = Cli::try_parse_from(["batch-image-resizer"]).unwrap();
        assert!(!cli.headless);
        assert_eq!(cli.percent, "50");
    }

    #[test]
    fn headless_flags() {
        let cli = Cli::try_parse_from([
            "batch-image-resizer",
            "--headless",
            "-f",
            "/pics",
            "--percent",
            "25",
        ])
        .unwrap();
        assert!(cli.headless);
        assert_eq!(cli.folder.as_deref(), Some("/pics"));
        assert_eq!(cli.percent, "25");
    }
}
