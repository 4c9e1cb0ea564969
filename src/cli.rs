//! CLI argument parsing with clap.

use clap::Parser;

/// Hindi/English prompt to image: translates with Argos, renders with Stable Diffusion.
#[derive(Parser, Debug)]
#[command(name = "hindi-imagen", version, about)]
pub struct Cli {
    /// Prompt describing the desired image (Hindi or English).
    #[arg(conflicts_with = "prompt_file")]
    pub prompt: Option<String>,

    /// Path to a file containing the prompt text.
    #[arg(short = 'p', long, conflicts_with = "prompt")]
    pub prompt_file: Option<String>,

    /// Read one prompt per line from stdin until EOF.
    #[arg(short, long, conflicts_with_all = ["prompt", "prompt_file", "output"])]
    pub interactive: bool,

    /// Output format: jpeg, png, webp [default: from config, else jpeg].
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output file path (auto-generated from the translated prompt if not specified).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the prompt from either the positional argument or the file flag.
    ///
    /// An empty prompt is returned as-is; rejecting it is the orchestrator's job.
    ///
    /// # Errors
    ///
    /// Returns an error if neither prompt nor prompt-file is provided,
    /// or if the file cannot be read.
    pub fn resolve_prompt(&self) -> Result<String, std::io::Error> {
        if let Some(ref text) = self.prompt {
            Ok(text.clone())
        } else if let Some(ref path) = self.prompt_file {
            Ok(std::fs::read_to_string(path)?.trim_end().to_string())
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Provide a prompt string, use -p/--prompt-file, or -i/--interactive",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_prompt() {
        let cli = Cli::parse_from(["hindi-imagen", "सूरज"]);
        assert_eq!(cli.prompt.as_deref(), Some("सूरज"));
        assert!(cli.prompt_file.is_none());
        assert_eq!(cli.resolve_prompt().unwrap(), "सूरज");
    }

    #[test]
    fn prompt_file_flag_trims_trailing_newline() {
        let dir = std::env::temp_dir().join("hindi_imagen_cli_pf_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prompt.txt");
        std::fs::write(&path, "नदी के किनारे पेड़\n").unwrap();

        let cli = Cli::parse_from(["hindi-imagen", "-p", path.to_str().unwrap()]);
        assert!(cli.prompt.is_none());
        assert_eq!(cli.resolve_prompt().unwrap(), "नदी के किनारे पेड़");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn default_values() {
        let cli = Cli::parse_from(["hindi-imagen", "sun"]);
        assert!(cli.format.is_none());
        assert!(cli.output.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.interactive);
        assert!(!cli.verbose);
    }

    #[test]
    fn all_options() {
        let cli = Cli::parse_from([
            "hindi-imagen",
            "-f",
            "png",
            "-o",
            "out.png",
            "--config",
            "/tmp/c.toml",
            "-v",
            "a landscape",
        ]);
        assert_eq!(cli.format.as_deref(), Some("png"));
        assert_eq!(cli.output.as_deref(), Some("out.png"));
        assert_eq!(cli.config.as_deref(), Some("/tmp/c.toml"));
        assert!(cli.verbose);
        assert_eq!(cli.prompt.as_deref(), Some("a landscape"));
    }

    #[test]
    fn interactive_conflicts_with_prompt() {
        assert!(Cli::try_parse_from(["hindi-imagen", "-i", "sun"]).is_err());
        assert!(Cli::try_parse_from(["hindi-imagen", "-i", "-o", "x.jpg"]).is_err());
        assert!(Cli::try_parse_from(["hindi-imagen", "-i"]).unwrap().interactive);
    }

    #[test]
    fn no_prompt_errors() {
        let cli = Cli::parse_from(["hindi-imagen"]);
        assert!(cli.resolve_prompt().is_err());
    }
}
