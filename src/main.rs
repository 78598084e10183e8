//! decor - print a source file with syntax decorations

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use syntax_decor::{
    AnsiRenderer, Block, Config, DecorError, DecorateOptions, Decorator, HtmlRenderer, Result,
    Tokenizer,
};

/// Command line options
#[derive(Debug, Default)]
struct Args {
    file: Option<PathBuf>,
    syntax: Option<String>,
    per_line: bool,
    html: bool,
    tokens: bool,
    no_cache: bool,
    write_config: bool,
}

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("DECOR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn run() -> Result<()> {
    let Some(args) = parse_args(env::args().skip(1))? else {
        return Ok(());
    };

    let mut config = Config::load();
    args.apply_to(&mut config);

    if args.write_config {
        match config.save()? {
            Some(path) => println!("Wrote {}", path.display()),
            None => return Err(DecorError::Message("no home directory to write to".to_string())),
        }
        return Ok(());
    }

    let path = args
        .file
        .ok_or_else(|| DecorError::Message("no input file (see --help)".to_string()))?;
    let source = fs::read_to_string(&path)?;

    let options = if args.html {
        DecorateOptions::from_config(&config).render_token(HtmlRenderer)
    } else {
        DecorateOptions::from_config(&config).render_token(AnsiRenderer::default())
    };
    let mut decorator = Decorator::with_builtins(options);

    let syntax = args
        .syntax
        .or_else(|| decorator.tokenizer().detect_grammar(&path).map(str::to_string))
        .unwrap_or_else(|| config.default_syntax.clone());
    let block = Block::from_lines(config.code_block.as_str(), &source).with_data("syntax", &syntax);

    if args.tokens {
        let tokens = decorator
            .tokenizer()
            .tokenize(&block.full_text(), &syntax)
            .ok_or_else(|| DecorError::Message(format!("unsupported syntax: {}", syntax)))?;
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    if args.html {
        println!(r#"<pre class="language-{}"><code>"#, syntax);
    }
    for buffer in decorator.decorate_block(&block)? {
        println!("{}", decorator.render_buffer(&buffer));
    }
    if args.html {
        println!("</code></pre>");
    }

    Ok(())
}

impl Args {
    /// Fold command line overrides into the configuration
    fn apply_to(&self, config: &mut Config) {
        if self.per_line {
            config.block_per_line = true;
        }
        if self.no_cache {
            config.cache = false;
        }
    }
}

/// Parse arguments; `None` when the request was fully handled (help, version)
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Args>> {
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--syntax" | "-s" => {
                let name = args
                    .next()
                    .ok_or_else(|| DecorError::Message(format!("{} needs a value", arg)))?;
                parsed.syntax = Some(name);
            }
            "--per-line" | "-l" => parsed.per_line = true,
            "--html" => parsed.html = true,
            "--tokens" => parsed.tokens = true,
            "--no-cache" => parsed.no_cache = true,
            "--write-config" => parsed.write_config = true,
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(DecorError::Message(format!("unknown option: {}", arg)));
            }
            _ => {
                if parsed.file.is_some() {
                    return Err(DecorError::Message("only one input file is supported".to_string()));
                }
                parsed.file = Some(PathBuf::from(&arg));
            }
        }
    }

    Ok(Some(parsed))
}

fn print_usage() {
    println!("decor {} - syntax decorations for source files", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: decor [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -s, --syntax NAME  Grammar to use (default: by extension, then config)");
    println!("  -l, --per-line     Tokenize each line on its own");
    println!("      --html         Print HTML spans instead of terminal colors");
    println!("      --tokens       Print the token tree as JSON");
    println!("      --no-cache     Disable the block cache");
    println!("      --write-config Save the settings in effect to ~/.decor.toml");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!();
    println!("Logging is controlled by DECOR_LOG (e.g. DECOR_LOG=trace).");
}

fn print_version() {
    println!("decor {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<Args>> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_options() {
        let args = parse(&["-s", "rust", "--per-line", "--html", "main.rs"]).unwrap().unwrap();
        assert_eq!(args.syntax.as_deref(), Some("rust"));
        assert_eq!(args.file, Some(PathBuf::from("main.rs")));
        assert!(args.per_line);
        assert!(args.html);
        assert!(!args.tokens);
        assert!(!args.no_cache);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["--syntax"]).is_err());
        assert!(parse(&["--bogus", "a.js"]).is_err());
        assert!(parse(&["a.js", "b.js"]).is_err());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let args = parse(&["--per-line", "--no-cache", "--write-config"]).unwrap().unwrap();
        assert!(args.write_config);
        assert!(args.file.is_none());

        let mut config = Config::default();
        args.apply_to(&mut config);
        assert!(config.block_per_line);
        assert!(!config.cache);

        let mut untouched = Config::default();
        parse(&["a.js"]).unwrap().unwrap().apply_to(&mut untouched);
        assert_eq!(untouched, Config::default());
    }

    #[test]
    fn test_version_handled() {
        assert!(parse(&["-V"]).unwrap().is_none());
    }
}
