//! Command-line interface for the Jacy highlighter.
//!
//! Reads a source file (or standard input), highlights it and prints the
//! result as HTML, as a token listing, or as the plain text round trip.

#[cfg(feature = "cli")]
mod real {
    use anyhow::{Context, anyhow};
    use clap::{Parser, ValueEnum};
    use highlex::{HighlightOptions, Highlighter, Registry};
    use std::io::Read;
    use std::path::PathBuf;

    #[derive(Clone, Copy, Debug, ValueEnum)]
    enum Format {
        /// `<span class="hljs-...">` markup
        Html,
        /// One line per token: position, scope and text
        Tokens,
        /// Concatenated token texts
        Plain,
    }

    #[derive(Parser, Debug)]
    #[command(version, about = "Highlight Jacy source code")]
    struct Args {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,

        /// Language name or alias.
        #[arg(short, long, default_value = "jacy")]
        language: String,

        /// Treat illegal sequences as plain text instead of failing.
        #[arg(short, long)]
        ignore_illegals: bool,

        /// Input file; standard input when omitted.
        file: Option<PathBuf>,
    }

    fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
        match file {
            Some(path) => {
                std::fs::read_to_string(path).with_context(|| format!("can't read {:?}", path))
            }
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("can't read standard input")?;
                Ok(text)
            }
        }
    }

    pub fn main() -> anyhow::Result<()> {
        env_logger::init();
        let args = Args::parse();
        log::debug!("{:?}", args);

        let options = HighlightOptions {
            ignore_illegals: args.ignore_illegals,
        };
        let jacy = Highlighter::new(&jacy_grammar::LANGUAGE)
            .context("can't compile the Jacy grammar")?
            .with_options(options);
        let mut registry = Registry::new();
        registry.register(&jacy);

        let source = read_input(args.file.as_ref())?;
        let hl = registry
            .get(&args.language)
            .ok_or_else(|| {
                let known: Vec<_> = registry.names().collect();
                anyhow!(
                    "unknown language {:?} (known: {})",
                    args.language,
                    known.join(", ")
                )
            })?;
        let out = hl
            .highlight(&source)
            .with_context(|| format!("can't highlight as {}", hl.name()))?;
        log::info!(
            "{}: relevance {}, {:?}",
            out.language(),
            out.relevance(),
            out.stats()
        );

        match args.format {
            Format::Html => println!("{}", out.to_html()),
            Format::Plain => print!("{}", out.to_plain()),
            Format::Tokens => {
                for token in out.tokens() {
                    let scope = token.scope.map_or("-", |s| s.name());
                    println!("{}\t{}\t{:?}", token.span, scope, token.text);
                }
            }
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    real::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("jacy-hl disabled (compiled without `cli` feature)");
}
