use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use grafter_analysis::{Analyzer, SchemaFactory};
use grafter_db::{File, RootDatabase, check_file};
use grafter_errors::Renderer;
use grafter_interpret::{Adapter, AdapterOptions};
use grafter_tree::json::{from_json, to_json};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Rule language toolchain for tree rewriting")]
enum Options {
    /// Parses a rule file and reports the first error in it.
    Check { rules: Utf8PathBuf },
    /// Applies the transformations of a rule file to a JSON tree.
    Transform {
        rules: Utf8PathBuf,
        tree: Utf8PathBuf,
        /// Target language; only common rules apply when omitted.
        #[arg(long, default_value = "")]
        lang: String,
        /// Applies only the transformation with this index.
        #[arg(long)]
        variant: Option<usize>,
        /// Maximum number of passes; stops early once a pass changes nothing.
        #[arg(long, default_value_t = 1)]
        passes: usize,
        /// Writes the result here instead of standard output.
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },
    /// Prints a type followed by the abstract types it belongs to.
    Hierarchy {
        rules: Utf8PathBuf,
        type_name: String,
        #[arg(long, default_value = "")]
        lang: String,
    },
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("GRAFTER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let db = RootDatabase::default();
    match Options::parse() {
        Options::Check { rules } => {
            load(&db, &rules)?;
            Ok(())
        }
        Options::Transform { rules, tree, lang, variant, passes, output } => {
            let file = load(&db, &rules)?;
            let program = file.program(&db).context("rule file did not parse")?;

            let analyzer = Analyzer::new(program.statements(), &lang)?;
            let factory = SchemaFactory::new(&analyzer, program);
            let transformations = program.transformations_for(&lang);

            let text = std::fs::read_to_string(&tree)
                .with_context(|| format!("failed to read `{tree}`"))?;
            let root = from_json(&text, &factory)?;

            let adapter = match variant {
                Some(variant) => Adapter::single(transformations, variant, factory)?,
                None => Adapter::new(transformations, factory),
            };
            let adapter = adapter.with_options(AdapterOptions { max_passes: passes });

            let (converted, report) = adapter.run(&root);
            tracing::info!(passes = report.passes, rewrites = report.rewrites, "transformed `{tree}`");

            let json = to_json(&*converted)?;
            match output {
                Some(path) => std::fs::write(&path, json + "\n")
                    .with_context(|| format!("failed to write `{path}`"))?,
                None => println!("{json}"),
            }
            Ok(())
        }
        Options::Hierarchy { rules, type_name, lang } => {
            let file = load(&db, &rules)?;
            let program = file.program(&db).context("rule file did not parse")?;

            let analyzer = Analyzer::new(program.statements(), &lang)?;
            println!("{}", analyzer.hierarchy_of(&type_name).join(" <: "));
            Ok(())
        }
    }
}

/// Reads a rule file into the database, printing its diagnostics. Fails if
/// there were any.
fn load(db: &RootDatabase, path: &Utf8Path) -> anyhow::Result<File> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
    let file = File::new(db, path.to_owned(), text);

    let diagnostics = check_file(db, file);
    let renderer = Renderer::styled();
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic.render(&renderer, file.path(db).as_str(), file.text(db)));
    }

    if !diagnostics.is_empty() {
        bail!("`{path}` has {} error(s)", diagnostics.len());
    }
    Ok(file)
}
