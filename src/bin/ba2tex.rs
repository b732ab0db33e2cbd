//! ba2tex command-line binary

fn main() -> anyhow::Result<()> {
    ba2tex::cli::run_cli()
}
