//! paltool command-line binary

fn main() -> anyhow::Result<()> {
    paltool::cli::run_cli()
}
