fn main() -> anyhow::Result<()> {
    paragon::cli::run_cli()
}
