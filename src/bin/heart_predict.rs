fn main() -> anyhow::Result<()> {
    heart_predict::cli::run()
}
