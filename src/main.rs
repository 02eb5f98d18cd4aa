fn main() -> anyhow::Result<()> {
    dianping_scout::cli::run()
}
