fn main() -> anyhow::Result<()> {
    mirage::run()
}
