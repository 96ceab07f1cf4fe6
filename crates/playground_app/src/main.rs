fn main() -> anyhow::Result<()> {
    playground_app::platform::run_app()
}
