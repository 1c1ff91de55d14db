use anyhow::Result;

fn main() -> Result<()> {
    fishbone_renderer::run()
}
