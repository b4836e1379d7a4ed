use anyhow::Result;

fn main() -> Result<()> {
    consigne_cli::run()
}
