use http_trigger_core::resources::crd::render_crds;

fn main() -> anyhow::Result<()> {
    print!("{}", render_crds()?);

    Ok(())
}
