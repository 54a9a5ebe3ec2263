use console::style;
use miette::Result;

use snapdeploy_ops::ops_plan;

use crate::cli::Cli;

pub fn exec(cli: &Cli) -> Result<()> {
    let root = super::current_dir()?;
    let config = super::load_config(&root, cli)?;
    let planned = ops_plan::plan(&config)?;

    println!(
        "{} artifact(s) -> {} ({})",
        planned.len(),
        config.repository.url,
        config.repository.id
    );
    for item in &planned {
        let marker = if item.bundle_exists {
            style("ok").green()
        } else {
            style("missing").red()
        };
        println!("  {} {} [{}]", item.artifact, item.bundle.display(), marker);
    }
    Ok(())
}
