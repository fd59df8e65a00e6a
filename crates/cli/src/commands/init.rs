use anyhow::{Context, Result};
use std::{env, fs, path::PathBuf};
use tracing::info;

use crate::config::{CONFIG_FILE, create_default_config, create_sample_fixture};
use crate::utils::DEFAULT_FIXTURE;

pub fn init_command(cwd: Option<&str>, force: bool) -> Result<()> {
    let project_root = if let Some(cwd) = cwd {
        PathBuf::from(cwd)
    } else {
        env::current_dir().context("Failed to get current directory")?
    };

    let project_root = project_root
        .canonicalize()
        .context("Failed to canonicalize project root")?;

    let files = [
        (project_root.join(CONFIG_FILE), create_default_config()?),
        (project_root.join(DEFAULT_FIXTURE), create_sample_fixture()),
    ];

    let mut created = 0;
    for (path, contents) in &files {
        if path.exists() && !force {
            println!("❌ Already exists: {}", path.display());
            println!("   Use --force to overwrite");
            continue;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
        println!("✅ Created: {}", path.display());
        created += 1;
    }

    println!("\n✅ Initialization complete!");
    println!("   • Created {} files", created);
    println!("\n📌 Try it:");
    println!("   seo-projector schema");
    println!("   seo-projector resolve post:1");

    Ok(())
}
