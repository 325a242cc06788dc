use {
    hivemind_registry::{Error, FsMatrixStore, MatrixStore, changelog, types, vertical},
    tracing::info,
};

/// Record a vertical in the manifest and seed its markdown document.
/// Reports and succeeds if the vertical already exists.
pub async fn add(store: &FsMatrixStore, matrix: &str, name: &str) -> anyhow::Result<()> {
    types::validate_name(name)?;
    let mut manifest = store.load_required(matrix).await?;

    if !manifest.add_vertical(name) {
        println!("Vertical '{name}' already exists in '{matrix}'.");
        return Ok(());
    }
    store.save(&manifest).await?;

    let dir = store.matrix_dir(matrix);
    let file = vertical::ensure_file(&dir, name)?;
    changelog::append(&dir, &format!("Vertical '{name}' added"))?;
    info!(matrix, vertical = name, "vertical added");

    println!("Vertical '{name}' added to '{matrix}'");
    println!("File: {}", file.display());
    Ok(())
}

/// Remove a vertical and delete its document.
pub async fn remove(store: &FsMatrixStore, matrix: &str, name: &str) -> anyhow::Result<()> {
    let mut manifest = store.load_required(matrix).await?;

    if !manifest.remove_vertical(name) {
        return Err(Error::vertical_not_found(matrix, name).into());
    }
    store.save(&manifest).await?;

    let dir = store.matrix_dir(matrix);
    vertical::remove_file(&dir, name)?;
    changelog::append(&dir, &format!("Vertical '{name}' removed"))?;

    println!("Vertical '{name}' removed from '{matrix}'");
    Ok(())
}

/// List the verticals of a matrix with content summaries.
pub async fn list(store: &FsMatrixStore, matrix: &str) -> anyhow::Result<()> {
    let manifest = store.load_required(matrix).await?;
    if manifest.verticals.is_empty() {
        println!("No verticals in '{matrix}'.");
        return Ok(());
    }
    let dir = store.matrix_dir(matrix);
    for v in &manifest.verticals {
        println!("  {v}: {}", vertical::summarize(&dir, v)?);
    }
    Ok(())
}

/// Print one vertical document, or every document the matrix has.
pub async fn read(store: &FsMatrixStore, matrix: &str, name: Option<&str>) -> anyhow::Result<()> {
    let manifest = store.load_required(matrix).await?;
    let dir = store.matrix_dir(matrix);

    match name {
        Some(v) => {
            if !manifest.has_vertical(v) {
                anyhow::bail!(
                    "vertical '{v}' is not registered in '{matrix}' (available: {})",
                    manifest.verticals.join(", ")
                );
            }
            match vertical::read(&dir, v)? {
                Some(content) => println!("{content}"),
                None => anyhow::bail!("file for vertical '{v}' not found"),
            }
        },
        None => {
            if manifest.verticals.is_empty() {
                println!("No verticals in '{matrix}'.");
                return Ok(());
            }
            for v in &manifest.verticals {
                if let Some(content) = vertical::read(&dir, v)? {
                    println!("{content}");
                    println!();
                }
            }
        },
    }
    Ok(())
}
