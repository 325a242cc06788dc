use {
    hivemind_registry::{
        FsMatrixStore, MatrixManifest, MatrixStore, changelog, marker, types, vertical,
    },
    tracing::info,
};

/// Create a matrix directory with a fresh manifest and changelog.
/// Idempotent: an existing matrix is reported, not overwritten.
pub async fn init(store: &FsMatrixStore, name: &str) -> anyhow::Result<()> {
    types::validate_name(name)?;
    let dir = store.matrix_dir(name);

    if store.load(name).await?.is_some() {
        println!("Matrix '{name}' already exists at {}", dir.display());
        return Ok(());
    }

    store.save(&MatrixManifest::new(name)).await?;
    changelog::append(&dir, &format!("Matrix '{name}' created"))?;
    info!(matrix = name, "matrix initialized");

    println!("Matrix '{name}' initialized at {}", dir.display());
    Ok(())
}

/// Show a matrix summary. With no matrix given, fall back to the
/// detected project marker, then to the matrix listing.
pub async fn status(store: &FsMatrixStore, matrix: Option<&str>) -> anyhow::Result<()> {
    let name = match matrix {
        Some(m) => m.to_string(),
        None => {
            let cwd = std::env::current_dir()?;
            match marker::detect(&cwd)? {
                Some((found, _)) => {
                    // A marker pointing at a deleted matrix is a
                    // recoverable inconsistency, not a failure.
                    if store.load(&found.matrix).await?.is_none() {
                        println!(
                            "Marker points at matrix '{}' which is not in the registry.",
                            found.matrix
                        );
                        return list(store).await;
                    }
                    found.matrix
                },
                None => return list(store).await,
            }
        },
    };

    let manifest = store.load_required(&name).await?;
    let dir = store.matrix_dir(&name);

    println!("Matrix: {}", manifest.name);
    println!("Created: {}", manifest.created_at.format("%Y-%m-%d"));

    println!("\nProjects ({}):", manifest.projects.len());
    for (pname, entry) in &manifest.projects {
        println!("  - {pname}: {}", entry.path.display());
    }

    println!("\nVerticals ({}):", manifest.verticals.len());
    for v in &manifest.verticals {
        println!("  - {v}: {}", vertical::summarize(&dir, v)?);
    }
    if manifest.verticals.is_empty() {
        println!("  (none)");
    }

    Ok(())
}

/// List all matrices with project and vertical counts.
pub async fn list(store: &FsMatrixStore) -> anyhow::Result<()> {
    let matrices = store.list().await?;
    if matrices.is_empty() {
        println!("No matrices found.");
        return Ok(());
    }
    for m in &matrices {
        println!(
            "  {} ({} projects, {} verticals)",
            m.name,
            m.projects.len(),
            m.verticals.len()
        );
    }
    Ok(())
}

/// Append a freeform changelog entry.
pub async fn log_change(store: &FsMatrixStore, matrix: &str, message: &str) -> anyhow::Result<()> {
    store.load_required(matrix).await?;
    changelog::append(&store.matrix_dir(matrix), message)?;
    println!("Logged.");
    Ok(())
}

/// Print the directory holding a matrix' files. The assistant uses
/// this to locate vertical documents for editing.
pub async fn path(store: &FsMatrixStore, matrix: &str) -> anyhow::Result<()> {
    store.load_required(matrix).await?;
    println!("{}", store.matrix_dir(matrix).display());
    Ok(())
}
