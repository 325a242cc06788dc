use std::path::{PathBuf, absolute};

use {
    hivemind_registry::{Error, FsMatrixStore, MatrixStore, ProjectMarker, changelog, marker},
    tracing::{debug, info},
};

/// Register a project directory under a matrix and drop a marker file
/// into it. Re-registering an existing name updates its path.
pub async fn register(
    store: &FsMatrixStore,
    matrix: &str,
    project: &str,
    path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut manifest = store.load_required(matrix).await?;

    let dir = match path {
        Some(p) => absolute(p)?,
        None => std::env::current_dir()?,
    };

    manifest.register_project(project, dir.clone());
    store.save(&manifest).await?;

    let marker_path = marker::write_marker(&dir, &ProjectMarker::new(matrix, project))?;
    changelog::append(
        &store.matrix_dir(matrix),
        &format!("Project '{project}' registered ({})", dir.display()),
    )?;
    info!(matrix, project, dir = %dir.display(), "project registered");

    println!("Project '{project}' registered under '{matrix}'");
    println!("Marker written to {}", marker_path.display());
    Ok(())
}

/// Remove a project from a matrix. The marker is deleted only when it
/// actually belongs to this registration, so a directory re-registered
/// elsewhere keeps its newer marker.
pub async fn unregister(store: &FsMatrixStore, matrix: &str, project: &str) -> anyhow::Result<()> {
    let mut manifest = store.load_required(matrix).await?;

    let Some(entry) = manifest.unregister_project(project) else {
        return Err(Error::project_not_found(matrix, project).into());
    };
    store.save(&manifest).await?;

    if let Some(found) = marker::read_marker(&entry.path)?
        && found.matrix == matrix
        && found.project == project
    {
        marker::remove_marker(&entry.path)?;
        debug!(path = %entry.path.display(), "removed project marker");
    }

    changelog::append(
        &store.matrix_dir(matrix),
        &format!("Project '{project}' unregistered"),
    )?;

    println!("Project '{project}' removed from '{matrix}'");
    Ok(())
}

/// List the projects registered in a matrix.
pub async fn list(store: &FsMatrixStore, matrix: &str) -> anyhow::Result<()> {
    let manifest = store.load_required(matrix).await?;
    if manifest.projects.is_empty() {
        println!("No projects in '{matrix}'.");
        return Ok(());
    }
    for (name, entry) in &manifest.projects {
        println!("  {name}: {}", entry.path.display());
    }
    Ok(())
}

/// Find the marker for the current directory (or any parent) and print
/// it as JSON. A marker whose matrix has vanished from the registry is
/// reported but still printed.
pub async fn detect(store: &FsMatrixStore) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    match marker::detect(&cwd)? {
        Some((found, dir)) => {
            println!("{}", serde_json::to_string_pretty(&found)?);
            if store.load(&found.matrix).await?.is_none() {
                eprintln!(
                    "Warning: marker in {} points at matrix '{}' which is not in the registry.",
                    dir.display(),
                    found.matrix
                );
            }
        },
        None => {
            println!(
                "No {} found in the current directory or any parent.",
                marker::MARKER_FILE
            );
        },
    }
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, crate::matrix_commands, hivemind_registry::changelog::CHANGELOG_FILE, std::fs};

    async fn store_with_matrix(base: &std::path::Path) -> FsMatrixStore {
        let store = FsMatrixStore::new(base);
        matrix_commands::init(&store, "acme").await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_register_writes_manifest_and_marker() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_with_matrix(tmp.path()).await;
        let project_dir = tmp.path().join("web");

        register(&store, "acme", "web", Some(project_dir.clone()))
            .await
            .unwrap();

        let manifest = store.load("acme").await.unwrap().unwrap();
        assert!(manifest.projects.contains_key("web"));

        let found = marker::read_marker(&project_dir).unwrap().unwrap();
        assert_eq!(found.matrix, "acme");
        assert_eq!(found.project, "web");

        let log = fs::read_to_string(store.matrix_dir("acme").join(CHANGELOG_FILE)).unwrap();
        assert!(log.contains("Project 'web' registered"));
    }

    #[tokio::test]
    async fn test_register_requires_matrix() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsMatrixStore::new(tmp.path());
        let err = register(&store, "ghost", "web", Some(tmp.path().join("web")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_reregister_updates_path() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_with_matrix(tmp.path()).await;

        register(&store, "acme", "web", Some(tmp.path().join("old")))
            .await
            .unwrap();
        register(&store, "acme", "web", Some(tmp.path().join("new")))
            .await
            .unwrap();

        let manifest = store.load("acme").await.unwrap().unwrap();
        assert_eq!(manifest.projects.len(), 1);
        assert!(manifest.projects["web"].path.ends_with("new"));
    }

    #[tokio::test]
    async fn test_unregister_removes_entry_and_marker() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_with_matrix(tmp.path()).await;
        let project_dir = tmp.path().join("web");

        register(&store, "acme", "web", Some(project_dir.clone()))
            .await
            .unwrap();
        unregister(&store, "acme", "web").await.unwrap();

        let manifest = store.load("acme").await.unwrap().unwrap();
        assert!(manifest.projects.is_empty());
        assert!(marker::read_marker(&project_dir).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unregister_unknown_project_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_with_matrix(tmp.path()).await;
        let err = unregister(&store, "acme", "ghost").await.unwrap_err();
        assert!(err.to_string().contains("not registered"));
    }

    #[tokio::test]
    async fn test_unregister_leaves_foreign_marker() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_with_matrix(tmp.path()).await;
        let project_dir = tmp.path().join("web");

        register(&store, "acme", "web", Some(project_dir.clone()))
            .await
            .unwrap();
        // The directory was since re-registered under another identity.
        marker::write_marker(&project_dir, &ProjectMarker::new("other", "web")).unwrap();

        unregister(&store, "acme", "web").await.unwrap();
        let kept = marker::read_marker(&project_dir).unwrap().unwrap();
        assert_eq!(kept.matrix, "other");
    }

    #[tokio::test]
    async fn test_list_projects() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_with_matrix(tmp.path()).await;
        assert!(list(&store, "acme").await.is_ok());
        assert!(list(&store, "ghost").await.is_err());
    }
}
