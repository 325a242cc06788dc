#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("matrix '{name}' does not exist (run `hivemind init {name}` first)")]
    MatrixNotFound { name: String },
    #[error("project '{project}' is not registered in matrix '{matrix}'")]
    ProjectNotFound { matrix: String, project: String },
    #[error("vertical '{vertical}' is not registered in matrix '{matrix}'")]
    VerticalNotFound { matrix: String, vertical: String },
    #[error("invalid name '{name}': use alphanumerics, '-', '_' or '.'")]
    InvalidName { name: String },
}

impl Error {
    #[must_use]
    pub fn matrix_not_found(name: impl Into<String>) -> Self {
        Self::MatrixNotFound { name: name.into() }
    }

    #[must_use]
    pub fn project_not_found(matrix: impl Into<String>, project: impl Into<String>) -> Self {
        Self::ProjectNotFound {
            matrix: matrix.into(),
            project: project.into(),
        }
    }

    #[must_use]
    pub fn vertical_not_found(matrix: impl Into<String>, vertical: impl Into<String>) -> Self {
        Self::VerticalNotFound {
            matrix: matrix.into(),
            vertical: vertical.into(),
        }
    }

    #[must_use]
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
