//! In-memory project registry.

use dashmap::DashMap;
use tahsis_shared::types::ProjectId;

use super::types::{Project, ProjectError};

/// Thread-safe registry of projects keyed by ID, with unique codes.
#[derive(Debug, Default)]
pub struct ProjectRegistry {
    projects: DashMap<ProjectId, Project>,
    codes: DashMap<String, ProjectId>,
}

impl ProjectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a project after validating its rates and code uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::DuplicateCode` if the code is taken, or a
    /// validation error for bad rates/budget.
    pub fn register(&self, project: Project) -> Result<Project, ProjectError> {
        project.validate()?;

        // Claim the code first so two concurrent registrations of the
        // same code cannot both succeed.
        match self.codes.entry(project.code.clone()) {
            dashmap::Entry::Occupied(_) => {
                return Err(ProjectError::DuplicateCode(project.code));
            }
            dashmap::Entry::Vacant(entry) => {
                entry.insert(project.id);
            }
        }

        self.projects.insert(project.id, project.clone());
        Ok(project)
    }

    /// Looks up a project by ID.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::ProjectNotFound` if no such project exists.
    pub fn get(&self, id: ProjectId) -> Result<Project, ProjectError> {
        self.projects
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or(ProjectError::ProjectNotFound(id))
    }

    /// Looks up a project by its unique code.
    #[must_use]
    pub fn find_by_code(&self, code: &str) -> Option<Project> {
        let id = *self.codes.get(code)?;
        self.projects.get(&id).map(|entry| entry.clone())
    }

    /// Returns the number of registered projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Returns true if no projects are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
