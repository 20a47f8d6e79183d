use async_trait::async_trait;

use crate::domain::entity::project::{CreateProject, Project, UpdateProject};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Project>, i64)>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Project>>;
    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Project>>;
    /// Name lookup that ignores the given id, for unique-excluding-self
    /// checks on update.
    async fn find_by_name_excluding(&self, name: &str, id: i64)
        -> anyhow::Result<Option<Project>>;
    async fn create(&self, input: &CreateProject) -> anyhow::Result<Project>;
    async fn update(&self, id: i64, input: &UpdateProject) -> anyhow::Result<Project>;
    async fn delete(&self, id: i64) -> anyhow::Result<()>;
}
