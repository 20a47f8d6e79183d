use std::sync::Arc;

use crate::domain::entity::activity_log::ActivityLog;
use crate::domain::entity::project::{CreateProject, Project, UpdateProject, UploadedImage};
use crate::domain::repository::activity_log_repository::ActivityLogRepository;
use crate::domain::repository::installment_plan_repository::InstallmentPlanRepository;
use crate::domain::repository::project_repository::ProjectRepository;
use crate::domain::repository::sign_image_store::SignImageStore;
use crate::error::{is_unique_violation, BackofficeError};

/// Upload limits for project sign-images.
#[derive(Debug, Clone)]
pub struct SignImagePolicy {
    pub max_bytes: usize,
    pub allowed_extensions: Vec<String>,
}

impl Default for SignImagePolicy {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            allowed_extensions: ["jpg", "jpeg", "png", "gif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

pub struct ManageProjectsUseCase {
    project_repo: Arc<dyn ProjectRepository>,
    plan_repo: Arc<dyn InstallmentPlanRepository>,
    image_store: Arc<dyn SignImageStore>,
    log_repo: Arc<dyn ActivityLogRepository>,
    image_policy: SignImagePolicy,
}

impl ManageProjectsUseCase {
    pub fn new(
        project_repo: Arc<dyn ProjectRepository>,
        plan_repo: Arc<dyn InstallmentPlanRepository>,
        image_store: Arc<dyn SignImageStore>,
        log_repo: Arc<dyn ActivityLogRepository>,
        image_policy: SignImagePolicy,
    ) -> Self {
        Self {
            project_repo,
            plan_repo,
            image_store,
            log_repo,
            image_policy,
        }
    }

    pub async fn list_projects(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Project>, i64), BackofficeError> {
        Ok(self.project_repo.find_all(page, page_size).await?)
    }

    pub async fn get_project(&self, id: i64) -> Result<Project, BackofficeError> {
        self.project_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| BackofficeError::NotFound(format!("project {}", id)))
    }

    pub async fn create_project(
        &self,
        input: &CreateProject,
        image: Option<UploadedImage>,
        actor: &str,
    ) -> Result<Project, BackofficeError> {
        if input.name.trim().is_empty() {
            return Err(BackofficeError::Validation("project name is required".into()));
        }
        self.require_plan(&input.plan_name).await?;
        if self.project_repo.find_by_name(&input.name).await?.is_some() {
            return Err(Self::duplicate_name(&input.name));
        }

        let stored = match image {
            Some(image) => Some(self.store_image(image).await?),
            None => None,
        };

        let mut input = input.clone();
        input.sign_image = stored.clone();
        let created = match self.project_repo.create(&input).await {
            Ok(project) => project,
            Err(e) => {
                // do not leave an orphaned file behind a failed insert
                if let Some(name) = &stored {
                    let _ = self.image_store.remove(name).await;
                }
                if is_unique_violation(&e) {
                    return Err(Self::duplicate_name(&input.name));
                }
                return Err(e.into());
            }
        };

        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "CREATE", "projects", created.id.to_string()))
            .await;
        Ok(created)
    }

    pub async fn update_project(
        &self,
        id: i64,
        input: &UpdateProject,
        image: Option<UploadedImage>,
        actor: &str,
    ) -> Result<Project, BackofficeError> {
        let current = self.get_project(id).await?;

        if let Some(plan_name) = &input.plan_name {
            self.require_plan(plan_name).await?;
        }
        if let Some(name) = &input.name {
            if name.trim().is_empty() {
                return Err(BackofficeError::Validation("project name is required".into()));
            }
            if self
                .project_repo
                .find_by_name_excluding(name, id)
                .await?
                .is_some()
            {
                return Err(Self::duplicate_name(name));
            }
        }

        let stored = match image {
            Some(image) => Some(self.store_image(image).await?),
            None => None,
        };

        let mut input = input.clone();
        input.sign_image = stored.clone();
        let updated = match self.project_repo.update(id, &input).await {
            Ok(project) => project,
            Err(e) => {
                if let Some(name) = &stored {
                    let _ = self.image_store.remove(name).await;
                }
                if is_unique_violation(&e) {
                    return Err(Self::duplicate_name(
                        input.name.as_deref().unwrap_or(&current.name),
                    ));
                }
                return Err(e.into());
            }
        };

        // replacing the sign-image deletes the previous file
        if stored.is_some() {
            if let Some(previous) = &current.sign_image {
                let _ = self.image_store.remove(previous).await;
            }
        }

        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "UPDATE", "projects", id.to_string()))
            .await;
        Ok(updated)
    }

    pub async fn delete_project(&self, id: i64, actor: &str) -> Result<(), BackofficeError> {
        let current = self.get_project(id).await?;
        self.project_repo.delete(id).await?;
        if let Some(image) = &current.sign_image {
            let _ = self.image_store.remove(image).await;
        }
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "DELETE", "projects", id.to_string()))
            .await;
        Ok(())
    }

    async fn store_image(&self, image: UploadedImage) -> Result<String, BackofficeError> {
        let extension = image
            .file_name
            .rsplit('.')
            .next()
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !self
            .image_policy
            .allowed_extensions
            .iter()
            .any(|allowed| allowed == &extension)
        {
            return Err(BackofficeError::Validation(format!(
                "sign_image must be one of: {}",
                self.image_policy.allowed_extensions.join(", ")
            )));
        }
        if image.bytes.len() > self.image_policy.max_bytes {
            return Err(BackofficeError::Validation(format!(
                "sign_image exceeds the {} MB limit",
                self.image_policy.max_bytes / (1024 * 1024)
            )));
        }
        Ok(self.image_store.save(&image.file_name, &image.bytes).await?)
    }

    async fn require_plan(&self, plan_name: &str) -> Result<(), BackofficeError> {
        if self.plan_repo.find_by_name(plan_name).await?.is_none() {
            return Err(BackofficeError::Validation(
                "Invalid installment plan selected".into(),
            ));
        }
        Ok(())
    }

    fn duplicate_name(name: &str) -> BackofficeError {
        BackofficeError::conflict("name", format!("Project '{}' already exists", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::installment_plan::InstallmentPlan;
    use crate::domain::repository::activity_log_repository::MockActivityLogRepository;
    use crate::domain::repository::installment_plan_repository::MockInstallmentPlanRepository;
    use crate::domain::repository::project_repository::MockProjectRepository;
    use crate::domain::repository::sign_image_store::MockSignImageStore;
    use chrono::Utc;
    use uuid::Uuid;

    fn quiet_logs() -> MockActivityLogRepository {
        let mut logs = MockActivityLogRepository::new();
        logs.expect_create().returning(|_| Ok(()));
        logs
    }

    fn plan_repo_with(plan_exists: bool) -> MockInstallmentPlanRepository {
        let mut repo = MockInstallmentPlanRepository::new();
        repo.expect_find_by_name().returning(move |name| {
            if plan_exists {
                Ok(Some(InstallmentPlan {
                    id: Uuid::new_v4(),
                    plan_name: name.to_string(),
                    no_of_installments: 2,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                }))
            } else {
                Ok(None)
            }
        });
        repo
    }

    fn usecase(
        project_repo: MockProjectRepository,
        plan_repo: MockInstallmentPlanRepository,
        image_store: MockSignImageStore,
    ) -> ManageProjectsUseCase {
        ManageProjectsUseCase::new(
            Arc::new(project_repo),
            Arc::new(plan_repo),
            Arc::new(image_store),
            Arc::new(quiet_logs()),
            SignImagePolicy::default(),
        )
    }

    fn create_input() -> CreateProject {
        CreateProject {
            name: "Green Meadows".to_string(),
            plan_name: "P1".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_plan() {
        let mut project_repo = MockProjectRepository::new();
        project_repo.expect_create().never();

        let uc = usecase(project_repo, plan_repo_with(false), MockSignImageStore::new());
        match uc.create_project(&create_input(), None, "tester").await {
            Err(BackofficeError::Validation(message)) => {
                assert_eq!(message, "Invalid installment plan selected");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_oversized_image() {
        let mut project_repo = MockProjectRepository::new();
        project_repo.expect_find_by_name().returning(|_| Ok(None));
        project_repo.expect_create().never();
        let mut image_store = MockSignImageStore::new();
        image_store.expect_save().never();

        let uc = usecase(project_repo, plan_repo_with(true), image_store);
        let image = UploadedImage {
            file_name: "sign.png".to_string(),
            bytes: vec![0u8; 5 * 1024 * 1024 + 1],
        };
        assert!(matches!(
            uc.create_project(&create_input(), Some(image), "tester").await,
            Err(BackofficeError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_non_image_extension() {
        let mut project_repo = MockProjectRepository::new();
        project_repo.expect_find_by_name().returning(|_| Ok(None));
        project_repo.expect_create().never();

        let uc = usecase(project_repo, plan_repo_with(true), MockSignImageStore::new());
        let image = UploadedImage {
            file_name: "sign.pdf".to_string(),
            bytes: vec![0u8; 16],
        };
        assert!(matches!(
            uc.create_project(&create_input(), Some(image), "tester").await,
            Err(BackofficeError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_previous_image() {
        let mut project_repo = MockProjectRepository::new();
        project_repo.expect_find_by_id().returning(|id| {
            Ok(Some(Project {
                id,
                name: "Green Meadows".to_string(),
                plan_name: "P1".to_string(),
                address: None,
                city: None,
                state: None,
                pincode: None,
                company_name: None,
                sign_image: Some("old.png".to_string()),
                size: None,
                measuring_unit: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        });
        project_repo
            .expect_update()
            .returning(|id, input| {
                Ok(Project {
                    id,
                    name: "Green Meadows".to_string(),
                    plan_name: "P1".to_string(),
                    address: None,
                    city: None,
                    state: None,
                    pincode: None,
                    company_name: None,
                    sign_image: input.sign_image.clone(),
                    size: None,
                    measuring_unit: None,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let mut image_store = MockSignImageStore::new();
        image_store
            .expect_save()
            .returning(|_, _| Ok("new.png".to_string()));
        image_store
            .expect_remove()
            .withf(|name| name == "old.png")
            .times(1)
            .returning(|_| Ok(()));

        let uc = usecase(project_repo, MockInstallmentPlanRepository::new(), image_store);
        let image = UploadedImage {
            file_name: "sign.png".to_string(),
            bytes: vec![0u8; 16],
        };
        let updated = uc
            .update_project(3, &UpdateProject::default(), Some(image), "tester")
            .await
            .expect("update");
        assert_eq!(updated.sign_image.as_deref(), Some("new.png"));
    }
}
