use std::sync::Arc;

use crate::domain::entity::activity_log::ActivityLog;
use crate::domain::entity::installment_plan::{
    CreateInstallmentPlan, InstallmentDetail, InstallmentDetailInput, InstallmentPlan,
    InstallmentPlanWithDetails, UpdateInstallmentPlan,
};
use crate::domain::repository::activity_log_repository::ActivityLogRepository;
use crate::domain::repository::installment_plan_repository::InstallmentPlanRepository;
use crate::domain::service::schedule_service::ScheduleService;
use crate::error::{is_unique_violation, BackofficeError};

pub struct ManageInstallmentPlansUseCase {
    plan_repo: Arc<dyn InstallmentPlanRepository>,
    log_repo: Arc<dyn ActivityLogRepository>,
}

impl ManageInstallmentPlansUseCase {
    pub fn new(
        plan_repo: Arc<dyn InstallmentPlanRepository>,
        log_repo: Arc<dyn ActivityLogRepository>,
    ) -> Self {
        Self { plan_repo, log_repo }
    }

    pub async fn list_plans(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<InstallmentPlan>, i64), BackofficeError> {
        Ok(self.plan_repo.find_all(page, page_size).await?)
    }

    pub async fn get_plan(
        &self,
        plan_name: &str,
    ) -> Result<InstallmentPlanWithDetails, BackofficeError> {
        let plan = self.require_plan(plan_name).await?;
        let installment_details = self.plan_repo.find_details(plan_name).await?;
        Ok(InstallmentPlanWithDetails {
            plan,
            installment_details,
        })
    }

    pub async fn create_plan(
        &self,
        input: &CreateInstallmentPlan,
        actor: &str,
    ) -> Result<InstallmentPlan, BackofficeError> {
        let plan_name = input.plan_name.trim();
        if plan_name.is_empty() {
            return Err(BackofficeError::Validation("plan_name is required".into()));
        }
        if input.no_of_installments < 1 {
            return Err(BackofficeError::Validation(
                "no_of_installments must be a positive integer".into(),
            ));
        }
        if self.plan_repo.find_by_name(plan_name).await?.is_some() {
            return Err(Self::duplicate_plan(plan_name));
        }

        let input = CreateInstallmentPlan {
            plan_name: plan_name.to_string(),
            no_of_installments: input.no_of_installments,
        };
        let plan = match self.plan_repo.create(&input).await {
            Ok(plan) => plan,
            // a concurrent create can win between the check and the insert
            Err(e) if is_unique_violation(&e) => return Err(Self::duplicate_plan(plan_name)),
            Err(e) => return Err(e.into()),
        };

        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "CREATE", "installment_plans", plan_name))
            .await;
        Ok(plan)
    }

    /// Attaches one detail row per input entry to an existing plan.
    /// Due dates are resolved per the schedule rules; all rows insert in
    /// a single transaction.
    pub async fn attach_details(
        &self,
        plan_name: &str,
        inputs: &[InstallmentDetailInput],
        actor: &str,
    ) -> Result<Vec<InstallmentDetail>, BackofficeError> {
        let plan = self.require_plan(plan_name).await?;
        if inputs.is_empty() {
            return Err(BackofficeError::Validation(
                "installment details are required".into(),
            ));
        }
        let today = chrono::Utc::now().date_naive();
        let rows = ScheduleService::resolve_details(inputs, plan.no_of_installments, today)
            .map_err(BackofficeError::Validation)?;

        let details = self.plan_repo.insert_details(&plan.plan_name, &rows).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "CREATE", "installment_details", plan_name))
            .await;
        Ok(details)
    }

    /// Updates the declared count and/or replaces the full detail array.
    /// Replacement deletes and re-inserts inside one transaction.
    pub async fn update_plan(
        &self,
        plan_name: &str,
        input: &UpdateInstallmentPlan,
        actor: &str,
    ) -> Result<InstallmentPlanWithDetails, BackofficeError> {
        let mut plan = self.require_plan(plan_name).await?;

        if let Some(count) = input.no_of_installments {
            if count < 1 {
                return Err(BackofficeError::Validation(
                    "no_of_installments must be a positive integer".into(),
                ));
            }
            plan = self.plan_repo.update_count(plan_name, count).await?;
        }

        if let Some(inputs) = &input.installment_details {
            let today = chrono::Utc::now().date_naive();
            let rows = ScheduleService::resolve_details(inputs, plan.no_of_installments, today)
                .map_err(BackofficeError::Validation)?;
            self.plan_repo.replace_details(plan_name, &rows).await?;
        }

        let installment_details = self.plan_repo.find_details(plan_name).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "UPDATE", "installment_plans", plan_name))
            .await;
        Ok(InstallmentPlanWithDetails {
            plan,
            installment_details,
        })
    }

    /// Deletes a plan and its detail rows, children first.
    pub async fn delete_plan(&self, plan_name: &str, actor: &str) -> Result<(), BackofficeError> {
        self.require_plan(plan_name).await?;
        self.plan_repo.delete_with_details(plan_name).await?;
        let _ = self
            .log_repo
            .create(&ActivityLog::record(actor, "DELETE", "installment_plans", plan_name))
            .await;
        Ok(())
    }

    async fn require_plan(&self, plan_name: &str) -> Result<InstallmentPlan, BackofficeError> {
        self.plan_repo
            .find_by_name(plan_name)
            .await?
            .ok_or_else(|| {
                BackofficeError::NotFound(format!("installment plan '{}'", plan_name))
            })
    }

    fn duplicate_plan(plan_name: &str) -> BackofficeError {
        BackofficeError::conflict(
            "plan_name",
            format!("Installment plan '{}' already exists", plan_name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::activity_log_repository::MockActivityLogRepository;
    use crate::domain::repository::installment_plan_repository::MockInstallmentPlanRepository;
    use chrono::Utc;
    use uuid::Uuid;

    fn plan(name: &str, count: i32) -> InstallmentPlan {
        InstallmentPlan {
            id: Uuid::new_v4(),
            plan_name: name.to_string(),
            no_of_installments: count,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn quiet_logs() -> MockActivityLogRepository {
        let mut logs = MockActivityLogRepository::new();
        logs.expect_create().returning(|_| Ok(()));
        logs
    }

    #[tokio::test]
    async fn test_create_plan_rejects_duplicate_name() {
        let mut repo = MockInstallmentPlanRepository::new();
        repo.expect_find_by_name()
            .returning(|name| Ok(Some(plan(name, 2))));
        repo.expect_create().never();

        let uc = ManageInstallmentPlansUseCase::new(Arc::new(repo), Arc::new(quiet_logs()));
        let input = CreateInstallmentPlan {
            plan_name: "STD12".to_string(),
            no_of_installments: 2,
        };
        match uc.create_plan(&input, "tester").await {
            Err(BackofficeError::Conflict { field, .. }) => {
                assert_eq!(field.as_deref(), Some("plan_name"));
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_plan_rejects_blank_name_and_bad_count() {
        let mut repo = MockInstallmentPlanRepository::new();
        repo.expect_find_by_name().never();
        repo.expect_create().never();
        let uc = ManageInstallmentPlansUseCase::new(Arc::new(repo), Arc::new(quiet_logs()));

        let blank = CreateInstallmentPlan {
            plan_name: "  ".to_string(),
            no_of_installments: 2,
        };
        assert!(matches!(
            uc.create_plan(&blank, "tester").await,
            Err(BackofficeError::Validation(_))
        ));

        let bad_count = CreateInstallmentPlan {
            plan_name: "STD12".to_string(),
            no_of_installments: 0,
        };
        assert!(matches!(
            uc.create_plan(&bad_count, "tester").await,
            Err(BackofficeError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_attach_details_requires_existing_plan() {
        let mut repo = MockInstallmentPlanRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_insert_details().never();

        let uc = ManageInstallmentPlansUseCase::new(Arc::new(repo), Arc::new(quiet_logs()));
        let inputs = vec![InstallmentDetailInput {
            installment_number: 1,
            ..Default::default()
        }];
        assert!(matches!(
            uc.attach_details("MISSING", &inputs, "tester").await,
            Err(BackofficeError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_attach_details_rejects_out_of_range_number() {
        let mut repo = MockInstallmentPlanRepository::new();
        repo.expect_find_by_name()
            .returning(|name| Ok(Some(plan(name, 2))));
        repo.expect_insert_details().never();

        let uc = ManageInstallmentPlansUseCase::new(Arc::new(repo), Arc::new(quiet_logs()));
        let inputs = vec![InstallmentDetailInput {
            installment_number: 3,
            ..Default::default()
        }];
        assert!(matches!(
            uc.attach_details("STD12", &inputs, "tester").await,
            Err(BackofficeError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_plan_performs_no_mutation() {
        let mut repo = MockInstallmentPlanRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_delete_with_details().never();

        let uc = ManageInstallmentPlansUseCase::new(Arc::new(repo), Arc::new(quiet_logs()));
        assert!(matches!(
            uc.delete_plan("MISSING", "tester").await,
            Err(BackofficeError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_plan_replaces_details_against_new_count() {
        let mut repo = MockInstallmentPlanRepository::new();
        repo.expect_find_by_name()
            .returning(|name| Ok(Some(plan(name, 2))));
        repo.expect_update_count()
            .withf(|name, count| name == "STD12" && *count == 3)
            .returning(|name, count| Ok(plan(name, count)));
        repo.expect_replace_details()
            .withf(|_, rows| rows.len() == 3)
            .returning(|_, _| Ok(vec![]));
        repo.expect_find_details().returning(|_| Ok(vec![]));

        let uc = ManageInstallmentPlansUseCase::new(Arc::new(repo), Arc::new(quiet_logs()));
        let input = UpdateInstallmentPlan {
            no_of_installments: Some(3),
            installment_details: Some(
                (1..=3)
                    .map(|n| InstallmentDetailInput {
                        installment_number: n,
                        percentage: Some(33.0),
                        ..Default::default()
                    })
                    .collect(),
            ),
        };
        let updated = uc.update_plan("STD12", &input, "tester").await.expect("update");
        assert_eq!(updated.plan.no_of_installments, 3);
    }
}
