use async_trait::async_trait;

use crate::domain::entity::installment_plan::{
    CreateInstallmentPlan, InstallmentDetail, InstallmentPlan, NewInstallmentDetail,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstallmentPlanRepository: Send + Sync {
    async fn find_all(&self, page: i64, page_size: i64)
        -> anyhow::Result<(Vec<InstallmentPlan>, i64)>;
    async fn find_by_name(&self, plan_name: &str) -> anyhow::Result<Option<InstallmentPlan>>;
    async fn create(&self, input: &CreateInstallmentPlan) -> anyhow::Result<InstallmentPlan>;
    async fn update_count(
        &self,
        plan_name: &str,
        no_of_installments: i32,
    ) -> anyhow::Result<InstallmentPlan>;
    /// Removes detail rows first, then the plan row, in one transaction.
    async fn delete_with_details(&self, plan_name: &str) -> anyhow::Result<()>;

    async fn find_details(&self, plan_name: &str) -> anyhow::Result<Vec<InstallmentDetail>>;
    /// Inserts the given rows in one transaction.
    async fn insert_details(
        &self,
        plan_name: &str,
        rows: &[NewInstallmentDetail],
    ) -> anyhow::Result<Vec<InstallmentDetail>>;
    /// Deletes every existing row for the plan and re-inserts the given
    /// array, all in one transaction, so a failure never leaves the plan
    /// with zero detail rows.
    async fn replace_details(
        &self,
        plan_name: &str,
        rows: &[NewInstallmentDetail],
    ) -> anyhow::Result<Vec<InstallmentDetail>>;
}
