use chrono::{Days, NaiveDate};

use crate::domain::entity::installment_plan::{InstallmentDetailInput, NewInstallmentDetail};

/// Resolution rules for an installment schedule.
///
/// Every persisted detail row must carry a concrete due date: a supplied
/// `due_date` wins when it parses as a calendar date, otherwise the date
/// is derived as `today + due_after_days` (0 when absent). Amount and
/// percentage are mutually fillable; whichever is missing persists as 0.
pub struct ScheduleService;

impl ScheduleService {
    /// Resolves the due date for a single installment row.
    pub fn resolve_due_date(
        due_date: Option<&str>,
        due_after_days: Option<i64>,
        today: NaiveDate,
    ) -> NaiveDate {
        if let Some(raw) = due_date {
            if let Ok(parsed) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                return parsed;
            }
        }
        let days = due_after_days.unwrap_or(0).max(0) as u64;
        today
            .checked_add_days(Days::new(days))
            .unwrap_or(today)
    }

    /// Resolves a full input array into rows ready to persist.
    ///
    /// Installment numbers must be unique and within
    /// `1..=no_of_installments`; the offending number is reported back.
    pub fn resolve_details(
        inputs: &[InstallmentDetailInput],
        no_of_installments: i32,
        today: NaiveDate,
    ) -> Result<Vec<NewInstallmentDetail>, String> {
        let mut seen = std::collections::HashSet::new();
        let mut rows = Vec::with_capacity(inputs.len());
        for input in inputs {
            let number = input.installment_number;
            if number < 1 || number > no_of_installments {
                return Err(format!(
                    "installment_number {} is outside 1..={}",
                    number, no_of_installments
                ));
            }
            if !seen.insert(number) {
                return Err(format!("installment_number {} appears more than once", number));
            }
            rows.push(NewInstallmentDetail {
                installment_number: number,
                amount: input.amount.unwrap_or(0.0),
                percentage: input.percentage.unwrap_or(0.0),
                due_date: Self::resolve_due_date(
                    input.due_date.as_deref(),
                    input.due_after_days,
                    today,
                ),
                remarks: input.remarks.clone(),
            });
        }
        Ok(rows)
    }
}
