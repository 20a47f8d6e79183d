use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Days, Utc};
use secrecy::SecretString;
use tower::ServiceExt;
use uuid::Uuid;

use estate_auth::{Role, TokenService};
use estate_backoffice_server::adapter::handler::{self, AppState};
use estate_backoffice_server::adapter::middleware::auth::BackofficeAuthState;
use estate_backoffice_server::domain::entity::activity_log::ActivityLog;
use estate_backoffice_server::domain::entity::bank::{Bank, CreateBank, UpdateBank};
use estate_backoffice_server::domain::entity::booking::{Booking, CreateBooking, UpdateBooking};
use estate_backoffice_server::domain::entity::broker::{Broker, CreateBroker, UpdateBroker};
use estate_backoffice_server::domain::entity::co_applicant::{
    CoApplicant, CreateCoApplicant, UpdateCoApplicant,
};
use estate_backoffice_server::domain::entity::customer::{
    CreateCustomer, Customer, CustomerWriteOutcome, DuplicateField, UpdateCustomer,
};
use estate_backoffice_server::domain::entity::installment_plan::{
    CreateInstallmentPlan, InstallmentDetail, InstallmentPlan, NewInstallmentDetail,
};
use estate_backoffice_server::domain::entity::plc::{CreatePlc, Plc, UpdatePlc};
use estate_backoffice_server::domain::entity::project::{CreateProject, Project, UpdateProject};
use estate_backoffice_server::domain::entity::property::{
    CreateProperty, Property, UpdateProperty,
};
use estate_backoffice_server::domain::entity::property_size::{
    CreatePropertySize, PropertySize, UpdatePropertySize,
};
use estate_backoffice_server::domain::entity::stock::{
    CreateStock, Stock, StockStatus, UpdateStock,
};
use estate_backoffice_server::domain::entity::user::{User, UserPatch};
use estate_backoffice_server::domain::repository::activity_log_repository::ActivityLogRepository;
use estate_backoffice_server::domain::repository::bank_repository::BankRepository;
use estate_backoffice_server::domain::repository::booking_repository::BookingRepository;
use estate_backoffice_server::domain::repository::broker_repository::BrokerRepository;
use estate_backoffice_server::domain::repository::co_applicant_repository::CoApplicantRepository;
use estate_backoffice_server::domain::repository::customer_repository::CustomerRepository;
use estate_backoffice_server::domain::repository::installment_plan_repository::InstallmentPlanRepository;
use estate_backoffice_server::domain::repository::plc_repository::PlcRepository;
use estate_backoffice_server::domain::repository::project_repository::ProjectRepository;
use estate_backoffice_server::domain::repository::property_repository::PropertyRepository;
use estate_backoffice_server::domain::repository::property_size_repository::PropertySizeRepository;
use estate_backoffice_server::domain::repository::sign_image_store::SignImageStore;
use estate_backoffice_server::domain::repository::stock_repository::StockRepository;
use estate_backoffice_server::domain::repository::user_repository::UserRepository;
use estate_backoffice_server::usecase;

// ---------------------------------------------------------------------------
// In-memory repositories
// ---------------------------------------------------------------------------

fn page_of<T: Clone>(items: &[T], page: i64, page_size: i64) -> (Vec<T>, i64) {
    let start = ((page - 1) * page_size).max(0) as usize;
    let slice = items
        .iter()
        .skip(start)
        .take(page_size as usize)
        .cloned()
        .collect();
    (slice, items.len() as i64)
}

#[derive(Default)]
struct InMemoryPlans {
    plans: Mutex<Vec<InstallmentPlan>>,
    details: Mutex<Vec<InstallmentDetail>>,
}

#[async_trait]
impl InstallmentPlanRepository for InMemoryPlans {
    async fn find_all(
        &self,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<(Vec<InstallmentPlan>, i64)> {
        let plans = self.plans.lock().expect("lock");
        Ok(page_of(&plans, page, page_size))
    }

    async fn find_by_name(&self, plan_name: &str) -> anyhow::Result<Option<InstallmentPlan>> {
        let plans = self.plans.lock().expect("lock");
        Ok(plans.iter().find(|p| p.plan_name == plan_name).cloned())
    }

    async fn create(&self, input: &CreateInstallmentPlan) -> anyhow::Result<InstallmentPlan> {
        let plan = InstallmentPlan {
            id: Uuid::new_v4(),
            plan_name: input.plan_name.clone(),
            no_of_installments: input.no_of_installments,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.plans.lock().expect("lock").push(plan.clone());
        Ok(plan)
    }

    async fn update_count(
        &self,
        plan_name: &str,
        no_of_installments: i32,
    ) -> anyhow::Result<InstallmentPlan> {
        let mut plans = self.plans.lock().expect("lock");
        let plan = plans
            .iter_mut()
            .find(|p| p.plan_name == plan_name)
            .ok_or_else(|| anyhow::anyhow!("no such plan"))?;
        plan.no_of_installments = no_of_installments;
        plan.updated_at = Utc::now();
        Ok(plan.clone())
    }

    async fn delete_with_details(&self, plan_name: &str) -> anyhow::Result<()> {
        self.details
            .lock()
            .expect("lock")
            .retain(|d| d.plan_name != plan_name);
        self.plans
            .lock()
            .expect("lock")
            .retain(|p| p.plan_name != plan_name);
        Ok(())
    }

    async fn find_details(&self, plan_name: &str) -> anyhow::Result<Vec<InstallmentDetail>> {
        let details = self.details.lock().expect("lock");
        let mut rows: Vec<_> = details
            .iter()
            .filter(|d| d.plan_name == plan_name)
            .cloned()
            .collect();
        rows.sort_by_key(|d| d.installment_number);
        Ok(rows)
    }

    async fn insert_details(
        &self,
        plan_name: &str,
        rows: &[NewInstallmentDetail],
    ) -> anyhow::Result<Vec<InstallmentDetail>> {
        let mut details = self.details.lock().expect("lock");
        let mut created = Vec::new();
        for row in rows {
            let detail = InstallmentDetail {
                id: Uuid::new_v4(),
                plan_name: plan_name.to_string(),
                installment_number: row.installment_number,
                amount: row.amount,
                percentage: row.percentage,
                due_date: row.due_date,
                remarks: row.remarks.clone(),
                created_at: Utc::now(),
            };
            details.push(detail.clone());
            created.push(detail);
        }
        Ok(created)
    }

    async fn replace_details(
        &self,
        plan_name: &str,
        rows: &[NewInstallmentDetail],
    ) -> anyhow::Result<Vec<InstallmentDetail>> {
        self.details
            .lock()
            .expect("lock")
            .retain(|d| d.plan_name != plan_name);
        self.insert_details(plan_name, rows).await
    }
}

#[derive(Default)]
struct InMemoryProjects {
    projects: Mutex<Vec<Project>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl ProjectRepository for InMemoryProjects {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Project>, i64)> {
        let projects = self.projects.lock().expect("lock");
        Ok(page_of(&projects, page, page_size))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Project>> {
        let projects = self.projects.lock().expect("lock");
        Ok(projects.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Project>> {
        let projects = self.projects.lock().expect("lock");
        Ok(projects.iter().find(|p| p.name == name).cloned())
    }

    async fn find_by_name_excluding(
        &self,
        name: &str,
        id: i64,
    ) -> anyhow::Result<Option<Project>> {
        let projects = self.projects.lock().expect("lock");
        Ok(projects
            .iter()
            .find(|p| p.name == name && p.id != id)
            .cloned())
    }

    async fn create(&self, input: &CreateProject) -> anyhow::Result<Project> {
        let mut next = self.next_id.lock().expect("lock");
        *next += 1;
        let project = Project {
            id: *next,
            name: input.name.clone(),
            plan_name: input.plan_name.clone(),
            address: input.address.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            pincode: input.pincode.clone(),
            company_name: input.company_name.clone(),
            sign_image: input.sign_image.clone(),
            size: input.size,
            measuring_unit: input.measuring_unit.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.projects.lock().expect("lock").push(project.clone());
        Ok(project)
    }

    async fn update(&self, id: i64, input: &UpdateProject) -> anyhow::Result<Project> {
        let mut projects = self.projects.lock().expect("lock");
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| anyhow::anyhow!("no such project"))?;
        if let Some(name) = &input.name {
            project.name = name.clone();
        }
        if let Some(plan_name) = &input.plan_name {
            project.plan_name = plan_name.clone();
        }
        if let Some(image) = &input.sign_image {
            project.sign_image = Some(image.clone());
        }
        project.updated_at = Utc::now();
        Ok(project.clone())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        self.projects.lock().expect("lock").retain(|p| p.id != id);
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryProperties {
    properties: Mutex<Vec<Property>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl PropertyRepository for InMemoryProperties {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Property>, i64)> {
        let properties = self.properties.lock().expect("lock");
        Ok(page_of(&properties, page, page_size))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Property>> {
        let properties = self.properties.lock().expect("lock");
        Ok(properties.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, input: &CreateProperty) -> anyhow::Result<Property> {
        let mut next = self.next_id.lock().expect("lock");
        *next += 1;
        let property = Property {
            id: *next,
            property_type: input.property_type.clone(),
            size: input.size,
            customer_id: input.customer_id.clone(),
            allotment_date: input.allotment_date,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.properties.lock().expect("lock").push(property.clone());
        Ok(property)
    }

    async fn update(&self, id: i64, input: &UpdateProperty) -> anyhow::Result<Property> {
        let mut properties = self.properties.lock().expect("lock");
        let property = properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| anyhow::anyhow!("no such property"))?;
        if let Some(t) = &input.property_type {
            property.property_type = t.clone();
        }
        if let Some(size) = input.size {
            property.size = size;
        }
        Ok(property.clone())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        self.properties.lock().expect("lock").retain(|p| p.id != id);
        Ok(())
    }
}

#[derive(Default)]
struct InMemorySizes {
    sizes: Mutex<Vec<PropertySize>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl PropertySizeRepository for InMemorySizes {
    async fn find_all(
        &self,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<(Vec<PropertySize>, i64)> {
        let sizes = self.sizes.lock().expect("lock");
        Ok(page_of(&sizes, page, page_size))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<PropertySize>> {
        let sizes = self.sizes.lock().expect("lock");
        Ok(sizes.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_pair(
        &self,
        size: f64,
        measuring_unit: &str,
    ) -> anyhow::Result<Option<PropertySize>> {
        let sizes = self.sizes.lock().expect("lock");
        Ok(sizes
            .iter()
            .find(|s| s.size == size && s.measuring_unit == measuring_unit)
            .cloned())
    }

    async fn create(&self, input: &CreatePropertySize) -> anyhow::Result<PropertySize> {
        let mut next = self.next_id.lock().expect("lock");
        *next += 1;
        let size = PropertySize {
            id: *next,
            size: input.size,
            measuring_unit: input.measuring_unit.clone(),
            created_at: Utc::now(),
        };
        self.sizes.lock().expect("lock").push(size.clone());
        Ok(size)
    }

    async fn update(&self, id: i64, input: &UpdatePropertySize) -> anyhow::Result<PropertySize> {
        let mut sizes = self.sizes.lock().expect("lock");
        let entry = sizes
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| anyhow::anyhow!("no such size"))?;
        if let Some(size) = input.size {
            entry.size = size;
        }
        if let Some(unit) = &input.measuring_unit {
            entry.measuring_unit = unit.clone();
        }
        Ok(entry.clone())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        self.sizes.lock().expect("lock").retain(|s| s.id != id);
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryStock {
    stock: Mutex<Vec<Stock>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl StockRepository for InMemoryStock {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Stock>, i64)> {
        let stock = self.stock.lock().expect("lock");
        Ok(page_of(&stock, page, page_size))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Stock>> {
        let stock = self.stock.lock().expect("lock");
        Ok(stock.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_pair(
        &self,
        project_id: i64,
        property_id: i64,
    ) -> anyhow::Result<Option<Stock>> {
        let stock = self.stock.lock().expect("lock");
        Ok(stock
            .iter()
            .find(|s| s.project_id == project_id && s.property_id == property_id)
            .cloned())
    }

    async fn create_if_absent(&self, input: &CreateStock) -> anyhow::Result<Option<Stock>> {
        let mut stock = self.stock.lock().expect("lock");
        if stock
            .iter()
            .any(|s| s.project_id == input.project_id && s.property_id == input.property_id)
        {
            return Ok(None);
        }
        let mut next = self.next_id.lock().expect("lock");
        *next += 1;
        let entry = Stock {
            id: *next,
            project_id: input.project_id,
            property_id: input.property_id,
            bsp: input.bsp,
            broker_code: input.broker_code.clone(),
            status: input.status.unwrap_or(StockStatus::Free),
            on_hold_till: input.on_hold_till,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        stock.push(entry.clone());
        Ok(Some(entry))
    }

    async fn update(&self, id: i64, input: &UpdateStock) -> anyhow::Result<Stock> {
        let mut stock = self.stock.lock().expect("lock");
        let entry = stock
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| anyhow::anyhow!("no such stock entry"))?;
        if let Some(bsp) = input.bsp {
            entry.bsp = bsp;
        }
        if let Some(status) = input.status {
            entry.status = status;
            entry.on_hold_till = input.on_hold_till;
        }
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        self.stock.lock().expect("lock").retain(|s| s.id != id);
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryCustomers {
    customers: Mutex<Vec<Customer>>,
}

impl InMemoryCustomers {
    fn duplicates_of(&self, input: &CreateCustomer) -> Vec<DuplicateField> {
        let customers = self.customers.lock().expect("lock");
        let mut dups = Vec::new();
        for c in customers.iter() {
            if c.customer_id == input.customer_id {
                dups.push(DuplicateField {
                    field: "customer_id",
                    value: input.customer_id.clone(),
                });
            }
            if c.email == input.email {
                dups.push(DuplicateField {
                    field: "email",
                    value: input.email.clone(),
                });
            }
            if c.mobile == input.mobile {
                dups.push(DuplicateField {
                    field: "mobile",
                    value: input.mobile.clone(),
                });
            }
            if c.pan == input.pan {
                dups.push(DuplicateField {
                    field: "pan",
                    value: input.pan.clone(),
                });
            }
            if c.aadhar == input.aadhar {
                dups.push(DuplicateField {
                    field: "aadhar",
                    value: input.aadhar.clone(),
                });
            }
        }
        dups
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomers {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Customer>, i64)> {
        let customers = self.customers.lock().expect("lock");
        Ok(page_of(&customers, page, page_size))
    }

    async fn find_by_customer_id(&self, customer_id: &str) -> anyhow::Result<Option<Customer>> {
        let customers = self.customers.lock().expect("lock");
        Ok(customers
            .iter()
            .find(|c| c.customer_id == customer_id)
            .cloned())
    }

    async fn create_checked(
        &self,
        input: &CreateCustomer,
    ) -> anyhow::Result<CustomerWriteOutcome> {
        let dups = self.duplicates_of(input);
        if !dups.is_empty() {
            return Ok(CustomerWriteOutcome::Duplicate(dups));
        }
        let customer = Customer {
            id: Uuid::new_v4(),
            customer_id: input.customer_id.clone(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            email: input.email.clone(),
            mobile: input.mobile.clone(),
            pan: input.pan.clone(),
            aadhar: input.aadhar.clone(),
            address: input.address.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            pincode: input.pincode.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.customers.lock().expect("lock").push(customer.clone());
        Ok(CustomerWriteOutcome::Written(customer))
    }

    async fn update_checked(
        &self,
        customer_id: &str,
        input: &UpdateCustomer,
    ) -> anyhow::Result<Option<CustomerWriteOutcome>> {
        let mut customers = self.customers.lock().expect("lock");
        if !customers.iter().any(|c| c.customer_id == customer_id) {
            return Ok(None);
        }
        if let Some(email) = &input.email {
            if customers
                .iter()
                .any(|c| c.customer_id != customer_id && &c.email == email)
            {
                return Ok(Some(CustomerWriteOutcome::Duplicate(vec![DuplicateField {
                    field: "email",
                    value: email.clone(),
                }])));
            }
        }
        let customer = customers
            .iter_mut()
            .find(|c| c.customer_id == customer_id)
            .expect("checked above");
        if let Some(first_name) = &input.first_name {
            customer.first_name = first_name.clone();
        }
        if let Some(email) = &input.email {
            customer.email = email.clone();
        }
        customer.updated_at = Utc::now();
        Ok(Some(CustomerWriteOutcome::Written(customer.clone())))
    }

    async fn delete(&self, customer_id: &str) -> anyhow::Result<()> {
        self.customers
            .lock()
            .expect("lock")
            .retain(|c| c.customer_id != customer_id);
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryCoApplicants {
    rows: Mutex<Vec<CoApplicant>>,
}

#[async_trait]
impl CoApplicantRepository for InMemoryCoApplicants {
    async fn find_all(
        &self,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<(Vec<CoApplicant>, i64)> {
        let rows = self.rows.lock().expect("lock");
        Ok(page_of(&rows, page, page_size))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<CoApplicant>> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_customer(&self, customer_id: &str) -> anyhow::Result<Vec<CoApplicant>> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows
            .iter()
            .filter(|r| r.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn create(&self, input: &CreateCoApplicant) -> anyhow::Result<CoApplicant> {
        let row = CoApplicant {
            id: Uuid::new_v4(),
            customer_id: input.customer_id.clone(),
            name: input.name.clone(),
            relation: input.relation.clone(),
            email: input.email.clone(),
            mobile: input.mobile.clone(),
            pan: input.pan.clone(),
            aadhar: input.aadhar.clone(),
            created_at: Utc::now(),
        };
        self.rows.lock().expect("lock").push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, input: &UpdateCoApplicant) -> anyhow::Result<CoApplicant> {
        let mut rows = self.rows.lock().expect("lock");
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| anyhow::anyhow!("no such co-applicant"))?;
        if let Some(name) = &input.name {
            row.name = name.clone();
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.rows.lock().expect("lock").retain(|r| r.id != id);
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryBrokers {
    rows: Mutex<Vec<Broker>>,
}

#[async_trait]
impl BrokerRepository for InMemoryBrokers {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Broker>, i64)> {
        let rows = self.rows.lock().expect("lock");
        Ok(page_of(&rows, page, page_size))
    }

    async fn find_by_code(&self, broker_code: &str) -> anyhow::Result<Option<Broker>> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows.iter().find(|r| r.broker_code == broker_code).cloned())
    }

    async fn create(&self, input: &CreateBroker) -> anyhow::Result<Broker> {
        let row = Broker {
            id: Uuid::new_v4(),
            broker_code: input.broker_code.clone(),
            name: input.name.clone(),
            mobile: input.mobile.clone(),
            email: input.email.clone(),
            pan: input.pan.clone(),
            address: input.address.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().expect("lock").push(row.clone());
        Ok(row)
    }

    async fn update(&self, broker_code: &str, input: &UpdateBroker) -> anyhow::Result<Broker> {
        let mut rows = self.rows.lock().expect("lock");
        let row = rows
            .iter_mut()
            .find(|r| r.broker_code == broker_code)
            .ok_or_else(|| anyhow::anyhow!("no such broker"))?;
        if let Some(name) = &input.name {
            row.name = name.clone();
        }
        Ok(row.clone())
    }

    async fn delete(&self, broker_code: &str) -> anyhow::Result<()> {
        self.rows
            .lock()
            .expect("lock")
            .retain(|r| r.broker_code != broker_code);
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryBanks {
    rows: Mutex<Vec<Bank>>,
}

#[async_trait]
impl BankRepository for InMemoryBanks {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Bank>, i64)> {
        let rows = self.rows.lock().expect("lock");
        Ok(page_of(&rows, page, page_size))
    }

    async fn find_by_ifsc(&self, ifsc_code: &str) -> anyhow::Result<Option<Bank>> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows.iter().find(|r| r.ifsc_code == ifsc_code).cloned())
    }

    async fn create(&self, input: &CreateBank) -> anyhow::Result<Bank> {
        let row = Bank {
            id: Uuid::new_v4(),
            ifsc_code: input.ifsc_code.clone(),
            bank_name: input.bank_name.clone(),
            branch_name: input.branch_name.clone(),
            address: input.address.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            created_at: Utc::now(),
        };
        self.rows.lock().expect("lock").push(row.clone());
        Ok(row)
    }

    async fn update(&self, ifsc_code: &str, input: &UpdateBank) -> anyhow::Result<Bank> {
        let mut rows = self.rows.lock().expect("lock");
        let row = rows
            .iter_mut()
            .find(|r| r.ifsc_code == ifsc_code)
            .ok_or_else(|| anyhow::anyhow!("no such bank"))?;
        if let Some(bank_name) = &input.bank_name {
            row.bank_name = bank_name.clone();
        }
        Ok(row.clone())
    }

    async fn delete(&self, ifsc_code: &str) -> anyhow::Result<()> {
        self.rows
            .lock()
            .expect("lock")
            .retain(|r| r.ifsc_code != ifsc_code);
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryPlcs {
    rows: Mutex<Vec<Plc>>,
}

#[async_trait]
impl PlcRepository for InMemoryPlcs {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Plc>, i64)> {
        let rows = self.rows.lock().expect("lock");
        Ok(page_of(&rows, page, page_size))
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Plc>> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows.iter().find(|r| r.name == name).cloned())
    }

    async fn create(&self, input: &CreatePlc) -> anyhow::Result<Plc> {
        let row = Plc {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            value: input.value,
            is_percentage: input.is_percentage,
            remarks: input.remarks.clone(),
            created_at: Utc::now(),
        };
        self.rows.lock().expect("lock").push(row.clone());
        Ok(row)
    }

    async fn update(&self, name: &str, input: &UpdatePlc) -> anyhow::Result<Plc> {
        let mut rows = self.rows.lock().expect("lock");
        let row = rows
            .iter_mut()
            .find(|r| r.name == name)
            .ok_or_else(|| anyhow::anyhow!("no such PLC"))?;
        if let Some(value) = input.value {
            row.value = value;
        }
        Ok(row.clone())
    }

    async fn delete(&self, name: &str) -> anyhow::Result<()> {
        self.rows.lock().expect("lock").retain(|r| r.name != name);
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryBookings {
    rows: Mutex<Vec<Booking>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<Booking>, i64)> {
        let rows = self.rows.lock().expect("lock");
        Ok(page_of(&rows, page, page_size))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Booking>> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, input: &CreateBooking) -> anyhow::Result<Booking> {
        let mut next = self.next_id.lock().expect("lock");
        *next += 1;
        let row = Booking {
            id: *next,
            customer_id: input.customer_id.clone(),
            project_id: input.project_id,
            property_id: input.property_id,
            booking_date: input.booking_date,
            bsp: input.bsp,
            plc_name: input.plc_name.clone(),
            broker_code: input.broker_code.clone(),
            remarks: input.remarks.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().expect("lock").push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, input: &UpdateBooking) -> anyhow::Result<Booking> {
        let mut rows = self.rows.lock().expect("lock");
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| anyhow::anyhow!("no such booking"))?;
        if let Some(bsp) = input.bsp {
            row.bsp = bsp;
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        self.rows.lock().expect("lock").retain(|r| r.id != id);
        Ok(())
    }
}

struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    fn seeded() -> Self {
        let mk = |user_id: &str, password: &str, role: Role| User {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name: user_id.to_string(),
            password_hash: estate_encryption::hash_password(password).expect("hash"),
            role,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        Self {
            rows: Mutex::new(vec![
                mk("SUPER", "super-password", Role::SuperAdmin),
                mk("ADMIN1", "admin-password", Role::Admin),
                mk("EMP1", "employee-password", Role::Employee),
            ]),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_all(&self, page: i64, page_size: i64) -> anyhow::Result<(Vec<User>, i64)> {
        let rows = self.rows.lock().expect("lock");
        Ok(page_of(&rows, page, page_size))
    }

    async fn find_by_user_id(&self, user_id: &str) -> anyhow::Result<Option<User>> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows.iter().find(|r| r.user_id == user_id).cloned())
    }

    async fn create(
        &self,
        user_id: &str,
        name: &str,
        password_hash: &str,
        role: Role,
    ) -> anyhow::Result<User> {
        let row = User {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            role,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().expect("lock").push(row.clone());
        Ok(row)
    }

    async fn update(&self, user_id: &str, patch: &UserPatch) -> anyhow::Result<User> {
        let mut rows = self.rows.lock().expect("lock");
        let row = rows
            .iter_mut()
            .find(|r| r.user_id == user_id)
            .ok_or_else(|| anyhow::anyhow!("no such user"))?;
        if let Some(name) = &patch.name {
            row.name = name.clone();
        }
        if let Some(hash) = &patch.password_hash {
            row.password_hash = hash.clone();
        }
        if let Some(active) = patch.is_active {
            row.is_active = active;
        }
        Ok(row.clone())
    }

    async fn delete(&self, user_id: &str) -> anyhow::Result<()> {
        self.rows
            .lock()
            .expect("lock")
            .retain(|r| r.user_id != user_id);
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryLogs {
    rows: Mutex<Vec<ActivityLog>>,
}

#[async_trait]
impl ActivityLogRepository for InMemoryLogs {
    async fn create(&self, log: &ActivityLog) -> anyhow::Result<()> {
        self.rows.lock().expect("lock").push(log.clone());
        Ok(())
    }

    async fn find_all(
        &self,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<(Vec<ActivityLog>, i64)> {
        let rows = self.rows.lock().expect("lock");
        Ok(page_of(&rows, page, page_size))
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<(Vec<ActivityLog>, i64)> {
        let rows = self.rows.lock().expect("lock");
        let filtered: Vec<_> = rows
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        Ok(page_of(&filtered, page, page_size))
    }
}

#[derive(Default)]
struct NoopImageStore;

#[async_trait]
impl SignImageStore for NoopImageStore {
    async fn save(&self, original_name: &str, _bytes: &[u8]) -> anyhow::Result<String> {
        Ok(format!("stored-{}", original_name))
    }

    async fn remove(&self, _stored_name: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct Harness {
    state: AppState,
    tokens: Arc<TokenService>,
    projects: Arc<InMemoryProjects>,
    properties: Arc<InMemoryProperties>,
    stock: Arc<InMemoryStock>,
    customers: Arc<InMemoryCustomers>,
}

fn harness() -> Harness {
    let tokens = Arc::new(TokenService::new(
        SecretString::new("integration-test-secret".to_string()),
        3600,
    ));
    let plans = Arc::new(InMemoryPlans::default());
    let projects = Arc::new(InMemoryProjects::default());
    let properties = Arc::new(InMemoryProperties::default());
    let sizes = Arc::new(InMemorySizes::default());
    let stock = Arc::new(InMemoryStock::default());
    let customers = Arc::new(InMemoryCustomers::default());
    let co_applicants = Arc::new(InMemoryCoApplicants::default());
    let brokers = Arc::new(InMemoryBrokers::default());
    let banks = Arc::new(InMemoryBanks::default());
    let plcs = Arc::new(InMemoryPlcs::default());
    let bookings = Arc::new(InMemoryBookings::default());
    let users = Arc::new(InMemoryUsers::seeded());
    let logs = Arc::new(InMemoryLogs::default());
    let image_store = Arc::new(NoopImageStore);

    let state = AppState {
        auth_uc: Arc::new(usecase::authenticate_user::AuthenticateUserUseCase::new(
            users.clone(),
            tokens.clone(),
        )),
        users_uc: Arc::new(usecase::manage_users::ManageUsersUseCase::new(
            users.clone(),
            logs.clone(),
        )),
        plans_uc: Arc::new(
            usecase::manage_installment_plans::ManageInstallmentPlansUseCase::new(
                plans.clone(),
                logs.clone(),
            ),
        ),
        projects_uc: Arc::new(usecase::manage_projects::ManageProjectsUseCase::new(
            projects.clone(),
            plans.clone(),
            image_store,
            logs.clone(),
            usecase::manage_projects::SignImagePolicy::default(),
        )),
        properties_uc: Arc::new(usecase::manage_properties::ManagePropertiesUseCase::new(
            properties.clone(),
            sizes,
            customers.clone(),
            logs.clone(),
        )),
        stock_uc: Arc::new(usecase::manage_stock::ManageStockUseCase::new(
            stock.clone(),
            projects.clone(),
            properties.clone(),
            logs.clone(),
        )),
        customers_uc: Arc::new(usecase::register_customers::RegisterCustomersUseCase::new(
            customers.clone(),
            logs.clone(),
        )),
        co_applicants_uc: Arc::new(
            usecase::manage_co_applicants::ManageCoApplicantsUseCase::new(
                co_applicants,
                customers.clone(),
                logs.clone(),
            ),
        ),
        brokers_uc: Arc::new(usecase::manage_brokers::ManageBrokersUseCase::new(
            brokers,
            logs.clone(),
        )),
        banks_uc: Arc::new(usecase::manage_banks::ManageBanksUseCase::new(
            banks,
            logs.clone(),
        )),
        plcs_uc: Arc::new(usecase::manage_plcs::ManagePlcsUseCase::new(
            plcs,
            logs.clone(),
        )),
        bookings_uc: Arc::new(usecase::manage_bookings::ManageBookingsUseCase::new(
            bookings,
            customers.clone(),
            stock.clone(),
            logs.clone(),
        )),
        logs_uc: Arc::new(usecase::get_activity_logs::GetActivityLogsUseCase::new(
            logs,
        )),
        db_pool: None,
        auth_state: Some(BackofficeAuthState {
            tokens: tokens.clone(),
        }),
    };

    Harness {
        state,
        tokens,
        projects,
        properties,
        stock,
        customers,
    }
}

impl Harness {
    fn token_for(&self, user_id: &str, role: Role) -> String {
        self.tokens
            .issue(&Uuid::new_v4().to_string(), user_id, user_id, role)
            .expect("issue token")
    }

    async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let app = handler::router(self.state.clone());
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };
        let resp = app.oneshot(req).await.expect("response");
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    async fn seed_project_and_property(&self) -> (i64, i64) {
        let project = self
            .projects
            .create(&CreateProject {
                name: "Green Meadows".to_string(),
                plan_name: "STD12".to_string(),
                ..Default::default()
            })
            .await
            .expect("seed project");
        let property = self
            .properties
            .create(&CreateProperty {
                property_type: "Flat".to_string(),
                size: 1200.0,
                customer_id: None,
                allotment_date: None,
            })
            .await
            .expect("seed property");
        (project.id, property.id)
    }
}

fn customer_body(customer_id: &str, email: &str, mobile: &str, pan: &str, aadhar: &str) -> serde_json::Value {
    serde_json::json!({
        "customer_id": customer_id,
        "first_name": "Asha",
        "last_name": "Verma",
        "email": email,
        "mobile": mobile,
        "pan": pan,
        "aadhar": aadhar,
        "pincode": "110001"
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_healthz_is_public() {
    let h = harness();
    let (status, body) = h.request("GET", "/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_login_returns_token_and_user() {
    let h = harness();
    let (status, body) = h
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(serde_json::json!({"user_id": "EMP1", "password": "employee-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["user_id"], "EMP1");
    assert_eq!(body["user"]["role"], "EMPLOYEE");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let h = harness();
    let (status, body) = h
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(serde_json::json!({"user_id": "EMP1", "password": "nope"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_api_requires_bearer_token() {
    let h = harness();
    let (status, _) = h
        .request("GET", "/api/master/get-customers", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_installment_plan_scenario() {
    let h = harness();
    let token = h.token_for("EMP1", Role::Employee);

    // create plan STD12 with 2 installments
    let (status, body) = h
        .request(
            "POST",
            "/api/master/add-new-installment-plan",
            Some(&token),
            Some(serde_json::json!({"plan_name": "STD12", "no_of_installments": 2})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["plan_name"], "STD12");

    // attach two 50% installments: one due today, one 30 days out
    let (status, body) = h
        .request(
            "POST",
            "/api/master/add-installment-details",
            Some(&token),
            Some(serde_json::json!({
                "plan_name": "STD12",
                "installment_number": [1, 2],
                "percentage": [50.0, 50.0],
                "amount": [0.0, 0.0],
                "due_after_days": [0, 30],
                "due_date": ["", ""]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let details = body["data"].as_array().expect("details array");
    assert_eq!(details.len(), 2);

    let today = Utc::now().date_naive();
    let expected_second = today.checked_add_days(Days::new(30)).expect("date");
    assert_eq!(details[0]["due_date"], today.to_string());
    assert_eq!(details[1]["due_date"], expected_second.to_string());
    assert_eq!(details[0]["percentage"], 50.0);
    assert_eq!(details[0]["amount"], 0.0);

    // a second plan with the same name conflicts
    let (status, body) = h
        .request(
            "POST",
            "/api/master/add-new-installment-plan",
            Some(&token),
            Some(serde_json::json!({"plan_name": "STD12", "no_of_installments": 3})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .expect("message")
        .contains("already exists"));

    // plan fetch returns the schedule
    let (status, body) = h
        .request(
            "GET",
            "/api/master/installment-plan/STD12",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["installment_details"].as_array().expect("rows").len(), 2);
}

#[tokio::test]
async fn test_detail_attachment_rejects_unknown_plan_and_bad_numbers() {
    let h = harness();
    let token = h.token_for("EMP1", Role::Employee);

    let (status, _) = h
        .request(
            "POST",
            "/api/master/add-installment-details",
            Some(&token),
            Some(serde_json::json!({
                "plan_name": "MISSING",
                "installment_number": [1],
                "percentage": [100.0]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _) = h
        .request(
            "POST",
            "/api/master/add-new-installment-plan",
            Some(&token),
            Some(serde_json::json!({"plan_name": "SHORT", "no_of_installments": 2})),
        )
        .await;
    let (status, _) = h
        .request(
            "POST",
            "/api/master/add-installment-details",
            Some(&token),
            Some(serde_json::json!({
                "plan_name": "SHORT",
                "installment_number": [1, 3],
                "percentage": [50.0, 50.0]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_missing_plan_is_not_found() {
    let h = harness();
    let token = h.token_for("ADMIN1", Role::Admin);
    let (status, body) = h
        .request(
            "DELETE",
            "/api/master/installment-plan/GHOST",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_stock_duplicate_pair_scenario() {
    let h = harness();
    let token = h.token_for("EMP1", Role::Employee);
    let (project_id, property_id) = h.seed_project_and_property().await;

    let body = serde_json::json!({
        "project_id": project_id,
        "property_id": property_id,
        "bsp": 4500000.0
    });
    let (status, _) = h
        .request("POST", "/api/master/stock", Some(&token), Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, resp) = h
        .request("POST", "/api/master/stock", Some(&token), Some(body))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(resp["message"]
        .as_str()
        .expect("message")
        .contains("already exists in stock"));

    // only one row was persisted
    let (_, resp) = h
        .request("GET", "/api/master/get-stocks", Some(&token), None)
        .await;
    assert_eq!(resp["data"]["total"], 1);
}

#[tokio::test]
async fn test_stock_hold_requires_till_date() {
    let h = harness();
    let token = h.token_for("EMP1", Role::Employee);
    let (project_id, property_id) = h.seed_project_and_property().await;

    let (status, _) = h
        .request(
            "POST",
            "/api/master/stock",
            Some(&token),
            Some(serde_json::json!({
                "project_id": project_id,
                "property_id": property_id,
                "bsp": 4500000.0,
                "status": "Hold"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = h
        .request(
            "POST",
            "/api/master/stock",
            Some(&token),
            Some(serde_json::json!({
                "project_id": project_id,
                "property_id": property_id,
                "bsp": 4500000.0,
                "status": "Hold",
                "on_hold_till": "2026-12-31"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_customer_duplicate_email_scenario() {
    let h = harness();
    let token = h.token_for("EMP1", Role::Employee);

    let (status, _) = h
        .request(
            "POST",
            "/api/master/add-customer",
            Some(&token),
            Some(customer_body(
                "CUST001",
                "asha@example.com",
                "9876543210",
                "ABCDE1234F",
                "123456789012",
            )),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // same email on a different customer id: 409 naming the field
    let (status, body) = h
        .request(
            "POST",
            "/api/master/add-customer",
            Some(&token),
            Some(customer_body(
                "CUST002",
                "asha@example.com",
                "9876543211",
                "ABCDE1234G",
                "123456789013",
            )),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "email");
    assert_eq!(errors[0]["reason"], "DUPLICATE_EMAIL");

    // the conflicting row was not created
    let (_, body) = h
        .request("GET", "/api/master/get-customers", Some(&token), None)
        .await;
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn test_customer_format_validation() {
    let h = harness();
    let token = h.token_for("EMP1", Role::Employee);

    let (status, body) = h
        .request(
            "POST",
            "/api/master/add-customer",
            Some(&token),
            Some(customer_body(
                "CUST003",
                "not-an-email",
                "12345",
                "short",
                "123",
            )),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"mobile"));
    assert!(fields.contains(&"pan"));
    assert!(fields.contains(&"aadhar"));
}

#[tokio::test]
async fn test_project_with_unknown_plan_is_rejected() {
    let h = harness();
    let token = h.token_for("EMP1", Role::Employee);

    let boundary = "X-ESTATE-TEST-BOUNDARY";
    let form = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nGreen Meadows\r\n--{b}\r\nContent-Disposition: form-data; name=\"plan_name\"\r\n\r\nP1\r\n--{b}--\r\n",
        b = boundary
    );
    let app = handler::router(h.state.clone());
    let req = Request::builder()
        .method("POST")
        .uri("/api/master/add-project")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(form))
        .expect("request");
    let resp = app.oneshot(req).await.expect("response");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body["message"], "Invalid installment plan selected");

    // no project row was created
    let (_, list) = h
        .request("GET", "/api/master/get-projects", Some(&token), None)
        .await;
    assert_eq!(list["data"]["total"], 0);
}

#[tokio::test]
async fn test_employee_cannot_delete() {
    let h = harness();
    let employee = h.token_for("EMP1", Role::Employee);
    let (status, _) = h
        .request(
            "DELETE",
            "/api/master/installment-plan/ANY",
            Some(&employee),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_creation_ladder_over_http() {
    let h = harness();
    let admin = h.token_for("ADMIN1", Role::Admin);

    // ADMIN creates an EMPLOYEE
    let (status, body) = h
        .request(
            "POST",
            "/api/users",
            Some(&admin),
            Some(serde_json::json!({
                "user_id": "EMP9",
                "name": "New Employee",
                "password": "emp9-password",
                "role": "EMPLOYEE"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "EMPLOYEE");

    // ADMIN may not create another ADMIN
    let (status, _) = h
        .request(
            "POST",
            "/api/users",
            Some(&admin),
            Some(serde_json::json!({
                "user_id": "ADM9",
                "name": "New Admin",
                "password": "adm9-password",
                "role": "ADMIN"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // the new employee can log in
    let (status, _) = h
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(serde_json::json!({"user_id": "EMP9", "password": "emp9-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_logs_are_role_gated() {
    let h = harness();
    let employee = h.token_for("EMP1", Role::Employee);
    let admin = h.token_for("ADMIN1", Role::Admin);

    let (status, _) = h.request("GET", "/api/logs/all", Some(&employee), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = h.request("GET", "/api/logs/all", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    // a user can always read their own trail
    let (status, _) = h
        .request("GET", "/api/logs/user/EMP1", Some(&employee), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = h
        .request("GET", "/api/logs/user/ADMIN1", Some(&employee), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_mutations_append_activity_logs() {
    let h = harness();
    let employee = h.token_for("EMP1", Role::Employee);
    let admin = h.token_for("ADMIN1", Role::Admin);

    let (_, _) = h
        .request(
            "POST",
            "/api/master/add-new-installment-plan",
            Some(&employee),
            Some(serde_json::json!({"plan_name": "LOGGED", "no_of_installments": 1})),
        )
        .await;

    let (status, body) = h.request("GET", "/api/logs/user/EMP1", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let records = body["data"]["records"].as_array().expect("records");
    assert!(records
        .iter()
        .any(|r| r["action"] == "CREATE" && r["target_table"] == "installment_plans"));
}

#[tokio::test]
async fn test_get_listing_is_idempotent() {
    let h = harness();
    let token = h.token_for("EMP1", Role::Employee);
    h.customers
        .create_checked(&CreateCustomer {
            customer_id: "CUST010".to_string(),
            first_name: "Ravi".to_string(),
            last_name: None,
            email: "ravi@example.com".to_string(),
            mobile: "9876500000".to_string(),
            pan: "ZZZZZ9999Z".to_string(),
            aadhar: "999988887777".to_string(),
            address: None,
            city: None,
            state: None,
            pincode: None,
        })
        .await
        .expect("seed customer");

    let (_, first) = h
        .request("GET", "/api/master/get-customers", Some(&token), None)
        .await;
    let (_, second) = h
        .request("GET", "/api/master/get-customers", Some(&token), None)
        .await;
    assert_eq!(first["data"]["records"], second["data"]["records"]);
    assert_eq!(first["data"]["total"], 1);
}

#[tokio::test]
async fn test_booking_requires_stocked_pair() {
    let h = harness();
    let token = h.token_for("EMP1", Role::Employee);
    let (project_id, property_id) = h.seed_project_and_property().await;
    h.customers
        .create_checked(&CreateCustomer {
            customer_id: "CUST020".to_string(),
            first_name: "Meera".to_string(),
            last_name: None,
            email: "meera@example.com".to_string(),
            mobile: "9876511111".to_string(),
            pan: "YYYYY8888Y".to_string(),
            aadhar: "111122223333".to_string(),
            address: None,
            city: None,
            state: None,
            pincode: None,
        })
        .await
        .expect("seed customer");

    let booking = serde_json::json!({
        "customer_id": "CUST020",
        "project_id": project_id,
        "property_id": property_id,
        "booking_date": "2026-01-15",
        "bsp": 4500000.0
    });

    // not yet in stock
    let (status, _) = h
        .request("POST", "/api/transaction/booking", Some(&token), Some(booking.clone()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    h.stock
        .create_if_absent(&CreateStock {
            project_id,
            property_id,
            bsp: 4500000.0,
            broker_code: None,
            status: None,
            on_hold_till: None,
        })
        .await
        .expect("seed stock");

    let (status, _) = h
        .request("POST", "/api/transaction/booking", Some(&token), Some(booking))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_bank_ifsc_validation_and_uniqueness() {
    let h = harness();
    let token = h.token_for("EMP1", Role::Employee);

    let (status, _) = h
        .request(
            "POST",
            "/api/master/add-bank",
            Some(&token),
            Some(serde_json::json!({"ifsc_code": "HDFC1001234", "bank_name": "HDFC"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let good = serde_json::json!({"ifsc_code": "HDFC0001234", "bank_name": "HDFC"});
    let (status, _) = h
        .request("POST", "/api/master/add-bank", Some(&token), Some(good.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = h
        .request("POST", "/api/master/add-bank", Some(&token), Some(good))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
