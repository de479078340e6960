//! Integration tests for `DieselCompanyRepository` against embedded PostgreSQL.
//!
//! Provisioning is checked by counting rows in every table it writes, both
//! after a commit and after a step fails part-way through the workflow.

use std::sync::Arc;

use company_api::domain::ports::{
    CompanyCommand, CompanyDetails, CompanyPersistenceError, CompanyRepository, UserRepository,
};
use company_api::domain::{
    Company, CompanyEmployeeId, CompanyId, CompanyService, ErrorCode, Password, Role, User,
    UserId,
};
use company_api::outbound::persistence::{
    DbPool, DieselCompanyRepository, DieselUserRepository, PoolConfig,
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{create_database, handle_cluster_setup_failure, migrate, provisioned_counts};

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    database_url: String,
    companies: DieselCompanyRepository,
    owner: UserId,
}

impl TestContext {
    fn counts(&self) -> [i64; 5] {
        provisioned_counts(&self.database_url)
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = create_database(&cluster, "company_repo")?;

    let (users, companies) = runtime.block_on(async {
        migrate(&database_url).await?;
        let config = PoolConfig::new(&database_url)
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = DbPool::new(config).await.map_err(|err| err.to_string())?;
        Ok::<_, String>((
            DieselUserRepository::new(pool.clone(), Arc::new(DefaultClock)),
            DieselCompanyRepository::new(pool, Arc::new(DefaultClock)),
        ))
    })?;

    let password = Password::hashed("correct-horse").map_err(|err| err.to_string())?;
    let owner = runtime
        .block_on(users.create(&User::new("owner", password)))
        .map_err(|err| err.to_string())?
        .id;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        database_url,
        companies,
        owner,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn provisioning_commits_one_row_per_table(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: provisioning_commits_one_row_per_table skipped");
        return;
    };

    let service = CompanyService::new(Arc::new(context.companies.clone()));
    let created = context
        .runtime
        .block_on(service.create(
            context.owner,
            CompanyDetails {
                name: "Acme".into(),
            },
        ))
        .expect("provisioning succeeds");

    assert!(created.id.is_assigned());
    assert_eq!(created.owner_id, context.owner);
    assert_eq!(context.counts(), [1, 1, 1, 1, 1]);

    let stored = context
        .runtime
        .block_on(context.companies.find_by_id(created.id))
        .expect("lookup succeeds")
        .expect("company stored");
    assert_eq!(stored.name, "Acme");
}

#[rstest]
fn failed_step_rolls_back_every_earlier_insert(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: failed_step_rolls_back_every_earlier_insert skipped");
        return;
    };

    let owner = context.owner;
    let (error, mid_transaction_rows) = context.runtime.block_on(async {
        let mut tx = context.companies.begin().await.expect("begin");
        let company = tx
            .insert_company(&Company::new("Halfway Ltd", owner))
            .await
            .expect("insert company");
        tx.add_employee(company.id, owner)
            .await
            .expect("add employee");
        let role = tx
            .insert_role(&Role::admin(company.id))
            .await
            .expect("insert role");
        let company_role = tx
            .add_company_role(company.id, role.id)
            .await
            .expect("add company role");

        let error = tx
            .add_employee_role(CompanyEmployeeId::new(i64::MAX), company_role.id)
            .await
            .expect_err("unknown employee violates the foreign key");
        tx.rollback().await.expect("rollback");
        (error, company.id)
    });

    assert!(
        matches!(error, CompanyPersistenceError::Query { .. }),
        "expected query error, got {error:?}"
    );
    assert_eq!(context.counts(), [0, 0, 0, 0, 0]);
    let lookup = context
        .runtime
        .block_on(context.companies.find_by_id(mid_transaction_rows))
        .expect("lookup succeeds");
    assert!(lookup.is_none(), "rolled back company must not be visible");
}

#[rstest]
fn taken_company_name_is_rejected_and_leaves_no_rows(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: taken_company_name_is_rejected_and_leaves_no_rows skipped");
        return;
    };

    let service = CompanyService::new(Arc::new(context.companies.clone()));
    let details = || CompanyDetails {
        name: "Acme".into(),
    };
    context
        .runtime
        .block_on(service.create(context.owner, details()))
        .expect("first provisioning succeeds");

    let error = context
        .runtime
        .block_on(service.create(context.owner, details()))
        .expect_err("second provisioning fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "company name is already taken");
    assert_eq!(context.counts(), [1, 1, 1, 1, 1]);
}

#[rstest]
fn rename_to_taken_name_is_duplicate(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: rename_to_taken_name_is_duplicate skipped");
        return;
    };

    let service = CompanyService::new(Arc::new(context.companies.clone()));
    let result = context.runtime.block_on(async {
        service
            .create(context.owner, CompanyDetails { name: "Acme".into() })
            .await
            .expect("first company");
        let second = service
            .create(context.owner, CompanyDetails { name: "Globex".into() })
            .await
            .expect("second company");
        context
            .companies
            .update(&Company {
                name: "Acme".into(),
                ..second
            })
            .await
    });

    assert_eq!(result, Err(CompanyPersistenceError::duplicate("name")));
}

#[rstest]
fn writes_to_a_missing_company_are_not_found(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: writes_to_a_missing_company_are_not_found skipped");
        return;
    };

    let missing = CompanyId::new(424_242);
    let (updated, deleted) = context.runtime.block_on(async {
        let company = Company::new("Ghost Inc", context.owner).with_id(missing);
        (
            context.companies.update(&company).await,
            context.companies.delete(missing).await,
        )
    });

    assert_eq!(updated, Err(CompanyPersistenceError::not_found(424_242_i64)));
    assert_eq!(deleted, Err(CompanyPersistenceError::not_found(424_242_i64)));
}

#[rstest]
fn deleting_a_company_removes_its_roles(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_a_company_removes_its_roles skipped");
        return;
    };

    let service = CompanyService::new(Arc::new(context.companies.clone()));
    context.runtime.block_on(async {
        let created = service
            .create(context.owner, CompanyDetails { name: "Acme".into() })
            .await
            .expect("provisioning succeeds");
        context
            .companies
            .delete(created.id)
            .await
            .expect("delete succeeds");
    });

    assert_eq!(context.counts(), [0, 0, 0, 0, 0]);
}
