//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        id -> Int8,
        #[max_length = 255]
        name -> Varchar,
        /// Argon2id hash in PHC string format.
        password_hash -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Companies, each owned by one user.
    companies (id) {
        id -> Int8,
        #[max_length = 255]
        name -> Varchar,
        owner_id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Named roles. Their company scope lives in `company_roles`.
    roles (id) {
        id -> Int8,
        #[max_length = 255]
        name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Users employed by a company; unique per `(company_id, user_id)`.
    company_employees (id) {
        id -> Int8,
        company_id -> Int8,
        user_id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Roles available in a company; unique per `(company_id, role_id)`.
    company_roles (id) {
        id -> Int8,
        company_id -> Int8,
        role_id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Company roles granted to company employees.
    employee_roles (id) {
        id -> Int8,
        company_employee_id -> Int8,
        company_role_id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(companies -> users (owner_id));
diesel::joinable!(company_employees -> companies (company_id));
diesel::joinable!(company_employees -> users (user_id));
diesel::joinable!(company_roles -> companies (company_id));
diesel::joinable!(company_roles -> roles (role_id));
diesel::joinable!(employee_roles -> company_employees (company_employee_id));
diesel::joinable!(employee_roles -> company_roles (company_role_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    companies,
    roles,
    company_employees,
    company_roles,
    employee_roles,
);
