//! PostgreSQL implementation of ComplaintRepository.
//!
//! The claim is one conditional `UPDATE ... WHERE status = 'filed' AND
//! assignee_id IS NULL RETURNING ...`; Postgres row locking makes exactly
//! one concurrent claimant match. Status updates are guarded the same way,
//! on the status, assignee and resolution they were decided against.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::complaint::{Complaint, ComplaintStatus, ComplaintUpdate, ServiceLocation};
use crate::domain::foundation::{ComplaintId, DomainError, Timestamp, UserId};
use crate::ports::{
    ClaimOutcome, ComplaintPage, ComplaintRepository, ExpectedState, ListOptions, UpdateOutcome,
};

use super::{column, db_error};

const COLUMNS: &str = r#"
    id, owner_id, title, category, description,
    address, city, district, contact_phone, address_notes,
    status, assignee_id, resolution_notes, created_at, updated_at
"#;

/// PostgreSQL implementation of ComplaintRepository.
#[derive(Clone)]
pub struct PostgresComplaintRepository {
    pool: PgPool,
}

impl PostgresComplaintRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn page(
        &self,
        scope: Scope<'_>,
        options: &ListOptions,
    ) -> Result<ComplaintPage, DomainError> {
        let category = options.category.as_deref();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM complaints WHERE ");
        push_filter(&mut count, scope, options.status, category);
        let (total,): (i64,) = count
            .build_query_as()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count complaints", e))?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM complaints WHERE ", COLUMNS));
        push_filter(&mut select, scope, options.status, category);
        select
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(i64::from(options.limit()))
            .push(" OFFSET ")
            .push_bind(options.offset() as i64);

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list complaints", e))?;

        let items = rows
            .into_iter()
            .map(row_to_complaint)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ComplaintPage {
            items,
            total: total as u64,
            page: options.page.max(1),
            page_size: options.limit(),
        })
    }

    async fn count(
        &self,
        scope: Scope<'_>,
        status: Option<ComplaintStatus>,
    ) -> Result<u64, DomainError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM complaints WHERE ");
        push_filter(&mut query, scope, status, None);
        let (count,): (i64,) = query
            .build_query_as()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count complaints", e))?;
        Ok(count as u64)
    }
}

/// Which complaints a query is keyed on.
#[derive(Clone, Copy)]
enum Scope<'a> {
    Owner(&'a UserId),
    Assignee(&'a UserId),
    Unassigned,
}

fn push_filter(
    query: &mut QueryBuilder<'_, Postgres>,
    scope: Scope<'_>,
    status: Option<ComplaintStatus>,
    category: Option<&str>,
) {
    match scope {
        Scope::Owner(owner) => {
            query.push("owner_id = ").push_bind(owner.as_str().to_string());
        }
        Scope::Assignee(technician) => {
            query.push("assignee_id = ").push_bind(technician.as_str().to_string());
        }
        Scope::Unassigned => {
            query.push("status = 'filed' AND assignee_id IS NULL");
        }
    }
    if let Some(status) = status {
        query.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(category) = category {
        query.push(" AND category = ").push_bind(category.to_string());
    }
}

#[async_trait]
impl ComplaintRepository for PostgresComplaintRepository {
    async fn create(&self, complaint: &Complaint) -> Result<(), DomainError> {
        let location = complaint.location();
        sqlx::query(
            r#"
            INSERT INTO complaints (
                id, owner_id, title, category, description,
                address, city, district, contact_phone, address_notes,
                status, assignee_id, resolution_notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(complaint.id().as_uuid())
        .bind(complaint.owner_id().as_str())
        .bind(complaint.title())
        .bind(complaint.category())
        .bind(complaint.description())
        .bind(&location.address)
        .bind(&location.city)
        .bind(&location.district)
        .bind(&location.contact_phone)
        .bind(&location.notes)
        .bind(complaint.status().as_str())
        .bind(complaint.assignee_id().map(|id| id.as_str()))
        .bind(complaint.resolution_notes())
        .bind(complaint.created_at().as_datetime())
        .bind(complaint.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert complaint", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ComplaintId) -> Result<Option<Complaint>, DomainError> {
        let sql = format!("SELECT {} FROM complaints WHERE id = $1", COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch complaint", e))?;

        row.map(row_to_complaint).transpose()
    }

    async fn update_if(
        &self,
        id: &ComplaintId,
        expected: &ExpectedState,
        update: ComplaintUpdate,
    ) -> Result<UpdateOutcome, DomainError> {
        let row = sqlx::query(&update_if_sql())
            .bind(id.as_uuid())
            .bind(update.status.map(|s| s.as_str()))
            .bind(update.assignee_id.as_ref().map(|a| a.as_str()))
            .bind(update.resolution_notes.as_deref())
            .bind(update.updated_at.as_datetime())
            .bind(expected.status.as_str())
            .bind(expected.assignee_id.as_ref().map(|a| a.as_str()))
            .bind(expected.resolution_notes.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("update complaint", e))?;

        if let Some(row) = row {
            return Ok(UpdateOutcome::Applied(row_to_complaint(row)?));
        }

        Ok(match self.find_by_id(id).await? {
            Some(current) => UpdateOutcome::Stale(current),
            None => UpdateOutcome::Missing,
        })
    }

    async fn claim(
        &self,
        id: &ComplaintId,
        technician: &UserId,
        at: Timestamp,
    ) -> Result<ClaimOutcome, DomainError> {
        let sql = format!(
            r#"
            UPDATE complaints SET
                status = 'assigned',
                assignee_id = $2,
                updated_at = $3
            WHERE id = $1 AND status = 'filed' AND assignee_id IS NULL
            RETURNING {}
            "#,
            COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(technician.as_str())
            .bind(at.as_datetime())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("claim complaint", e))?;

        if let Some(row) = row {
            return Ok(ClaimOutcome::Claimed(row_to_complaint(row)?));
        }

        Ok(match self.find_by_id(id).await? {
            Some(current) => ClaimOutcome::Lost(current),
            None => ClaimOutcome::Missing,
        })
    }

    async fn find_by_owner(
        &self,
        owner: &UserId,
        options: &ListOptions,
    ) -> Result<ComplaintPage, DomainError> {
        self.page(Scope::Owner(owner), options).await
    }

    async fn find_by_assignee(
        &self,
        technician: &UserId,
        options: &ListOptions,
    ) -> Result<ComplaintPage, DomainError> {
        self.page(Scope::Assignee(technician), options).await
    }

    async fn find_unassigned(&self, options: &ListOptions) -> Result<ComplaintPage, DomainError> {
        let options = ListOptions {
            status: None,
            ..options.clone()
        };
        self.page(Scope::Unassigned, &options).await
    }

    async fn count_by_owner(
        &self,
        owner: &UserId,
        status: Option<ComplaintStatus>,
    ) -> Result<u64, DomainError> {
        self.count(Scope::Owner(owner), status).await
    }

    async fn count_by_assignee(
        &self,
        technician: &UserId,
        status: Option<ComplaintStatus>,
    ) -> Result<u64, DomainError> {
        self.count(Scope::Assignee(technician), status).await
    }

    async fn count_unassigned(&self) -> Result<u64, DomainError> {
        self.count(Scope::Unassigned, None).await
    }
}

fn update_if_sql() -> String {
    format!(
        r#"
        UPDATE complaints SET
            status = COALESCE($2, status),
            assignee_id = COALESCE($3, assignee_id),
            resolution_notes = COALESCE($4, resolution_notes),
            updated_at = $5
        WHERE id = $1
          AND status = $6
          AND assignee_id IS NOT DISTINCT FROM $7
          AND resolution_notes IS NOT DISTINCT FROM $8
        RETURNING {}
        "#,
        COLUMNS
    )
}

fn row_to_complaint(row: PgRow) -> Result<Complaint, DomainError> {
    let status: String = column(&row, "status")?;
    let status: ComplaintStatus = status
        .parse()
        .map_err(|e| DomainError::database(format!("Invalid complaint status: {}", e)))?;

    let owner: String = column(&row, "owner_id")?;
    let assignee: Option<String> = column(&row, "assignee_id")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(&row, "updated_at")?;

    Ok(Complaint::reconstitute(
        ComplaintId::from_uuid(column(&row, "id")?),
        UserId::new(owner).map_err(|e| DomainError::database(format!("Invalid owner_id: {}", e)))?,
        column(&row, "title")?,
        column(&row, "category")?,
        column(&row, "description")?,
        ServiceLocation {
            address: column(&row, "address")?,
            city: column(&row, "city")?,
            district: column(&row, "district")?,
            contact_phone: column(&row, "contact_phone")?,
            notes: column(&row, "address_notes")?,
        },
        status,
        assignee
            .map(UserId::new)
            .transpose()
            .map_err(|e| DomainError::database(format!("Invalid assignee_id: {}", e)))?,
        column(&row, "resolution_notes")?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
