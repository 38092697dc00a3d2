// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP backend speaking the hosted platform's PostgREST-style row API.
//!
//! Rows travel as JSON; filters ride the query string (`col=eq.value`).
//! Inserts send `Prefer: return=representation` so generated ids come back
//! in the response. The wire structs below mirror the platform's column
//! names; the platform owns the schema.

use crate::StoreClient;
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shala_domain::{
    AccessStatus, Assignment, AssignmentBooking, Booking, BookingStatus, BookingType, ClassPackage,
    ClassStatus, Container, CourseType, InstructorStatus, InvoiceCalculation, PaymentStatus,
    PaymentType, ScheduleType, WeeklySchedule, weekday_from_index, weekday_index,
};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Request timeout for store round-trips.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the hosted row API.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL of the platform (without the `/rest/v1` suffix).
    pub base_url: String,
    /// API key sent as both `apikey` and bearer token, when present.
    pub api_key: Option<String>,
}

/// The HTTP row-API store backend.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestStore {
    /// Creates a new REST store client.
    ///
    /// # Errors
    ///
    /// Returns an error when the API key cannot be encoded as a header or
    /// the HTTP client cannot be built.
    pub fn new(config: RestConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|e| {
                StoreError::Configuration(format!("invalid API key header value: {e}"))
            })?;
            headers.insert("apikey", value);
            let bearer = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
                StoreError::Configuration(format!("invalid API key header value: {e}"))
            })?;
            headers.insert("authorization", bearer);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    async fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .client
            .get(self.table_url(table))
            .query(query)
            .send()
            .await?;
        let status = response.status();
        debug!(table, status = %status, "store select");
        if !status.is_success() {
            return Err(StoreError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }

    async fn insert_rows<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("prefer", "return=representation")
            .query(&[("select", "id")])
            .json(body)
            .send()
            .await?;
        let status = response.status();
        debug!(table, status = %status, "store insert");
        if !status.is_success() {
            return Err(StoreError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }

    async fn patch_rows<B: Serialize + ?Sized>(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.table_url(table))
            .query(query)
            .json(body)
            .send()
            .await?;
        let status = response.status();
        debug!(table, status = %status, "store update");
        if !status.is_success() {
            return Err(StoreError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }

    async fn rpc<B: Serialize + ?Sized>(&self, function: &str, body: &B) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/rpc/{function}", self.base_url);
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        debug!(function, status = %status, "store rpc");
        if !status.is_success() {
            return Err(StoreError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

fn in_filter(values: &[String]) -> String {
    format!("in.({})", values.join(","))
}

fn uuid_in_filter(ids: &[Uuid]) -> String {
    let joined = ids
        .iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({joined})")
}

// ---------------------------------------------------------------------------
// Wire rows
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct IdRow {
    id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
struct BookingRow {
    booking_id: String,
    #[serde(default)]
    user_id: Option<Uuid>,
    #[serde(default)]
    client_name: Option<String>,
    #[serde(default)]
    client_email: Option<String>,
    booking_type: BookingType,
    status: BookingStatus,
    access_status: AccessStatus,
    #[serde(default)]
    is_recurring: Option<bool>,
    #[serde(default)]
    billing_cycle_anchor: Option<NaiveDate>,
    #[serde(default)]
    class_package_id: Option<Uuid>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            booking_code: row.booking_id,
            user_id: row.user_id,
            client_name: row.client_name.unwrap_or_default(),
            client_email: row.client_email,
            booking_type: row.booking_type,
            status: row.status,
            access_status: row.access_status,
            is_recurring: row.is_recurring.unwrap_or(false),
            billing_cycle_anchor: row.billing_cycle_anchor,
            package_id: row.class_package_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PackageRow {
    id: Uuid,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    class_count: Option<u32>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    course_type: Option<CourseType>,
    #[serde(default)]
    validity_days: Option<u32>,
    #[serde(default)]
    duration: Option<String>,
}

impl From<PackageRow> for ClassPackage {
    fn from(row: PackageRow) -> Self {
        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            class_count: row.class_count.unwrap_or(0),
            price: row.price.unwrap_or(0.0),
            course_type: row.course_type.unwrap_or(CourseType::Regular),
            validity_days: row.validity_days,
            duration_label: row.duration,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AssignmentRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class_type_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class_package_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scheduled_class_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class_container_id: Option<Uuid>,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    instructor_id: Uuid,
    payment_amount: f64,
    payment_type: PaymentType,
    schedule_type: ScheduleType,
    booking_type: BookingType,
    class_status: ClassStatus,
    payment_status: PaymentStatus,
    instructor_status: InstructorStatus,
    assigned_by: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    calendar_month: Option<String>,
    #[serde(default)]
    is_adjustment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    adjustment_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl From<&Assignment> for AssignmentRow {
    fn from(assignment: &Assignment) -> Self {
        Self {
            id: assignment.id,
            class_type_id: assignment.class_type_id,
            class_package_id: assignment.package_id,
            scheduled_class_id: assignment.scheduled_class_id,
            class_container_id: assignment.container_id,
            date: assignment.date,
            start_time: assignment.start_time,
            end_time: assignment.end_time,
            instructor_id: assignment.instructor_id,
            payment_amount: assignment.payment_amount,
            payment_type: assignment.payment_type,
            schedule_type: assignment.schedule_type,
            booking_type: assignment.booking_type,
            class_status: assignment.class_status,
            payment_status: assignment.payment_status,
            instructor_status: assignment.instructor_status,
            assigned_by: assignment.assigned_by,
            calendar_month: assignment.calendar_month.clone(),
            is_adjustment: assignment.is_adjustment,
            adjustment_reason: assignment.adjustment_reason.clone(),
            notes: assignment.notes.clone(),
        }
    }
}

impl From<AssignmentRow> for Assignment {
    fn from(row: AssignmentRow) -> Self {
        Self {
            id: row.id,
            class_type_id: row.class_type_id,
            package_id: row.class_package_id,
            scheduled_class_id: row.scheduled_class_id,
            container_id: row.class_container_id,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            instructor_id: row.instructor_id,
            payment_amount: row.payment_amount,
            payment_type: row.payment_type,
            schedule_type: row.schedule_type,
            booking_type: row.booking_type,
            class_status: row.class_status,
            payment_status: row.payment_status,
            instructor_status: row.instructor_status,
            assigned_by: row.assigned_by,
            calendar_month: row.calendar_month,
            is_adjustment: row.is_adjustment,
            adjustment_reason: row.adjustment_reason,
            notes: row.notes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ContainerRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    container_code: String,
    display_name: String,
    container_type: BookingType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instructor_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    package_id: Option<Uuid>,
    #[serde(default)]
    max_booking_count: Option<u32>,
    #[serde(default)]
    is_active: Option<bool>,
}

impl From<ContainerRow> for Container {
    fn from(row: ContainerRow) -> Self {
        Self {
            id: row.id,
            container_code: row.container_code,
            display_name: row.display_name,
            container_type: row.container_type,
            instructor_id: row.instructor_id,
            package_id: row.package_id,
            max_booking_count: row.max_booking_count.unwrap_or(1),
            is_active: row.is_active.unwrap_or(true),
        }
    }
}

impl From<&Container> for ContainerRow {
    fn from(container: &Container) -> Self {
        Self {
            id: container.id,
            container_code: container.container_code.clone(),
            display_name: container.display_name.clone(),
            container_type: container.container_type,
            instructor_id: container.instructor_id,
            package_id: container.package_id,
            max_booking_count: Some(container.max_booking_count),
            is_active: Some(container.is_active),
        }
    }
}

#[derive(Debug, Serialize)]
struct LinkRow {
    assignment_id: Uuid,
    booking_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_container_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ScheduleRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class_type_id: Option<Uuid>,
    day_of_week: u8,
    start_time: NaiveTime,
    end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instructor_id: Option<Uuid>,
    #[serde(default)]
    duration_minutes: Option<u32>,
    #[serde(default)]
    max_participants: Option<u32>,
    #[serde(default)]
    is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl TryFrom<ScheduleRow> for WeeklySchedule {
    type Error = StoreError;

    fn try_from(row: ScheduleRow) -> Result<Self, Self::Error> {
        let day_of_week = weekday_from_index(row.day_of_week)
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Self {
            id: row.id,
            class_type_id: row.class_type_id,
            day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
            instructor_id: row.instructor_id,
            duration_minutes: row.duration_minutes.unwrap_or(60),
            max_participants: row.max_participants.unwrap_or(10),
            is_active: row.is_active.unwrap_or(true),
            notes: row.notes,
        })
    }
}

impl From<&WeeklySchedule> for ScheduleRow {
    fn from(schedule: &WeeklySchedule) -> Self {
        Self {
            id: schedule.id,
            class_type_id: schedule.class_type_id,
            day_of_week: weekday_index(schedule.day_of_week),
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            instructor_id: schedule.instructor_id,
            duration_minutes: Some(schedule.duration_minutes),
            max_participants: Some(schedule.max_participants),
            is_active: Some(schedule.is_active),
            notes: schedule.notes.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct InvoicePayload<'a> {
    booking_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<Uuid>,
    calendar_month: &'a str,
    billing_period_start: NaiveDate,
    billing_period_end: NaiveDate,
    base_amount: f64,
    tax_rate: f64,
    tax_amount: f64,
    total_amount: f64,
    due_date: NaiveDate,
    is_first_month: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    proration_note: Option<&'a str>,
}

#[async_trait]
impl StoreClient for RestStore {
    async fn booking_exists(&self, booking_code: &str) -> Result<bool, StoreError> {
        let rows: Vec<serde_json::Value> = self
            .select_rows(
                "bookings",
                &[
                    ("select", String::from("booking_id")),
                    ("booking_id", format!("eq.{booking_code}")),
                    ("limit", String::from("1")),
                ],
            )
            .await?;
        Ok(!rows.is_empty())
    }

    async fn fetch_bookings(&self, booking_codes: &[String]) -> Result<Vec<Booking>, StoreError> {
        if booking_codes.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<BookingRow> = self
            .select_rows(
                "bookings",
                &[("booking_id", in_filter(booking_codes))],
            )
            .await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn update_booking_status(
        &self,
        booking_code: &str,
        status: BookingStatus,
    ) -> Result<(), StoreError> {
        self.patch_rows(
            "bookings",
            &[("booking_id", format!("eq.{booking_code}"))],
            &serde_json::json!({ "status": status.as_str() }),
        )
        .await
    }

    async fn mark_booking_recurring(
        &self,
        booking_code: &str,
        anchor: NaiveDate,
        package_id: Option<Uuid>,
    ) -> Result<(), StoreError> {
        let mut body = serde_json::json!({
            "is_recurring": true,
            "billing_cycle_anchor": anchor,
        });
        if let (Some(package), Some(map)) = (package_id, body.as_object_mut()) {
            map.insert(
                String::from("class_package_id"),
                serde_json::json!(package),
            );
        }
        self.patch_rows(
            "bookings",
            &[("booking_id", format!("eq.{booking_code}"))],
            &body,
        )
        .await
    }

    async fn set_billing_anchor(
        &self,
        booking_code: &str,
        anchor: NaiveDate,
    ) -> Result<(), StoreError> {
        self.patch_rows(
            "bookings",
            &[("booking_id", format!("eq.{booking_code}"))],
            &serde_json::json!({ "billing_cycle_anchor": anchor }),
        )
        .await
    }

    async fn fetch_package(&self, package_id: Uuid) -> Result<Option<ClassPackage>, StoreError> {
        let rows: Vec<PackageRow> = self
            .select_rows(
                "class_packages",
                &[
                    ("id", format!("eq.{package_id}")),
                    ("limit", String::from("1")),
                ],
            )
            .await?;
        Ok(rows.into_iter().next().map(ClassPackage::from))
    }

    async fn insert_assignments(
        &self,
        assignments: &[Assignment],
    ) -> Result<Vec<Uuid>, StoreError> {
        if assignments.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<AssignmentRow> = assignments.iter().map(AssignmentRow::from).collect();
        let inserted: Vec<IdRow> = self.insert_rows("class_assignments", &rows).await?;
        Ok(inserted.into_iter().map(|row| row.id).collect())
    }

    async fn update_assignment_status(
        &self,
        assignment_id: Uuid,
        status: ClassStatus,
    ) -> Result<(), StoreError> {
        self.patch_rows(
            "class_assignments",
            &[("id", format!("eq.{assignment_id}"))],
            &serde_json::json!({ "class_status": status.as_str() }),
        )
        .await
    }

    async fn assignments_on(
        &self,
        instructor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Assignment>, StoreError> {
        let rows: Vec<AssignmentRow> = self
            .select_rows(
                "class_assignments",
                &[
                    ("instructor_id", format!("eq.{instructor_id}")),
                    ("date", format!("eq.{date}")),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Assignment::from).collect())
    }

    async fn future_weekly_assignments(
        &self,
        instructor_id: Uuid,
        class_type_id: Option<Uuid>,
        start_time: NaiveTime,
        from_date: NaiveDate,
    ) -> Result<Vec<Assignment>, StoreError> {
        let mut query = vec![
            ("instructor_id", format!("eq.{instructor_id}")),
            ("schedule_type", String::from("eq.weekly")),
            ("date", format!("gte.{from_date}")),
            ("start_time", format!("eq.{}", start_time.format("%H:%M:%S"))),
            ("order", String::from("date.asc")),
        ];
        if let Some(class_type) = class_type_id {
            query.push(("class_type_id", format!("eq.{class_type}")));
        }
        let rows: Vec<AssignmentRow> = self.select_rows("class_assignments", &query).await?;
        Ok(rows.into_iter().map(Assignment::from).collect())
    }

    async fn month_assignments(
        &self,
        instructor_id: Uuid,
        month_key: &str,
    ) -> Result<Vec<Assignment>, StoreError> {
        let rows: Vec<AssignmentRow> = self
            .select_rows(
                "class_assignments",
                &[
                    ("instructor_id", format!("eq.{instructor_id}")),
                    ("calendar_month", format!("eq.{month_key}")),
                    ("schedule_type", String::from("eq.monthly")),
                    ("order", String::from("date.asc")),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Assignment::from).collect())
    }

    async fn adjustment_exists(
        &self,
        instructor_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> Result<bool, StoreError> {
        let rows: Vec<serde_json::Value> = self
            .select_rows(
                "class_assignments",
                &[
                    ("select", String::from("id")),
                    ("instructor_id", format!("eq.{instructor_id}")),
                    ("date", format!("eq.{date}")),
                    ("start_time", format!("eq.{}", start_time.format("%H:%M:%S"))),
                    ("is_adjustment", String::from("eq.true")),
                    ("limit", String::from("1")),
                ],
            )
            .await?;
        Ok(!rows.is_empty())
    }

    async fn attach_container(
        &self,
        assignment_ids: &[Uuid],
        container_id: Uuid,
    ) -> Result<(), StoreError> {
        if assignment_ids.is_empty() {
            return Ok(());
        }
        self.patch_rows(
            "class_assignments",
            &[("id", uuid_in_filter(assignment_ids))],
            &serde_json::json!({ "class_container_id": container_id }),
        )
        .await?;
        self.patch_rows(
            "assignment_bookings",
            &[("assignment_id", uuid_in_filter(assignment_ids))],
            &serde_json::json!({ "class_container_id": container_id }),
        )
        .await
    }

    async fn insert_assignment_bookings(
        &self,
        links: &[AssignmentBooking],
    ) -> Result<(), StoreError> {
        if links.is_empty() {
            return Ok(());
        }
        let rows: Vec<LinkRow> = links
            .iter()
            .map(|link| LinkRow {
                assignment_id: link.assignment_id,
                booking_id: link.booking_code.clone(),
                class_container_id: link.container_id,
            })
            .collect();
        let _: Vec<serde_json::Value> = self.insert_rows("assignment_bookings", &rows).await?;
        Ok(())
    }

    async fn find_container(&self, container_code: &str) -> Result<Option<Container>, StoreError> {
        let rows: Vec<ContainerRow> = self
            .select_rows(
                "class_containers",
                &[
                    ("container_code", format!("eq.{container_code}")),
                    ("limit", String::from("1")),
                ],
            )
            .await?;
        Ok(rows.into_iter().next().map(Container::from))
    }

    async fn insert_container(&self, container: &Container) -> Result<Uuid, StoreError> {
        let inserted: Vec<IdRow> = self
            .insert_rows("class_containers", &[ContainerRow::from(container)])
            .await?;
        inserted
            .into_iter()
            .next()
            .map(|row| row.id)
            .ok_or_else(|| {
                StoreError::Decode(String::from("container insert returned no rows"))
            })
    }

    async fn fetch_weekly_schedule(
        &self,
        template_id: Uuid,
    ) -> Result<Option<WeeklySchedule>, StoreError> {
        let rows: Vec<ScheduleRow> = self
            .select_rows(
                "class_schedules",
                &[
                    ("id", format!("eq.{template_id}")),
                    ("limit", String::from("1")),
                ],
            )
            .await?;
        rows.into_iter().next().map(WeeklySchedule::try_from).transpose()
    }

    async fn active_weekly_schedules(
        &self,
        instructor_id: Uuid,
    ) -> Result<Vec<WeeklySchedule>, StoreError> {
        let rows: Vec<ScheduleRow> = self
            .select_rows(
                "class_schedules",
                &[
                    ("instructor_id", format!("eq.{instructor_id}")),
                    ("is_active", String::from("eq.true")),
                ],
            )
            .await?;
        rows.into_iter().map(WeeklySchedule::try_from).collect()
    }

    async fn first_active_schedule(&self) -> Result<Option<Uuid>, StoreError> {
        let rows: Vec<IdRow> = self
            .select_rows(
                "class_schedules",
                &[
                    ("select", String::from("id")),
                    ("is_active", String::from("eq.true")),
                    ("limit", String::from("1")),
                ],
            )
            .await?;
        Ok(rows.into_iter().next().map(|row| row.id))
    }

    async fn insert_weekly_schedule(&self, schedule: &WeeklySchedule) -> Result<Uuid, StoreError> {
        let inserted: Vec<IdRow> = self
            .insert_rows("class_schedules", &[ScheduleRow::from(schedule)])
            .await?;
        inserted
            .into_iter()
            .next()
            .map(|row| row.id)
            .ok_or_else(|| StoreError::Decode(String::from("schedule insert returned no rows")))
    }

    async fn assign_schedule_instructor(
        &self,
        template_id: Uuid,
        instructor_id: Uuid,
        notes: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut body = serde_json::json!({ "instructor_id": instructor_id });
        if let (Some(text), Some(map)) = (notes, body.as_object_mut()) {
            map.insert(String::from("notes"), serde_json::json!(text));
        }
        self.patch_rows(
            "class_schedules",
            &[("id", format!("eq.{template_id}"))],
            &body,
        )
        .await
    }

    async fn create_invoice(&self, invoice: &InvoiceCalculation) -> Result<(), StoreError> {
        let payload = InvoicePayload {
            booking_id: &invoice.booking_code,
            user_id: invoice.user_id,
            calendar_month: &invoice.calendar_month,
            billing_period_start: invoice.period_start,
            billing_period_end: invoice.period_end,
            base_amount: invoice.base_amount,
            tax_rate: invoice.tax_rate,
            tax_amount: invoice.tax_amount,
            total_amount: invoice.total_amount,
            due_date: invoice.due_date,
            is_first_month: invoice.is_first_month,
            proration_note: invoice.proration.as_ref().map(|p| p.note.as_str()),
        };
        self.rpc("generate_invoice", &payload).await
    }
}
