// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory store backend.
//!
//! Behaviorally equivalent to the hosted row API for everything the
//! orchestration layer exercises. Backs unit tests, and serves as the
//! default backend for local development runs where no store URL is
//! configured. Failure injection flags let tests exercise the degraded
//! side-effect paths.

use crate::StoreClient;
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use shala_domain::{
    Assignment, AssignmentBooking, Booking, BookingStatus, ClassPackage, ClassStatus, Container,
    InvoiceCalculation, ScheduleType, WeeklySchedule,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    bookings: Vec<Booking>,
    packages: Vec<ClassPackage>,
    assignments: Vec<Assignment>,
    links: Vec<AssignmentBooking>,
    containers: Vec<Container>,
    schedules: Vec<WeeklySchedule>,
    invoices: Vec<InvoiceCalculation>,
}

/// The in-memory store backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_link_inserts: AtomicBool,
    fail_invoice_calls: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a booking row.
    pub async fn seed_booking(&self, booking: Booking) {
        self.inner.lock().await.bookings.push(booking);
    }

    /// Seeds a package row.
    pub async fn seed_package(&self, package: ClassPackage) {
        self.inner.lock().await.packages.push(package);
    }

    /// Seeds an assignment row, assigning an id when absent.
    pub async fn seed_assignment(&self, mut assignment: Assignment) -> Uuid {
        let id = assignment.id.unwrap_or_else(Uuid::new_v4);
        assignment.id = Some(id);
        self.inner.lock().await.assignments.push(assignment);
        id
    }

    /// Seeds a weekly schedule template, assigning an id when absent.
    pub async fn seed_schedule(&self, mut schedule: WeeklySchedule) -> Uuid {
        let id = schedule.id.unwrap_or_else(Uuid::new_v4);
        schedule.id = Some(id);
        self.inner.lock().await.schedules.push(schedule);
        id
    }

    /// Makes subsequent link inserts fail, for degraded-path tests.
    pub fn fail_link_inserts(&self) {
        self.fail_link_inserts.store(true, Ordering::SeqCst);
    }

    /// Makes subsequent invoice calls fail, for degraded-path tests.
    pub fn fail_invoice_calls(&self) {
        self.fail_invoice_calls.store(true, Ordering::SeqCst);
    }

    /// Snapshot of all assignment rows.
    pub async fn assignments(&self) -> Vec<Assignment> {
        self.inner.lock().await.assignments.clone()
    }

    /// Snapshot of all link rows.
    pub async fn links(&self) -> Vec<AssignmentBooking> {
        self.inner.lock().await.links.clone()
    }

    /// Snapshot of all container rows.
    pub async fn containers(&self) -> Vec<Container> {
        self.inner.lock().await.containers.clone()
    }

    /// Snapshot of all booking rows.
    pub async fn bookings(&self) -> Vec<Booking> {
        self.inner.lock().await.bookings.clone()
    }

    /// Snapshot of all generated invoices.
    pub async fn invoices(&self) -> Vec<InvoiceCalculation> {
        self.inner.lock().await.invoices.clone()
    }

    /// Snapshot of all weekly schedule templates.
    pub async fn schedules(&self) -> Vec<WeeklySchedule> {
        self.inner.lock().await.schedules.clone()
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn booking_exists(&self, booking_code: &str) -> Result<bool, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .bookings
            .iter()
            .any(|booking| booking.booking_code == booking_code))
    }

    async fn fetch_bookings(&self, booking_codes: &[String]) -> Result<Vec<Booking>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .bookings
            .iter()
            .filter(|booking| booking_codes.contains(&booking.booking_code))
            .cloned()
            .collect())
    }

    async fn update_booking_status(
        &self,
        booking_code: &str,
        status: BookingStatus,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for booking in &mut inner.bookings {
            if booking.booking_code == booking_code {
                booking.status = status;
            }
        }
        Ok(())
    }

    async fn mark_booking_recurring(
        &self,
        booking_code: &str,
        anchor: NaiveDate,
        package_id: Option<Uuid>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for booking in &mut inner.bookings {
            if booking.booking_code == booking_code {
                booking.is_recurring = true;
                booking.billing_cycle_anchor = Some(anchor);
                if package_id.is_some() {
                    booking.package_id = package_id;
                }
            }
        }
        Ok(())
    }

    async fn set_billing_anchor(
        &self,
        booking_code: &str,
        anchor: NaiveDate,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for booking in &mut inner.bookings {
            if booking.booking_code == booking_code {
                booking.billing_cycle_anchor = Some(anchor);
            }
        }
        Ok(())
    }

    async fn fetch_package(&self, package_id: Uuid) -> Result<Option<ClassPackage>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .packages
            .iter()
            .find(|package| package.id == package_id)
            .cloned())
    }

    async fn insert_assignments(
        &self,
        assignments: &[Assignment],
    ) -> Result<Vec<Uuid>, StoreError> {
        let mut inner = self.inner.lock().await;
        let mut ids = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            let id = Uuid::new_v4();
            let mut row = assignment.clone();
            row.id = Some(id);
            inner.assignments.push(row);
            ids.push(id);
        }
        Ok(ids)
    }

    async fn update_assignment_status(
        &self,
        assignment_id: Uuid,
        status: ClassStatus,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let row = inner
            .assignments
            .iter_mut()
            .find(|assignment| assignment.id == Some(assignment_id))
            .ok_or_else(|| StoreError::NotFound(format!("assignment {assignment_id}")))?;
        row.class_status = status;
        Ok(())
    }

    async fn assignments_on(
        &self,
        instructor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Assignment>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .assignments
            .iter()
            .filter(|assignment| {
                assignment.instructor_id == instructor_id && assignment.date == date
            })
            .cloned()
            .collect())
    }

    async fn future_weekly_assignments(
        &self,
        instructor_id: Uuid,
        class_type_id: Option<Uuid>,
        start_time: NaiveTime,
        from_date: NaiveDate,
    ) -> Result<Vec<Assignment>, StoreError> {
        let inner = self.inner.lock().await;
        let mut rows: Vec<Assignment> = inner
            .assignments
            .iter()
            .filter(|assignment| {
                assignment.instructor_id == instructor_id
                    && assignment.schedule_type == ScheduleType::Weekly
                    && assignment.date >= from_date
                    && assignment.start_time == start_time
                    && (class_type_id.is_none() || assignment.class_type_id == class_type_id)
            })
            .cloned()
            .collect();
        rows.sort_by_key(|assignment| assignment.date);
        Ok(rows)
    }

    async fn month_assignments(
        &self,
        instructor_id: Uuid,
        month_key: &str,
    ) -> Result<Vec<Assignment>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .assignments
            .iter()
            .filter(|assignment| {
                assignment.instructor_id == instructor_id
                    && assignment.schedule_type == ScheduleType::Monthly
                    && assignment.calendar_month.as_deref() == Some(month_key)
            })
            .cloned()
            .collect())
    }

    async fn adjustment_exists(
        &self,
        instructor_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> Result<bool, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.assignments.iter().any(|assignment| {
            assignment.instructor_id == instructor_id
                && assignment.date == date
                && assignment.start_time == start_time
                && assignment.is_adjustment
        }))
    }

    async fn attach_container(
        &self,
        assignment_ids: &[Uuid],
        container_id: Uuid,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for assignment in &mut inner.assignments {
            if let Some(id) = assignment.id {
                if assignment_ids.contains(&id) {
                    assignment.container_id = Some(container_id);
                }
            }
        }
        for link in &mut inner.links {
            if assignment_ids.contains(&link.assignment_id) {
                link.container_id = Some(container_id);
            }
        }
        Ok(())
    }

    async fn insert_assignment_bookings(
        &self,
        links: &[AssignmentBooking],
    ) -> Result<(), StoreError> {
        if self.fail_link_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Http {
                status: 500,
                body: String::from("link insert failure injected"),
            });
        }
        let mut inner = self.inner.lock().await;
        for link in links {
            let duplicate = inner.links.iter().any(|existing| {
                existing.assignment_id == link.assignment_id
                    && existing.booking_code == link.booking_code
            });
            if duplicate {
                return Err(StoreError::Http {
                    status: 409,
                    body: format!(
                        "duplicate assignment_bookings row for {}",
                        link.booking_code
                    ),
                });
            }
            inner.links.push(link.clone());
        }
        Ok(())
    }

    async fn find_container(&self, container_code: &str) -> Result<Option<Container>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .containers
            .iter()
            .find(|container| container.container_code == container_code)
            .cloned())
    }

    async fn insert_container(&self, container: &Container) -> Result<Uuid, StoreError> {
        let mut inner = self.inner.lock().await;
        let id = Uuid::new_v4();
        let mut row = container.clone();
        row.id = Some(id);
        inner.containers.push(row);
        Ok(id)
    }

    async fn fetch_weekly_schedule(
        &self,
        template_id: Uuid,
    ) -> Result<Option<WeeklySchedule>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .schedules
            .iter()
            .find(|schedule| schedule.id == Some(template_id))
            .cloned())
    }

    async fn active_weekly_schedules(
        &self,
        instructor_id: Uuid,
    ) -> Result<Vec<WeeklySchedule>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .schedules
            .iter()
            .filter(|schedule| {
                schedule.is_active && schedule.instructor_id == Some(instructor_id)
            })
            .cloned()
            .collect())
    }

    async fn first_active_schedule(&self) -> Result<Option<Uuid>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .schedules
            .iter()
            .find(|schedule| schedule.is_active)
            .and_then(|schedule| schedule.id))
    }

    async fn insert_weekly_schedule(&self, schedule: &WeeklySchedule) -> Result<Uuid, StoreError> {
        let mut inner = self.inner.lock().await;
        let id = Uuid::new_v4();
        let mut row = schedule.clone();
        row.id = Some(id);
        inner.schedules.push(row);
        Ok(id)
    }

    async fn assign_schedule_instructor(
        &self,
        template_id: Uuid,
        instructor_id: Uuid,
        notes: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let schedule = inner
            .schedules
            .iter_mut()
            .find(|schedule| schedule.id == Some(template_id))
            .ok_or_else(|| StoreError::NotFound(format!("class schedule {template_id}")))?;
        schedule.instructor_id = Some(instructor_id);
        if notes.is_some() {
            schedule.notes = notes.map(ToString::to_string);
        }
        Ok(())
    }

    async fn create_invoice(&self, invoice: &InvoiceCalculation) -> Result<(), StoreError> {
        if self.fail_invoice_calls.load(Ordering::SeqCst) {
            return Err(StoreError::Http {
                status: 500,
                body: String::from("invoice failure injected"),
            });
        }
        self.inner.lock().await.invoices.push(invoice.clone());
        Ok(())
    }
}
