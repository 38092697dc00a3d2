// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Remote data-store client for the Shala studio backend.
//!
//! The hosted platform owns every table this crate touches; nothing here
//! defines schema. [`StoreClient`] is the single boundary the orchestration
//! layer depends on, always injected rather than imported as a singleton,
//! so tests can substitute [`MemoryStore`].
//!
//! Two backends exist behind the [`Store`] dispatch enum:
//!
//! - [`RestStore`] speaks the platform's PostgREST-style row API over HTTP.
//! - [`MemoryStore`] holds rows in memory. It backs unit tests and local
//!   development runs, and is the default when no store URL is configured.
//!
//! Backend selection happens once at construction time and is transparent
//! to callers.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use shala_domain::{
    Assignment, AssignmentBooking, Booking, BookingStatus, ClassPackage, ClassStatus, Container,
    InvoiceCalculation, WeeklySchedule,
};
use uuid::Uuid;

mod error;
mod http;
mod memory;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use http::{RestConfig, RestStore};
pub use memory::MemoryStore;

/// The remote data-store boundary.
///
/// Every method is one logical round-trip against the hosted platform.
/// Implementations must be safe to share behind an `Arc`.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Checks whether a booking with the given external code exists.
    async fn booking_exists(&self, booking_code: &str) -> Result<bool, StoreError>;

    /// Fetches the bookings for the given external codes.
    ///
    /// Codes with no matching row are simply absent from the result.
    async fn fetch_bookings(&self, booking_codes: &[String]) -> Result<Vec<Booking>, StoreError>;

    /// Updates a booking's lifecycle status.
    async fn update_booking_status(
        &self,
        booking_code: &str,
        status: BookingStatus,
    ) -> Result<(), StoreError>;

    /// Marks a booking as recurring, stamping the billing anchor and the
    /// package it was sold against.
    async fn mark_booking_recurring(
        &self,
        booking_code: &str,
        anchor: NaiveDate,
        package_id: Option<Uuid>,
    ) -> Result<(), StoreError>;

    /// Sets a booking's billing cycle anchor date.
    async fn set_billing_anchor(
        &self,
        booking_code: &str,
        anchor: NaiveDate,
    ) -> Result<(), StoreError>;

    /// Fetches a package by id.
    async fn fetch_package(&self, package_id: Uuid) -> Result<Option<ClassPackage>, StoreError>;

    /// Inserts a batch of assignments, returning the generated row ids in
    /// insertion order.
    async fn insert_assignments(&self, assignments: &[Assignment]) -> Result<Vec<Uuid>, StoreError>;

    /// Updates one assignment's class status.
    async fn update_assignment_status(
        &self,
        assignment_id: Uuid,
        status: ClassStatus,
    ) -> Result<(), StoreError>;

    /// Fetches an instructor's assignments on one date.
    async fn assignments_on(
        &self,
        instructor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Assignment>, StoreError>;

    /// Fetches an instructor's future weekly-type assignments at an exact
    /// start time, on or after `from_date`, optionally narrowed to one
    /// class type.
    async fn future_weekly_assignments(
        &self,
        instructor_id: Uuid,
        class_type_id: Option<Uuid>,
        start_time: NaiveTime,
        from_date: NaiveDate,
    ) -> Result<Vec<Assignment>, StoreError>;

    /// Fetches an instructor's monthly-type assignments for one calendar
    /// month key.
    async fn month_assignments(
        &self,
        instructor_id: Uuid,
        month_key: &str,
    ) -> Result<Vec<Assignment>, StoreError>;

    /// Checks whether an adjustment row already exists for an instructor,
    /// date, and start time.
    async fn adjustment_exists(
        &self,
        instructor_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> Result<bool, StoreError>;

    /// Attaches a container to the given assignment rows.
    async fn attach_container(
        &self,
        assignment_ids: &[Uuid],
        container_id: Uuid,
    ) -> Result<(), StoreError>;

    /// Inserts assignment-to-booking link rows.
    async fn insert_assignment_bookings(
        &self,
        links: &[AssignmentBooking],
    ) -> Result<(), StoreError>;

    /// Looks up a container by its generated code.
    async fn find_container(&self, container_code: &str) -> Result<Option<Container>, StoreError>;

    /// Inserts a container, returning its generated id.
    async fn insert_container(&self, container: &Container) -> Result<Uuid, StoreError>;

    /// Fetches a weekly schedule template by id.
    async fn fetch_weekly_schedule(
        &self,
        template_id: Uuid,
    ) -> Result<Option<WeeklySchedule>, StoreError>;

    /// Fetches an instructor's active weekly schedule templates.
    async fn active_weekly_schedules(
        &self,
        instructor_id: Uuid,
    ) -> Result<Vec<WeeklySchedule>, StoreError>;

    /// Returns the id of any one active weekly schedule, used as the
    /// fallback template link for adhoc rows.
    async fn first_active_schedule(&self) -> Result<Option<Uuid>, StoreError>;

    /// Inserts a weekly schedule template, returning its generated id.
    async fn insert_weekly_schedule(&self, schedule: &WeeklySchedule) -> Result<Uuid, StoreError>;

    /// Assigns an instructor (and optional notes) to an existing template.
    async fn assign_schedule_instructor(
        &self,
        template_id: Uuid,
        instructor_id: Uuid,
        notes: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Invokes the platform's invoice-generation function.
    async fn create_invoice(&self, invoice: &InvoiceCalculation) -> Result<(), StoreError>;
}

/// Backend-dispatching store adapter.
///
/// Construct once with [`Store::rest`] or [`Store::in_memory`]; everything
/// downstream works with the one public type.
pub enum Store {
    /// The HTTP row-API backend.
    Rest(RestStore),
    /// The in-memory backend.
    Memory(MemoryStore),
}

impl Store {
    /// Creates a store backed by the hosted row API.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built from the
    /// configuration.
    pub fn rest(config: RestConfig) -> Result<Self, StoreError> {
        Ok(Self::Rest(RestStore::new(config)?))
    }

    /// Creates an in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::Memory(MemoryStore::new())
    }
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $call:expr) => {
        match $self {
            Store::Rest($inner) => $call,
            Store::Memory($inner) => $call,
        }
    };
}

#[async_trait]
impl StoreClient for Store {
    async fn booking_exists(&self, booking_code: &str) -> Result<bool, StoreError> {
        dispatch!(self, inner => inner.booking_exists(booking_code).await)
    }

    async fn fetch_bookings(&self, booking_codes: &[String]) -> Result<Vec<Booking>, StoreError> {
        dispatch!(self, inner => inner.fetch_bookings(booking_codes).await)
    }

    async fn update_booking_status(
        &self,
        booking_code: &str,
        status: BookingStatus,
    ) -> Result<(), StoreError> {
        dispatch!(self, inner => inner.update_booking_status(booking_code, status).await)
    }

    async fn mark_booking_recurring(
        &self,
        booking_code: &str,
        anchor: NaiveDate,
        package_id: Option<Uuid>,
    ) -> Result<(), StoreError> {
        dispatch!(self, inner => inner.mark_booking_recurring(booking_code, anchor, package_id).await)
    }

    async fn set_billing_anchor(
        &self,
        booking_code: &str,
        anchor: NaiveDate,
    ) -> Result<(), StoreError> {
        dispatch!(self, inner => inner.set_billing_anchor(booking_code, anchor).await)
    }

    async fn fetch_package(&self, package_id: Uuid) -> Result<Option<ClassPackage>, StoreError> {
        dispatch!(self, inner => inner.fetch_package(package_id).await)
    }

    async fn insert_assignments(
        &self,
        assignments: &[Assignment],
    ) -> Result<Vec<Uuid>, StoreError> {
        dispatch!(self, inner => inner.insert_assignments(assignments).await)
    }

    async fn update_assignment_status(
        &self,
        assignment_id: Uuid,
        status: ClassStatus,
    ) -> Result<(), StoreError> {
        dispatch!(self, inner => inner.update_assignment_status(assignment_id, status).await)
    }

    async fn assignments_on(
        &self,
        instructor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Assignment>, StoreError> {
        dispatch!(self, inner => inner.assignments_on(instructor_id, date).await)
    }

    async fn future_weekly_assignments(
        &self,
        instructor_id: Uuid,
        class_type_id: Option<Uuid>,
        start_time: NaiveTime,
        from_date: NaiveDate,
    ) -> Result<Vec<Assignment>, StoreError> {
        dispatch!(self, inner => inner
            .future_weekly_assignments(instructor_id, class_type_id, start_time, from_date)
            .await)
    }

    async fn month_assignments(
        &self,
        instructor_id: Uuid,
        month_key: &str,
    ) -> Result<Vec<Assignment>, StoreError> {
        dispatch!(self, inner => inner.month_assignments(instructor_id, month_key).await)
    }

    async fn adjustment_exists(
        &self,
        instructor_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> Result<bool, StoreError> {
        dispatch!(self, inner => inner.adjustment_exists(instructor_id, date, start_time).await)
    }

    async fn attach_container(
        &self,
        assignment_ids: &[Uuid],
        container_id: Uuid,
    ) -> Result<(), StoreError> {
        dispatch!(self, inner => inner.attach_container(assignment_ids, container_id).await)
    }

    async fn insert_assignment_bookings(
        &self,
        links: &[AssignmentBooking],
    ) -> Result<(), StoreError> {
        dispatch!(self, inner => inner.insert_assignment_bookings(links).await)
    }

    async fn find_container(&self, container_code: &str) -> Result<Option<Container>, StoreError> {
        dispatch!(self, inner => inner.find_container(container_code).await)
    }

    async fn insert_container(&self, container: &Container) -> Result<Uuid, StoreError> {
        dispatch!(self, inner => inner.insert_container(container).await)
    }

    async fn fetch_weekly_schedule(
        &self,
        template_id: Uuid,
    ) -> Result<Option<WeeklySchedule>, StoreError> {
        dispatch!(self, inner => inner.fetch_weekly_schedule(template_id).await)
    }

    async fn active_weekly_schedules(
        &self,
        instructor_id: Uuid,
    ) -> Result<Vec<WeeklySchedule>, StoreError> {
        dispatch!(self, inner => inner.active_weekly_schedules(instructor_id).await)
    }

    async fn first_active_schedule(&self) -> Result<Option<Uuid>, StoreError> {
        dispatch!(self, inner => inner.first_active_schedule().await)
    }

    async fn insert_weekly_schedule(&self, schedule: &WeeklySchedule) -> Result<Uuid, StoreError> {
        dispatch!(self, inner => inner.insert_weekly_schedule(schedule).await)
    }

    async fn assign_schedule_instructor(
        &self,
        template_id: Uuid,
        instructor_id: Uuid,
        notes: Option<&str>,
    ) -> Result<(), StoreError> {
        dispatch!(self, inner => inner
            .assign_schedule_instructor(template_id, instructor_id, notes)
            .await)
    }

    async fn create_invoice(&self, invoice: &InvoiceCalculation) -> Result<(), StoreError> {
        dispatch!(self, inner => inner.create_invoice(invoice).await)
    }
}
