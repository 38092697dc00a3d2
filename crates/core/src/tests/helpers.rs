// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request::{BookingSelection, PaymentTerms};
use crate::AssignmentService;
use chrono::{NaiveDate, NaiveTime};
use shala_domain::{
    AccessStatus, Booking, BookingStatus, BookingType, ClassPackage, CourseType, PaymentType,
};
use shala_store::MemoryStore;
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn service() -> AssignmentService<MemoryStore> {
    AssignmentService::new(MemoryStore::new())
}

pub fn booking(code: &str, booking_type: BookingType, access: AccessStatus) -> Booking {
    Booking {
        booking_code: code.to_string(),
        user_id: Some(Uuid::new_v4()),
        client_name: String::from("Asha Rao"),
        client_email: Some(String::from("asha@example.com")),
        booking_type,
        status: BookingStatus::Confirmed,
        access_status: access,
        is_recurring: false,
        billing_cycle_anchor: None,
        package_id: None,
    }
}

pub fn package(class_count: u32, validity_days: Option<u32>, course_type: CourseType) -> ClassPackage {
    ClassPackage {
        id: Uuid::new_v4(),
        name: String::from("Morning Flow"),
        class_count,
        price: 4000.0,
        course_type,
        validity_days,
        duration_label: None,
    }
}

pub fn per_class(amount: f64) -> PaymentTerms {
    PaymentTerms::new(PaymentType::PerClass, amount).unwrap()
}

pub fn single_booking(code: &str, booking_type: BookingType) -> BookingSelection {
    BookingSelection::new(&[code.to_string()], booking_type)
}
