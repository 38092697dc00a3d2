// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    analyze_shortfall, check_conflicts, create_adjustment, create_assignment, fill_shortfall,
    update_assignment_status,
};
pub use request_response::{
    AdjustmentApiRequest, AdjustmentResponse, ConflictCheckRequest, ConflictCheckResponse,
    ConflictDto, CreateAssignmentApiRequest, CreateAssignmentResponse, FillShortfallRequest,
    FillShortfallResponse, ManualSelectionDto, RecommendationDto, ShortfallRequest,
    ShortfallResponse, UpdateAssignmentStatusRequest, UpdateAssignmentStatusResponse, WarningDto,
};
