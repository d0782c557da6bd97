// SPDX-License-Identifier: MPL-2.0

//! Media pipelines
//!
//! - [`photo`]: filter transforms and JPEG output

pub mod photo;
