pub mod adapters;
pub mod error;
pub mod fields;
pub mod geostrophy;
pub mod models;
pub mod shape;

pub use crate::adapters::funnel::{ct_freezing_poly, in_funnel};
pub use crate::adapters::teos10::{specvol, specvol_anom_standard, specvol_sso_0};
pub use crate::error::{AppError, Result};
pub use crate::fields::{in_funnel_field, specvol_anom_standard_field};
pub use crate::geostrophy::dynamic_height::{dynamic_height, profile_dynamic_height};
pub use crate::geostrophy::interpolation::{interpolate, interpolate_in_profile};
pub use crate::geostrophy::montgomery::{montgomery_streamfunction, profile_montgomery};
pub use crate::models::{DynHeightOptions, Field, InterpMode, Level, Profile, ProfileField};
