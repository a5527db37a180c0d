//! Validation modules

pub mod form;

pub use form::{
    validate_filename, validate_update_form, validate_upload_form, MAX_SHOP_NAME_LENGTH,
};
