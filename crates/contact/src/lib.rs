mod submit_form;
mod value_object;

pub use submit_form::*;
pub use value_object::*;
