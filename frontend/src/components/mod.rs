pub mod handlers;
pub mod header;
pub mod object_selection;
pub mod preview_area;
pub mod results;
pub mod stepper;
pub mod upload_section;
pub mod utils;
