pub mod header;
pub mod upload_area;
pub mod classifier_demo;
pub mod logbook_demo;
