pub mod contact_sheet;
pub mod image_writer;
