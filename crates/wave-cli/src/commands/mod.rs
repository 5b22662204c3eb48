pub mod import_featured;
